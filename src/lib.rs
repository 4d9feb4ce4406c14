#![doc = include_str!("../Readme.md")]
pub mod events;
mod input;
mod resolve;
mod selectable;

pub use events::{Direction, NavEvent, NavRequest};
pub use input::{
    DirectionalInput, InputMapping, InputMode, InputModeTracker, ModeChange, PointerInput,
};
pub use resolve::{FocusNavigator, FocusState};
pub use selectable::{ItemKind, SelectableItem, SelectableSet, SetError, SliderParams};
