//! The navigable items of the currently visible panel.
//!
//! A [`SelectableSet`] holds whatever the active panel exposes to directional
//! navigation. It is rebuilt wholesale on every panel transition, never
//! patched in place; the owning screen constructs the items explicitly at
//! panel-build time instead of re-resolving widgets by name on every tick.
use std::borrow::Cow;
use std::fmt;

use glam::Vec2;
use thiserror::Error;

/// Error for index misuse on a [`SelectableSet`].
///
/// Reaching this is a programmer error; the navigator itself never lets a
/// stale index escape (it clamps defensively, see
/// [`FocusNavigator`](crate::FocusNavigator)).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetError {
    #[error("selectable index {index} out of range (set has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Range, step and current value of an adjustable slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderParams {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub current: f32,
}

impl Default for SliderParams {
    /// A unit volume slider at full, stepping by a tenth.
    fn default() -> Self {
        SliderParams { min: 0.0, max: 1.0, step: 0.1, current: 1.0 }
    }
}

/// What a [`SelectableItem`] does when activated or adjusted.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// Fires its activation callback on confirm.
    Button,
    /// Left/right adjusts the value within the range; the value-changed
    /// callback observes each commit.
    Slider(SliderParams),
    /// Anything else. Behavior comes entirely from the bound callbacks
    /// (e.g. a resolution carousel adjusted left/right).
    Custom,
}

type ActivateFn = Box<dyn FnMut()>;
type AdjustFn = Box<dyn FnMut(i32)>;
type ValueChangedFn = Box<dyn FnMut(f32)>;

/// One navigable UI affordance: a button, a slider or a custom widget.
///
/// `T` is the host's widget handle (an entity id, a node pointer, a string
/// key — anything cloneable). Construct with [`SelectableItem::button`],
/// [`SelectableItem::slider`] or [`SelectableItem::custom`] and chain the
/// `with_*`/`on_*` builders:
///
/// ```
/// use menu_navigation::{SelectableItem, SliderParams};
///
/// let item = SelectableItem::slider("Music Volume", "music-slider", SliderParams::default())
///     .with_highlight_target("music-container")
///     .on_value_changed(|v| println!("music volume: {v:.2}"));
/// assert_eq!(item.identity(), "Music Volume");
/// assert_eq!(*item.highlight_target(), "music-container");
/// ```
pub struct SelectableItem<T> {
    identity: Cow<'static, str>,
    kind: ItemKind,
    widget: T,
    // None means the widget itself takes the highlight
    highlight_target: Option<T>,
    position: Option<Vec2>,
    on_activate: Option<ActivateFn>,
    on_adjust: Option<AdjustFn>,
    on_value_changed: Option<ValueChangedFn>,
}

impl<T> SelectableItem<T> {
    fn new(identity: impl Into<Cow<'static, str>>, kind: ItemKind, widget: T) -> Self {
        SelectableItem {
            identity: identity.into(),
            kind,
            widget,
            highlight_target: None,
            position: None,
            on_activate: None,
            on_adjust: None,
            on_value_changed: None,
        }
    }

    /// An activatable button.
    pub fn button(identity: impl Into<Cow<'static, str>>, widget: T) -> Self {
        Self::new(identity, ItemKind::Button, widget)
    }

    /// An adjustable slider.
    pub fn slider(identity: impl Into<Cow<'static, str>>, widget: T, params: SliderParams) -> Self {
        Self::new(identity, ItemKind::Slider(params), widget)
    }

    /// A custom widget; bind its behavior with [`Self::on_activate`] and
    /// [`Self::on_adjust`].
    pub fn custom(identity: impl Into<Cow<'static, str>>, widget: T) -> Self {
        Self::new(identity, ItemKind::Custom, widget)
    }

    /// Highlight this element instead of the widget itself. Sliders usually
    /// hand the highlight to their surrounding container.
    pub fn with_highlight_target(mut self, target: T) -> Self {
        self.highlight_target = Some(target);
        self
    }

    /// On-screen position, used to keep navigation order aligned with the
    /// visual top-to-bottom order. See [`SelectableSet::rebuild`].
    ///
    /// The y axis points up: the visually topmost item has the highest
    /// `y`. Hosts with y-down screen coordinates must negate `y` before
    /// passing it in.
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = Some(position);
        self
    }

    /// Called synchronously when the item is activated.
    pub fn on_activate(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_activate = Some(Box::new(f));
        self
    }

    /// Called synchronously when a non-slider item is adjusted left (`-1`)
    /// or right (`+1`).
    pub fn on_adjust(mut self, f: impl FnMut(i32) + 'static) -> Self {
        self.on_adjust = Some(Box::new(f));
        self
    }

    /// Called synchronously with the new value after each slider adjustment.
    pub fn on_value_changed(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_value_changed = Some(Box::new(f));
        self
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn widget(&self) -> &T {
        &self.widget
    }

    /// The element that receives highlight styling: the configured container
    /// if any, otherwise the widget itself.
    pub fn highlight_target(&self) -> &T {
        self.highlight_target.as_ref().unwrap_or(&self.widget)
    }

    /// Current slider value, `None` for non-sliders.
    pub fn slider_value(&self) -> Option<f32> {
        match &self.kind {
            ItemKind::Slider(params) => Some(params.current),
            _ => None,
        }
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ItemKind {
        &mut self.kind
    }

    pub(crate) fn invoke_activate(&mut self) -> bool {
        match self.on_activate.as_mut() {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }

    pub(crate) fn invoke_adjust(&mut self, direction: i32) -> bool {
        match self.on_adjust.as_mut() {
            Some(f) => {
                f(direction);
                true
            }
            None => false,
        }
    }

    pub(crate) fn invoke_value_changed(&mut self, value: f32) {
        if let Some(f) = self.on_value_changed.as_mut() {
            f(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SelectableItem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectableItem")
            .field("identity", &self.identity)
            .field("kind", &self.kind)
            .field("widget", &self.widget)
            .field("highlight_target", &self.highlight_target)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

/// The ordered items of the active panel.
///
/// Insertion order is navigation order, except when every item carries a
/// [position](SelectableItem::with_position): then [`Self::rebuild`] sorts
/// top to bottom, so navigation follows what the user sees even if the
/// screen collected the widgets in another order.
#[derive(Default)]
pub struct SelectableSet<T> {
    items: Vec<SelectableItem<T>>,
}

impl<T> SelectableSet<T> {
    pub fn new() -> Self {
        SelectableSet { items: Vec::new() }
    }

    /// Replaces the contents wholesale. Any selection index held outside the
    /// set is invalidated; the navigator re-derives its highlight right
    /// after.
    ///
    /// When every item carries a [position](SelectableItem::with_position)
    /// the set is sorted by descending `y` (y-up coordinates), so index 0 is
    /// the visually topmost item. Sets with any unpositioned item keep their
    /// construction order.
    pub fn rebuild(&mut self, mut items: Vec<SelectableItem<T>>) {
        if !items.is_empty() && items.iter().all(|item| item.position.is_some()) {
            // +y is up; visual top-to-bottom is descending y
            let key = |item: &SelectableItem<T>| item.position.map_or(0.0, |p| p.y);
            items.sort_by(|a, b| key(b).total_cmp(&key(a)));
        }
        self.items = items;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_at(&self, index: usize) -> Result<&SelectableItem<T>, SetError> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(SetError::IndexOutOfRange { index, len })
    }

    pub fn item_at_mut(&mut self, index: usize) -> Result<&mut SelectableItem<T>, SetError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(SetError::IndexOutOfRange { index, len })
    }

    /// Index of the item with the given identity, e.g. the panel's canonical
    /// `"Back"` affordance.
    pub fn find_by_identity(&self, identity: &str) -> Option<usize> {
        self.items.iter().position(|item| item.identity == identity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectableItem<T>> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buttons(names: &[&'static str]) -> Vec<SelectableItem<u32>> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| SelectableItem::button(*name, i as u32))
            .collect()
    }

    #[test]
    fn rebuild_keeps_insertion_order_without_positions() {
        let mut set = SelectableSet::new();
        set.rebuild(buttons(&["Continue", "Options", "Quit"]));
        let order: Vec<_> = set.iter().map(|i| i.identity().to_owned()).collect();
        assert_eq!(order, ["Continue", "Options", "Quit"]);
    }

    #[test]
    fn rebuild_sorts_by_vertical_position() {
        let mut set = SelectableSet::new();
        set.rebuild(vec![
            SelectableItem::button("Quit", 2u32).with_position(Vec2::new(0.0, 100.0)),
            SelectableItem::button("Continue", 0).with_position(Vec2::new(0.0, 300.0)),
            SelectableItem::button("Options", 1).with_position(Vec2::new(0.0, 200.0)),
        ]);
        let order: Vec<_> = set.iter().map(|i| i.identity().to_owned()).collect();
        assert_eq!(order, ["Continue", "Options", "Quit"]);
    }

    #[test]
    fn rebuild_leaves_partially_positioned_sets_alone() {
        let mut set = SelectableSet::new();
        set.rebuild(vec![
            SelectableItem::button("A", 0u32),
            SelectableItem::button("B", 1).with_position(Vec2::new(0.0, 500.0)),
        ]);
        let order: Vec<_> = set.iter().map(|i| i.identity().to_owned()).collect();
        assert_eq!(order, ["A", "B"]);
    }

    #[test]
    fn item_at_out_of_range() {
        let mut set = SelectableSet::new();
        set.rebuild(buttons(&["Back"]));
        assert!(set.item_at(0).is_ok());
        assert_eq!(
            set.item_at(3).unwrap_err(),
            SetError::IndexOutOfRange { index: 3, len: 1 }
        );
    }

    #[test]
    fn find_back_affordance() {
        let mut set = SelectableSet::new();
        set.rebuild(buttons(&["Video", "Sound", "Back"]));
        assert_eq!(set.find_by_identity("Back"), Some(2));
        assert_eq!(set.find_by_identity("Credits"), None);
    }

    #[test]
    fn highlight_target_defaults_to_widget() {
        let plain = SelectableItem::button("Back", 7u32);
        assert_eq!(*plain.highlight_target(), 7);

        let contained = SelectableItem::slider("SFX Volume", 3u32, SliderParams::default())
            .with_highlight_target(8);
        assert_eq!(*contained.highlight_target(), 8);
    }
}
