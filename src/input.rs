//! Input modality arbitration between pointer and directional devices.
//!
//! A menu screen is driven by two devices at once: a pointing device (mouse,
//! touch) and a directional one (gamepad stick, d-pad). Only one of them is
//! "in control" at a time; [`InputModeTracker`] decides which, with
//! hysteresis so incidental noise from the inactive device does not cause
//! highlight flicker.
use std::time::Duration;

use glam::Vec2;

/// Which device currently drives the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Mouse/touch-style continuous-position input. Menus start here.
    #[default]
    Pointer,
    /// Stick/d-pad/button navigation.
    Directional,
}

/// Thresholds and debounce timings for menu input.
///
/// The defaults are calibrated for a first-party gamepad stick and a desktop
/// mouse; tweak them if your device reports in different units.
#[derive(Debug, Clone)]
pub struct InputMapping {
    /// Pointer delta magnitude (device units per frame) above which pointer
    /// input takes control. Deltas at or below this are treated as jitter.
    pub pointer_activity_threshold: f32,
    /// Stick/d-pad deflection (fraction of full deflection) above which
    /// directional input takes control.
    pub directional_deadzone: f32,
    /// Per-axis deflection above which a held stick registers as a
    /// navigation or adjust step.
    pub step_threshold: f32,
    /// Minimum interval between two navigation/adjust steps. Holds even
    /// when the edge latches are bypassed.
    pub repeat_floor: Duration,
}

impl Default for InputMapping {
    fn default() -> Self {
        InputMapping {
            pointer_activity_threshold: 1.0,
            directional_deadzone: 0.25,
            step_threshold: 0.5,
            repeat_floor: Duration::from_millis(120),
        }
    }
}

/// Pointer state for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerInput {
    /// Position delta since the previous tick, in device units.
    pub delta: Vec2,
    /// A pointer button was pressed this tick.
    pub button_edge: bool,
}

/// Directional device state for one tick.
///
/// Stick and d-pad are reported separately and combined by the navigator, so
/// either can drive navigation (the original hardware reports both at once).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DirectionalInput {
    /// Left stick deflection, `[-1, 1]` per axis, +y up.
    pub stick: Vec2,
    /// D-pad state as a vector, `[-1, 1]` per axis, +y up.
    pub dpad: Vec2,
    /// The confirm button (usually south/A) was pressed this tick.
    pub confirm_edge: bool,
    /// The cancel button (usually east/B) was pressed this tick.
    pub cancel_edge: bool,
    /// Any other gamepad button was pressed this tick. Only used for mode
    /// detection.
    pub any_button_edge: bool,
}

impl DirectionalInput {
    pub(crate) fn combined(&self) -> Vec2 {
        self.stick + self.dpad
    }

    fn any_edge(&self) -> bool {
        self.confirm_edge || self.cancel_edge || self.any_button_edge
    }
}

/// A completed mode transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub from: InputMode,
    pub to: InputMode,
}

/// Classifies raw per-frame input into the active [`InputMode`].
///
/// Mode changes are edge-triggered: the `report_*` methods return a
/// [`ModeChange`] on the tick the mode flips and `None` on every tick it is
/// merely sustained. [`FocusNavigator`](crate::FocusNavigator) owns one and
/// samples it before dispatching any navigation, but the tracker also works
/// standalone (e.g. to show device-specific button glyphs in-game).
#[derive(Debug, Clone)]
pub struct InputModeTracker {
    mode: InputMode,
    pointer_threshold: f32,
    directional_deadzone: f32,
}

impl Default for InputModeTracker {
    fn default() -> Self {
        Self::new(&InputMapping::default())
    }
}

impl InputModeTracker {
    pub fn new(mapping: &InputMapping) -> Self {
        InputModeTracker {
            mode: InputMode::default(),
            pointer_threshold: mapping.pointer_activity_threshold,
            directional_deadzone: mapping.directional_deadzone,
        }
    }

    pub fn current_mode(&self) -> InputMode {
        self.mode
    }

    /// Reports this tick's pointer state. Pointer movement beyond the jitter
    /// threshold or a button press hands control to the pointer.
    pub fn report_pointer_activity(&mut self, input: &PointerInput) -> Option<ModeChange> {
        let active = input.button_edge || input.delta.length() > self.pointer_threshold;
        active.then(|| self.set_mode(InputMode::Pointer)).flatten()
    }

    /// Reports this tick's directional state. Stick or d-pad deflection
    /// beyond the deadzone, or any button press, hands control to the
    /// directional device.
    pub fn report_directional_activity(&mut self, input: &DirectionalInput) -> Option<ModeChange> {
        let active = input.any_edge()
            || input.stick.length() > self.directional_deadzone
            || input.dpad.length() > self.directional_deadzone;
        active.then(|| self.set_mode(InputMode::Directional)).flatten()
    }

    /// Forces the mode. Explicit navigation requests count as directional
    /// activity, so [`FocusNavigator::handle`](crate::FocusNavigator::handle)
    /// goes through here.
    pub fn set_mode(&mut self, mode: InputMode) -> Option<ModeChange> {
        if self.mode == mode {
            return None;
        }
        let change = ModeChange { from: self.mode, to: mode };
        self.mode = mode;
        Some(change)
    }
}
