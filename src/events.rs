//! Requests accepted and events emitted by the navigation state machine.
use crate::input::InputMode;

/// A direction on the directional input device.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    South,
    North,
    East,
    West,
}

/// A navigation command, for hosts that map their own bindings.
///
/// [`FocusNavigator::tick`](crate::FocusNavigator::tick) derives these from
/// raw stick/d-pad state; a host with its own input layer (keyboard
/// shortcuts, remote control, tests) can instead feed them directly to
/// [`FocusNavigator::handle`](crate::FocusNavigator::handle).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NavRequest {
    /// Move the selection ([`North`](Direction::North)/[`South`](Direction::South))
    /// or adjust the selected item ([`West`](Direction::West)/[`East`](Direction::East)).
    Move(Direction),
    /// Activate the selected item.
    Action,
    /// Go back, through the panel's `Back` affordance when there is one.
    Cancel,
}

/// Visual state change the host must render.
///
/// Drained from the navigator with
/// [`FocusNavigator::drain_events`](crate::FocusNavigator::drain_events)
/// within the same tick the change happened. `T` is the host's widget handle.
///
/// Semantic effects (activations, slider commits, custom adjusts) do not
/// appear here; those go through the callbacks bound on each
/// [`SelectableItem`](crate::SelectableItem).
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent<T> {
    /// The active input modality switched. Emitted exactly once per
    /// transition, never while a mode is merely sustained.
    ModeChanged { from: InputMode, to: InputMode },
    /// Highlight moved to `to`.
    ///
    /// `from` is the highlight target to clear, `None` when no item was
    /// highlighted before: first arming, or right after a panel rebuild.
    /// The previous panel's widgets are destroyed with the panel, so no
    /// clear event is emitted for them.
    FocusChanged { to: T, from: Option<T> },
    /// Highlight cleared with no replacement. Always emitted on a
    /// transition into [`InputMode::Pointer`] while an item was highlighted.
    FocusCleared { from: T },
}
