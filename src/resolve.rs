//! The focus navigation state machine.
//!
//! [`FocusNavigator`] consumes the current [`InputMode`] and the active
//! panel's [`SelectableSet`] to maintain a single selection, move highlight,
//! and dispatch activate/adjust/back to the item callbacks. It is the one
//! place where the two input modalities are reconciled: pointer control
//! clears directional highlight, directional control re-shows it, and no
//! single physical input ever acts under the mode it just replaced.
//!
//! Nothing in here is allowed to take down the host frame loop. Empty panels
//! are a legitimate transient state during panel transitions and are
//! silently ignored; stale indices are clamped (loudly, in debug builds).
use std::borrow::Cow;
use std::collections::VecDeque;
use std::time::Duration;

use crate::events::{Direction, NavEvent, NavRequest};
use crate::input::{
    DirectionalInput, InputMapping, InputMode, InputModeTracker, ModeChange, PointerInput,
};
use crate::selectable::{ItemKind, SelectableItem, SelectableSet};

/// Where the selection currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    /// The active panel has no selectable items.
    Empty,
    /// Items exist but none is highlighted: either the pointer holds
    /// control, or the panel has a single item (typically a lone back
    /// affordance) and the user has not explicitly navigated yet. `staged`
    /// is the index the first directional input will arm.
    Unselected { staged: usize },
    /// The item at this index is highlighted and receives input.
    Selected(usize),
}

#[derive(Debug, Clone, Copy, Default)]
struct EdgeLatches {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

type BackFn = Box<dyn FnMut()>;

/// Cooperative selection driver for a directional and a pointing device.
///
/// Owned by the menu screen and driven once per frame through
/// [`Self::tick`] (or per request through [`Self::handle`]). The screen
/// rebuilds the item set on every panel change with
/// [`Self::on_panel_changed`] and renders whatever [`Self::drain_events`]
/// reports. All state is exclusively owned here; there is no background
/// work, no timers, only comparisons against the monotonic timestamps the
/// host passes in.
pub struct FocusNavigator<T> {
    mapping: InputMapping,
    tracker: InputModeTracker,
    set: SelectableSet<T>,
    state: FocusState,
    latches: EdgeLatches,
    last_step: Option<Duration>,
    events: VecDeque<NavEvent<T>>,
    back_identity: Cow<'static, str>,
    fallback_back: Option<BackFn>,
}

impl<T: Clone> Default for FocusNavigator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> FocusNavigator<T> {
    pub fn new() -> Self {
        Self::with_mapping(InputMapping::default())
    }

    pub fn with_mapping(mapping: InputMapping) -> Self {
        FocusNavigator {
            tracker: InputModeTracker::new(&mapping),
            mapping,
            set: SelectableSet::new(),
            state: FocusState::Empty,
            latches: EdgeLatches::default(),
            last_step: None,
            events: VecDeque::new(),
            back_identity: Cow::Borrowed("Back"),
            fallback_back: None,
        }
    }

    /// Handler for [`Self::go_back`] when the active panel has no back
    /// affordance, e.g. "return to the root menu".
    pub fn with_fallback_back(mut self, f: impl FnMut() + 'static) -> Self {
        self.fallback_back = Some(Box::new(f));
        self
    }

    /// Identity [`Self::go_back`] looks up in the active panel.
    /// Defaults to `"Back"`.
    pub fn with_back_identity(mut self, identity: impl Into<Cow<'static, str>>) -> Self {
        self.back_identity = identity.into();
        self
    }

    pub fn current_mode(&self) -> InputMode {
        self.tracker.current_mode()
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    /// The active panel's items, e.g. to read back slider values.
    pub fn selectables(&self) -> &SelectableSet<T> {
        &self.set
    }

    /// Identity of the highlighted item, `None` while nothing is. Combined
    /// with [`Self::current_mode`] this is what a screen needs to show a
    /// "press to navigate" hint on single-item panels.
    pub fn highlighted_identity(&self) -> Option<&str> {
        match self.state {
            FocusState::Selected(index) => self.set.item_at(index).ok().map(|i| i.identity()),
            _ => None,
        }
    }

    /// Visual changes since the last drain, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = NavEvent<T>> + '_ {
        self.events.drain(..)
    }

    /// Replaces the navigable items for a new panel.
    ///
    /// The selection restarts at the top: straight to highlight when the
    /// directional device holds control and there is more than one item,
    /// staged-but-unhighlighted otherwise. No clear event is emitted for the
    /// previous panel; its widgets are destroyed with it.
    pub fn on_panel_changed(&mut self, items: Vec<SelectableItem<T>>) {
        self.set.rebuild(items);
        let len = self.set.len();
        if len == 0 {
            self.state = FocusState::Empty;
            return;
        }
        self.state = FocusState::Unselected { staged: 0 };
        if self.tracker.current_mode() == InputMode::Directional && len > 1 {
            self.select(0);
        }
    }

    /// Drives the navigator from raw device state, once per frame.
    ///
    /// The mode tracker is sampled before anything is dispatched, so a mode
    /// change and a navigation caused by the same physical event always land
    /// in the same frame, and never in the replaced mode.
    pub fn tick(&mut self, pointer: &PointerInput, pad: &DirectionalInput, now: Duration) {
        if let Some(change) = self.tracker.report_directional_activity(pad) {
            self.on_mode_changed(change, pad);
        }
        // pointer sampled second: on a tie, the pointer wins
        if let Some(change) = self.tracker.report_pointer_activity(pointer) {
            self.on_mode_changed(change, pad);
        }
        if self.tracker.current_mode() == InputMode::Directional {
            self.dispatch_directional(pad, now);
        }
    }

    /// Drives the navigator from pre-mapped requests, for hosts with their
    /// own bindings. A request is directional activity: it flips the mode
    /// first if the pointer held control. Bypasses the edge latches, not the
    /// repeat floor.
    pub fn handle(&mut self, request: NavRequest, now: Duration) {
        match request {
            NavRequest::Move(Direction::North) => self.navigate(-1, now),
            NavRequest::Move(Direction::South) => self.navigate(1, now),
            NavRequest::Move(Direction::West) => self.adjust(-1, now),
            NavRequest::Move(Direction::East) => self.adjust(1, now),
            NavRequest::Action => self.activate(),
            NavRequest::Cancel => self.go_back(),
        }
    }

    /// Moves the selection by `direction` (+1 down, -1 up), wrapping at both
    /// ends.
    ///
    /// From [`FocusState::Unselected`] the first call arms the staged index
    /// without moving further. A call that flips the mode to directional is
    /// consumed by the flip. No-op on an empty set, and at most one step per
    /// [repeat floor](InputMapping::repeat_floor).
    pub fn navigate(&mut self, direction: i32, now: Duration) {
        if self.intercepted_mode_switch() || !self.step_allowed(now) {
            return;
        }
        let len = self.set.len();
        match self.state {
            FocusState::Empty => {}
            FocusState::Unselected { staged } => {
                // first press arms, it does not move
                self.select(staged.min(len.saturating_sub(1)));
                self.last_step = Some(now);
            }
            FocusState::Selected(_) if len == 0 => self.state = FocusState::Empty,
            FocusState::Selected(index) => {
                let index = index.min(len - 1);
                let next = (index as i64 + direction as i64).rem_euclid(len as i64) as usize;
                self.select(next);
                self.last_step = Some(now);
            }
        }
    }

    /// Adjusts the selected item by `direction` (-1 left, +1 right).
    ///
    /// Sliders clamp into their range and report through their
    /// value-changed callback; other items with a bound adjust callback get
    /// it invoked; anything else logs and does nothing. Subject to the same
    /// mode-flip consumption and repeat floor as [`Self::navigate`].
    pub fn adjust(&mut self, direction: i32, now: Duration) {
        if self.intercepted_mode_switch() || !self.step_allowed(now) {
            return;
        }
        let FocusState::Selected(index) = self.state else {
            log::debug!("adjust ignored: no item selected");
            return;
        };
        let len = self.set.len();
        if len == 0 {
            self.state = FocusState::Empty;
            return;
        }
        debug_assert!(index < len, "stale selection index {index} (set has {len} items)");
        let Ok(item) = self.set.item_at_mut(index.min(len - 1)) else {
            return;
        };
        let slider_commit = match item.kind_mut() {
            ItemKind::Slider(params) => {
                let value =
                    (params.current + direction as f32 * params.step).clamp(params.min, params.max);
                params.current = value;
                Some(value)
            }
            _ => None,
        };
        let stepped = match slider_commit {
            Some(value) => {
                item.invoke_value_changed(value);
                log::trace!("adjusted {:?} to {value:.2}", item.identity());
                true
            }
            None => {
                let adjusted = item.invoke_adjust(direction);
                if !adjusted {
                    log::warn!("cannot adjust {:?}: no adjust behavior bound", item.identity());
                }
                adjusted
            }
        };
        if stepped {
            self.last_step = Some(now);
        }
    }

    /// Invokes the selected item's activation callback, exactly once,
    /// synchronously. No-op (logged) when nothing is selected or the item
    /// has no activation.
    pub fn activate(&mut self) {
        self.mode_flip_for_edge();
        let FocusState::Selected(index) = self.state else {
            log::debug!("activate ignored: no item selected");
            return;
        };
        let len = self.set.len();
        if len == 0 {
            self.state = FocusState::Empty;
            return;
        }
        debug_assert!(index < len, "stale selection index {index} (set has {len} items)");
        let Ok(item) = self.set.item_at_mut(index.min(len - 1)) else {
            return;
        };
        if !item.invoke_activate() {
            match item.kind() {
                ItemKind::Slider(_) => log::trace!("sliders have no activation"),
                _ => log::debug!("no activation callback bound on {:?}", item.identity()),
            }
        }
    }

    /// Activates the panel's back affordance
    /// ([`with_back_identity`](Self::with_back_identity), `"Back"` by
    /// default), falling back to the
    /// [`with_fallback_back`](Self::with_fallback_back) handler.
    pub fn go_back(&mut self) {
        self.mode_flip_for_edge();
        if let Some(index) = self.set.find_by_identity(&self.back_identity) {
            if let Ok(item) = self.set.item_at_mut(index) {
                if item.invoke_activate() {
                    return;
                }
            }
            log::warn!("back affordance {:?} has no activation callback", self.back_identity);
        }
        match self.fallback_back.as_mut() {
            Some(f) => f(),
            None => log::warn!(
                "no {:?} item in the active panel and no fallback back handler",
                self.back_identity
            ),
        }
    }

    /// A directional request while the pointer holds control first hands
    /// control over; the input that flips the mode never also steps.
    fn intercepted_mode_switch(&mut self) -> bool {
        if self.tracker.current_mode() == InputMode::Directional {
            return false;
        }
        self.mode_flip_for_edge();
        true
    }

    /// Button edges act right after flipping the mode (a confirm press from
    /// pointer mode lands on whatever the flip highlighted), unlike axis
    /// deflections which are consumed by it.
    fn mode_flip_for_edge(&mut self) {
        if let Some(change) = self.tracker.set_mode(InputMode::Directional) {
            self.on_mode_changed(change, &DirectionalInput::default());
        }
    }

    fn on_mode_changed(&mut self, ModeChange { from, to }: ModeChange, pad: &DirectionalInput) {
        log::debug!("input mode now {to:?}");
        self.events.push_back(NavEvent::ModeChanged { from, to });
        match to {
            InputMode::Pointer => self.clear_highlight(),
            InputMode::Directional => {
                // single-item panels stay unhighlighted until the user
                // explicitly navigates
                if self.set.len() > 1 {
                    self.select(self.staged_index());
                }
                // latch axes already deflected: the push that flipped the
                // mode must not also step
                let combined = pad.combined();
                let th = self.mapping.step_threshold;
                self.latches = EdgeLatches {
                    up: combined.y > th,
                    down: combined.y < -th,
                    left: combined.x < -th,
                    right: combined.x > th,
                };
            }
        }
    }

    fn dispatch_directional(&mut self, pad: &DirectionalInput, now: Duration) {
        let combined = pad.combined();
        let th = self.mapping.step_threshold;
        // the repeat floor gates the whole axis block; latches neither set
        // nor clear inside the window, so a held stick stays debounced
        if self.step_allowed(now) {
            if combined.y > th {
                if !self.latches.up {
                    self.latches.up = true;
                    self.navigate(-1, now);
                }
            } else {
                self.latches.up = false;
            }
            if combined.y < -th {
                if !self.latches.down {
                    self.latches.down = true;
                    self.navigate(1, now);
                }
            } else {
                self.latches.down = false;
            }
            if combined.x < -th {
                if !self.latches.left {
                    self.latches.left = true;
                    self.adjust(-1, now);
                }
            } else {
                self.latches.left = false;
            }
            if combined.x > th {
                if !self.latches.right {
                    self.latches.right = true;
                    self.adjust(1, now);
                }
            } else {
                self.latches.right = false;
            }
        }
        if pad.confirm_edge {
            self.activate();
        }
        if pad.cancel_edge {
            self.go_back();
        }
    }

    fn step_allowed(&self, now: Duration) -> bool {
        self.last_step
            .map_or(true, |last| now.saturating_sub(last) >= self.mapping.repeat_floor)
    }

    fn staged_index(&self) -> usize {
        match self.state {
            FocusState::Empty => 0,
            FocusState::Unselected { staged } => staged,
            FocusState::Selected(index) => index,
        }
    }

    fn select(&mut self, index: usize) {
        let len = self.set.len();
        if len == 0 {
            self.state = FocusState::Empty;
            return;
        }
        debug_assert!(index < len, "selection index {index} out of range (set has {len} items)");
        let index = index.min(len - 1);
        if self.state == FocusState::Selected(index) {
            return;
        }
        let from = match self.state {
            FocusState::Selected(prev) => {
                self.set.item_at(prev).ok().map(|item| item.highlight_target().clone())
            }
            _ => None,
        };
        let Ok(item) = self.set.item_at(index) else {
            return;
        };
        let to = item.highlight_target().clone();
        log::trace!("focus -> {:?}", item.identity());
        self.state = FocusState::Selected(index);
        self.events.push_back(NavEvent::FocusChanged { to, from });
    }

    fn clear_highlight(&mut self) {
        if let FocusState::Selected(index) = self.state {
            if let Ok(item) = self.set.item_at(index) {
                let from = item.highlight_target().clone();
                self.events.push_back(NavEvent::FocusCleared { from });
            }
            self.state = FocusState::Unselected { staged: index };
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;

    use super::*;
    use crate::selectable::SliderParams;

    type Log = Rc<RefCell<Vec<String>>>;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn stick(x: f32, y: f32) -> DirectionalInput {
        DirectionalInput { stick: Vec2::new(x, y), ..Default::default() }
    }

    fn pointer_swipe() -> PointerInput {
        PointerInput { delta: Vec2::new(12.0, 3.0), ..Default::default() }
    }

    fn record(log: &Log, what: &str) -> impl FnMut() + 'static {
        let log = Rc::clone(log);
        let what = what.to_owned();
        move || log.borrow_mut().push(what.clone())
    }

    /// The options-screen shape from the settings menu: two carousel rows
    /// and a back button.
    fn video_panel(log: &Log) -> Vec<SelectableItem<&'static str>> {
        let adjust_log = Rc::clone(log);
        vec![
            SelectableItem::custom("Video", "video-row")
                .on_activate(record(log, "video"))
                .on_adjust(move |d| adjust_log.borrow_mut().push(format!("video:{d}"))),
            SelectableItem::custom("Sound", "sound-row").on_activate(record(log, "sound")),
            SelectableItem::button("Back", "back-btn").on_activate(record(log, "back")),
        ]
    }

    fn directional_nav(items: Vec<SelectableItem<&'static str>>) -> FocusNavigator<&'static str> {
        let mut nav = FocusNavigator::new();
        nav.tracker.set_mode(InputMode::Directional);
        nav.on_panel_changed(items);
        nav
    }

    #[test]
    fn wraparound_round_trip() {
        let log = Log::default();
        let mut nav = directional_nav(video_panel(&log));
        assert_eq!(nav.state(), FocusState::Selected(0));
        for i in 0..3 {
            nav.navigate(1, ms(1000 + i * 200));
        }
        assert_eq!(nav.state(), FocusState::Selected(0));
        // and the other way around
        for i in 0..3 {
            nav.navigate(-1, ms(2000 + i * 200));
        }
        assert_eq!(nav.state(), FocusState::Selected(0));
    }

    #[test]
    fn empty_set_is_inert() {
        let log = Log::default();
        let mut nav: FocusNavigator<&'static str> =
            FocusNavigator::new().with_fallback_back(record(&log, "fallback"));
        nav.on_panel_changed(Vec::new());
        assert_eq!(nav.state(), FocusState::Empty);

        nav.navigate(1, ms(0));
        nav.navigate(-1, ms(500));
        nav.adjust(1, ms(1000));
        nav.activate();
        assert_eq!(nav.state(), FocusState::Empty);
        assert!(log.borrow().is_empty());
        assert!(nav
            .drain_events()
            .all(|ev| matches!(ev, NavEvent::ModeChanged { .. })));
    }

    #[test]
    fn single_item_panel_stays_unhighlighted() {
        let log = Log::default();
        let mut nav = directional_nav(vec![
            SelectableItem::button("Back", "back-btn").on_activate(record(&log, "back")),
        ]);
        // no highlight flash when a lone-back panel opens
        assert_eq!(nav.state(), FocusState::Unselected { staged: 0 });
        assert_eq!(nav.highlighted_identity(), None);

        // the first press arms, it does not step
        nav.navigate(1, ms(1000));
        assert_eq!(nav.state(), FocusState::Selected(0));
        assert_eq!(nav.highlighted_identity(), Some("Back"));
    }

    #[test]
    fn pointer_transition_always_clears_highlight() {
        let log = Log::default();
        let mut nav = directional_nav(video_panel(&log));
        nav.navigate(1, ms(1000));
        assert_eq!(nav.state(), FocusState::Selected(1));
        nav.drain_events().count();

        nav.tick(&pointer_swipe(), &DirectionalInput::default(), ms(1500));
        assert_eq!(nav.current_mode(), InputMode::Pointer);
        assert_eq!(nav.state(), FocusState::Unselected { staged: 1 });
        let events: Vec<_> = nav.drain_events().collect();
        assert!(events.contains(&NavEvent::FocusCleared { from: "sound-row" }));
    }

    #[test]
    fn directional_return_reshows_previous_selection() {
        let log = Log::default();
        let mut nav = directional_nav(video_panel(&log));
        nav.navigate(1, ms(1000));
        nav.tick(&pointer_swipe(), &DirectionalInput::default(), ms(1500));
        nav.drain_events().count();

        // back to the pad: highlight returns where it was, not at 0
        nav.tick(&PointerInput::default(), &stick(0.0, -0.9), ms(2000));
        assert_eq!(nav.state(), FocusState::Selected(1));
        let events: Vec<_> = nav.drain_events().collect();
        assert!(events.contains(&NavEvent::FocusChanged { to: "sound-row", from: None }));
    }

    #[test]
    fn slider_adjust_clamps() {
        let values: Rc<RefCell<Vec<f32>>> = Rc::default();
        let seen = Rc::clone(&values);
        let mut nav = directional_nav(vec![
            SelectableItem::slider(
                "Music Volume",
                "music-slider",
                SliderParams { min: 0.0, max: 1.0, step: 0.1, current: 0.95 },
            )
            .with_highlight_target("music-container")
            .on_value_changed(move |v| seen.borrow_mut().push(v)),
            SelectableItem::button("Back", "back-btn"),
        ]);
        assert_eq!(nav.state(), FocusState::Selected(0));

        nav.adjust(1, ms(1000));
        assert_eq!(*values.borrow(), [1.0]);
        assert_eq!(nav.selectables().item_at(0).unwrap().slider_value(), Some(1.0));

        nav.adjust(-1, ms(1200));
        nav.adjust(-1, ms(1400));
        assert_eq!(nav.selectables().item_at(0).unwrap().slider_value(), Some(0.8));
    }

    #[test]
    fn custom_adjust_side_channel() {
        let log = Log::default();
        let mut nav = directional_nav(video_panel(&log));
        nav.adjust(1, ms(1000));
        nav.adjust(-1, ms(1200));
        assert_eq!(*log.borrow(), ["video:1", "video:-1"]);
    }

    #[test]
    fn adjust_without_binding_is_a_logged_noop() {
        let log = Log::default();
        let mut nav = directional_nav(video_panel(&log));
        nav.navigate(1, ms(1000)); // "Sound" has no adjust callback
        nav.adjust(1, ms(1200));
        assert_eq!(nav.state(), FocusState::Selected(1));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn three_item_walk_wraps_exactly_at_boundary() {
        // rebuild happened under pointer control: Unselected with 3 items
        let log = Log::default();
        let mut nav = FocusNavigator::new();
        nav.on_panel_changed(video_panel(&log));
        assert_eq!(nav.state(), FocusState::Unselected { staged: 0 });

        let walk = [
            (1000, FocusState::Selected(0), "Video"), // flip to directional shows 0
            (1200, FocusState::Selected(1), "Sound"),
            (1400, FocusState::Selected(2), "Back"),
            (1600, FocusState::Selected(0), "Video"), // wraps at length boundary
        ];
        for (t, state, identity) in walk {
            nav.navigate(1, ms(t));
            assert_eq!(nav.state(), state);
            assert_eq!(nav.highlighted_identity(), Some(identity));
        }
    }

    #[test]
    fn repeat_floor_debounces_rapid_steps() {
        let log = Log::default();
        let mut nav = directional_nav(video_panel(&log));
        nav.navigate(1, ms(1000));
        assert_eq!(nav.state(), FocusState::Selected(1));
        // 50ms later, under the 120ms floor: swallowed
        nav.navigate(1, ms(1050));
        assert_eq!(nav.state(), FocusState::Selected(1));
        nav.navigate(1, ms(1130));
        assert_eq!(nav.state(), FocusState::Selected(2));
    }

    #[test]
    fn held_stick_steps_once() {
        let log = Log::default();
        let mut nav = directional_nav(video_panel(&log));
        let held = stick(0.0, -0.9);
        for frame in 0..30 {
            nav.tick(&PointerInput::default(), &held, ms(1000 + frame * 16));
        }
        assert_eq!(nav.state(), FocusState::Selected(1));

        // release, then push again: second step
        nav.tick(&PointerInput::default(), &DirectionalInput::default(), ms(2000));
        nav.tick(&PointerInput::default(), &held, ms(2016));
        assert_eq!(nav.state(), FocusState::Selected(2));
    }

    #[test]
    fn mode_flipping_deflection_does_not_step() {
        let log = Log::default();
        let mut nav = FocusNavigator::new();
        nav.on_panel_changed(video_panel(&log));
        assert_eq!(nav.current_mode(), InputMode::Pointer);

        // the push that hands control to the pad only re-shows highlight
        nav.tick(&PointerInput::default(), &stick(0.0, -0.9), ms(1000));
        assert_eq!(nav.current_mode(), InputMode::Directional);
        assert_eq!(nav.state(), FocusState::Selected(0));
    }

    #[test]
    fn confirm_edge_activates_exactly_once() {
        let log = Log::default();
        let mut nav = directional_nav(video_panel(&log));
        let press = DirectionalInput { confirm_edge: true, ..Default::default() };
        nav.tick(&PointerInput::default(), &press, ms(1000));
        assert_eq!(*log.borrow(), ["video"]);
    }

    #[test]
    fn cancel_edge_goes_through_back_affordance() {
        let log = Log::default();
        let mut nav = directional_nav(video_panel(&log));
        let press = DirectionalInput { cancel_edge: true, ..Default::default() };
        nav.tick(&PointerInput::default(), &press, ms(1000));
        assert_eq!(*log.borrow(), ["back"]);
    }

    #[test]
    fn go_back_falls_back_without_back_item() {
        let log = Log::default();
        let mut nav = directional_nav(vec![
            SelectableItem::button("Continue", "continue-btn").on_activate(record(&log, "continue")),
        ])
        .with_fallback_back(record(&log, "root-menu"));
        nav.go_back();
        assert_eq!(*log.borrow(), ["root-menu"]);
    }

    #[test]
    fn rebuild_restarts_selection_at_top() {
        let log = Log::default();
        let mut nav = directional_nav(video_panel(&log));
        nav.navigate(1, ms(1000));
        nav.navigate(1, ms(1200));
        assert_eq!(nav.state(), FocusState::Selected(2));
        nav.drain_events().count();

        nav.on_panel_changed(vec![
            SelectableItem::button("Continue", "continue-btn"),
            SelectableItem::button("Quit", "quit-btn"),
        ]);
        assert_eq!(nav.state(), FocusState::Selected(0));
        let events: Vec<_> = nav.drain_events().collect();
        assert_eq!(events, [NavEvent::FocusChanged { to: "continue-btn", from: None }]);
    }

    #[test]
    fn requests_map_like_raw_axes() {
        let log = Log::default();
        let mut nav = directional_nav(video_panel(&log));
        nav.handle(NavRequest::Move(Direction::South), ms(1000));
        assert_eq!(nav.state(), FocusState::Selected(1));
        nav.handle(NavRequest::Move(Direction::North), ms(1200));
        assert_eq!(nav.state(), FocusState::Selected(0));
        nav.handle(NavRequest::Move(Direction::East), ms(1400));
        nav.handle(NavRequest::Action, ms(1600));
        assert_eq!(*log.borrow(), ["video:1", "video"]);
    }

    #[test]
    fn stale_selection_index_clamps_back_in_bounds() {
        let log = Log::default();
        let mut nav = directional_nav(video_panel(&log));
        // a host driving state out from under us (panel shrank without a
        // rebuild) must not wedge or escape the set
        nav.state = FocusState::Selected(7);
        nav.navigate(1, ms(1000));
        assert_eq!(nav.state(), FocusState::Selected(0));
        assert_eq!(nav.highlighted_identity(), Some("Video"));
    }

    #[test]
    fn random_walks_stay_in_bounds() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        for _ in 0..50 {
            let len = rng.usize(1..6);
            let items = (0..len)
                .map(|i| SelectableItem::button(format!("item-{i}"), i))
                .collect();
            let mut nav = directional_nav_usize(items);
            let mut t = 1000;
            for _ in 0..40 {
                t += rng.u64(0..300);
                match rng.u8(0..4) {
                    0 => nav.navigate(1, ms(t)),
                    1 => nav.navigate(-1, ms(t)),
                    2 => nav.adjust(if rng.bool() { 1 } else { -1 }, ms(t)),
                    _ => nav.activate(),
                }
                if let FocusState::Selected(index) = nav.state() {
                    assert!(index < len, "index {index} escaped a set of {len}");
                }
            }
        }
    }

    fn directional_nav_usize(items: Vec<SelectableItem<usize>>) -> FocusNavigator<usize> {
        let mut nav = FocusNavigator::new();
        nav.tracker.set_mode(InputMode::Directional);
        nav.on_panel_changed(items);
        nav
    }
}
