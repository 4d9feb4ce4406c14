//! Scripted walkthrough of a sound-settings panel: the stick takes control
//! from the mouse, walks to the SFX slider, bumps it twice, then backs out.
use std::time::Duration;

use glam::Vec2;
use menu_navigation::{
    DirectionalInput, FocusNavigator, NavEvent, PointerInput, SelectableItem, SliderParams,
};

fn sound_panel() -> Vec<SelectableItem<&'static str>> {
    vec![
        SelectableItem::slider("Music Volume", "music-slider", SliderParams::default())
            .with_highlight_target("music-container")
            .on_value_changed(|v| println!("  [mixer] music -> {v:.2}")),
        SelectableItem::slider(
            "SFX Volume",
            "sfx-slider",
            SliderParams { current: 0.5, ..Default::default() },
        )
        .with_highlight_target("sfx-container")
        .on_value_changed(|v| println!("  [mixer] sfx -> {v:.2}")),
        SelectableItem::button("Back", "close-sound")
            .on_activate(|| println!("  [screen] back to options")),
    ]
}

fn main() {
    let mut nav =
        FocusNavigator::new().with_fallback_back(|| println!("  [screen] back to main menu"));
    nav.on_panel_changed(sound_panel());

    let still = DirectionalInput::default();
    let down = DirectionalInput { stick: Vec2::new(0.0, -0.9), ..Default::default() };
    let right = DirectionalInput { dpad: Vec2::new(1.0, 0.0), ..Default::default() };
    let cancel = DirectionalInput { cancel_edge: true, ..Default::default() };

    let script: &[(&str, &DirectionalInput, u32)] = &[
        ("push the stick down (takes control from the mouse)", &down, 8),
        ("release", &still, 4),
        ("down again, onto the SFX slider", &down, 8),
        ("release", &still, 4),
        ("d-pad right, first bump", &right, 4),
        ("release", &still, 8),
        ("d-pad right, second bump", &right, 4),
        ("release", &still, 8),
        ("press B", &cancel, 1),
    ];

    let frame = Duration::from_millis(16);
    let mut t = Duration::ZERO;
    for (label, pad, frames) in script {
        println!("{label}");
        for _ in 0..*frames {
            nav.tick(&PointerInput::default(), pad, t);
            t += frame;
        }
        for event in nav.drain_events() {
            match event {
                NavEvent::ModeChanged { from, to } => println!("  [mode] {from:?} -> {to:?}"),
                NavEvent::FocusChanged { to, from } => println!("  [highlight] {from:?} -> {to}"),
                NavEvent::FocusCleared { from } => println!("  [highlight] {from} cleared"),
            }
        }
    }
}
