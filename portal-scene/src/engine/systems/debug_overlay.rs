use crate::engine::systems::debug_settings::{DebugParam, DebugSettings};
use bevy::prelude::*;
use std::fmt::Write;

#[derive(Component)]
pub struct DebugOverlayText;

/// Which parameter the arrow keys adjust.
#[derive(Resource, Debug, Default)]
pub struct OverlayCursor {
    selected: usize,
}

impl OverlayCursor {
    pub fn selected(&self) -> DebugParam {
        DebugParam::ALL[self.selected % DebugParam::ALL.len()]
    }

    pub fn advance(&mut self) {
        self.selected = (self.selected + 1) % DebugParam::ALL.len();
    }
}

pub fn create_debug_overlay(commands: &mut Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.93, 0.91, 0.78)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            right: Val::Px(12.0),
            ..default()
        },
        Visibility::Hidden,
        DebugOverlayText,
    ));
}

// H toggles the panel, Tab picks a parameter, arrows adjust it
pub fn debug_overlay_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut cursor: ResMut<OverlayCursor>,
    mut settings: ResMut<DebugSettings>,
) {
    if keyboard.just_pressed(KeyCode::KeyH) {
        settings.panel_visible = !settings.panel_visible;
    }
    if !settings.panel_visible {
        return;
    }

    if keyboard.just_pressed(KeyCode::Tab) {
        cursor.advance();
    }

    let steps = match (
        keyboard.pressed(KeyCode::ArrowUp),
        keyboard.pressed(KeyCode::ArrowDown),
    ) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => return,
    };
    let fast = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    settings.nudge(cursor.selected(), if fast { steps * 10.0 } else { steps });
}

pub fn refresh_debug_overlay(
    settings: Res<DebugSettings>,
    cursor: Res<OverlayCursor>,
    mut overlays: Query<(&mut Text, &mut Visibility), With<DebugOverlayText>>,
) {
    if !settings.is_changed() && !cursor.is_changed() {
        return;
    }

    for (mut text, mut visibility) in &mut overlays {
        *visibility = if settings.panel_visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        text.0 = overlay_text(&settings, cursor.selected());
    }
}

pub fn overlay_text(settings: &DebugSettings, selected: DebugParam) -> String {
    let mut text = format!("clear colour  {}\n", settings.clear_colour);
    for param in DebugParam::ALL {
        let marker = if param == selected { ">" } else { " " };
        let _ = writeln!(text, "{marker} {:<13} {:.4}", param.name(), settings.get(param));
    }
    text
}
