use bevy::prelude::*;

pub const TITLE_FONT_SIZE: f32 = 32.0;
pub const BUTTON_FONT_SIZE: f32 = 20.0;

/// Sends `E` when the button it is attached to gets pressed.
#[derive(Component, Debug, Clone)]
pub struct ButtonEvent<E: Event + Clone>(pub E);

/// Spawns a full-window column that centers its children, tagged with `marker`.
pub fn spawn_screen<'a>(
    commands: &'a mut Commands,
    background: Color,
    marker: impl Component,
) -> EntityCommands<'a> {
    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(20.0),
            ..default()
        },
        BackgroundColor(background),
        marker,
    ))
}

pub fn spawn_label(parent: &mut ChildBuilder, text: &str, font_size: f32, color: Color) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
        TextLayout::new_with_justify(JustifyText::Center),
    ));
}

/// Black-on-white text button that sends `event` when pressed.
pub fn spawn_button<E: Event + Clone>(parent: &mut ChildBuilder, label: &str, event: E) {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(10.0), Val::Px(5.0)),
                ..default()
            },
            BackgroundColor(Color::WHITE),
            ButtonEvent(event),
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font_size: BUTTON_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::BLACK),
            ));
        });
}

pub fn send_button_events<E: Event + Clone>(
    interaction_query: Query<(&Interaction, &ButtonEvent<E>), Changed<Interaction>>,
    mut events: EventWriter<E>,
) {
    for (interaction, button) in &interaction_query {
        if *interaction == Interaction::Pressed {
            events.send(button.0.clone());
        }
    }
}
