//! Score, time and end-of-round message overlay.
use bevy::prelude::*;

use crate::core::components::{MessageText, ScoreText, TimeText};
use crate::core::system::FrameSet;
use crate::gameplay::rules::{outcome_message, RoundState};
use crate::gameplay::state::RoundEnded;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, (update_hud_values, show_round_message).in_set(FrameSet::Presentation));
    }
}

pub fn score_label(score: u32) -> String {
    format!("Score: {score}")
}

pub fn time_label(remaining: f32) -> String {
    format!("Time: {:.1}", remaining.max(0.0))
}

fn hud_font(size: f32) -> TextFont {
    TextFont {
        font_size: size,
        ..Default::default()
    }
}

fn spawn_hud(mut commands: Commands, round: Option<Res<RoundState>>) {
    let (score, remaining) = round.map_or((0, 30.0), |r| (r.score, r.remaining));
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(16.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|p| {
            p.spawn((Text::new(score_label(score)), hud_font(24.0), TextColor(Color::WHITE), ScoreText));
            p.spawn((Text::new(time_label(remaining)), hud_font(24.0), TextColor(Color::WHITE), TimeText));
        });
    commands.spawn((
        Text::new(String::new()),
        hud_font(40.0),
        TextColor(Color::srgb(1.0, 0.85, 0.3)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(45.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        Visibility::Hidden,
        MessageText,
    ));
}

fn update_hud_values(
    round: Res<RoundState>,
    mut q_score: Query<&mut Text, (With<ScoreText>, Without<TimeText>)>,
    mut q_time: Query<&mut Text, (With<TimeText>, Without<ScoreText>)>,
) {
    let score = score_label(round.score);
    for mut text in &mut q_score {
        if text.as_str() != score {
            *text = Text::new(score.clone());
        }
    }
    let time = time_label(round.remaining);
    for mut text in &mut q_time {
        if text.as_str() != time {
            *text = Text::new(time.clone());
        }
    }
}

fn show_round_message(
    mut ended: EventReader<RoundEnded>,
    mut q: Query<(&mut Text, &mut Visibility), With<MessageText>>,
) {
    let Some(ev) = ended.read().last().copied() else {
        return;
    };
    for (mut text, mut vis) in &mut q {
        *text = Text::new(outcome_message(ev.outcome, ev.score));
        *vis = Visibility::Visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::rules::Outcome;

    #[test]
    fn labels() {
        assert_eq!(score_label(7), "Score: 7");
        assert_eq!(time_label(30.0), "Time: 30.0");
        assert_eq!(time_label(12.345), "Time: 12.3");
        assert_eq!(time_label(-1.0), "Time: 0.0");
    }

    fn hud_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        crate::core::system::configure_frame_sets(&mut app);
        app.init_resource::<RoundState>().add_event::<RoundEnded>().add_plugins(HudPlugin);
        app
    }

    fn text_of<M: Component>(app: &mut App) -> String {
        let mut q = app.world_mut().query_filtered::<&Text, With<M>>();
        q.single(app.world()).unwrap().as_str().to_string()
    }

    #[test]
    fn hud_starts_with_initial_values_and_hidden_message() {
        let mut app = hud_app();
        app.update();
        assert_eq!(text_of::<ScoreText>(&mut app), "Score: 0");
        assert_eq!(text_of::<TimeText>(&mut app), "Time: 30.0");
        let mut q = app.world_mut().query_filtered::<&Visibility, With<MessageText>>();
        assert_eq!(*q.single(app.world()).unwrap(), Visibility::Hidden);
    }

    #[test]
    fn hud_tracks_round_and_shows_outcome() {
        let mut app = hud_app();
        app.update();
        {
            let mut round = app.world_mut().resource_mut::<RoundState>();
            round.score = 3;
            round.remaining = 12.34;
        }
        let send_once = |mut w: EventWriter<RoundEnded>, mut sent: Local<bool>| {
            if !*sent {
                w.write(RoundEnded { outcome: Outcome::Failure, score: 3 });
                *sent = true;
            }
        };
        app.add_systems(Update, send_once.before(FrameSet::Presentation));
        app.update();
        assert_eq!(text_of::<ScoreText>(&mut app), "Score: 3");
        assert_eq!(text_of::<TimeText>(&mut app), "Time: 12.3");
        assert_eq!(text_of::<MessageText>(&mut app), "MISSION FAILED. Score: 3");
        let mut q = app.world_mut().query_filtered::<&Visibility, With<MessageText>>();
        assert_eq!(*q.single(app.world()).unwrap(), Visibility::Visible);
    }
}
