use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use lunar_lander::levels::{CurrentLevel, LevelManager};
use lunar_lander::{CrashCause, Lander, LandingOutcome, Scoreboard};

use crate::simulation::{ChangeLevel, ResetLevel, SimulationState};
use crate::visualization::RIGHT_PANEL_WIDTH;

fn status_text(outcome: Option<LandingOutcome>) -> String {
    match outcome {
        None => "Flying".to_string(),
        Some(LandingOutcome::Landed { score }) => format!("Landed! Score {score:.1}"),
        Some(LandingOutcome::Crashed(cause)) => {
            let reason = match cause {
                CrashCause::ExcessSpeed => "too fast",
                CrashCause::ExcessTilt => "not upright",
                CrashCause::ExcessSpin => "still spinning",
            };
            format!("Crashed: {reason}")
        }
    }
}

fn score_text(score: Option<f64>) -> String {
    score.map_or_else(|| "-".to_string(), |s| format!("{s:.1}"))
}

#[allow(clippy::too_many_arguments)]
pub fn ui_system(
    mut contexts: EguiContexts,
    lander: Res<Lander>,
    current_level: Res<CurrentLevel>,
    level_manager: Res<LevelManager>,
    scoreboard: Res<Scoreboard>,
    mut simulation_state: ResMut<SimulationState>,
    mut resets: EventWriter<ResetLevel>,
    mut level_changes: EventWriter<ChangeLevel>,
) {
    egui::SidePanel::right("hud_panel")
        .exact_width(RIGHT_PANEL_WIDTH)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading(&current_level.config.name);
            ui.label(&current_level.config.description);
            ui.add_space(8.0);

            let position = lander.position();
            let velocity = lander.velocity();
            egui::Grid::new("telemetry").striped(true).show(ui, |ui| {
                ui.label("x");
                ui.label(format!("{:.2} m", position.x));
                ui.end_row();
                ui.label("altitude");
                ui.label(format!("{:.2} m", position.y));
                ui.end_row();
                ui.label("heading");
                ui.label(format!("{:.3} rad", position.theta));
                ui.end_row();
                ui.label("dx");
                ui.label(format!("{:.2} m/s", velocity.dx));
                ui.end_row();
                ui.label("dy");
                ui.label(format!("{:.2} m/s", velocity.dy));
                ui.end_row();
                ui.label("spin");
                ui.label(format!("{:.3} rad/s", velocity.dtheta));
                ui.end_row();
                ui.label("fuel");
                ui.label(format!("{:.1}", lander.fuel_remaining()));
                ui.end_row();
                ui.label("thruster");
                ui.label(if lander.is_thruster_on() { "ON" } else { "off" });
                ui.end_row();
            });

            ui.add_space(8.0);
            ui.label(egui::RichText::new(status_text(lander.outcome())).strong());
            ui.label(format!(
                "Last score: {}   Best: {}",
                score_text(scoreboard.last),
                score_text(scoreboard.best)
            ));

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let label = match *simulation_state {
                    SimulationState::Running => "Pause",
                    SimulationState::Paused => "Run",
                };
                if ui.button(label).clicked() {
                    *simulation_state = simulation_state.toggled();
                }
                if ui.button("Reset").clicked() {
                    resets.send(ResetLevel);
                }
            });

            ui.add_space(8.0);
            ui.collapsing("Levels", |ui| {
                for (number, name) in &level_manager.available_levels {
                    let selected = *number == current_level.number;
                    if ui
                        .selectable_label(selected, format!("{number}: {name}"))
                        .clicked()
                        && !selected
                    {
                        level_changes.send(ChangeLevel(*number));
                    }
                }
            });

            ui.collapsing("Controls", |ui| {
                ui.label("Up / W / Space - main thruster");
                ui.label("Right / D - roll clockwise");
                ui.label("Left / A - roll counterclockwise");
                ui.label("R - reset level, P - pause");
            });
        });
}
