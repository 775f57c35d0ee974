use bevy::prelude::*;
use bevy_egui::EguiPlugin;

mod particles;
mod simulation;
mod ui;
mod visualization;

use lunar_lander::levels::{GameLoadState, LevelPlugin};
use lunar_lander::{ScoreChannel, Scoreboard};
use particles::{particle_system, ParticleSpawnTimer};
use simulation::{
    change_level, collect_scores, keyboard_shortcuts, reset_simulation, simulation_system,
    ChangeLevel, ResetLevel, SimulationState,
};
use ui::ui_system;
use visualization::{
    reset_visualization_system, spawn_visualization, update_visualization, VizState,
};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Lunar Lander".into(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .add_plugins(LevelPlugin)
        .init_resource::<SimulationState>()
        .init_resource::<Scoreboard>()
        .init_resource::<ScoreChannel>()
        .init_resource::<VizState>()
        .init_resource::<ParticleSpawnTimer>()
        .add_event::<ResetLevel>()
        .add_event::<ChangeLevel>()
        .add_systems(OnEnter(GameLoadState::Ready), spawn_visualization)
        .add_systems(
            Update,
            (
                (
                    keyboard_shortcuts,
                    change_level,
                    reset_simulation,
                    simulation_system,
                    collect_scores,
                )
                    .chain(),
                (
                    reset_visualization_system,
                    update_visualization,
                    particle_system,
                )
                    .chain(),
                ui_system,
            )
                .chain()
                .run_if(in_state(GameLoadState::Ready)),
        )
        .run();
}
