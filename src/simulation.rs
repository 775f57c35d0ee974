use bevy::prelude::*;

use lunar_lander::levels::{CurrentLevel, LevelManager};
use lunar_lander::{Command, CommandSet, Lander, LandingReporter, ScoreChannel, Scoreboard};

use crate::visualization::VizState;

#[derive(Resource, Default, Debug, PartialEq, Eq, Clone, Copy)]
pub enum SimulationState {
    #[default]
    Running,
    Paused,
}

impl SimulationState {
    pub fn toggled(self) -> Self {
        match self {
            SimulationState::Running => SimulationState::Paused,
            SimulationState::Paused => SimulationState::Running,
        }
    }
}

// Restart the current level from its initial conditions
#[derive(Event, Debug, Clone, Copy)]
pub struct ResetLevel;

#[derive(Event, Debug, Clone, Copy)]
pub struct ChangeLevel(pub usize);

pub const THRUST_KEYS: [KeyCode; 3] = [KeyCode::ArrowUp, KeyCode::KeyW, KeyCode::Space];
pub const ROLL_CLOCKWISE_KEYS: [KeyCode; 2] = [KeyCode::ArrowRight, KeyCode::KeyD];
pub const ROLL_COUNTERCLOCKWISE_KEYS: [KeyCode; 2] = [KeyCode::ArrowLeft, KeyCode::KeyA];

pub fn read_commands(keys: &ButtonInput<KeyCode>) -> CommandSet {
    let mut commands = CommandSet::empty();
    if keys.any_pressed(THRUST_KEYS) {
        commands.insert(Command::Thrust);
    }
    if keys.any_pressed(ROLL_CLOCKWISE_KEYS) {
        commands.insert(Command::RollClockwise);
    }
    if keys.any_pressed(ROLL_COUNTERCLOCKWISE_KEYS) {
        commands.insert(Command::RollCounterclockwise);
    }
    commands
}

pub fn simulation_system(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<SimulationState>,
    mut lander: ResMut<Lander>,
    mut channel: ResMut<ScoreChannel>,
) {
    if *state != SimulationState::Running {
        return;
    }

    let commands = read_commands(&keys);
    lander.tick(time.delta_secs_f64(), commands, &mut channel.sender);
}

pub fn collect_scores(channel: Res<ScoreChannel>, mut scoreboard: ResMut<Scoreboard>) {
    for score in channel.receiver.try_iter() {
        scoreboard.report_successful_landing(score);
        info!(
            "landing #{} scored {score:.1} (best {:.1})",
            scoreboard.landings,
            scoreboard.best.unwrap_or(score)
        );
    }
}

pub fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<SimulationState>,
    mut resets: EventWriter<ResetLevel>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        resets.send(ResetLevel);
    }
    if keys.just_pressed(KeyCode::KeyP) {
        *state = state.toggled();
    }
}

pub fn change_level(
    mut requests: EventReader<ChangeLevel>,
    level_manager: Res<LevelManager>,
    mut current_level: ResMut<CurrentLevel>,
    mut resets: EventWriter<ResetLevel>,
) {
    for ChangeLevel(number) in requests.read() {
        match level_manager.get_level(*number) {
            Some(config) => {
                info!("switching to level {number}: {}", config.name);
                current_level.number = *number;
                current_level.config = config;
                resets.send(ResetLevel);
            }
            None => warn!("level {number} is not loaded"),
        }
    }
}

pub fn reset_simulation(
    mut requests: EventReader<ResetLevel>,
    current_level: Res<CurrentLevel>,
    mut lander: ResMut<Lander>,
    mut state: ResMut<SimulationState>,
    mut viz_state: ResMut<VizState>,
) {
    // Several requests in one frame still mean one reset
    if requests.read().count() == 0 {
        return;
    }

    *lander = current_level.spawn_lander();
    *state = SimulationState::Running;
    viz_state.reset_requested = true;
    debug!("reset level {}", current_level.number);
}
