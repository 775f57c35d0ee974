//! A single lunar lander under gravity, a main thruster and a rotation
//! motor, stepped in discrete ticks until it either lands or crashes.

pub mod assets;
pub mod command;
pub mod constants;
pub mod lander;
pub mod levels;
pub mod scoring;

pub use command::{Command, CommandSet};
pub use lander::{CrashCause, Lander, LanderConfig, LandingOutcome, Position, Velocity};
pub use scoring::{LandingReporter, ScoreChannel, ScoreSender, Scoreboard};
