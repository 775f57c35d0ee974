//! The lander itself: kinematic state, fuel, and the per-tick integration
//! that decides between a safe landing and a crash.
use std::f64::consts::TAU;

use bevy::log::{debug, info};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::command::{Command, CommandSet};
use crate::constants::{
    DEFAULT_FUEL, DEFAULT_GRAVITY_ACCELERATION, DEFAULT_ROTATION_MOTOR_ACCELERATION,
    DEFAULT_THRUSTER_ACCELERATION, LANDING_PAD_BONUS, LANDING_PAD_WIDTH, MAX_LANDING_SPEED_X,
    MAX_LANDING_SPEED_Y, MAX_LANDING_SPIN, MAX_LANDING_TILT, SCREEN_WIDTH,
};
use crate::scoring::LandingReporter;

/// Everything needed to build a [`Lander`]. Any field left out of a level
/// file falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanderConfig {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub theta: f64,
    pub dtheta: f64,
    pub thruster_acceleration: f64,       // m/s² along the heading
    pub rotation_motor_acceleration: f64, // rad/s²
    pub gravity_acceleration: f64,        // m/s², generally negative
    pub fuel: f64,                        // seconds of thrust
}

impl Default for LanderConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            dx: 0.0,
            dy: 0.0,
            theta: 0.0,
            dtheta: 0.0,
            thruster_acceleration: DEFAULT_THRUSTER_ACCELERATION,
            rotation_motor_acceleration: DEFAULT_ROTATION_MOTOR_ACCELERATION,
            gravity_acceleration: DEFAULT_GRAVITY_ACCELERATION,
            fuel: DEFAULT_FUEL,
        }
    }
}

impl LanderConfig {
    pub fn with_position(self, x: f64, y: f64) -> Self {
        Self { x, y, ..self }
    }

    pub fn with_velocity(self, dx: f64, dy: f64) -> Self {
        Self { dx, dy, ..self }
    }

    pub fn with_theta(self, theta: f64) -> Self {
        Self { theta, ..self }
    }

    pub fn with_dtheta(self, dtheta: f64) -> Self {
        Self { dtheta, ..self }
    }

    pub fn with_thruster_acceleration(self, thruster_acceleration: f64) -> Self {
        Self {
            thruster_acceleration,
            ..self
        }
    }

    pub fn with_rotation_motor_acceleration(self, rotation_motor_acceleration: f64) -> Self {
        Self {
            rotation_motor_acceleration,
            ..self
        }
    }

    pub fn with_gravity_acceleration(self, gravity_acceleration: f64) -> Self {
        Self {
            gravity_acceleration,
            ..self
        }
    }

    pub fn with_fuel(self, fuel: f64) -> Self {
        Self { fuel, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    pub dx: f64,
    pub dy: f64,
    pub dtheta: f64,
}

/// Why a touchdown went wrong. Checked in this order; the first one that
/// applies is the one recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    ExcessSpeed,
    ExcessTilt,
    ExcessSpin,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LandingOutcome {
    Landed { score: f64 },
    Crashed(CrashCause),
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Lander {
    // meters, x wraps at SCREEN_WIDTH
    x: f64,
    y: f64,
    // m/s
    dx: f64,
    dy: f64,
    // 0 is upright, +PI/2 points the nose right
    theta: f64,
    // rad/s, positive is clockwise
    dtheta: f64,
    fuel: f64,

    thruster_acceleration: f64,
    rotation_motor_acceleration: f64,
    gravity_acceleration: f64,

    landed: bool,
    crashed: bool,
    thruster_on: bool,
    outcome: Option<LandingOutcome>,
}

impl Default for Lander {
    fn default() -> Self {
        Self::new(LanderConfig::default())
    }
}

impl Lander {
    pub fn new(config: LanderConfig) -> Self {
        Self {
            x: config.x,
            y: config.y,
            dx: config.dx,
            dy: config.dy,
            theta: wrap(config.theta, TAU),
            dtheta: config.dtheta,
            fuel: config.fuel,
            thruster_acceleration: config.thruster_acceleration,
            rotation_motor_acceleration: config.rotation_motor_acceleration,
            gravity_acceleration: config.gravity_acceleration,
            landed: false,
            crashed: false,
            thruster_on: false,
            outcome: None,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            x: self.x,
            y: self.y,
            theta: self.theta,
        }
    }

    pub fn velocity(&self) -> Velocity {
        Velocity {
            dx: self.dx,
            dy: self.dy,
            dtheta: self.dtheta,
        }
    }

    pub fn fuel_remaining(&self) -> f64 {
        self.fuel
    }

    pub fn is_landed(&self) -> bool {
        self.landed
    }

    pub fn is_crashed(&self) -> bool {
        self.crashed
    }

    pub fn is_thruster_on(&self) -> bool {
        self.thruster_on
    }

    pub fn outcome(&self) -> Option<LandingOutcome> {
        self.outcome
    }

    pub fn thruster_acceleration(&self) -> f64 {
        self.thruster_acceleration
    }

    pub fn rotation_motor_acceleration(&self) -> f64 {
        self.rotation_motor_acceleration
    }

    pub fn gravity_acceleration(&self) -> f64 {
        self.gravity_acceleration
    }

    /// Advances the lander by `dt` seconds.
    ///
    /// Position integrates the average of the old and new velocity, the
    /// heading integrates the old spin rate, and roll commands only change
    /// the spin rate used by the next tick. Once the lander is on the
    /// ground this does nothing.
    pub fn tick(&mut self, dt: f64, commands: CommandSet, reporter: &mut impl LandingReporter) {
        if self.landed {
            return;
        }

        if self.fuel < 0.0 {
            self.fuel = 0.0;
        }

        let mut dx_next = self.dx;
        let mut dy_next = self.dy + self.gravity_acceleration * dt;

        if commands.contains(Command::Thrust) && self.fuel > 0.0 {
            let (sin, cos) = self.theta.sin_cos();
            dx_next += self.thruster_acceleration * dt * sin;
            dy_next += self.thruster_acceleration * dt * cos;
            self.fuel = (self.fuel - dt).max(0.0);
            self.thruster_on = true;
            if self.fuel == 0.0 {
                debug!("fuel exhausted at y={:.2}", self.y);
            }
        } else {
            self.thruster_on = false;
        }

        self.x = wrap(self.x + (self.dx + dx_next) / 2.0 * dt, SCREEN_WIDTH);
        self.y += (self.dy + dy_next) / 2.0 * dt;
        self.theta = wrap(self.theta + self.dtheta * dt, TAU);

        self.dx = dx_next;
        self.dy = dy_next;

        if commands.contains(Command::RollClockwise) {
            self.dtheta += self.rotation_motor_acceleration * dt;
        }
        if commands.contains(Command::RollCounterclockwise) {
            self.dtheta -= self.rotation_motor_acceleration * dt;
        }

        if self.y <= 0.0 {
            self.touch_down(reporter);
        }
    }

    fn touch_down(&mut self, reporter: &mut impl LandingReporter) {
        self.landed = true;

        let outcome = match classify_touchdown(self.velocity(), self.theta) {
            Some(cause) => {
                self.crashed = true;
                info!(
                    "crashed ({cause:?}) at x={:.2} dx={:.2} dy={:.2} theta={:.3} dtheta={:.3}",
                    self.x, self.dx, self.dy, self.theta, self.dtheta
                );
                LandingOutcome::Crashed(cause)
            }
            None => {
                let score = self.fuel + landing_pad_bonus(self.x);
                info!("landed at x={:.2} with score {score:.1}", self.x);
                reporter.report_successful_landing(score);
                LandingOutcome::Landed { score }
            }
        };
        self.outcome = Some(outcome);
    }
}

/// Returns the reason a touchdown at this velocity and heading is a crash,
/// or `None` for a safe landing.
pub fn classify_touchdown(velocity: Velocity, theta: f64) -> Option<CrashCause> {
    if velocity.dx.abs() > MAX_LANDING_SPEED_X || velocity.dy.abs() > MAX_LANDING_SPEED_Y {
        Some(CrashCause::ExcessSpeed)
    } else if tilt_from_upright(theta) > MAX_LANDING_TILT {
        Some(CrashCause::ExcessTilt)
    } else if velocity.dtheta.abs() > MAX_LANDING_SPIN {
        Some(CrashCause::ExcessSpin)
    } else {
        None
    }
}

pub fn landing_pad_bonus(x: f64) -> f64 {
    if (x - SCREEN_WIDTH / 2.0).abs() < LANDING_PAD_WIDTH / 2.0 {
        LANDING_PAD_BONUS
    } else {
        0.0
    }
}

/// Angle between the heading and straight up, in [0, PI].
pub fn tilt_from_upright(theta: f64) -> f64 {
    let theta = wrap(theta, TAU);
    theta.min(TAU - theta)
}

// Euclidean remainder clamped to [0, modulus); rem_euclid alone can round
// a tiny negative value up to exactly `modulus`.
fn wrap(value: f64, modulus: f64) -> f64 {
    let wrapped = value.rem_euclid(modulus);
    if wrapped >= modulus {
        0.0
    } else {
        wrapped
    }
}
