// Display geometry in meters
pub const SCREEN_WIDTH: f64 = 128.0; // x wraps around at this width
pub const LANDING_PAD_WIDTH: f64 = 20.0; // centred on SCREEN_WIDTH / 2
pub const LANDING_PAD_BONUS: f64 = 100.0;

// Lander body, only used for drawing
pub const LANDER_HEIGHT: f32 = 3.0;
pub const LANDER_WIDTH: f32 = 2.0;

// Touchdown limits; exceeding any of them is a crash
pub const MAX_LANDING_SPEED_X: f64 = 5.0; // m/s
pub const MAX_LANDING_SPEED_Y: f64 = 8.0; // m/s
pub const MAX_LANDING_TILT: f64 = 0.3; // radians from upright
pub const MAX_LANDING_SPIN: f64 = 0.2; // rad/s

// Defaults for a freshly configured lander
pub const DEFAULT_THRUSTER_ACCELERATION: f64 = 10.0; // m/s²
pub const DEFAULT_ROTATION_MOTOR_ACCELERATION: f64 = 0.7; // rad/s²
pub const DEFAULT_GRAVITY_ACCELERATION: f64 = -1.0; // m/s², negative is down
pub const DEFAULT_FUEL: f64 = 100000.0; // seconds of burn
