use std::f64::consts::TAU;

use lunar_lander::constants::{LANDING_PAD_WIDTH, SCREEN_WIDTH};
use lunar_lander::levels::LevelConfig;
use lunar_lander::{Command, CommandSet, Lander, LanderConfig, LandingOutcome, Scoreboard};

fn fall_for(ticks: usize) -> Lander {
    let mut lander = Lander::new(LanderConfig::default().with_position(0.0, 100.0));
    let mut board = Scoreboard::default();
    for _ in 0..ticks {
        lander.tick(1.0, CommandSet::empty(), &mut board);
    }
    lander
}

#[test]
fn position_is_reported_as_configured() {
    let lander = Lander::new(
        LanderConfig::default()
            .with_position(32.3, 62.6)
            .with_theta(1.1),
    );
    let position = lander.position();
    assert_eq!(position.x, 32.3);
    assert_eq!(position.y, 62.6);
    assert_eq!(position.theta, 1.1);
}

#[test]
fn free_fall_one_tick() {
    let lander = fall_for(1);
    let velocity = lander.velocity();
    assert_eq!(velocity.dy, -1.0);
    assert_eq!(velocity.dx, 0.0);
    assert_eq!(velocity.dtheta, 0.0);
    // velocity was 0 at the start of the tick, so only half of it counts
    assert_eq!(lander.position().y, 99.5);
}

#[test]
fn free_fall_follows_trapezoid_rule() {
    for ticks in [2usize, 4, 8] {
        let lander = fall_for(ticks);
        let n = ticks as f64;
        assert_eq!(lander.velocity().dy, -n);
        // sum of (k + k+1)/2 for k in 0..n
        assert_eq!(lander.position().y, 100.0 - n * n / 2.0);
    }
}

#[test]
fn free_fall_eventually_lands() {
    // 100 m at g = -1 reaches the ground after about 14 s, faster than 8 m/s
    let lander = fall_for(20);
    assert!(lander.is_landed());
    assert!(lander.is_crashed());
}

#[test]
fn fuel_and_wrap_invariants_hold_over_a_flight() {
    let mut lander = Lander::new(
        LanderConfig::default()
            .with_position(SCREEN_WIDTH - 3.0, 2000.0)
            .with_velocity(7.0, 0.0)
            .with_fuel(3.0),
    );
    let pattern = [
        CommandSet::from(Command::Thrust),
        Command::Thrust | Command::RollCounterclockwise,
        CommandSet::from(Command::RollCounterclockwise),
        CommandSet::empty(),
        CommandSet::all(),
    ];

    let mut previous_fuel = lander.fuel_remaining();
    let mut board = Scoreboard::default();
    for step in 0..400 {
        lander.tick(0.13, pattern[step % pattern.len()], &mut board);

        let fuel = lander.fuel_remaining();
        assert!(fuel >= 0.0);
        assert!(fuel <= previous_fuel);
        previous_fuel = fuel;

        let position = lander.position();
        assert!((0.0..SCREEN_WIDTH).contains(&position.x), "x = {}", position.x);
        assert!((0.0..TAU).contains(&position.theta), "theta = {}", position.theta);
    }
    assert_eq!(lander.fuel_remaining(), 0.0);
}

#[test]
fn thruster_is_off_once_fuel_runs_out() {
    let mut lander = Lander::new(
        LanderConfig::default()
            .with_position(10.0, 500.0)
            .with_fuel(1.0),
    );
    let mut board = Scoreboard::default();
    lander.tick(1.0, Command::Thrust.into(), &mut board);
    assert!(lander.is_thruster_on());
    lander.tick(1.0, Command::Thrust.into(), &mut board);
    assert!(!lander.is_thruster_on());
    assert_eq!(lander.velocity().dy, 10.0 - 2.0);
}

#[test]
fn hovering_onto_the_pad_scores_fuel_plus_bonus() {
    let mut lander = Lander::new(
        LanderConfig::default()
            .with_position(SCREEN_WIDTH / 2.0, 3.0)
            .with_velocity(0.0, -2.0)
            .with_fuel(10.0),
    );
    let mut board = Scoreboard::default();
    while !lander.is_landed() {
        lander.tick(0.5, CommandSet::empty(), &mut board);
    }

    assert!(!lander.is_crashed());
    let Some(LandingOutcome::Landed { score }) = lander.outcome() else {
        panic!("expected a safe landing, got {:?}", lander.outcome());
    };
    assert_eq!(score, 110.0);
    assert_eq!(board.last, Some(110.0));
    assert_eq!(board.landings, 1);

    // more ticks must not report again
    lander.tick(0.5, CommandSet::all(), &mut board);
    assert_eq!(board.landings, 1);
}

#[test]
fn landing_just_outside_the_pad_gets_no_bonus() {
    let x = SCREEN_WIDTH / 2.0 + LANDING_PAD_WIDTH / 2.0 + 1.0;
    let mut lander = Lander::new(
        LanderConfig::default()
            .with_position(x, 0.4)
            .with_velocity(0.0, -1.0)
            .with_fuel(10.0),
    );
    let mut board = Scoreboard::default();
    lander.tick(1.0, CommandSet::empty(), &mut board);
    assert_eq!(board.last, Some(10.0));
}

#[test]
fn bundled_levels_parse() {
    let levels = [
        include_str!("../assets/levels/level0.ron"),
        include_str!("../assets/levels/level1.ron"),
        include_str!("../assets/levels/level2.ron"),
        include_str!("../assets/levels/level3.ron"),
    ];
    for content in levels {
        let level = LevelConfig::from_ron(content).unwrap();
        assert!(!level.name.is_empty());
        assert!(level.lander.y > 0.0);
        assert!((0.0..SCREEN_WIDTH).contains(&level.lander.x));
    }
}
