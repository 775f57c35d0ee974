use bevy::prelude::*;
use rand::Rng;

use lunar_lander::constants::LANDER_HEIGHT;
use lunar_lander::Lander;

use crate::visualization::{
    lander_world_pos, world_to_screen, LanderSprite, VizState, WORLD_TO_SCREEN_SCALE,
};

const PARTICLE_LIFETIME: f32 = 0.5;
const PARTICLE_SIZE: f32 = 2.0;
const PARTICLE_BASE_SPEED: f32 = 150.0;
const PARTICLE_SPREAD: f32 = 0.30; // radians
const PARTICLE_COUNT_PER_SPAWN: usize = 10;
const PARTICLE_SPAWN_INTERVAL: f32 = 0.05;
const PARTICLE_BOUNCE_DAMPING: f32 = 0.1;

const EXPLOSION_PARTICLE_COUNT_MIN: usize = 100;
const EXPLOSION_PARTICLE_COUNT_MAX: usize = 200;
const EXPLOSION_PARTICLE_SPEED: f32 = 200.0;
const EXPLOSION_PARTICLE_SPREAD: f32 = 0.25;

#[derive(Component)]
pub struct ExhaustParticle {
    lifetime: Timer,
    velocity: Vec2, // pixels per second
    world_pos: Vec2,
}

#[derive(Resource)]
pub struct ParticleSpawnTimer(pub Timer);

impl Default for ParticleSpawnTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(
            PARTICLE_SPAWN_INTERVAL,
            TimerMode::Repeating,
        ))
    }
}

fn rotate(direction: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(
        direction.x * cos - direction.y * sin,
        direction.x * sin + direction.y * cos,
    )
}

fn spawn_particle(commands: &mut Commands, nozzle: Vec2, exhaust_direction: Vec2) {
    let mut rng = rand::thread_rng();
    let direction = rotate(
        exhaust_direction,
        rng.gen_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
    );
    let speed = PARTICLE_BASE_SPEED * rng.gen_range(0.8..1.2);

    let offset = Vec2::new(rng.gen_range(-0.2..0.2), rng.gen_range(0.0..0.5));
    let world_pos = nozzle + offset;
    let screen_pos = world_to_screen(world_pos);

    commands.spawn((
        Sprite {
            color: Color::srgba(0.8, 0.3, 0.2, 0.8),
            custom_size: Some(Vec2::new(PARTICLE_SIZE, PARTICLE_SIZE)),
            ..default()
        },
        Transform::from_xyz(screen_pos.x, screen_pos.y, 0.5),
        ExhaustParticle {
            lifetime: Timer::from_seconds(PARTICLE_LIFETIME, TimerMode::Once),
            velocity: direction * speed,
            world_pos,
        },
    ));
}

// Make something Rico would appreciate
pub fn kaboom(commands: &mut Commands, lander_pos: Vec2, lander_vel: Vec2) {
    let mut rng = rand::thread_rng();
    let screen_pos = world_to_screen(lander_pos);

    let particle_count = rng.gen_range(EXPLOSION_PARTICLE_COUNT_MIN..EXPLOSION_PARTICLE_COUNT_MAX);
    for i in 0..particle_count {
        let angle = (i as f32 / particle_count as f32) * std::f32::consts::TAU;
        let direction = rotate(
            Vec2::new(angle.cos(), angle.sin()),
            rng.gen_range(-EXPLOSION_PARTICLE_SPREAD..EXPLOSION_PARTICLE_SPREAD),
        );
        let velocity = EXPLOSION_PARTICLE_SPEED * direction * rng.gen_range(0.8..1.2);

        commands.spawn((
            Sprite {
                color: Color::srgb(1.0, 0.5, 0.0),
                custom_size: Some(Vec2::new(4.0, 4.0)),
                ..default()
            },
            Transform::from_xyz(screen_pos.x, screen_pos.y, 0.5),
            ExhaustParticle {
                lifetime: Timer::from_seconds(1.0, TimerMode::Once),
                velocity: velocity + lander_vel * WORLD_TO_SCREEN_SCALE,
                world_pos: lander_pos,
            },
        ));
    }
}

pub fn particle_system(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: ResMut<ParticleSpawnTimer>,
    mut viz_state: ResMut<VizState>,
    mut lander_query: Query<&mut Visibility, With<LanderSprite>>,
    mut particle_query: Query<(Entity, &mut Transform, &mut ExhaustParticle)>,
    lander: Res<Lander>,
) {
    let dt = time.delta_secs();

    let mut to_despawn = Vec::new();
    for (entity, mut transform, mut particle) in particle_query.iter_mut() {
        particle.lifetime.tick(time.delta());

        if particle.lifetime.finished() {
            to_despawn.push(entity);
            continue;
        }

        let delta = particle.velocity * dt;
        transform.translation.x += delta.x;
        transform.translation.y += delta.y;
        particle.world_pos += delta / WORLD_TO_SCREEN_SCALE;

        // Bounce off the ground plane
        if particle.world_pos.y <= 0.0 {
            particle.world_pos.y = 0.0;
            particle.velocity.y = -particle.velocity.y * PARTICLE_BOUNCE_DAMPING;
            particle.velocity.x *= 0.9;

            if particle.velocity.length() < 20.0 {
                to_despawn.push(entity);
            }
        }
    }

    for entity in to_despawn {
        commands.entity(entity).despawn();
    }

    if lander.is_crashed() && !viz_state.explosion_spawned {
        if let Ok(mut visibility) = lander_query.get_single_mut() {
            *visibility = Visibility::Hidden;
        }
        let velocity = lander.velocity();
        kaboom(
            &mut commands,
            lander_world_pos(&lander),
            Vec2::new(velocity.dx as f32, velocity.dy as f32),
        );
        viz_state.explosion_spawned = true;
    }

    if lander.is_thruster_on() && !lander.is_landed() {
        timer.0.tick(time.delta());
        if timer.0.just_finished() {
            // Exhaust leaves the base, opposite the nose
            let theta = lander.position().theta as f32;
            let exhaust_direction = -Vec2::new(theta.sin(), theta.cos());
            let nozzle = lander_world_pos(&lander) + exhaust_direction * LANDER_HEIGHT * 0.1;

            for _ in 0..PARTICLE_COUNT_PER_SPAWN {
                spawn_particle(&mut commands, nozzle, exhaust_direction);
            }
        }
    }
}
