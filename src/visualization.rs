use bevy::color::palettes::css::*;
use bevy::prelude::*;

use lunar_lander::constants::{LANDER_HEIGHT, LANDER_WIDTH, LANDING_PAD_WIDTH, SCREEN_WIDTH};
use lunar_lander::{Lander, LandingOutcome};

use crate::particles::ExhaustParticle;

// View configuration, in pixels
pub const WORLD_TO_SCREEN_SCALE: f32 = 7.5;
pub const RIGHT_PANEL_WIDTH: f32 = 300.0;
pub const GROUND_OFFSET: f32 = -300.0; // Pixels from center of screen to ground

#[derive(Component)]
pub struct LanderSprite;

#[derive(Component)]
pub struct Ground;

#[derive(Component)]
pub struct LandingPad;

#[derive(Resource, Default)]
pub struct VizState {
    pub explosion_spawned: bool,
    pub reset_requested: bool,
}

// World meters to screen pixels. The world's x range is centred in the
// space left of the HUD panel.
pub fn world_to_screen(pos: Vec2) -> Vec2 {
    let center_offset = -(RIGHT_PANEL_WIDTH / 2.0);
    let half_world = SCREEN_WIDTH as f32 / 2.0;
    Vec2::new(
        (pos.x - half_world) * WORLD_TO_SCREEN_SCALE + center_offset,
        pos.y * WORLD_TO_SCREEN_SCALE + GROUND_OFFSET,
    )
}

pub fn lander_world_pos(lander: &Lander) -> Vec2 {
    let position = lander.position();
    Vec2::new(position.x as f32, position.y as f32)
}

fn lander_color(lander: &Lander) -> Color {
    match lander.outcome() {
        None => PURPLE.into(),
        Some(LandingOutcome::Landed { .. }) => LIME.into(),
        Some(LandingOutcome::Crashed(_)) => CRIMSON.into(),
    }
}

pub fn spawn_visualization(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2d);

    // Convert from meters to screen coordinates
    let half_height = (LANDER_HEIGHT / 2.0) * WORLD_TO_SCREEN_SCALE;
    let half_width = (LANDER_WIDTH / 2.0) * WORLD_TO_SCREEN_SCALE;
    let hull = Triangle2d::new(
        Vec2::new(0.0, half_height),
        Vec2::new(-half_width, -half_height),
        Vec2::new(half_width, -half_height),
    );

    commands.spawn((
        Mesh2d(meshes.add(hull)),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(PURPLE))),
        Transform::from_xyz(0.0, 0.0, 1.0),
        LanderSprite,
    ));

    let ground_center = world_to_screen(Vec2::new(SCREEN_WIDTH as f32 / 2.0, 0.0));
    commands.spawn((
        Sprite {
            color: FOREST_GREEN.into(),
            custom_size: Some(Vec2::new(SCREEN_WIDTH as f32 * WORLD_TO_SCREEN_SCALE, 2.0)),
            ..default()
        },
        Transform::from_xyz(ground_center.x, ground_center.y, 0.0),
        Ground,
    ));

    commands.spawn((
        Sprite {
            color: Color::srgba(0.0, 1.0, 0.0, 0.3),
            custom_size: Some(Vec2::new(LANDING_PAD_WIDTH as f32 * WORLD_TO_SCREEN_SCALE, 10.0)),
            ..default()
        },
        Transform::from_xyz(ground_center.x, ground_center.y + 5.0, 0.5),
        LandingPad,
    ));
}

pub fn update_visualization(
    mut lander_query: Query<
        (&mut Transform, &mut Visibility, &MeshMaterial2d<ColorMaterial>),
        With<LanderSprite>,
    >,
    mut materials: ResMut<Assets<ColorMaterial>>,
    lander: Res<Lander>,
) {
    let Ok((mut transform, mut visibility, material)) = lander_query.get_single_mut() else {
        return;
    };

    let base = world_to_screen(lander_world_pos(&lander));
    // The hull is drawn around its centre, so lift it so the base sits on y
    let theta = lander.position().theta as f32;
    let half_height = (LANDER_HEIGHT / 2.0) * WORLD_TO_SCREEN_SCALE;
    transform.translation.x = base.x + theta.sin() * half_height;
    transform.translation.y = base.y + theta.cos() * half_height;
    // theta grows clockwise, Bevy's z rotation counterclockwise
    transform.rotation = Quat::from_rotation_z(-theta);

    if let Some(material) = materials.get_mut(&material.0) {
        material.color = lander_color(&lander);
    }

    if lander.outcome().is_none() && *visibility == Visibility::Hidden {
        *visibility = Visibility::Inherited;
    }
}

pub fn reset_visualization_system(
    mut commands: Commands,
    mut viz_state: ResMut<VizState>,
    particles: Query<Entity, With<ExhaustParticle>>,
    mut lander_query: Query<&mut Visibility, With<LanderSprite>>,
) {
    if !viz_state.reset_requested {
        return;
    }

    for entity in particles.iter() {
        commands.entity(entity).despawn();
    }
    for mut visibility in lander_query.iter_mut() {
        *visibility = Visibility::Inherited;
    }
    viz_state.explosion_spawned = false;
    viz_state.reset_requested = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_centre_is_left_of_the_panel() {
        let centre = world_to_screen(Vec2::new(SCREEN_WIDTH as f32 / 2.0, 0.0));
        assert_eq!(centre, Vec2::new(-(RIGHT_PANEL_WIDTH / 2.0), GROUND_OFFSET));
    }

    #[test]
    fn world_edges_span_the_full_width() {
        let left = world_to_screen(Vec2::new(0.0, 10.0));
        let right = world_to_screen(Vec2::new(SCREEN_WIDTH as f32, 10.0));
        assert_eq!(right.x - left.x, SCREEN_WIDTH as f32 * WORLD_TO_SCREEN_SCALE);
        assert_eq!(left.y, 10.0 * WORLD_TO_SCREEN_SCALE + GROUND_OFFSET);
    }
}
