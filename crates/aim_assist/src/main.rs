//! Headless aim assist demo
//!
//! Rapier мир со случайными целями (seeded), камера в origin.
//! Каждые 20 кадров печатает выбранную цель, friction scale и look delta.

use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use aim_assist::physics::layers::{layer_groups, OBJECT_LAYER_ENVIRONMENT, OBJECT_LAYER_TARGETS};
use aim_assist::{
    create_headless_app, log_error, AimAssist, AimAssistConfig, AimAssistPlugin, AimSocket,
    AimSockets, CameraLens, DeterministicRng, LookInput, RapierTargetingPlugin, Team, TeamId,
};

const TARGET_COUNT: usize = 12;
const FRAME_COUNT: usize = 200;

fn main() {
    let seed = 42;
    println!("Starting aim assist headless demo (seed: {})", seed);

    let config = match AimAssistConfig::from_toml_str(include_str!("../config/aim_assist.toml")) {
        Ok(config) => config,
        Err(err) => {
            log_error(&format!("aim_assist.toml: {}", err));
            return;
        }
    };

    let mut app = create_headless_app(seed);
    app.add_plugins((
        TransformPlugin,
        RapierPhysicsPlugin::<NoUserData>::default(),
        AimAssistPlugin,
        RapierTargetingPlugin,
    ));

    spawn_scene(app.world_mut());

    let camera = app
        .world_mut()
        .spawn((
            Transform::from_xyz(0.0, 1.7, 0.0),
            AimAssist::new(config),
            CameraLens::default(),
            LookInput::default(),
        ))
        .id();

    for frame in 0..FRAME_COUNT {
        // Имитация стика: медленный поворот вправо
        if let Some(mut look) = app.world_mut().get_mut::<LookInput>(camera) {
            look.delta = Vec2::new(-0.002, 0.0);
        }

        app.update();

        let world = app.world_mut();
        let Some(look) = world.get::<LookInput>(camera).copied() else {
            continue;
        };

        // Host: применяем look delta к камере
        if let Some(mut transform) = world.get_mut::<Transform>(camera) {
            transform.rotate_y(look.delta.x);
            transform.rotate_local_x(look.delta.y);
        }

        if frame % 20 == 0 {
            if let Some(assist) = world.get::<AimAssist>(camera) {
                println!(
                    "Frame {}: target {:?}, friction scale {:.2}, magnetism {:.2}, look {:?}",
                    frame,
                    assist.best_target().map(|target| target.entity),
                    assist.current_aim_friction(),
                    assist.current_aim_magnetism(),
                    look.delta,
                );
            }
        }
    }

    println!("Demo complete!");
}

/// Цели со случайными позициями перед камерой + стена-заслон
fn spawn_scene(world: &mut World) {
    let positions: Vec<(Vec3, u8)> = {
        let mut rng = world.resource_mut::<DeterministicRng>();
        (0..TARGET_COUNT)
            .map(|_| {
                let position = Vec3::new(
                    rng.rng.gen_range(-6.0..6.0),
                    rng.rng.gen_range(0.5..3.0),
                    rng.rng.gen_range(-25.0..-5.0),
                );
                let team = rng.rng.gen_range(1..=3);
                (position, team)
            })
            .collect()
    };

    for (position, team) in positions {
        world.spawn((
            Transform::from_translation(position),
            RigidBody::Fixed,
            Collider::capsule_y(0.5, 0.4),
            layer_groups(OBJECT_LAYER_TARGETS),
            Team(TeamId(team)),
            AimSockets(vec![
                AimSocket::new("head", Vec3::new(0.0, 0.7, 0.0)),
                AimSocket::new("chest", Vec3::new(0.0, 0.2, 0.0)),
            ]),
        ));
    }

    world.spawn((
        Transform::from_xyz(3.0, 1.5, -12.0),
        RigidBody::Fixed,
        Collider::cuboid(2.0, 1.5, 0.2),
        layer_groups(OBJECT_LAYER_ENVIRONMENT),
    ));
}
