//! Aim Assist Core
//!
//! Per-frame aim assistance on Bevy 0.16 ECS:
//! candidates (overlap + team + visibility) → best front-facing target
//! (screen distance to center) → friction scale + magnetism pull → `LookInput`.
//!
//! Host отвечает за rendering, камеру и input: aim assist только читает
//! `GlobalTransform` + `CameraLens` камеры и пишет в `LookInput`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod assist;
pub mod config;
pub mod curve;
pub mod filter;
pub mod friction;
pub mod input;
pub mod logger;
pub mod magnetism;
pub mod physics;
pub mod projection;
pub mod selection;
pub mod systems;
pub mod target;

// Re-export основных типов
pub use assist::{AimAssist, AimCandidates, FrameState};
pub use config::{
    AimAssistConfig, ConfigError, FilterConfig, FrictionConfig, MagnetismConfig, TeamId,
};
pub use curve::{CurveKey, ResponseCurve};
pub use filter::{get_valid_targets, CollisionQuery, OverlapQuery, QueryView, TargetResolver, TraceHit};
pub use input::{InputDeviceChanged, InputDeviceType, LookInput};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use projection::{CameraLens, ScreenProjector, ViewportSize};
pub use selection::{find_best_front_facing_target, is_target_within_screen_circle};
pub use target::{AimPoint, AimSocket, AimSockets, Target, TargetData, Team};

/// Порядок внутри кадра: сбор кандидатов → применение
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AimAssistSet {
    Gather,
    Apply,
}

/// Core plugin: device tracking + frame pipeline (без физики)
///
/// Порядок выполнения (Update):
/// 1. track_input_device — InputDeviceChanged → gamepad gate
/// 2. update_aim_assist — selection, friction, magnetism → LookInput
pub struct AimAssistPlugin;

impl Plugin for AimAssistPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<InputDeviceChanged>()
            .init_resource::<ViewportSize>()
            .register_type::<LookInput>()
            .register_type::<CameraLens>()
            .register_type::<Team>()
            .register_type::<AimSockets>()
            .configure_sets(Update, (AimAssistSet::Gather, AimAssistSet::Apply).chain())
            .add_systems(
                Update,
                (systems::track_input_device, systems::update_aim_assist)
                    .chain()
                    .in_set(AimAssistSet::Apply),
            );
    }
}

/// Candidate gathering through Rapier queries
///
/// Требует `RapierPhysicsPlugin` в host app.
pub struct RapierTargetingPlugin;

impl Plugin for RapierTargetingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            physics::gather_aim_candidates.in_set(AimAssistSet::Gather),
        );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless прогонов (тесты, demo)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed));

    app
}
