//! AimAssist — per-player aim assist instance (ECS component)
//!
//! Per frame: candidates → best target → friction/magnetism → LookInput.
//! Кандидаты приходят готовыми (`AimCandidates`), их собирает
//! `gather_aim_candidates` через Rapier (см. `physics::rapier`).

use bevy::prelude::*;

use crate::config::AimAssistConfig;
use crate::filter::{self, CollisionQuery, QueryView, TargetResolver};
use crate::friction::FrictionEngine;
use crate::input::{InputDeviceType, LookInput};
use crate::logger;
use crate::magnetism::MagnetismEngine;
use crate::projection::{CameraLens, ScreenProjector};
use crate::selection;
use crate::target::{Target, TargetData};

/// Candidates gathered for this frame
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct AimCandidates(pub Vec<Target>);

/// Transient per-frame values (пересчитываются каждый кадр)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameState {
    pub viewport_center: Vec2,
    pub best_target: Option<TargetData>,
    pub friction: FrictionEngine,
    pub magnetism: MagnetismEngine,
    /// Pull added to the look delta this frame
    pub magnetism_pull: Vec2,
}

/// Aim assist for one player.
///
/// Entity с этим компонентом — камера игрока: её `GlobalTransform` + `CameraLens`
/// задают проекцию.
#[derive(Component, Debug, Clone)]
#[require(LookInput, AimCandidates, CameraLens)]
pub struct AimAssist {
    config: AimAssistConfig,
    enabled: bool,
    last_input_device: InputDeviceType,
    /// Собственный pawn: не кандидат и не блокирует visibility trace
    pawn: Option<Entity>,
    frame: FrameState,
}

impl Default for AimAssist {
    fn default() -> Self {
        Self::new(AimAssistConfig::default())
    }
}

impl AimAssist {
    pub fn new(config: AimAssistConfig) -> Self {
        Self {
            config,
            enabled: true,
            last_input_device: InputDeviceType::Unspecified,
            pawn: None,
            frame: FrameState::default(),
        }
    }

    pub fn with_pawn(mut self, pawn: Entity) -> Self {
        self.pawn = Some(pawn);
        self
    }

    pub fn pawn(&self) -> Option<Entity> {
        self.pawn
    }

    pub fn frame(&self) -> &FrameState {
        &self.frame
    }

    pub fn best_target(&self) -> Option<&TargetData> {
        self.frame.best_target.as_ref()
    }

    // ------------------------------------------------------------------------
    // Enable / input device gate
    // ------------------------------------------------------------------------

    /// Disabling resets all signals to neutral immediately.
    pub fn enable_aim_assist(&mut self, enabled: bool) {
        if self.enabled != enabled {
            logger::log_info(&format!("Aim assist {}", if enabled { "enabled" } else { "disabled" }));
        }

        self.enabled = enabled;
        if !enabled {
            self.reset_frame();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn on_hardware_device_changed(&mut self, device: InputDeviceType) {
        if self.last_input_device != device {
            logger::log(&format!(
                "Aim assist input device: {:?} → {:?}",
                self.last_input_device, device
            ));
        }
        self.last_input_device = device;
    }

    pub fn is_using_gamepad(&self) -> bool {
        self.last_input_device == InputDeviceType::Gamepad
    }

    /// Enabled and allowed by the gamepad-only gate
    pub fn is_active(&self) -> bool {
        self.enabled && (!self.config.use_only_on_gamepad || self.is_using_gamepad())
    }

    // ------------------------------------------------------------------------
    // Targeting
    // ------------------------------------------------------------------------

    pub fn get_viewport_center(&self, projector: &ScreenProjector) -> Vec2 {
        projector.viewport_center()
    }

    /// Query view from the camera, ignoring our own pawn
    pub fn query_view(&self, projector: &ScreenProjector) -> QueryView {
        QueryView {
            origin: projector.camera_location(),
            rotation: projector.camera_rotation(),
            ignore: self.pawn,
        }
    }

    pub fn get_valid_targets(
        &self,
        projector: &ScreenProjector,
        collision: &impl CollisionQuery,
        resolver: &impl TargetResolver,
    ) -> Vec<Target> {
        filter::get_valid_targets(&self.query_view(projector), &self.config.filter, collision, resolver)
    }

    pub fn is_target_within_screen_circle(
        &self,
        projector: &ScreenProjector,
        target_location: Vec3,
        screen_point: Vec2,
        radius: f32,
    ) -> bool {
        selection::is_target_within_screen_circle(projector, target_location, screen_point, radius)
    }

    /// Select the best target and remember it as this frame's winner
    pub fn find_best_front_facing_target(
        &mut self,
        projector: &ScreenProjector,
        targets: &[Target],
    ) -> Option<TargetData> {
        let best = selection::find_best_front_facing_target(projector, targets);
        self.frame.best_target = best.clone();
        best
    }

    // ------------------------------------------------------------------------
    // Friction / Magnetism
    // ------------------------------------------------------------------------

    pub fn calculate_friction(&mut self, target: Option<&TargetData>, distance_sq_from_origin: f32) {
        self.frame
            .friction
            .calculate_friction(&self.config.friction, target, distance_sq_from_origin);
    }

    /// Look sensitivity scale (1 - friction factor)
    pub fn current_aim_friction(&self) -> f32 {
        self.frame.friction.current_aim_friction()
    }

    pub fn calculate_magnetism(&mut self, target: Option<&TargetData>, distance_sq_from_origin: f32) {
        self.frame
            .magnetism
            .calculate_magnetism(&self.config.magnetism, target, distance_sq_from_origin);
    }

    pub fn current_aim_magnetism(&self) -> f32 {
        self.frame.magnetism.factor()
    }

    /// Add this frame's pull toward the target to `look`.
    ///
    /// Zero `target_direction` → direction from the camera to `target_location`.
    pub fn apply_magnetism(
        &self,
        delta_time: f32,
        projector: &ScreenProjector,
        target_location: Vec3,
        target_direction: Vec3,
        look: &mut LookInput,
    ) -> Vec2 {
        let direction = if target_direction.length_squared() > f32::EPSILON {
            target_direction
        } else {
            target_location - projector.camera_location()
        };

        self.frame.magnetism.apply_magnetism(
            &self.config.magnetism,
            delta_time,
            projector.camera_forward(),
            direction,
            look,
        )
    }

    // ------------------------------------------------------------------------
    // Frame pipeline
    // ------------------------------------------------------------------------

    /// Select → friction/magnetism → apply to `look`.
    ///
    /// Inactive → neutral frame (friction scale 1, no pull), `look` untouched.
    pub fn update(
        &mut self,
        delta_time: f32,
        projector: &ScreenProjector,
        candidates: &[Target],
        look: &mut LookInput,
    ) {
        self.frame.viewport_center = projector.viewport_center();

        if !self.is_active() {
            self.reset_frame();
            return;
        }

        let best = self.find_best_front_facing_target(projector, candidates);
        let distance_sq = best
            .as_ref()
            .map_or(f32::INFINITY, |target| target.screen_distance_sq);
        let center = self.frame.viewport_center;

        let friction_target = best.as_ref().filter(|target| {
            self.is_target_within_screen_circle(projector, target.location, center, self.config.friction.radius)
        });
        let magnetism_target = best.as_ref().filter(|target| {
            self.is_target_within_screen_circle(projector, target.location, center, self.config.magnetism.radius)
        });

        self.calculate_friction(friction_target, distance_sq);
        self.calculate_magnetism(magnetism_target, distance_sq);

        look.delta *= self.current_aim_friction();

        self.frame.magnetism_pull = match magnetism_target {
            Some(target) => {
                let direction = target.location - projector.camera_location();
                self.apply_magnetism(delta_time, projector, target.location, direction, look)
            }
            None => Vec2::ZERO,
        };

        if self.config.show_debug {
            self.log_frame();
        }
    }

    fn reset_frame(&mut self) {
        self.frame.best_target = None;
        self.frame.friction.reset();
        self.frame.magnetism.reset();
        self.frame.magnetism_pull = Vec2::ZERO;
    }

    fn log_frame(&self) {
        // show_debug — явный opt-in, поэтому Info (виден при дефолтном пороге)
        match &self.frame.best_target {
            Some(target) => logger::log_info(&format!(
                "🎯 Aim target {:?} socket={:?} dist={:.1}px friction={:.2} magnetism={:.2} pull={:?}",
                target.entity,
                target.socket,
                target.screen_distance_sq.sqrt(),
                self.current_aim_friction(),
                self.current_aim_magnetism(),
                self.frame.magnetism_pull,
            )),
            None => logger::log_info("🎯 Aim target: none"),
        }
    }
}
