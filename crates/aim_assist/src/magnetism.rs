//! Aim magnetism: притяжение прицела к выбранной цели
//!
//! Pull — угловой (yaw/pitch), добавляется к `LookInput::delta`.
//! Масштаб: factor * pull_speed * dt → не зависит от FPS.
//! Ограничен угловым расстоянием до цели (без overshoot, без hard snap).

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

use crate::config::MagnetismConfig;
use crate::input::LookInput;
use crate::target::TargetData;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MagnetismEngine {
    factor: f32,
}

impl MagnetismEngine {
    /// Update the magnetism factor for this frame (own radius/curve/enable flag)
    pub fn calculate_magnetism(
        &mut self,
        config: &MagnetismConfig,
        target: Option<&TargetData>,
        distance_sq_from_origin: f32,
    ) {
        self.factor = match target {
            Some(_) if config.enabled => config
                .curve
                .strength_at(distance_sq_from_origin, config.radius)
                .clamp(0.0, 1.0),
            _ => 0.0,
        };
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn reset(&mut self) {
        self.factor = 0.0;
    }

    /// Compute this frame's pull from `aim_forward` toward `target_direction`
    /// and add it to `look`. Returns the applied (yaw, pitch) delta.
    pub fn apply_magnetism(
        &self,
        config: &MagnetismConfig,
        delta_time: f32,
        aim_forward: Vec3,
        target_direction: Vec3,
        look: &mut LookInput,
    ) -> Vec2 {
        let pull = self.pull(config, delta_time, aim_forward, target_direction);
        look.delta += pull;
        pull
    }

    /// Pull for one frame without applying it
    pub fn pull(
        &self,
        config: &MagnetismConfig,
        delta_time: f32,
        aim_forward: Vec3,
        target_direction: Vec3,
    ) -> Vec2 {
        if self.factor <= 0.0 || delta_time.is_nan() || delta_time <= 0.0 || !config.pull_speed.is_finite() {
            return Vec2::ZERO;
        }

        let (Some(forward), Some(direction)) =
            (aim_forward.try_normalize(), target_direction.try_normalize())
        else {
            return Vec2::ZERO;
        };

        let offset = aim_offset(forward, direction);
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return Vec2::ZERO;
        }

        let step = self.factor * config.pull_speed.max(0.0) * delta_time;
        offset / distance * step.min(distance)
    }
}

/// Yaw/pitch of a unit direction (Bevy: forward = -Z, yaw around +Y)
pub fn yaw_pitch(direction: Vec3) -> Vec2 {
    let yaw = (-direction.x).atan2(-direction.z);
    let pitch = direction.y.clamp(-1.0, 1.0).asin();
    Vec2::new(yaw, pitch)
}

/// Angular offset (yaw, pitch) from `forward` to `direction`, yaw wrapped to [-π, π)
pub fn aim_offset(forward: Vec3, direction: Vec3) -> Vec2 {
    let from = yaw_pitch(forward);
    let to = yaw_pitch(direction);
    let yaw = (to.x - from.x + PI).rem_euclid(TAU) - PI;
    Vec2::new(yaw, to.y - from.y)
}
