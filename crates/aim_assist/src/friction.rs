//! Aim friction: замедление look input рядом с целью
//!
//! factor ∈ [0, 1] из кривой, scale = 1 - factor умножается на sensitivity.

use crate::config::FrictionConfig;
use crate::target::TargetData;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrictionEngine {
    factor: f32,
}

impl FrictionEngine {
    /// Update the friction factor for this frame.
    ///
    /// Disabled, no target, or malformed radius → factor 0.
    pub fn calculate_friction(
        &mut self,
        config: &FrictionConfig,
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

    /// Raw curve factor (0 = no friction)
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Sensitivity multiplier: 1 = no slowdown, 0 = full stop
    pub fn current_aim_friction(&self) -> f32 {
        1.0 - self.factor
    }

    pub fn reset(&mut self) {
        self.factor = 0.0;
    }
}
