//! World → screen projection
//!
//! Camera convention: смотрит вдоль local -Z, +Y вверх (Bevy).
//! Screen space: pixels, origin top-left, +Y вниз.

use std::f32::consts::{FRAC_PI_4, PI};

use bevy::prelude::*;

/// Current viewport size in pixels (обновляется host'ом при resize)
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize(pub Vec2);

impl Default for ViewportSize {
    fn default() -> Self {
        Self(Vec2::new(1920.0, 1080.0))
    }
}

/// Camera lens parameters read by aim assist each frame
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraLens {
    /// Vertical field of view (radians)
    pub fov_y: f32,
    /// Near plane distance
    pub near: f32,
}

impl Default for CameraLens {
    fn default() -> Self {
        Self {
            fov_y: FRAC_PI_4,
            near: 0.1,
        }
    }
}

/// Perspective projector snapshot for one frame
#[derive(Debug, Clone, Copy)]
pub struct ScreenProjector {
    camera: Transform,
    view_projection: Mat4,
    viewport: Vec2,
    valid: bool,
}

impl ScreenProjector {
    pub fn new(camera: Transform, lens: CameraLens, viewport: Vec2) -> Self {
        let valid = viewport.x > 0.0
            && viewport.y > 0.0
            && lens.fov_y.is_finite()
            && lens.fov_y > 0.0
            && lens.fov_y < PI
            && lens.near > 0.0;

        let view_projection = if valid {
            let projection =
                Mat4::perspective_infinite_rh(lens.fov_y, viewport.x / viewport.y, lens.near);
            projection * camera.compute_matrix().inverse()
        } else {
            Mat4::ZERO
        };

        Self {
            camera,
            view_projection,
            viewport,
            valid,
        }
    }

    /// Project a world point to screen pixels.
    ///
    /// `None` if the point is behind the camera or the result is not finite.
    /// Points outside the viewport rectangle still project.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        if !self.valid {
            return None;
        }

        let clip = self.view_projection * world.extend(1.0);
        if clip.w.is_nan() || clip.w <= f32::EPSILON {
            return None;
        }

        let ndc = clip.truncate().truncate() / clip.w;
        let screen = Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        );

        screen.is_finite().then_some(screen)
    }

    pub fn viewport_center(&self) -> Vec2 {
        self.viewport * 0.5
    }

    pub fn camera_location(&self) -> Vec3 {
        self.camera.translation
    }

    pub fn camera_rotation(&self) -> Quat {
        self.camera.rotation
    }

    pub fn camera_forward(&self) -> Vec3 {
        self.camera.forward().as_vec3()
    }
}
