//! ECS systems: input device tracking + per-frame aim assist pipeline

use bevy::prelude::*;

use crate::assist::{AimAssist, AimCandidates};
use crate::input::{InputDeviceChanged, LookInput};
use crate::projection::{CameraLens, ScreenProjector, ViewportSize};

/// System: InputDeviceChanged events → AimAssist::on_hardware_device_changed
pub fn track_input_device(
    mut events: EventReader<InputDeviceChanged>,
    mut assists: Query<(Entity, &mut AimAssist)>,
) {
    for event in events.read() {
        for (entity, mut assist) in assists.iter_mut() {
            if event.player.map_or(true, |player| player == entity) {
                assist.on_hardware_device_changed(event.device);
            }
        }
    }
}

/// System: select → friction → magnetism → LookInput
pub fn update_aim_assist(
    time: Res<Time>,
    viewport: Res<ViewportSize>,
    mut assists: Query<(
        &mut AimAssist,
        &GlobalTransform,
        &CameraLens,
        &AimCandidates,
        &mut LookInput,
    )>,
) {
    let delta = time.delta_secs();

    for (mut assist, transform, lens, candidates, mut look) in assists.iter_mut() {
        let projector = ScreenProjector::new(transform.compute_transform(), *lens, viewport.0);
        assist.update(delta, &projector, &candidates.0, &mut *look);
    }
}
