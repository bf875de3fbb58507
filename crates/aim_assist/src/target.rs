//! Target data + ECS компоненты aimable объектов
//!
//! - `Target`: кандидат этого кадра (collider entity + socket + world location)
//! - `TargetData`: победитель selection (+ screen distance²)
//! - `Team`, `AimSockets`: компоненты на стороне целей

use bevy::prelude::*;

use crate::config::TeamId;

/// Candidate aim point for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Owning collider (не владеем, только читаем)
    pub entity: Entity,
    /// Attachment point name, `None` = object origin
    pub socket: Option<String>,
    pub location: Vec3,
}

impl Target {
    pub fn new(entity: Entity, socket: Option<String>, location: Vec3) -> Self {
        Self {
            entity,
            socket,
            location,
        }
    }

    pub fn at_origin(entity: Entity, location: Vec3) -> Self {
        Self::new(entity, None, location)
    }
}

/// Best target of the frame
#[derive(Debug, Clone, PartialEq)]
pub struct TargetData {
    pub entity: Entity,
    pub socket: Option<String>,
    pub location: Vec3,
    /// Squared screen distance from viewport center (pixels²)
    pub screen_distance_sq: f32,
}

impl TargetData {
    pub fn from_target(target: &Target, screen_distance_sq: f32) -> Self {
        Self {
            entity: target.entity,
            socket: target.socket.clone(),
            location: target.location,
            screen_distance_sq,
        }
    }
}

/// Resolved aim point of a collider (socket or origin)
#[derive(Debug, Clone, PartialEq)]
pub struct AimPoint {
    pub socket: Option<String>,
    pub location: Vec3,
}

/// Team membership (native team capability)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Team(pub TeamId);

/// Named socket, offset in the owner's local space
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct AimSocket {
    pub name: String,
    pub offset: Vec3,
}

impl AimSocket {
    pub fn new(name: impl Into<String>, offset: Vec3) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }
}

/// Named aim points on a collider (голова, грудь, ...)
///
/// Без этого компонента целимся в origin коллайдера.
/// Пустой список → объект не даёт ни одной цели.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AimSockets(pub Vec<AimSocket>);

impl AimSockets {
    /// World locations of all sockets for the given owner transform
    pub fn resolve(&self, owner: &GlobalTransform) -> Vec<AimPoint> {
        self.0
            .iter()
            .map(|socket| AimPoint {
                socket: Some(socket.name.clone()),
                location: owner.transform_point(socket.offset),
            })
            .collect()
    }
}
