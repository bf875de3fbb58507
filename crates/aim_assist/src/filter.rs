//! Candidate discovery: overlap box → team check → aim points → visibility trace
//!
//! Физика и ECS lookup спрятаны за трейтами `CollisionQuery` / `TargetResolver`:
//! - runtime: Rapier + ECS queries (`physics::rapier`)
//! - тесты: in-memory мир

use bevy::prelude::*;

use crate::config::{FilterConfig, TeamId};
use crate::target::{AimPoint, Target};

/// Oriented overlap box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapQuery {
    pub center: Vec3,
    pub rotation: Quat,
    pub half_extents: Vec3,
    /// Object type mask
    pub object_types: u32,
}

impl OverlapQuery {
    /// Box in front of the viewer: `overlap_range` along forward, oriented with the view
    pub fn in_front_of(view: &QueryView, config: &FilterConfig) -> Self {
        let forward = view.rotation * Vec3::NEG_Z;
        Self {
            center: view.origin + forward * config.overlap_range,
            rotation: view.rotation,
            half_extents: config.half_extents(),
            object_types: config.object_types,
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        let local = self.rotation.inverse() * (point - self.center);
        local.abs().cmple(self.half_extents).all()
    }
}

/// First blocking hit of a visibility trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHit {
    pub entity: Entity,
    /// Distance from the trace start
    pub distance: f32,
}

/// Where the query is made from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryView {
    pub origin: Vec3,
    pub rotation: Quat,
    /// Собственный pawn игрока — не блокирует trace
    pub ignore: Option<Entity>,
}

/// Collision system seam
pub trait CollisionQuery {
    /// Colliders of the given object types intersecting the box.
    ///
    /// Stable order = entity order (not spatial); selection ties resolve by it.
    fn overlap_box(&self, query: &OverlapQuery) -> Vec<Entity>;

    /// First hit between `from` and `to` on `channel`, `None` if nothing blocks
    fn line_trace(&self, from: Vec3, to: Vec3, channel: u32, ignore: Option<Entity>) -> Option<TraceHit>;
}

/// Team and aim point lookup for colliders
pub trait TargetResolver {
    /// Team exposed by the collider itself
    fn native_team(&self, entity: Entity) -> Option<TeamId>;

    /// Team found by fallback lookup (e.g. an ancestor)
    fn fallback_team(&self, entity: Entity) -> Option<TeamId>;

    /// Named sockets, or the origin when the collider exposes none.
    /// Empty for despawned colliders or an empty socket list.
    fn aim_points(&self, entity: Entity) -> Vec<AimPoint>;
}

/// Resolve the team of a hit according to the filter settings
pub fn resolve_team(
    entity: Entity,
    config: &FilterConfig,
    resolver: &impl TargetResolver,
) -> Option<TeamId> {
    let native = if config.team_from_native_interface {
        resolver.native_team(entity)
    } else {
        None
    };

    native.or_else(|| resolver.fallback_team(entity))
}

/// Visibility check, trace from `origin` to the aim point
///
/// Clear if nothing is hit, the target itself is hit, or the trace starts
/// inside a collider (distance 0).
pub fn is_visible(
    origin: Vec3,
    target: Entity,
    location: Vec3,
    channel: u32,
    ignore: Option<Entity>,
    collision: &impl CollisionQuery,
) -> bool {
    match collision.line_trace(origin, location, channel, ignore) {
        None => true,
        Some(hit) => hit.entity == target || hit.distance <= f32::EPSILON,
    }
}

/// Все валидные цели этого кадра (в порядке overlap → sockets)
pub fn get_valid_targets(
    view: &QueryView,
    config: &FilterConfig,
    collision: &impl CollisionQuery,
    resolver: &impl TargetResolver,
) -> Vec<Target> {
    let query = OverlapQuery::in_front_of(view, config);
    let hits = collision.overlap_box(&query);

    let mut targets = Vec::new();

    for entity in hits {
        if Some(entity) == view.ignore {
            continue;
        }

        if config.query_teams {
            let Some(team) = resolve_team(entity, config, resolver) else {
                continue;
            };
            if !config.accepts_team(team) {
                continue;
            }
        }

        for point in resolver.aim_points(entity) {
            if !point.location.is_finite() {
                continue;
            }

            if !is_visible(
                view.origin,
                entity,
                point.location,
                config.visibility_channel,
                view.ignore,
                collision,
            ) {
                continue;
            }

            targets.push(Target::new(entity, point.socket, point.location));
        }
    }

    targets
}
