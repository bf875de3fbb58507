//! Rapier-backed candidate gathering
//!
//! Overlap box → `intersect_shape`, visibility trace → `cast_ray` (solid:
//! старт внутри коллайдера даёт toi = 0, что filter трактует как "видно").

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::assist::{AimAssist, AimCandidates};
use crate::config::TeamId;
use crate::filter::{CollisionQuery, OverlapQuery, TargetResolver, TraceHit};
use crate::logger;
use crate::physics::layers;
use crate::projection::{CameraLens, ScreenProjector, ViewportSize};
use crate::target::{AimPoint, AimSockets, Team};

/// `CollisionQuery` over a Rapier context
pub struct RapierCollisionQuery<'a, 'w> {
    context: &'a RapierContext<'w>,
}

impl<'a, 'w> RapierCollisionQuery<'a, 'w> {
    pub fn new(context: &'a RapierContext<'w>) -> Self {
        Self { context }
    }
}

impl CollisionQuery for RapierCollisionQuery<'_, '_> {
    fn overlap_box(&self, query: &OverlapQuery) -> Vec<Entity> {
        let half = query.half_extents;
        let shape = Collider::cuboid(half.x, half.y, half.z);
        let filter = QueryFilter::new().groups(layers::query_groups(query.object_types));

        let mut hits = Vec::new();
        self.context
            .intersect_shape(query.center, query.rotation, shape.raw.as_ref(), filter, |entity| {
                hits.push(entity);
                true // продолжаем поиск
            });

        // Rapier не гарантирует порядок → сортируем для детерминизма selection ties
        hits.sort();
        hits.dedup();
        hits
    }

    fn line_trace(&self, from: Vec3, to: Vec3, channel: u32, ignore: Option<Entity>) -> Option<TraceHit> {
        let delta = to - from;
        let length = delta.length();
        if length <= f32::EPSILON {
            return None;
        }

        let mut filter = QueryFilter::new().groups(layers::query_groups(channel));
        if let Some(entity) = ignore {
            filter = filter.exclude_collider(entity);
        }

        self.context
            .cast_ray(from, delta / length, length, true, filter)
            .map(|(entity, distance)| TraceHit { entity, distance })
    }
}

/// `TargetResolver` over ECS components
///
/// - native team: `Team` на самом коллайдере
/// - fallback team: ближайший предок (`ChildOf`) с `Team`
/// - aim points: `AimSockets` или origin (`GlobalTransform`)
#[derive(SystemParam)]
pub struct EcsTargetResolver<'w, 's> {
    teams: Query<'w, 's, &'static Team>,
    parents: Query<'w, 's, &'static ChildOf>,
    sockets: Query<'w, 's, &'static AimSockets>,
    transforms: Query<'w, 's, &'static GlobalTransform>,
}

impl TargetResolver for EcsTargetResolver<'_, '_> {
    fn native_team(&self, entity: Entity) -> Option<TeamId> {
        self.teams.get(entity).ok().map(|team| team.0)
    }

    fn fallback_team(&self, entity: Entity) -> Option<TeamId> {
        let mut current = entity;
        while let Ok(child_of) = self.parents.get(current) {
            current = child_of.parent();
            if let Ok(team) = self.teams.get(current) {
                return Some(team.0);
            }
        }
        None
    }

    fn aim_points(&self, entity: Entity) -> Vec<AimPoint> {
        let Ok(transform) = self.transforms.get(entity) else {
            return Vec::new();
        };

        match self.sockets.get(entity) {
            Ok(sockets) => sockets.resolve(transform),
            Err(_) => vec![AimPoint {
                socket: None,
                location: transform.translation(),
            }],
        }
    }
}

/// System: собрать кандидатов для всех активных aim assist instances
///
/// Нет Rapier context → пустые кандидаты (кадр без assist, не ошибка).
pub fn gather_aim_candidates(
    rapier_context: ReadRapierContext,
    viewport: Res<ViewportSize>,
    resolver: EcsTargetResolver,
    mut assists: Query<(&AimAssist, &GlobalTransform, &CameraLens, &mut AimCandidates)>,
    mut warned: Local<bool>,
) {
    let Ok(context) = rapier_context.single() else {
        if !*warned {
            logger::log_warning("gather_aim_candidates: RapierContext не найден, aim assist без кандидатов");
            *warned = true;
        }
        for (_, _, _, mut candidates) in assists.iter_mut() {
            candidates.0.clear();
        }
        return;
    };

    let collision = RapierCollisionQuery::new(&context);

    for (assist, transform, lens, mut candidates) in assists.iter_mut() {
        candidates.0.clear();

        if !assist.is_active() {
            continue;
        }

        let projector = ScreenProjector::new(transform.compute_transform(), *lens, viewport.0);
        candidates.0 = assist.get_valid_targets(&projector, &collision, &resolver);
    }
}
