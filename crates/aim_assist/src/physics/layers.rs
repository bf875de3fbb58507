//! Collision Layers Constants
//!
//! Битовые маски object types / trace channels для aim assist запросов.
//! Совпадают с битами Rapier `Group` (bit N → `Group::GROUP_{N+1}`).
//!
//! ## Layers:
//! - bit 0 (0b1 = 1): Reserved
//! - bit 1 (0b10 = 2): Actors (players, NPCs — capsule colliders)
//! - bit 2 (0b100 = 4): Environment (walls, obstacles, terrain)
//! - bit 3 (0b1000 = 8): Targets (training dummies, destructibles)
//!
//! ## Использование:
//! ```ignore
//! // Overlap query: кого считаем кандидатами
//! filter.object_types = OBJECT_TYPES_AIMABLE;
//!
//! // Visibility trace: что может закрывать цель
//! filter.visibility_channel = TRACE_CHANNEL_VISIBILITY;
//! ```

use bevy_rapier3d::prelude::{CollisionGroups, Group};

/// Actors (players, NPCs)
pub const OBJECT_LAYER_ACTORS: u32 = 0b10; // 2

/// Environment (static level geometry)
pub const OBJECT_LAYER_ENVIRONMENT: u32 = 0b100; // 4

/// Targets (static aimable props)
pub const OBJECT_LAYER_TARGETS: u32 = 0b1000; // 8

/// Default overlap object types: Actors + Targets
pub const OBJECT_TYPES_AIMABLE: u32 = OBJECT_LAYER_ACTORS | OBJECT_LAYER_TARGETS;

/// Visibility trace: всё что блокирует взгляд (Actors + Environment + Targets)
pub const TRACE_CHANNEL_VISIBILITY: u32 =
    OBJECT_LAYER_ACTORS | OBJECT_LAYER_ENVIRONMENT | OBJECT_LAYER_TARGETS;

/// Rapier groups для query filter: query принадлежит всем группам, фильтр = mask
pub fn query_groups(mask: u32) -> CollisionGroups {
    CollisionGroups::new(Group::ALL, Group::from_bits_truncate(mask))
}

/// Collision groups для spawn коллайдера на одном слое
pub fn layer_groups(layer: u32) -> CollisionGroups {
    CollisionGroups::new(Group::from_bits_truncate(layer), Group::ALL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_are_disjoint() {
        assert_eq!(OBJECT_LAYER_ACTORS & OBJECT_LAYER_ENVIRONMENT, 0);
        assert_eq!(OBJECT_LAYER_ACTORS & OBJECT_LAYER_TARGETS, 0);
        assert_eq!(OBJECT_LAYER_ENVIRONMENT & OBJECT_LAYER_TARGETS, 0);
    }

    #[test]
    fn test_aimable_excludes_environment() {
        assert_eq!(OBJECT_TYPES_AIMABLE & OBJECT_LAYER_ENVIRONMENT, 0);
        assert_ne!(TRACE_CHANNEL_VISIBILITY & OBJECT_LAYER_ENVIRONMENT, 0);
    }

    #[test]
    fn test_query_groups_filter_by_mask() {
        let query = query_groups(OBJECT_TYPES_AIMABLE);
        assert_eq!(query.memberships, Group::ALL);
        assert_eq!(query.filters.bits(), OBJECT_TYPES_AIMABLE);

        let wall = layer_groups(OBJECT_LAYER_ENVIRONMENT);
        assert_eq!(wall.memberships.bits(), OBJECT_LAYER_ENVIRONMENT);
        assert_eq!(wall.filters, Group::ALL);
    }
}
