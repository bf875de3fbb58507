//! Physics side of aim assist
//!
//! - layers: object type / trace channel bit masks
//! - rapier: `CollisionQuery` поверх Rapier + ECS `TargetResolver` + gather system

pub mod layers;
pub mod rapier;

pub use rapier::{gather_aim_candidates, EcsTargetResolver, RapierCollisionQuery};
