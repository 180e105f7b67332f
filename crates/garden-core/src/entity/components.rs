//! Component value types shared by projectiles and targets.
//!
//! - [`BoundingVolume`]: Local, unscaled collision shape of a target
//! - [`WorldVolume`]: The same shape resolved against a target's current transform
//! - [`TargetResponse`]: What a target does when hit
//! - [`Tool`]: The tool the player is holding, recorded on each projectile

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Collision shape of a target in local, unscaled units.
///
/// Volumes are resolved against the target's current position and scale
/// every time they are tested (see [`BoundingVolume::resolve`]); targets move
/// and rescale, so nothing here is cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum BoundingVolume {
    /// Sphere centred on the target position.
    Sphere {
        /// Radius at scale 1.0.
        radius: f32,
    },
    /// Axis-aligned box centred on the target position.
    Aabb {
        /// Half extents at scale 1.0.
        half_extents: Vec3,
    },
}

impl BoundingVolume {
    /// A zero-radius sphere: the target is hit only within the collision radius.
    pub const POINT: Self = Self::Sphere { radius: 0.0 };

    /// Resolves this volume against a world position and uniform scale.
    #[must_use]
    pub fn resolve(&self, position: Vec3, scale: f32) -> WorldVolume {
        match *self {
            Self::Sphere { radius } => WorldVolume::Sphere {
                center: position,
                radius: radius * scale,
            },
            Self::Aabb { half_extents } => {
                let half = half_extents * scale;
                WorldVolume::Aabb {
                    min: position - half,
                    max: position + half,
                }
            }
        }
    }
}

/// A bounding volume placed in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldVolume {
    /// World-space sphere.
    Sphere {
        /// Centre of the sphere.
        center: Vec3,
        /// Scaled radius.
        radius: f32,
    },
    /// World-space axis-aligned box.
    Aabb {
        /// Minimum corner.
        min: Vec3,
        /// Maximum corner.
        max: Vec3,
    },
}

impl WorldVolume {
    /// Tests whether `point` is inside this volume.
    ///
    /// Spheres are widened by `collision_radius` (the projectile's own
    /// radius) and use a strict distance test. Boxes use exact, inclusive
    /// containment and ignore `collision_radius`.
    #[must_use]
    pub fn contains(&self, point: Vec3, collision_radius: f32) -> bool {
        match *self {
            Self::Sphere { center, radius } => {
                let reach = radius + collision_radius;
                center.distance_squared(point) < reach * reach
            }
            Self::Aabb { min, max } => point.cmple(max).all() && point.cmpge(min).all(),
        }
    }
}

/// Domain-specific response of a target to a hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "factor", rename_all = "snake_case")]
pub enum TargetResponse {
    /// Burst, score, shrink away, then respawn somewhere else.
    RespawnAndScore,
    /// Multiply the current scale by the factor. Compounds across hits.
    ScaleByFactor(f32),
}

impl TargetResponse {
    /// Returns `true` for [`TargetResponse::RespawnAndScore`].
    #[must_use]
    pub const fn scores(&self) -> bool {
        matches!(self, Self::RespawnAndScore)
    }
}

/// The tool the player is holding.
///
/// Tools differ in projectile speed and lifetime and in whether they force a
/// particular scale factor on plants (see
/// [`ToolConfig`](crate::config::ToolConfig)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Fires bullets.
    #[default]
    Blaster,
    /// Fires droplets that grow plants.
    WateringCan,
    /// Snips; its projectiles shrink plants.
    Scissors,
}

impl Tool {
    /// All tools in cycling order.
    pub const ALL: [Self; 3] = [Self::Blaster, Self::WateringCan, Self::Scissors];

    /// Returns the tool after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Blaster => Self::WateringCan,
            Self::WateringCan => Self::Scissors,
            Self::Scissors => Self::Blaster,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blaster => write!(f, "Blaster"),
            Self::WateringCan => write!(f, "WateringCan"),
            Self::Scissors => write!(f, "Scissors"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod volume_tests {
        use super::*;

        #[test]
        fn point_sphere_uses_collision_radius() {
            let volume = BoundingVolume::POINT.resolve(Vec3::ZERO, 1.0);
            assert!(volume.contains(Vec3::new(0.05, 0.0, 0.0), 0.1));
            assert!(!volume.contains(Vec3::new(0.1, 0.0, 0.0), 0.1));
        }

        #[test]
        fn sphere_radius_follows_scale() {
            let local = BoundingVolume::Sphere { radius: 1.0 };
            let point = Vec3::new(0.0, 1.5, 0.0);
            assert!(!local.resolve(Vec3::ZERO, 1.0).contains(point, 0.1));
            assert!(local.resolve(Vec3::ZERO, 2.0).contains(point, 0.1));
        }

        #[test]
        fn aabb_containment_is_inclusive_and_exact() {
            let local = BoundingVolume::Aabb {
                half_extents: Vec3::splat(0.5),
            };
            let volume = local.resolve(Vec3::new(1.0, 0.0, 0.0), 1.0);
            assert!(volume.contains(Vec3::new(1.5, 0.5, -0.5), 0.1));
            assert!(!volume.contains(Vec3::new(1.55, 0.0, 0.0), 0.1));
        }

        #[test]
        fn aabb_shrinks_with_scale() {
            let local = BoundingVolume::Aabb {
                half_extents: Vec3::ONE,
            };
            let point = Vec3::new(0.5, 0.0, 0.0);
            assert!(local.resolve(Vec3::ZERO, 1.0).contains(point, 0.0));
            assert!(!local.resolve(Vec3::ZERO, 0.2).contains(point, 0.0));
        }
    }

    mod tool_tests {
        use super::*;

        #[test]
        fn next_cycles_through_all_tools() {
            let mut tool = Tool::Blaster;
            for expected in [Tool::WateringCan, Tool::Scissors, Tool::Blaster] {
                tool = tool.next();
                assert_eq!(tool, expected);
            }
        }

        #[test]
        fn tools_serialize_snake_case() {
            let json = serde_json::to_string(&Tool::WateringCan).unwrap();
            assert_eq!(json, "\"watering_can\"");
        }
    }

    #[test]
    fn response_serde_shape() {
        let json = serde_json::to_string(&TargetResponse::ScaleByFactor(1.2)).unwrap();
        assert_eq!(json, r#"{"kind":"scale_by_factor","factor":1.2}"#);
        let back: TargetResponse =
            serde_json::from_str(r#"{"kind":"respawn_and_score"}"#).unwrap();
        assert_eq!(back, TargetResponse::RespawnAndScore);
    }
}
