//! Projectile-versus-target intersection.
//!
//! Target volumes are resolved from the target's current position and scale
//! on every query, so tweens and relocations take effect immediately. Targets
//! are tested in registration order and the first containing volume wins.

use crate::config::CollisionConfig;
use crate::entity::TargetId;
use crate::pool::Projectile;
use crate::target::TargetSet;

/// Finds the target a projectile is inside, if any.
///
/// # Example
///
/// ```
/// use garden_core::collision::CollisionResolver;
///
/// let resolver = CollisionResolver::new(0.1);
/// assert_eq!(resolver.radius(), 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolver {
    radius: f32,
}

impl CollisionResolver {
    /// Creates a resolver with the given projectile collision radius.
    #[must_use]
    pub const fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Creates a resolver from configuration.
    #[must_use]
    pub const fn from_config(config: &CollisionConfig) -> Self {
        Self::new(config.radius)
    }

    /// Projectile collision radius added to sphere volumes.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Returns the first visible target whose volume contains the
    /// projectile, in target id order.
    #[must_use]
    pub fn find_hit(&self, projectile: &Projectile, targets: &TargetSet) -> Option<TargetId> {
        targets
            .iter()
            .filter(|target| target.is_visible())
            .find(|target| {
                target
                    .world_volume()
                    .contains(projectile.position, self.radius)
            })
            .map(crate::target::Target::id)
    }
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::from_config(&CollisionConfig::default())
    }
}
