//! Projectile pool: owns every live projectile.
//!
//! The pool provides:
//! - Projectile storage keyed by [`ProjectileId`] with deterministic iteration order (`BTreeMap`)
//! - Spawning from a tool pose, with velocity derived from the pose orientation
//! - Explicit Euler motion integration and time-to-live countdown
//! - Immediate retirement on hit
//!
//! # Lifecycle
//!
//! A projectile is created on a fire edge, moved every tick
//! (`position += velocity * dt`, `ttl -= dt`) and destroyed either when its
//! ttl drops below zero or on its first hit. [`ProjectilePool::tick`] removes
//! expired projectiles before it returns, so the collision pass that follows
//! never sees them.
//!
//! Every removal detaches the projectile's visual through the
//! [`SceneGraph`].
//!
//! # Handles
//!
//! Ids are monotonically increasing and never reused. Looking up or retiring
//! an id that has already been removed is a no-op.
//!
//! # Example
//!
//! ```
//! # use garden_core::entity::{NodeId, Pose, Tool, VisualHandle};
//! # use garden_core::error::SceneError;
//! # use garden_core::host::{SceneGraph, TargetDescriptor, VisualKind, VisualState};
//! # struct Scene;
//! # impl SceneGraph for Scene {
//! #     fn attach(&mut self, _: VisualKind, _: Pose) -> Result<VisualHandle, SceneError> { Ok(VisualHandle(0)) }
//! #     fn detach(&mut self, _: VisualHandle) {}
//! #     fn update_visual(&mut self, _: VisualHandle, _: VisualState) {}
//! #     fn update_node(&mut self, _: NodeId, _: VisualState) {}
//! #     fn query_targets(&self) -> Vec<TargetDescriptor> { Vec::new() }
//! #     fn world_transform(&self, _: NodeId) -> Option<Pose> { None }
//! # }
//! use garden_core::pool::ProjectilePool;
//! use glam::Vec3;
//!
//! let mut scene = Scene;
//! let mut pool = ProjectilePool::new();
//! let id = pool
//!     .spawn(Pose::default(), 10.0, 1.0, Tool::Blaster, &mut scene)
//!     .unwrap();
//!
//! pool.tick(0.5, &mut scene);
//! assert_eq!(pool.get(id).unwrap().position, Vec3::new(0.0, 0.0, -5.0));
//! ```

use std::collections::BTreeMap;

use glam::{Quat, Vec3};
use tracing::{debug, trace};

use crate::entity::{Pose, ProjectileId, Tool, VisualHandle};
use crate::host::{SceneGraph, VisualKind, VisualState};
use crate::input::clamp_dt;

/// Local axis a projectile travels along before orientation is applied.
pub const FORWARD_AXIS: Vec3 = Vec3::NEG_Z;

/// How far below zero a ttl may sit and still count as zero.
///
/// Repeated `f32` subtraction of a decimal frame time overshoots: ten ticks
/// of `0.1` take a ttl of `1.0` to about `-7e-8`.
pub const TTL_TOLERANCE: f32 = 1e-4;

// =============================================================================
// Projectile
// =============================================================================

/// A live bullet or droplet.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    id: ProjectileId,
    /// World position.
    pub position: Vec3,
    /// Orientation at spawn; only used to derive `velocity`.
    pub orientation: Quat,
    /// Constant velocity.
    pub velocity: Vec3,
    /// Remaining time to live, seconds.
    pub ttl: f32,
    /// Tool that fired this projectile.
    pub tool: Tool,
    visual: Option<VisualHandle>,
}

impl Projectile {
    /// Returns the projectile's id.
    #[must_use]
    pub const fn id(&self) -> ProjectileId {
        self.id
    }

    /// Returns `true` once the ttl has dropped below zero, allowing for
    /// [`TTL_TOLERANCE`]. A NaN ttl is expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        !(self.ttl >= -TTL_TOLERANCE)
    }

    /// Returns the handle of the attached visual.
    #[must_use]
    pub const fn visual(&self) -> Option<VisualHandle> {
        self.visual
    }

    fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.ttl -= dt;
    }

    fn visual_state(&self) -> VisualState {
        VisualState {
            position: self.position,
            scale: 1.0,
            opacity: 1.0,
            shown: true,
        }
    }
}

// =============================================================================
// Projectile Pool
// =============================================================================

/// Owner of all live projectiles.
#[derive(Debug, Clone, Default)]
pub struct ProjectilePool {
    /// Monotonically increasing id counter.
    next_id: u64,
    /// Live projectiles in id order.
    projectiles: BTreeMap<ProjectileId, Projectile>,
}

impl ProjectilePool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            projectiles: BTreeMap::new(),
        }
    }

    /// Spawns a projectile at `pose.position` travelling along
    /// [`FORWARD_AXIS`] rotated by `pose.orientation`, at `speed`.
    ///
    /// Returns `None` without touching the pool if the scene cannot attach
    /// the projectile visual yet (prototype asset still loading). The next
    /// fire attempt may succeed.
    pub fn spawn(
        &mut self,
        pose: Pose,
        speed: f32,
        ttl: f32,
        tool: Tool,
        scene: &mut dyn SceneGraph,
    ) -> Option<ProjectileId> {
        let visual = match scene.attach(VisualKind::Projectile, pose) {
            Ok(handle) => handle,
            Err(err) => {
                debug!(%err, %tool, "skipping projectile spawn");
                return None;
            }
        };

        let id = ProjectileId::new(self.next_id);
        self.next_id += 1;

        let velocity = (pose.orientation * FORWARD_AXIS) * speed;
        let projectile = Projectile {
            id,
            position: pose.position,
            orientation: pose.orientation,
            velocity,
            ttl,
            tool,
            visual: Some(visual),
        };
        debug!(%id, %tool, position = ?pose.position, ?velocity, "projectile spawned");
        self.projectiles.insert(id, projectile);
        Some(id)
    }

    /// Advances every projectile by `dt` and removes the ones whose ttl
    /// dropped below zero.
    ///
    /// Negative and non-finite `dt` advance nothing.
    ///
    /// Returns the ids removed this tick, in id order.
    pub fn tick(&mut self, dt: f32, scene: &mut dyn SceneGraph) -> Vec<ProjectileId> {
        let dt = clamp_dt(dt);
        let mut expired = Vec::new();
        for projectile in self.projectiles.values_mut() {
            projectile.integrate(dt);
            if projectile.is_expired() {
                expired.push(projectile.id);
            } else if let Some(handle) = projectile.visual {
                scene.update_visual(handle, projectile.visual_state());
            }
        }

        for id in &expired {
            if let Some(projectile) = self.remove(*id, scene) {
                trace!(%id, ttl = projectile.ttl, "projectile expired");
            }
        }
        expired
    }

    /// Removes a projectile immediately, detaching its visual.
    ///
    /// Returns the removed projectile, or `None` if `id` is not live.
    pub fn retire(&mut self, id: ProjectileId, scene: &mut dyn SceneGraph) -> Option<Projectile> {
        let removed = self.remove(id, scene);
        if removed.is_some() {
            trace!(%id, "projectile retired");
        }
        removed
    }

    fn remove(&mut self, id: ProjectileId, scene: &mut dyn SceneGraph) -> Option<Projectile> {
        let projectile = self.projectiles.remove(&id)?;
        if let Some(handle) = projectile.visual {
            scene.detach(handle);
        }
        Some(projectile)
    }

    /// Returns a projectile by id.
    #[must_use]
    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.get(&id)
    }

    /// Returns `true` if `id` is live.
    #[must_use]
    pub fn contains(&self, id: ProjectileId) -> bool {
        self.projectiles.contains_key(&id)
    }

    /// Live projectile ids in id order.
    pub fn ids_sorted(&self) -> impl Iterator<Item = ProjectileId> + '_ {
        self.projectiles.keys().copied()
    }

    /// Live projectiles in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> + '_ {
        self.projectiles.values()
    }

    /// Number of live projectiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    /// Returns `true` if no projectile is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
