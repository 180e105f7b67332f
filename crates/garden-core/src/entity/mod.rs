//! Entity identifiers and shared spatial types.
//!
//! This module provides the handles the garden core uses to refer to the
//! things it simulates or touches:
//! - [`ProjectileId`]: Handle for a live projectile owned by the pool
//! - [`TargetId`]: Handle for a registered target
//! - [`VisualHandle`]: Opaque handle for a visual attached through the scene graph
//! - [`NodeId`]: Opaque reference to a node the scene graph owns
//! - [`Pose`]: World position plus orientation
//!
//! # Handles
//!
//! Projectile and target ids are assigned from monotonically increasing
//! counters and never reused. A handle that outlives its entry simply misses
//! on lookup, which is how stale references degrade to no-ops.
//!
//! # Example
//!
//! ```
//! use garden_core::entity::{ProjectileId, TargetId};
//!
//! let a = ProjectileId::new(1);
//! let b = ProjectileId::new(2);
//! assert!(a < b);
//! assert_eq!(TargetId::new(7).as_u64(), 7);
//! ```

pub mod components;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use components::{BoundingVolume, TargetResponse, Tool, WorldVolume};

/// Unique identifier for a live projectile.
///
/// `ProjectileId` is a newtype wrapper around `u64`. Ids are ordered by their
/// numeric value, which gives the pool a deterministic iteration order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectileId(u64);

impl ProjectileId {
    /// Creates a new `ProjectileId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ProjectileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProjectileId({})", self.0)
    }
}

impl fmt::Display for ProjectileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProjectileId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Unique identifier for a registered target.
///
/// Targets are iterated in id order, so registration order is also the
/// collision test order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetId(u64);

impl TargetId {
    /// Creates a new `TargetId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetId({})", self.0)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TargetId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Opaque handle to a visual attached through the scene graph.
///
/// The core never interprets the value; it only hands it back to
/// [`SceneGraph::detach`](crate::host::SceneGraph::detach) and
/// [`SceneGraph::update_visual`](crate::host::SceneGraph::update_visual).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// Opaque reference to a node owned by the scene graph.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// World position and orientation of an object.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World position.
    pub position: Vec3,
    /// World orientation.
    pub orientation: Quat,
}

impl Pose {
    /// Creates a pose from a position and orientation.
    #[must_use]
    pub const fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Creates an unrotated pose at `position`.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}
