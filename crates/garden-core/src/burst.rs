//! Explosion particle bursts.
//!
//! A burst is spawned where a scoring target was hit and then forgotten by
//! the caller. The [`BurstEngine`] owns it until disposal: every particle
//! drifts and fades, and the whole burst is torn down once all particles are
//! inert or its age reaches the lifespan, whichever comes first.
//!
//! Age advances by at least [`BurstConfig::min_step`] per tick, so a burst is
//! always disposed within `lifespan / min_step` ticks even when the frame
//! driver reports a zero or negative `dt`.

use std::collections::BTreeMap;
use std::fmt;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::BurstConfig;
use crate::entity::{Pose, VisualHandle};
use crate::host::{SceneGraph, VisualKind, VisualState};

/// Identifier of a live burst.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BurstId(u64);

impl BurstId {
    /// Creates an id from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for BurstId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BurstId({})", self.0)
    }
}

impl fmt::Display for BurstId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Particle
// =============================================================================

/// One fading particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// World position.
    pub position: Vec3,
    /// Constant velocity.
    pub velocity: Vec3,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    visual: Option<VisualHandle>,
    inert: bool,
}

impl Particle {
    /// Returns `true` once the particle has fully faded.
    #[must_use]
    pub const fn is_inert(&self) -> bool {
        self.inert
    }

    /// Handle of the attached visual; `None` if the scene was not ready or
    /// the particle is inert.
    #[must_use]
    pub const fn visual(&self) -> Option<VisualHandle> {
        self.visual
    }

    fn tick(&mut self, dt: f32, lifespan: f32, scene: &mut dyn SceneGraph) {
        if self.inert {
            return;
        }
        self.position += self.velocity * dt;
        self.opacity -= dt / lifespan;
        if self.opacity <= 0.0 {
            self.opacity = 0.0;
            self.inert = true;
            if let Some(handle) = self.visual.take() {
                scene.detach(handle);
            }
        } else if let Some(handle) = self.visual {
            scene.update_visual(
                handle,
                VisualState {
                    position: self.position,
                    scale: 1.0,
                    opacity: self.opacity,
                    shown: true,
                },
            );
        }
    }
}

// =============================================================================
// Burst
// =============================================================================

/// A fixed set of particles spawned together.
#[derive(Debug, Clone, PartialEq)]
pub struct Burst {
    id: BurstId,
    origin: Vec3,
    age: f32,
    particles: Vec<Particle>,
}

impl Burst {
    /// Returns the burst's id.
    #[must_use]
    pub const fn id(&self) -> BurstId {
        self.id
    }

    /// Where the burst was spawned.
    #[must_use]
    pub const fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Seconds of age accumulated so far.
    #[must_use]
    pub const fn age(&self) -> f32 {
        self.age
    }

    /// The burst's particles, inert ones included.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn is_spent(&self, lifespan: f32) -> bool {
        self.age >= lifespan || self.particles.iter().all(Particle::is_inert)
    }

    fn dispose(self, scene: &mut dyn SceneGraph) {
        for handle in self.particles.into_iter().filter_map(|p| p.visual) {
            scene.detach(handle);
        }
    }
}

// =============================================================================
// Burst Engine
// =============================================================================

/// Owner of every live burst.
#[derive(Debug, Clone, Default)]
pub struct BurstEngine {
    config: BurstConfig,
    next_id: u64,
    bursts: BTreeMap<BurstId, Burst>,
}

impl BurstEngine {
    /// Creates an empty engine.
    #[must_use]
    pub fn new(config: BurstConfig) -> Self {
        Self {
            config,
            next_id: 0,
            bursts: BTreeMap::new(),
        }
    }

    /// Burst parameters in use.
    #[must_use]
    pub const fn config(&self) -> &BurstConfig {
        &self.config
    }

    /// Spawns a burst of `particle_count` particles at `position`.
    ///
    /// Particle visuals are attached best-effort; a particle the scene
    /// cannot show yet is still simulated.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        position: Vec3,
        rng: &mut R,
        scene: &mut dyn SceneGraph,
    ) -> BurstId {
        let id = BurstId::new(self.next_id);
        self.next_id += 1;

        let range = self.config.velocity_range;
        let mut component = || (rng.gen::<f32>() - 0.5) * 2.0 * range;
        let particles: Vec<Particle> = (0..self.config.particle_count)
            .map(|_| {
                let velocity = Vec3::new(component(), component(), component());
                let visual = scene.attach(VisualKind::Particle, Pose::at(position)).ok();
                Particle {
                    position,
                    velocity,
                    opacity: 1.0,
                    visual,
                    inert: false,
                }
            })
            .collect();

        let attached = particles.iter().filter(|p| p.visual.is_some()).count();
        debug!(burst_id = %id, ?position, particles = particles.len(), attached, "burst spawned");
        self.bursts.insert(
            id,
            Burst {
                id,
                origin: position,
                age: 0.0,
                particles,
            },
        );
        id
    }

    /// Advances every burst and disposes the spent ones.
    ///
    /// Returns the disposed ids in id order.
    pub fn tick(&mut self, dt: f32, scene: &mut dyn SceneGraph) -> Vec<BurstId> {
        let lifespan = self.config.lifespan;
        let fade = dt.max(0.0);
        let age_step = dt.max(self.config.min_step);

        let mut spent = Vec::new();
        for burst in self.bursts.values_mut() {
            burst.age += age_step;
            for particle in &mut burst.particles {
                particle.tick(fade, lifespan, scene);
            }
            if burst.is_spent(lifespan) {
                spent.push(burst.id);
            }
        }

        for id in &spent {
            if let Some(burst) = self.bursts.remove(id) {
                trace!(burst_id = %id, age = burst.age, "burst disposed");
                burst.dispose(scene);
            }
        }
        spent
    }

    /// Returns a live burst by id.
    #[must_use]
    pub fn get(&self, id: BurstId) -> Option<&Burst> {
        self.bursts.get(&id)
    }

    /// Live bursts in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Burst> + '_ {
        self.bursts.values()
    }

    /// Number of live bursts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bursts.len()
    }

    /// Returns `true` if no burst is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bursts.is_empty()
    }

    /// Total live particles across all bursts, inert ones excluded.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.bursts
            .values()
            .flat_map(|burst| burst.particles.iter())
            .filter(|particle| !particle.inert)
            .count()
    }
}
