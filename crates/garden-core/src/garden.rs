//! The per-frame orchestrator.
//!
//! [`Garden`] owns every piece of simulation state and runs one frame per
//! [`Garden::step`] call:
//!
//! 1. **Tool**: cycle the tool on a switch edge
//! 2. **Fire**: on a trigger edge, pulse haptics, play the fire sound and
//!    spawn a projectile from the tool pose
//! 3. **Integrate**: move projectiles and drop the expired ones
//! 4. **Collide**: test each live projectile in id order and dispatch its
//!    first hit immediately
//! 5. **Targets**: advance respawn cycles and scale tweens
//! 6. **Bursts**: fade particles and dispose spent bursts
//!
//! Hits are dispatched one projectile at a time, so a respawn target hit by
//! the first projectile is already hidden when the second is tested, while
//! scale targets accept every hit and compound.
//!
//! # Determinism
//!
//! All randomness comes from a `ChaCha8Rng` seeded at construction and all
//! state is iterated in id order, so the same seed, targets and frame inputs
//! produce the same event stream.
//!
//! # Example
//!
//! ```
//! use garden_core::garden::Garden;
//!
//! let garden = Garden::new(42);
//! assert_eq!(garden.frame(), 0);
//! assert_eq!(garden.score(), 0);
//! ```

use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace, warn};

use crate::burst::BurstEngine;
use crate::collision::CollisionResolver;
use crate::config::GardenConfig;
use crate::effect::{EffectDispatcher, HitContext, HitOutcome, Scoreboard};
use crate::entity::{TargetId, Tool};
use crate::error::ConfigError;
use crate::event::{EventLog, GardenEvent, RecordedEvent};
use crate::host::{Host, SceneGraph, Sound, TargetDescriptor};
use crate::input::{Buttons, FrameInput, InputSnapshot};
use crate::pool::ProjectilePool;
use crate::target::{TargetSet, Transition};

// =============================================================================
// Garden
// =============================================================================

/// Projectile, target and burst simulation for one play session.
pub struct Garden {
    config: GardenConfig,
    pool: ProjectilePool,
    targets: TargetSet,
    bursts: BurstEngine,
    collision: CollisionResolver,
    dispatcher: EffectDispatcher,
    scoreboard: Scoreboard,
    tool: Tool,
    rng: ChaCha8Rng,
    seed: u64,
    frame: u64,
    registered_from_scene: bool,
    events: EventLog,
}

impl fmt::Debug for Garden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Garden")
            .field("frame", &self.frame)
            .field("seed", &self.seed)
            .field("score", &self.scoreboard.score())
            .field("tool", &self.tool)
            .field("projectiles", &self.pool.len())
            .field("targets", &self.targets.len())
            .field("bursts", &self.bursts.len())
            .finish_non_exhaustive()
    }
}

impl Garden {
    /// Creates a garden with the default configuration.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::build(GardenConfig::default(), seed)
    }

    /// Creates a garden with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found in `config`.
    pub fn with_config(config: GardenConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: GardenConfig, seed: u64) -> Self {
        Self {
            pool: ProjectilePool::new(),
            targets: TargetSet::new(),
            bursts: BurstEngine::new(config.burst.clone()),
            collision: CollisionResolver::from_config(&config.collision),
            dispatcher: EffectDispatcher::new(&config),
            scoreboard: Scoreboard::default(),
            tool: Tool::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            frame: 0,
            registered_from_scene: false,
            events: EventLog::new(),
            config,
        }
    }

    /// Registers every target the scene reports.
    ///
    /// This is a one-time pass; later calls register nothing and return an
    /// empty list. Use [`Garden::register_target`] to add targets afterwards.
    pub fn register_from_scene(&mut self, scene: &dyn SceneGraph) -> Vec<TargetId> {
        if self.registered_from_scene {
            warn!("scene targets already registered; ignoring");
            return Vec::new();
        }
        self.registered_from_scene = true;
        let ids: Vec<TargetId> = scene
            .query_targets()
            .into_iter()
            .map(|descriptor| self.targets.register(descriptor))
            .collect();
        info!(count = ids.len(), "registered scene targets");
        ids
    }

    /// Registers a single target.
    pub fn register_target(&mut self, descriptor: TargetDescriptor) -> TargetId {
        self.targets.register(descriptor)
    }

    /// Runs one frame.
    pub fn step<H: Host>(&mut self, frame: &FrameInput, host: &mut H) {
        let dt = frame.step_dt();
        if !(frame.dt.is_finite() && frame.dt >= 0.0) {
            warn!(dt = frame.dt, "bad frame time, stepping by zero");
        }
        let input = &frame.input;

        if input.just_pressed(Buttons::SWITCH_TOOL) {
            self.tool = self.tool.next();
            info!(tool = %self.tool, "tool changed");
            self.record(GardenEvent::ToolChanged { tool: self.tool });
        }

        if input.fire() {
            self.fire(input, host);
        }

        for projectile in self.pool.tick(dt, host) {
            self.record(GardenEvent::ProjectileExpired { projectile });
        }

        self.resolve_hits(host);

        let transitions = self
            .targets
            .advance(dt, &self.config.respawn, &mut self.rng, host);
        for (target, transition) in transitions {
            let event = match transition {
                Transition::Hidden => GardenEvent::TargetHidden { target },
                Transition::Relocated(position) => GardenEvent::TargetRelocated { target, position },
                Transition::Restored => GardenEvent::TargetRestored { target },
            };
            self.record(event);
        }

        for burst in self.bursts.tick(dt, host) {
            self.record(GardenEvent::BurstDisposed { burst });
        }

        trace!(
            frame = self.frame,
            projectiles = self.pool.len(),
            bursts = self.bursts.len(),
            "frame complete"
        );
        self.frame += 1;
    }

    fn fire<H: Host>(&mut self, input: &InputSnapshot, host: &mut H) {
        let feedback = &self.config.feedback;
        if let Err(err) = host.pulse(feedback.haptic_strength, feedback.haptic_duration_ms) {
            trace!(%err, "haptic pulse skipped");
        }
        host.play_one_shot(Sound::Fire);

        let tool = self.tool;
        let pose = input.tool_pose.or_else(|| {
            self.config
                .tool_node
                .and_then(|node| host.world_transform(node))
        });
        let Some(pose) = pose else {
            debug!(%tool, "no tool pose; nothing fired");
            self.record(GardenEvent::SpawnSkipped { tool });
            return;
        };

        let params = self.config.tools.for_tool(tool);
        let event = match self.pool.spawn(pose, params.speed, params.ttl, tool, host) {
            Some(projectile) => GardenEvent::ProjectileSpawned {
                projectile,
                tool,
                position: pose.position,
            },
            None => GardenEvent::SpawnSkipped { tool },
        };
        self.record(event);
    }

    fn resolve_hits<H: Host>(&mut self, host: &mut H) {
        let ids: Vec<_> = self.pool.ids_sorted().collect();
        for projectile in ids {
            let Some(live) = self.pool.get(projectile) else {
                continue;
            };
            let Some(target) = self.collision.find_hit(live, &self.targets) else {
                continue;
            };
            let outcome = self.dispatcher.on_hit(
                projectile,
                target,
                HitContext {
                    pool: &mut self.pool,
                    targets: &mut self.targets,
                    bursts: &mut self.bursts,
                    scoreboard: &mut self.scoreboard,
                    rng: &mut self.rng,
                    host: &mut *host,
                },
            );
            let Some(outcome) = outcome else {
                continue;
            };
            self.record(GardenEvent::TargetHit {
                projectile,
                target,
                outcome,
            });
            if let HitOutcome::Scored { score, .. } = outcome {
                self.record(GardenEvent::ScoreChanged { score });
            }
        }
    }

    fn record(&mut self, event: GardenEvent) {
        self.events.record(self.frame, event);
    }

    /// Drains the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<RecordedEvent> {
        self.events.take_events()
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    /// Active tool.
    #[must_use]
    pub const fn tool(&self) -> Tool {
        self.tool
    }

    /// Selects a tool directly.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool != self.tool {
            self.tool = tool;
            self.record(GardenEvent::ToolChanged { tool });
        }
    }

    /// Frames completed so far.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Seed the garden was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GardenConfig {
        &self.config
    }

    /// Live projectiles.
    #[must_use]
    pub const fn pool(&self) -> &ProjectilePool {
        &self.pool
    }

    /// Registered targets.
    #[must_use]
    pub const fn targets(&self) -> &TargetSet {
        &self.targets
    }

    /// Registered targets, mutably (e.g. to hide or unregister one).
    pub fn targets_mut(&mut self) -> &mut TargetSet {
        &mut self.targets
    }

    /// Live bursts.
    #[must_use]
    pub const fn bursts(&self) -> &BurstEngine {
        &self.bursts
    }
}
