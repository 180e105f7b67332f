//! Hit effects.
//!
//! The [`EffectDispatcher`] applies what a hit means for the target that was
//! struck:
//! - `RespawnAndScore`: consume the projectile, spawn a burst at the target,
//!   start the respawn cycle, award points, update the score display and play
//!   the score sound
//! - `ScaleByFactor`: consume the projectile and tween the target's scale by
//!   the firing tool's factor, or the target's own factor if the tool has none
//!
//! A dispatch whose projectile or target no longer exists, or whose target
//! is already hidden, changes nothing.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::burst::{BurstEngine, BurstId};
use crate::config::{GardenConfig, ToolsConfig};
use crate::entity::{ProjectileId, TargetId, TargetResponse};
use crate::host::{Host, Sound};
use crate::pool::ProjectilePool;
use crate::target::TargetSet;

/// What a dispatched hit did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HitOutcome {
    /// Points awarded and the target started respawning.
    Scored {
        /// Score after the award.
        score: u32,
        /// Burst spawned at the target.
        burst: BurstId,
    },
    /// The target started tweening to a new scale.
    Scaled {
        /// Factor applied.
        factor: f32,
        /// Scale the tween ends at.
        goal: f32,
    },
}

/// Running score. Only ever increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    score: u32,
}

impl Scoreboard {
    /// Current score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Adds `points` (saturating) and returns the new score.
    pub fn award(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }
}

/// Mutable state a hit can touch.
pub struct HitContext<'a, R: Rng + ?Sized, H: Host> {
    /// Live projectiles.
    pub pool: &'a mut ProjectilePool,
    /// Registered targets.
    pub targets: &'a mut TargetSet,
    /// Live bursts.
    pub bursts: &'a mut BurstEngine,
    /// Running score.
    pub scoreboard: &'a mut Scoreboard,
    /// Random source for burst velocities.
    pub rng: &'a mut R,
    /// Scene, audio and score display.
    pub host: &'a mut H,
}

/// Applies hit effects.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectDispatcher {
    award: u32,
    shrink_duration: f32,
    scale_duration: f32,
    tools: ToolsConfig,
}

impl EffectDispatcher {
    /// Creates a dispatcher from configuration.
    #[must_use]
    pub fn new(config: &GardenConfig) -> Self {
        Self {
            award: config.score.award,
            shrink_duration: config.respawn.shrink_duration,
            scale_duration: config.scale.duration,
            tools: config.tools.clone(),
        }
    }

    /// Applies the effect of `projectile` hitting `target`.
    ///
    /// Returns `None` if either is gone or the target is not visible.
    pub fn on_hit<R: Rng + ?Sized, H: Host>(
        &self,
        projectile: ProjectileId,
        target: TargetId,
        ctx: HitContext<'_, R, H>,
    ) -> Option<HitOutcome> {
        let Some(tool) = ctx.pool.get(projectile).map(|p| p.tool) else {
            debug!(%projectile, %target, "stale hit: projectile gone");
            return None;
        };
        let Some(struck) = ctx.targets.get_mut(target) else {
            debug!(%projectile, %target, "stale hit: target gone");
            return None;
        };
        if !struck.is_visible() {
            debug!(%projectile, %target, "stale hit: target hidden");
            return None;
        }

        ctx.pool.retire(projectile, ctx.host);

        match struck.response() {
            TargetResponse::RespawnAndScore => {
                let position = struck.position();
                struck.begin_respawn(self.shrink_duration);
                let burst = ctx.bursts.spawn(position, ctx.rng, ctx.host);
                let score = ctx.scoreboard.award(self.award);
                ctx.host.on_score_changed(score);
                ctx.host.play_one_shot(Sound::Score);
                info!(%target, name = struck.name(), score, "target scored");
                Some(HitOutcome::Scored { score, burst })
            }
            TargetResponse::ScaleByFactor(own) => {
                let factor = self.tools.for_tool(tool).scale_factor.unwrap_or(own);
                let goal = struck.scale_by(factor, self.scale_duration);
                debug!(%target, %tool, factor, goal, "target rescaling");
                Some(HitOutcome::Scaled { factor, goal })
            }
        }
    }
}
