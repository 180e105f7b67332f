//! Tunable constants for the garden simulation.
//!
//! Every field has a default matching the shipped experience, and every
//! struct is `#[serde(default)]`, so a JSON file only needs to name the values
//! it overrides:
//!
//! ```
//! use garden_core::config::GardenConfig;
//!
//! let config: GardenConfig =
//!     serde_json::from_str(r#"{ "score": { "award": 25 } }"#).unwrap();
//! assert_eq!(config.score.award, 25);
//! assert_eq!(config.burst.particle_count, 20);
//! assert!(config.validate().is_ok());
//! ```

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entity::{NodeId, Tool};
use crate::error::ConfigError;

/// Top-level configuration for a [`Garden`](crate::garden::Garden).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GardenConfig {
    /// Per-tool projectile parameters.
    pub tools: ToolsConfig,
    /// Hit testing.
    pub collision: CollisionConfig,
    /// Respawn cycle of scoring targets.
    pub respawn: RespawnConfig,
    /// Scale tweens of plants.
    pub scale: ScaleConfig,
    /// Explosion bursts.
    pub burst: BurstConfig,
    /// Scoring.
    pub score: ScoreConfig,
    /// Fire feedback.
    pub feedback: FeedbackConfig,
    /// Scene node of the held tool, used when the input carries no pose.
    pub tool_node: Option<NodeId>,
}

impl GardenConfig {
    /// Checks every value for range errors.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (fields, tool) in [
            (
                ["tools.blaster.speed", "tools.blaster.ttl", "tools.blaster.scale_factor"],
                &self.tools.blaster,
            ),
            (
                [
                    "tools.watering_can.speed",
                    "tools.watering_can.ttl",
                    "tools.watering_can.scale_factor",
                ],
                &self.tools.watering_can,
            ),
            (
                ["tools.scissors.speed", "tools.scissors.ttl", "tools.scissors.scale_factor"],
                &self.tools.scissors,
            ),
        ] {
            tool.validate(fields)?;
        }
        non_negative("collision.radius", self.collision.radius)?;
        positive("respawn.shrink_duration", self.respawn.shrink_duration)?;
        non_negative("respawn.delay", self.respawn.delay)?;
        positive("respawn.grow_duration", self.respawn.grow_duration)?;
        self.respawn.spawn_volume.validate()?;
        positive("scale.duration", self.scale.duration)?;
        self.burst.validate()?;
        non_negative("feedback.haptic_strength", self.feedback.haptic_strength)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

/// Projectile parameters for each tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Blaster bullets.
    pub blaster: ToolConfig,
    /// Watering-can droplets.
    pub watering_can: ToolConfig,
    /// Scissor snips.
    pub scissors: ToolConfig,
}

impl ToolsConfig {
    /// Returns the parameters for `tool`.
    #[must_use]
    pub fn for_tool(&self, tool: Tool) -> &ToolConfig {
        match tool {
            Tool::Blaster => &self.blaster,
            Tool::WateringCan => &self.watering_can,
            Tool::Scissors => &self.scissors,
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            blaster: ToolConfig::default(),
            watering_can: ToolConfig {
                scale_factor: Some(1.2),
                ..ToolConfig::default()
            },
            scissors: ToolConfig {
                scale_factor: Some(0.2),
                ..ToolConfig::default()
            },
        }
    }
}

/// Projectile parameters of a single tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Speed along the tool's forward axis, units per second.
    pub speed: f32,
    /// Time to live, seconds.
    pub ttl: f32,
    /// Scale factor forced on `ScaleByFactor` targets; `None` uses the target's own.
    pub scale_factor: Option<f32>,
}

impl ToolConfig {
    fn validate(&self, [speed, ttl, factor]: [&'static str; 3]) -> Result<(), ConfigError> {
        positive(speed, self.speed)?;
        positive(ttl, self.ttl)?;
        if let Some(value) = self.scale_factor {
            positive(factor, value)?;
        }
        Ok(())
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            ttl: 1.0,
            scale_factor: None,
        }
    }
}

/// Hit testing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Projectile radius added to sphere volumes.
    pub radius: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self { radius: 0.1 }
    }
}

/// Timing and placement of the respawn cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespawnConfig {
    /// Seconds to shrink to zero after a hit.
    pub shrink_duration: f32,
    /// Seconds spent hidden before relocating.
    pub delay: f32,
    /// Seconds to grow back to the base scale.
    pub grow_duration: f32,
    /// Where respawned targets may land.
    pub spawn_volume: SpawnVolume,
}

impl Default for RespawnConfig {
    fn default() -> Self {
        Self {
            shrink_duration: 0.3,
            delay: 1.0,
            grow_duration: 0.3,
            spawn_volume: SpawnVolume::default(),
        }
    }
}

/// Half-open box `[min, max)` that respawned targets are placed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnVolume {
    /// Minimum corner (inclusive).
    pub min: Vec3,
    /// Maximum corner (exclusive; equal to `min` pins that axis).
    pub max: Vec3,
}

impl SpawnVolume {
    /// Draws a uniformly random point inside the volume.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        Vec3::new(
            sample_axis(rng, self.min.x, self.max.x),
            sample_axis(rng, self.min.y, self.max.y),
            sample_axis(rng, self.min.z, self.max.z),
        )
    }

    /// Returns `true` if `point` lies in `[min, max]` on every axis.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min.cmple(self.max).all() {
            Ok(())
        } else {
            Err(ConfigError::InvertedSpawnVolume {
                min: self.min.to_array(),
                max: self.max.to_array(),
            })
        }
    }
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

impl Default for SpawnVolume {
    fn default() -> Self {
        Self {
            min: Vec3::new(-5.0, 1.0, -10.0),
            max: Vec3::new(5.0, 5.0, -5.0),
        }
    }
}

/// Scale tween parameters for `ScaleByFactor` targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Seconds each scale change takes.
    pub duration: f32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self { duration: 0.3 }
    }
}

/// Explosion burst parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Particles per burst.
    pub particle_count: usize,
    /// Each velocity component is drawn from `[-velocity_range, velocity_range)`.
    pub velocity_range: f32,
    /// Seconds to fade out; also the hard timeout of a burst.
    pub lifespan: f32,
    /// Minimum age advance per tick, so bursts expire under a zero `dt`.
    pub min_step: f32,
}

impl BurstConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::EmptyBurst);
        }
        non_negative("burst.velocity_range", self.velocity_range)?;
        positive("burst.lifespan", self.lifespan)?;
        positive("burst.min_step", self.min_step)
    }
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            particle_count: 20,
            velocity_range: 3.0,
            lifespan: 2.0,
            min_step: 0.016,
        }
    }
}

/// Scoring parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Points per `RespawnAndScore` hit.
    pub award: u32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self { award: 10 }
    }
}

/// Feedback played on every fire edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Haptic pulse strength in `[0, 1]`.
    pub haptic_strength: f32,
    /// Haptic pulse length in milliseconds.
    pub haptic_duration_ms: u32,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            haptic_strength: 0.6,
            haptic_duration_ms: 100,
        }
    }
}
