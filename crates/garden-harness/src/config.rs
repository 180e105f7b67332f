//! Harness run configuration.
//!
//! Loaded from an optional JSON file; every field has a default so an empty
//! object (or no file at all) runs the demo garden.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use garden_core::config::{GardenConfig, SpawnVolume};
use garden_core::entity::{BoundingVolume, NodeId, TargetResponse};
use garden_core::host::TargetDescriptor;
use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Everything one harness run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// RNG seed for the garden.
    pub seed: u64,
    /// Frames to simulate.
    pub frames: u32,
    /// Seconds per frame.
    pub dt: f32,
    /// Pull the trigger every this many frames.
    pub fire_every: u32,
    /// Cycle the tool every this many frames; 0 never switches.
    pub switch_every: u32,
    /// Peak yaw of the sweeping aim, radians.
    pub sweep_yaw: f32,
    /// Sweep speed, radians of phase per frame.
    pub sweep_rate: f32,
    /// Frames before the projectile prototype finishes loading.
    pub prototype_load_frames: u32,
    /// Whether the headset reports haptics.
    pub haptics: bool,
    /// Where to write the event log as JSON lines.
    pub events_out: Option<PathBuf>,
    /// Core simulation settings.
    pub garden: GardenConfig,
    /// Targets the scene reports at startup.
    pub targets: Vec<TargetDescriptor>,
    /// Patch scoring targets are scattered over at startup, on x and z.
    /// `null` keeps their configured positions.
    pub scatter: Option<SpawnVolume>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed: 2024,
            frames: 1800,
            dt: 1.0 / 90.0,
            fire_every: 20,
            switch_every: 0,
            sweep_yaw: 0.6,
            sweep_rate: 0.01,
            prototype_load_frames: 30,
            haptics: true,
            events_out: None,
            garden: GardenConfig::default(),
            targets: demo_targets(),
            scatter: Some(SpawnVolume {
                min: Vec3::new(-2.0, 0.0, -3.5),
                max: Vec3::new(0.5, 0.0, -1.5),
            }),
        }
    }
}

impl HarnessConfig {
    /// Reads a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the run parameters. Core settings are checked by the garden.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.dt.is_finite() && self.dt >= 0.0, "dt must be finite and >= 0, got {}", self.dt);
        ensure!(self.fire_every > 0, "fire_every must be at least 1");
        if let Some(scatter) = &self.scatter {
            ensure!(
                scatter.min.cmple(scatter.max).all(),
                "scatter min {} exceeds max {}",
                scatter.min,
                scatter.max
            );
        }
        Ok(())
    }

    /// Targets as the scene reports them: scoring targets are moved to
    /// seed-derived spots inside `scatter`, keeping their height.
    #[must_use]
    pub fn scene_targets(&self) -> Vec<TargetDescriptor> {
        let mut targets = self.targets.clone();
        let Some(scatter) = &self.scatter else {
            return targets;
        };
        // Stream 0 is the garden's.
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(SCATTER_STREAM);
        for target in targets.iter_mut().filter(|t| t.response.scores()) {
            let spot = scatter.sample(&mut rng);
            target.position.x = spot.x;
            target.position.z = spot.z;
        }
        targets
    }
}

const SCATTER_STREAM: u64 = 1;

/// Three gnomes to shoot and a row of plants to water or prune.
#[must_use]
pub fn demo_targets() -> Vec<TargetDescriptor> {
    let gnomes = [
        Vec3::new(-2.0, 1.5, -7.0),
        Vec3::new(0.0, 1.5, -8.0),
        Vec3::new(2.0, 1.5, -7.0),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, position)| TargetDescriptor {
        name: format!("gnome-{i}"),
        node: Some(NodeId(i as u64)),
        position,
        scale: 1.0,
        volume: BoundingVolume::Sphere { radius: 0.5 },
        response: TargetResponse::RespawnAndScore,
    });

    let plants = [-3.0f32, -1.0, 1.0, 3.0]
        .into_iter()
        .enumerate()
        .map(|(i, x)| TargetDescriptor {
            name: format!("plant-{i}"),
            node: Some(NodeId(100 + i as u64)),
            position: Vec3::new(x, 1.5, -4.0),
            scale: 1.0,
            volume: BoundingVolume::Aabb {
                half_extents: Vec3::new(0.3, 0.6, 0.3),
            },
            response: TargetResponse::ScaleByFactor(1.1),
        });

    gnomes.chain(plants).collect()
}
