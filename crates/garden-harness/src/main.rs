//! garden-sim: headless frame driver for the garden core.
//!
//! Usage:
//!   garden-sim [config.json]
//!
//! Without a config file the demo garden runs with a sweeping aim and a
//! trigger pulled at a fixed interval. Set `RUST_LOG=garden_core=debug` to
//! see spawns and hits.

mod config;
mod scene;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use garden_core::entity::Pose;
use garden_core::event::{GardenEvent, RecordedEvent};
use garden_core::input::{Buttons, FrameInput, InputSnapshot};
use garden_core::Garden;
use glam::{Quat, Vec3};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::HarnessConfig;
use crate::scene::HeadlessScene;

/// Eye height the demo tool is held at.
const TOOL_HEIGHT: f32 = 1.5;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => HarnessConfig::load(&path)?,
        None => HarnessConfig::default(),
    };
    info!(seed = config.seed, frames = config.frames, targets = config.targets.len(), "starting run");

    let mut garden = Garden::with_config(config.garden.clone(), config.seed)
        .context("invalid garden config")?;
    let mut scene = HeadlessScene::new(
        config.scene_targets(),
        config.prototype_load_frames,
        config.haptics,
    );
    garden.register_from_scene(&scene);

    let mut sink = match &config.events_out {
        Some(path) => Some(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => None,
    };

    let mut summary = Summary::default();
    let mut input = InputSnapshot::default();
    for frame in 0..config.frames {
        scene.begin_frame();
        input = input.next(scripted_buttons(&config, frame)).with_pose(aim(&config, frame));
        garden.step(
            &FrameInput {
                dt: config.dt,
                elapsed: f64::from(frame) * f64::from(config.dt),
                input,
            },
            &mut scene,
        );

        for event in garden.take_events() {
            summary.count(&event);
            if let Some(out) = sink.as_mut() {
                serde_json::to_writer(&mut *out, &event)?;
                out.write_all(b"\n")?;
            }
        }
    }
    if let Some(mut out) = sink {
        out.flush()?;
    }

    info!(
        score = garden.score(),
        panel = scene.score_text(),
        live_projectiles = garden.pool().len(),
        live_bursts = garden.bursts().len(),
        hidden_targets = scene.hidden_nodes(),
        live_visuals = scene.visual_count(),
        peak_visuals = scene.peak_visuals,
        "run complete"
    );
    println!("{}", serde_json::to_string_pretty(&summary.finish(&garden, &scene))?);
    Ok(())
}

fn scripted_buttons(config: &HarnessConfig, frame: u32) -> Buttons {
    let mut held = Buttons::empty();
    if frame % config.fire_every == 0 {
        held |= Buttons::TRIGGER;
    }
    if config.switch_every > 0 && frame % config.switch_every == config.switch_every - 1 {
        held |= Buttons::SWITCH_TOOL;
    }
    held
}

fn aim(config: &HarnessConfig, frame: u32) -> Pose {
    #[allow(clippy::cast_precision_loss)]
    let phase = frame as f32 * config.sweep_rate;
    let yaw = phase.sin() * config.sweep_yaw;
    Pose::new(Vec3::new(0.0, TOOL_HEIGHT, 0.0), Quat::from_rotation_y(yaw))
}

#[derive(Debug, Default, serde::Serialize)]
struct Summary {
    fired: u32,
    skipped: u32,
    expired: u32,
    hits: u32,
    respawns: u32,
    bursts_disposed: u32,
    score: u32,
    fire_sounds: u32,
    score_sounds: u32,
    frames: u64,
}

impl Summary {
    fn count(&mut self, event: &RecordedEvent) {
        match event.event {
            GardenEvent::ProjectileSpawned { .. } => self.fired += 1,
            GardenEvent::SpawnSkipped { .. } => self.skipped += 1,
            GardenEvent::ProjectileExpired { .. } => self.expired += 1,
            GardenEvent::TargetHit { .. } => self.hits += 1,
            GardenEvent::TargetRestored { .. } => self.respawns += 1,
            GardenEvent::BurstDisposed { .. } => self.bursts_disposed += 1,
            GardenEvent::ToolChanged { .. }
            | GardenEvent::ScoreChanged { .. }
            | GardenEvent::TargetHidden { .. }
            | GardenEvent::TargetRelocated { .. } => {}
        }
    }

    fn finish(mut self, garden: &Garden, scene: &HeadlessScene) -> Self {
        self.score = garden.score();
        self.fire_sounds = scene.sounds[0];
        self.score_sounds = scene.sounds[1];
        self.frames = garden.frame();
        self
    }
}
