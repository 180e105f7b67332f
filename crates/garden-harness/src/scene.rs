//! A headless host: no rendering, just bookkeeping and logs.

use std::collections::HashMap;

use garden_core::entity::{NodeId, Pose, VisualHandle};
use garden_core::error::{HapticsError, SceneError};
use garden_core::host::{
    format_score, Audio, Haptics, SceneGraph, ScoreDisplay, Sound, TargetDescriptor, VisualKind,
    VisualState,
};
use tracing::{debug, info, trace};

/// Stands in for the renderer, audio engine, controller and score panel.
#[derive(Debug)]
pub struct HeadlessScene {
    targets: Vec<TargetDescriptor>,
    visuals: HashMap<VisualHandle, VisualKind>,
    nodes: HashMap<NodeId, VisualState>,
    next_handle: u64,
    /// Frames left until the projectile prototype is loaded.
    loading_frames: u32,
    haptics: bool,
    score_text: String,
    /// Peak simultaneous visuals.
    pub peak_visuals: usize,
    /// Sounds played, by kind: fire, score.
    pub sounds: [u32; 2],
}

impl HeadlessScene {
    /// Creates a scene holding `targets`.
    pub fn new(targets: Vec<TargetDescriptor>, loading_frames: u32, haptics: bool) -> Self {
        Self {
            targets,
            visuals: HashMap::new(),
            nodes: HashMap::new(),
            next_handle: 0,
            loading_frames,
            haptics,
            score_text: format_score(0),
            peak_visuals: 0,
            sounds: [0; 2],
        }
    }

    /// Called by the frame driver before each frame.
    pub fn begin_frame(&mut self) {
        if self.loading_frames > 0 {
            self.loading_frames -= 1;
            if self.loading_frames == 0 {
                info!("projectile prototype loaded");
            }
        }
    }

    /// Live attached visuals.
    pub fn visual_count(&self) -> usize {
        self.visuals.len()
    }

    /// Target nodes the scene is currently not drawing.
    pub fn hidden_nodes(&self) -> usize {
        self.nodes.values().filter(|state| !state.shown).count()
    }

    /// Text the score panel would show.
    pub fn score_text(&self) -> &str {
        &self.score_text
    }
}

impl SceneGraph for HeadlessScene {
    fn attach(&mut self, kind: VisualKind, pose: Pose) -> Result<VisualHandle, SceneError> {
        if kind == VisualKind::Projectile && self.loading_frames > 0 {
            return Err(SceneError::NotReady { kind });
        }
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        self.visuals.insert(handle, kind);
        self.peak_visuals = self.peak_visuals.max(self.visuals.len());
        trace!(?handle, %kind, position = ?pose.position, "attach");
        Ok(handle)
    }

    fn detach(&mut self, handle: VisualHandle) {
        self.visuals.remove(&handle);
    }

    fn update_visual(&mut self, _handle: VisualHandle, _state: VisualState) {}

    fn update_node(&mut self, node: NodeId, state: VisualState) {
        self.nodes.insert(node, state);
    }

    fn query_targets(&self) -> Vec<TargetDescriptor> {
        self.targets.clone()
    }

    fn world_transform(&self, _node: NodeId) -> Option<Pose> {
        None
    }
}

impl Audio for HeadlessScene {
    fn play_one_shot(&mut self, sound: Sound) {
        match sound {
            Sound::Fire => self.sounds[0] += 1,
            Sound::Score => self.sounds[1] += 1,
        }
    }
}

impl Haptics for HeadlessScene {
    fn pulse(&mut self, strength: f32, duration_ms: u32) -> Result<(), HapticsError> {
        if !self.haptics {
            return Err(HapticsError::Unavailable);
        }
        trace!(strength, duration_ms, "haptic pulse");
        Ok(())
    }
}

impl ScoreDisplay for HeadlessScene {
    fn on_score_changed(&mut self, score: u32) {
        self.score_text = format_score(score);
        debug!(text = %self.score_text, "score panel");
    }
}
