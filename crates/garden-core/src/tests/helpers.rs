//! Test doubles and factories shared by unit and integration tests.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec3;

use crate::entity::{BoundingVolume, NodeId, Pose, TargetResponse, VisualHandle};
use crate::error::{HapticsError, SceneError};
use crate::host::{
    Audio, Haptics, SceneGraph, ScoreDisplay, Sound, TargetDescriptor, VisualKind, VisualState,
};
use crate::input::{Buttons, FrameInput, InputSnapshot};

// =============================================================================
// Recording Host
// =============================================================================

/// A host that records every call the core makes.
#[derive(Debug)]
pub struct RecordingHost {
    next_handle: u64,
    projectile_ready: bool,
    particle_ready: bool,
    haptics_available: bool,
    attached: BTreeMap<VisualHandle, VisualKind>,
    detached: Vec<VisualHandle>,
    visuals: BTreeMap<VisualHandle, VisualState>,
    nodes: BTreeMap<NodeId, VisualState>,
    transforms: BTreeMap<NodeId, Pose>,
    scene_targets: Vec<TargetDescriptor>,
    sounds: Vec<Sound>,
    pulses: Vec<(f32, u32)>,
    scores: Vec<u32>,
}

impl RecordingHost {
    /// Every prototype loaded, haptics available.
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            projectile_ready: true,
            particle_ready: true,
            haptics_available: true,
            attached: BTreeMap::new(),
            detached: Vec::new(),
            visuals: BTreeMap::new(),
            nodes: BTreeMap::new(),
            transforms: BTreeMap::new(),
            scene_targets: Vec::new(),
            sounds: Vec::new(),
            pulses: Vec::new(),
            scores: Vec::new(),
        }
    }

    pub fn with_projectile_prototype(mut self, ready: bool) -> Self {
        self.projectile_ready = ready;
        self
    }

    pub fn with_particle_prototype(mut self, ready: bool) -> Self {
        self.particle_ready = ready;
        self
    }

    pub fn with_haptics(mut self, available: bool) -> Self {
        self.haptics_available = available;
        self
    }

    pub fn set_projectile_prototype(&mut self, ready: bool) {
        self.projectile_ready = ready;
    }

    pub fn add_scene_target(&mut self, descriptor: TargetDescriptor) {
        self.scene_targets.push(descriptor);
    }

    pub fn set_world_transform(&mut self, node: NodeId, pose: Pose) {
        self.transforms.insert(node, pose);
    }

    pub fn is_attached(&self, handle: VisualHandle) -> bool {
        self.attached.contains_key(&handle)
    }

    /// Visuals currently attached.
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    /// Attached visuals of one kind.
    pub fn attached_of(&self, kind: VisualKind) -> usize {
        self.attached.values().filter(|k| **k == kind).count()
    }

    pub fn detach_count(&self) -> usize {
        self.detached.len()
    }

    /// Handles detached more than once.
    pub fn double_detaches(&self) -> Vec<VisualHandle> {
        let mut seen = BTreeSet::new();
        self.detached
            .iter()
            .copied()
            .filter(|handle| !seen.insert(*handle))
            .collect()
    }

    pub fn visual_state(&self, handle: VisualHandle) -> Option<VisualState> {
        self.visuals.get(&handle).copied()
    }

    pub fn node_state(&self, node: NodeId) -> Option<VisualState> {
        self.nodes.get(&node).copied()
    }

    pub fn sounds(&self) -> &[Sound] {
        &self.sounds
    }

    pub fn pulses(&self) -> &[(f32, u32)] {
        &self.pulses
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph for RecordingHost {
    fn attach(&mut self, kind: VisualKind, pose: Pose) -> Result<VisualHandle, SceneError> {
        let ready = match kind {
            VisualKind::Projectile => self.projectile_ready,
            VisualKind::Particle => self.particle_ready,
        };
        if !ready {
            return Err(SceneError::NotReady { kind });
        }
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        self.attached.insert(handle, kind);
        self.visuals.insert(
            handle,
            VisualState {
                position: pose.position,
                scale: 1.0,
                opacity: 1.0,
                shown: true,
            },
        );
        Ok(handle)
    }

    fn detach(&mut self, handle: VisualHandle) {
        self.attached.remove(&handle);
        self.visuals.remove(&handle);
        self.detached.push(handle);
    }

    fn update_visual(&mut self, handle: VisualHandle, state: VisualState) {
        assert!(
            self.attached.contains_key(&handle),
            "update of detached visual {handle:?}"
        );
        self.visuals.insert(handle, state);
    }

    fn update_node(&mut self, node: NodeId, state: VisualState) {
        self.nodes.insert(node, state);
    }

    fn query_targets(&self) -> Vec<TargetDescriptor> {
        self.scene_targets.clone()
    }

    fn world_transform(&self, node: NodeId) -> Option<Pose> {
        self.transforms.get(&node).copied()
    }
}

impl Audio for RecordingHost {
    fn play_one_shot(&mut self, sound: Sound) {
        self.sounds.push(sound);
    }
}

impl Haptics for RecordingHost {
    fn pulse(&mut self, strength: f32, duration_ms: u32) -> Result<(), HapticsError> {
        if !self.haptics_available {
            return Err(HapticsError::Unavailable);
        }
        self.pulses.push((strength, duration_ms));
        Ok(())
    }
}

impl ScoreDisplay for RecordingHost {
    fn on_score_changed(&mut self, score: u32) {
        self.scores.push(score);
    }
}

// =============================================================================
// Factories
// =============================================================================

/// A point target that scores and respawns when hit.
pub fn respawn_target(name: &str, position: Vec3) -> TargetDescriptor {
    TargetDescriptor {
        name: name.to_owned(),
        node: None,
        position,
        scale: 1.0,
        volume: BoundingVolume::POINT,
        response: TargetResponse::RespawnAndScore,
    }
}

/// A plant of radius 0.5 that rescales by `factor` when hit.
pub fn plant(name: &str, position: Vec3, factor: f32) -> TargetDescriptor {
    TargetDescriptor {
        name: name.to_owned(),
        node: None,
        position,
        scale: 1.0,
        volume: BoundingVolume::Sphere { radius: 0.5 },
        response: TargetResponse::ScaleByFactor(factor),
    }
}

/// A frame whose trigger went down this frame, fired from `pose`.
pub fn fire_frame(pose: Pose, dt: f32) -> FrameInput {
    FrameInput {
        dt,
        elapsed: 0.0,
        input: InputSnapshot::default().next(Buttons::TRIGGER).with_pose(pose),
    }
}

/// A frame with the trigger released, so the next [`fire_frame`] is an edge.
pub fn idle_frame(dt: f32) -> FrameInput {
    FrameInput::idle(dt)
}
