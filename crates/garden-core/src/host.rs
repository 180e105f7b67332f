//! Collaborator interfaces the core drives but does not implement.
//!
//! Rendering, audio, haptics and the score display live outside this crate.
//! The core reaches them only through the traits below, bundled into
//! [`Host`] for [`Garden::step`](crate::garden::Garden::step).
//!
//! - [`SceneGraph`]: attach/detach/update visuals, one-time target query
//! - [`Audio`]: best-effort one-shot sounds
//! - [`Haptics`]: controller pulses, may be unavailable
//! - [`ScoreDisplay`]: score change notifications
//!
//! All traits are object-safe.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::{BoundingVolume, NodeId, Pose, TargetResponse, VisualHandle};
use crate::error::{HapticsError, SceneError};

/// The kind of visual the core asks the scene graph to attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualKind {
    /// A bullet or droplet; requires a loaded prototype asset.
    Projectile,
    /// One explosion particle.
    Particle,
}

impl fmt::Display for VisualKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Projectile => write!(f, "Projectile"),
            Self::Particle => write!(f, "Particle"),
        }
    }
}

/// Render-facing state pushed to the scene graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    /// World position.
    pub position: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Whether the visual should be drawn.
    pub shown: bool,
}

/// A target as the scene describes it during the registration pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    /// Scene name, kept for logs and events.
    pub name: String,
    /// Scene node to push transforms to, if any.
    #[serde(default)]
    pub node: Option<NodeId>,
    /// Initial world position.
    pub position: Vec3,
    /// Initial uniform scale; also the scale restored after a respawn.
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Local collision shape.
    pub volume: BoundingVolume,
    /// Hit response.
    pub response: TargetResponse,
}

fn default_scale() -> f32 {
    1.0
}

/// One-shot sounds the core triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    /// Played on every fire edge.
    Fire,
    /// Played when a hit scores.
    Score,
}

/// Scene graph collaborator.
pub trait SceneGraph {
    /// Attaches a new visual at `pose`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NotReady`] while the prototype asset for `kind`
    /// is still loading. The core skips the visual and tries again on the
    /// next request.
    fn attach(&mut self, kind: VisualKind, pose: Pose) -> Result<VisualHandle, SceneError>;

    /// Detaches and disposes a visual. Unknown handles are ignored.
    fn detach(&mut self, handle: VisualHandle);

    /// Pushes new render state for an attached visual.
    fn update_visual(&mut self, handle: VisualHandle, state: VisualState);

    /// Pushes new render state for a scene-owned node (targets).
    fn update_node(&mut self, node: NodeId, state: VisualState);

    /// Lists the targets present in the scene. Called once at registration.
    fn query_targets(&self) -> Vec<TargetDescriptor>;

    /// Returns the world transform of a node, if it exists.
    fn world_transform(&self, node: NodeId) -> Option<Pose>;
}

/// Audio collaborator. Playback is best-effort and never fails.
pub trait Audio {
    /// Plays `sound` once, restarting it if it is already playing.
    fn play_one_shot(&mut self, sound: Sound);
}

/// Haptics collaborator.
pub trait Haptics {
    /// Pulses the active controller.
    ///
    /// # Errors
    ///
    /// Returns [`HapticsError::Unavailable`] when the controller has no
    /// actuator. Callers ignore the error.
    fn pulse(&mut self, strength: f32, duration_ms: u32) -> Result<(), HapticsError>;
}

/// Score display collaborator.
pub trait ScoreDisplay {
    /// Called after every score change with the new total.
    fn on_score_changed(&mut self, score: u32);
}

/// Everything [`Garden::step`](crate::garden::Garden::step) needs from the outside.
pub trait Host: SceneGraph + Audio + Haptics + ScoreDisplay {}

impl<T: SceneGraph + Audio + Haptics + ScoreDisplay> Host for T {}

/// Formats a score the way the in-world scoreboard shows it: clamped to
/// `0..=9999` and zero-padded to four digits.
///
/// ```
/// use garden_core::host::format_score;
///
/// assert_eq!(format_score(30), "0030");
/// assert_eq!(format_score(123_456), "9999");
/// ```
#[must_use]
pub fn format_score(score: u32) -> String {
    format!("{:04}", score.min(9999))
}
