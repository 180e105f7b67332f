//! Per-frame input supplied by the frame driver.
//!
//! The controller layer is out of scope; it only has to fill in an
//! [`InputSnapshot`] each frame. Edge detection (`just_pressed`) compares the
//! buttons held this frame against the buttons held last frame, which is what
//! makes firing a discrete event instead of a per-frame stream.
//!
//! ```
//! use garden_core::input::{Buttons, InputSnapshot};
//!
//! let idle = InputSnapshot::default();
//! let press = idle.next(Buttons::TRIGGER);
//! let hold = press.next(Buttons::TRIGGER);
//!
//! assert!(press.just_pressed(Buttons::TRIGGER));
//! assert!(!hold.just_pressed(Buttons::TRIGGER));
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::entity::Pose;

bitflags! {
    /// Controller buttons the core reacts to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Buttons: u8 {
        /// Fire the held tool.
        const TRIGGER = 1 << 0;
        /// Cycle to the next tool.
        const SWITCH_TOOL = 1 << 1;
        /// Grip; reported but unused by the core.
        const GRIP = 1 << 2;
    }
}

/// Controller state for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Buttons held this frame.
    pub held: Buttons,
    /// Buttons held on the previous frame.
    pub previous: Buttons,
    /// World pose of the firing tool, if the controller is tracked.
    pub tool_pose: Option<Pose>,
}

impl InputSnapshot {
    /// Builds the snapshot for the following frame, carrying `held` over as
    /// `previous`. The tool pose is kept.
    #[must_use]
    pub fn next(&self, held: Buttons) -> Self {
        Self {
            held,
            previous: self.held,
            tool_pose: self.tool_pose,
        }
    }

    /// Replaces the tool pose.
    #[must_use]
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.tool_pose = Some(pose);
        self
    }

    /// Returns `true` if every button in `buttons` went down this frame.
    #[must_use]
    pub fn just_pressed(&self, buttons: Buttons) -> bool {
        self.held.contains(buttons) && !self.previous.intersects(buttons)
    }

    /// Returns `true` if every button in `buttons` is held.
    #[must_use]
    pub fn is_held(&self, buttons: Buttons) -> bool {
        self.held.contains(buttons)
    }

    /// Fire edge.
    #[must_use]
    pub fn fire(&self) -> bool {
        self.just_pressed(Buttons::TRIGGER)
    }
}

/// Everything the frame driver hands the core for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Seconds since the session started.
    pub elapsed: f64,
    /// Controller state.
    pub input: InputSnapshot,
}

impl FrameInput {
    /// A frame with no input.
    #[must_use]
    pub fn idle(dt: f32) -> Self {
        Self {
            dt,
            ..Self::default()
        }
    }

    /// Step length the simulation advances by: `dt`, with negative and
    /// non-finite values treated as a zero-length frame.
    #[must_use]
    pub fn step_dt(&self) -> f32 {
        clamp_dt(self.dt)
    }
}

/// Clamps a frame time to a finite, non-negative step.
#[must_use]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.max(0.0)
    } else {
        0.0
    }
}
