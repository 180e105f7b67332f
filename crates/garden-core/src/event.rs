//! Frame event log.
//!
//! Everything observable that happens inside a frame is recorded as a
//! [`GardenEvent`] tagged with its frame number. The log never affects
//! simulation state; the frame driver drains it with
//! [`EventLog::take_events`] for telemetry, replay comparison or debugging.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::burst::BurstId;
use crate::effect::HitOutcome;
use crate::entity::{ProjectileId, TargetId, Tool};

/// Something that happened during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GardenEvent {
    /// The active tool changed.
    ToolChanged {
        /// New tool.
        tool: Tool,
    },
    /// A projectile was fired.
    ProjectileSpawned {
        /// New projectile.
        projectile: ProjectileId,
        /// Firing tool.
        tool: Tool,
        /// Muzzle position.
        position: Vec3,
    },
    /// A fire edge could not spawn (visual not ready or no tool pose).
    SpawnSkipped {
        /// Firing tool.
        tool: Tool,
    },
    /// A projectile ran out of time.
    ProjectileExpired {
        /// Removed projectile.
        projectile: ProjectileId,
    },
    /// A projectile hit a target and was consumed.
    TargetHit {
        /// Consumed projectile.
        projectile: ProjectileId,
        /// Hit target.
        target: TargetId,
        /// What the hit did.
        outcome: HitOutcome,
    },
    /// The score changed.
    ScoreChanged {
        /// New total.
        score: u32,
    },
    /// A burst finished and was torn down.
    BurstDisposed {
        /// Disposed burst.
        burst: BurstId,
    },
    /// A respawning target finished shrinking.
    TargetHidden {
        /// The target.
        target: TargetId,
    },
    /// A respawning target moved to a new position.
    TargetRelocated {
        /// The target.
        target: TargetId,
        /// New position.
        position: Vec3,
    },
    /// A respawning target is hittable again.
    TargetRestored {
        /// The target.
        target: TargetId,
    },
}

/// A [`GardenEvent`] with the frame it happened in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    /// Frame number, starting at 0.
    pub frame: u64,
    /// The event.
    #[serde(flatten)]
    pub event: GardenEvent,
}

/// Append-only event buffer drained by the frame driver.
///
/// ```
/// use garden_core::entity::Tool;
/// use garden_core::event::{EventLog, GardenEvent};
///
/// let mut log = EventLog::new();
/// log.record(3, GardenEvent::ToolChanged { tool: Tool::Scissors });
///
/// let events = log.take_events();
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].frame, 3);
/// assert!(log.take_events().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<RecordedEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn record(&mut self, frame: u64, event: GardenEvent) {
        self.events.push(RecordedEvent { frame, event });
    }

    /// Events recorded since the last drain.
    #[must_use]
    pub fn pending(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Drains and returns every recorded event in order.
    pub fn take_events(&mut self) -> Vec<RecordedEvent> {
        std::mem::take(&mut self.events)
    }
}
