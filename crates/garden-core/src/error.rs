//! Error types for the garden core.
//!
//! None of these are fatal. Collaborator errors ([`SceneError`],
//! [`HapticsError`]) are consumed at the call site and turn into a skipped
//! effect for this frame; [`ConfigError`] is only produced when validating a
//! [`GardenConfig`](crate::config::GardenConfig) before a garden is built.

use thiserror::Error;

use crate::host::VisualKind;

/// Failure reported by the scene graph collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The prototype asset for this visual has not finished loading.
    #[error("{kind} prototype is not loaded yet")]
    NotReady {
        /// Which visual was requested.
        kind: VisualKind,
    },
}

/// Failure reported by the haptics collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HapticsError {
    /// No haptic actuator on the active controller.
    #[error("no haptic actuator available")]
    Unavailable,
}

/// A configuration value outside its valid range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A value that must be strictly positive was zero, negative or NaN.
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A value that must not be negative was negative or NaN.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// The respawn spawn volume has a min corner above its max corner.
    #[error("spawn volume min {min:?} exceeds max {max:?}")]
    InvertedSpawnVolume {
        /// Configured minimum corner.
        min: [f32; 3],
        /// Configured maximum corner.
        max: [f32; 3],
    },
    /// Bursts must contain at least one particle.
    #[error("burst particle count must be at least 1")]
    EmptyBurst,
}
