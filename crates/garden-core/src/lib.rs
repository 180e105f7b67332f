//! # Garden Core
//!
//! Projectile, collision and effect simulation for the VR garden.
//!
//! The player's tool fires short-lived projectiles at targets in the scene.
//! This crate owns everything between the trigger edge and the visible
//! result: projectile lifecycle and motion, hit tests, the score, target
//! respawn and grow/shrink tweens, and explosion particle bursts.
//!
//! ## Architecture
//!
//! - **Pool**: live projectiles ([`pool::ProjectilePool`])
//! - **Targets**: registered scene objects and their hit lifecycle ([`target::TargetSet`])
//! - **Resolution**: hit tests ([`collision::CollisionResolver`]) and hit
//!   effects ([`effect::EffectDispatcher`])
//! - **Bursts**: fire-and-forget particle effects ([`burst::BurstEngine`])
//! - **Frame loop**: [`garden::Garden::step`], driven once per rendered frame
//!
//! Rendering, audio, haptics and the score display stay outside; the core
//! reaches them through the traits in [`host`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use garden_core::garden::Garden;
//! use garden_core::input::FrameInput;
//!
//! let mut garden = Garden::new(seed);
//! garden.register_from_scene(&host);
//! loop {
//!     garden.step(&FrameInput { dt, elapsed, input }, &mut host);
//!     for event in garden.take_events() { /* ... */ }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

// Data model
pub mod config;
pub mod entity;
pub mod error;
pub mod host;
pub mod input;
pub mod tween;

// Simulation
pub mod burst;
pub mod collision;
pub mod effect;
pub mod event;
pub mod garden;
pub mod pool;
pub mod target;

pub use garden::Garden;

#[cfg(test)]
mod tests;
