//! Registered targets and their hit lifecycle.
//!
//! Targets belong to the scene; the core holds a [`TargetSet`] built once
//! from the scene's descriptors and reads/writes their position, scale and
//! visibility. It never creates or destroys scene objects.
//!
//! # Respawn cycle
//!
//! A `RespawnAndScore` target that is hit walks through explicit phases,
//! advanced by elapsed time each frame:
//!
//! ```text
//! Active -> Shrinking -> Hidden -> Relocating -> Growing -> Active
//! ```
//!
//! Visibility is cleared for the whole cycle, so the target cannot be hit
//! again until it has fully regrown at its new position. Time left over when
//! a phase ends carries into the next phase in the same frame.
//!
//! # Scale tweens
//!
//! `ScaleByFactor` targets stay active and visible; each hit starts a tween
//! from the current scale to the previous goal times the factor, so hits
//! compound even when they land mid-tween.

use std::collections::BTreeMap;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RespawnConfig;
use crate::entity::{BoundingVolume, NodeId, TargetId, TargetResponse, WorldVolume};
use crate::host::{SceneGraph, TargetDescriptor, VisualState};
use crate::tween::Tween;

/// Where a target is in its hit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TargetPhase {
    /// Idle and, if visible, hittable.
    Active,
    /// Shrinking to zero after a scoring hit.
    Shrinking(Tween),
    /// Waiting out the respawn delay.
    Hidden {
        /// Seconds left before relocation.
        remaining: f32,
    },
    /// Picking a new position; never observed between frames.
    Relocating,
    /// Growing back to the base scale at the new position.
    Growing(Tween),
}

/// A phase change reported by [`TargetSet::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transition {
    /// Finished shrinking; now waiting out the delay.
    Hidden,
    /// Moved to a new position and started growing.
    Relocated(Vec3),
    /// Back to full scale, visible and hittable.
    Restored,
}

// =============================================================================
// Target
// =============================================================================

/// A scene object that can be hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    id: TargetId,
    name: String,
    node: Option<NodeId>,
    volume: BoundingVolume,
    response: TargetResponse,
    position: Vec3,
    scale: f32,
    base_scale: f32,
    visible: bool,
    phase: TargetPhase,
    scale_tween: Option<Tween>,
}

impl Target {
    fn from_descriptor(id: TargetId, descriptor: TargetDescriptor) -> Self {
        Self {
            id,
            name: descriptor.name,
            node: descriptor.node,
            volume: descriptor.volume,
            response: descriptor.response,
            position: descriptor.position,
            scale: descriptor.scale,
            base_scale: descriptor.scale,
            visible: true,
            phase: TargetPhase::Active,
            scale_tween: None,
        }
    }

    /// Returns the target's id.
    #[must_use]
    pub const fn id(&self) -> TargetId {
        self.id
    }

    /// Returns the scene name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the scene node, if any.
    #[must_use]
    pub const fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Returns the hit response.
    #[must_use]
    pub const fn response(&self) -> TargetResponse {
        self.response
    }

    /// Returns the current world position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Returns the current uniform scale.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Returns the scale restored after a respawn.
    #[must_use]
    pub const fn base_scale(&self) -> f32 {
        self.base_scale
    }

    /// Returns the lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> TargetPhase {
        self.phase
    }

    /// Returns the in-flight scale tween, if any.
    #[must_use]
    pub const fn scale_tween(&self) -> Option<Tween> {
        self.scale_tween
    }

    /// Visibility flag. Invisible targets are never hit.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Sets the visibility flag from outside (e.g. the scene hiding a prop).
    ///
    /// Ignored while a respawn cycle is running.
    pub fn set_visible(&mut self, visible: bool) {
        if matches!(self.phase, TargetPhase::Active) {
            self.visible = visible;
        }
    }

    /// The collision volume at the current position and scale.
    #[must_use]
    pub fn world_volume(&self) -> WorldVolume {
        self.volume.resolve(self.position, self.scale)
    }

    /// Starts the respawn cycle: visibility off, shrink toward zero.
    ///
    /// Returns `false` (and changes nothing) if a cycle is already running.
    pub fn begin_respawn(&mut self, shrink_duration: f32) -> bool {
        if !matches!(self.phase, TargetPhase::Active) {
            return false;
        }
        self.visible = false;
        self.scale_tween = None;
        self.phase = TargetPhase::Shrinking(Tween::new(self.scale, 0.0, shrink_duration));
        true
    }

    /// Starts a tween to the pending goal scale times `factor` and returns
    /// the new goal.
    ///
    /// The pending goal is the end of the in-flight tween, or the current
    /// scale when idle, so repeated hits multiply.
    pub fn scale_by(&mut self, factor: f32, duration: f32) -> f32 {
        let pending = self.scale_tween.map_or(self.scale, |tween| tween.end());
        let goal = pending * factor;
        self.scale_tween = Some(Tween::new(self.scale, goal, duration));
        goal
    }

    /// The render state the scene should show for this target.
    ///
    /// Shrinking and growing targets are drawn even though they are not
    /// hittable.
    #[must_use]
    pub fn visual_state(&self) -> VisualState {
        let shown = match self.phase {
            TargetPhase::Active => self.visible,
            TargetPhase::Shrinking(_) | TargetPhase::Growing(_) => true,
            TargetPhase::Hidden { .. } | TargetPhase::Relocating => false,
        };
        VisualState {
            position: self.position,
            scale: self.scale,
            opacity: 1.0,
            shown,
        }
    }

    fn is_animating(&self) -> bool {
        !matches!(self.phase, TargetPhase::Active) || self.scale_tween.is_some()
    }

    fn advance<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        config: &RespawnConfig,
        rng: &mut R,
        transitions: &mut Vec<(TargetId, Transition)>,
    ) {
        let mut dt = dt.max(0.0);

        if let Some(tween) = &mut self.scale_tween {
            tween.advance(dt);
            self.scale = tween.value();
            if tween.is_finished() {
                self.scale_tween = None;
            }
        }

        loop {
            match &mut self.phase {
                TargetPhase::Active => break,
                TargetPhase::Shrinking(tween) => {
                    let leftover = tween.advance(dt);
                    self.scale = tween.value();
                    if !tween.is_finished() {
                        break;
                    }
                    dt = leftover;
                    self.phase = TargetPhase::Hidden {
                        remaining: config.delay,
                    };
                    transitions.push((self.id, Transition::Hidden));
                }
                TargetPhase::Hidden { remaining } => {
                    if dt < *remaining {
                        *remaining -= dt;
                        break;
                    }
                    dt -= *remaining;
                    self.phase = TargetPhase::Relocating;
                }
                TargetPhase::Relocating => {
                    self.position = config.spawn_volume.sample(rng);
                    self.scale = 0.0;
                    self.phase = TargetPhase::Growing(Tween::new(
                        0.0,
                        self.base_scale,
                        config.grow_duration,
                    ));
                    info!(target_id = %self.id, name = %self.name, position = ?self.position, "target relocated");
                    transitions.push((self.id, Transition::Relocated(self.position)));
                }
                TargetPhase::Growing(tween) => {
                    let leftover = tween.advance(dt);
                    self.scale = tween.value();
                    if !tween.is_finished() {
                        break;
                    }
                    dt = leftover;
                    self.phase = TargetPhase::Active;
                    self.visible = true;
                    transitions.push((self.id, Transition::Restored));
                }
            }
        }
    }
}

// =============================================================================
// Target Set
// =============================================================================

/// All registered targets, in registration order.
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    next_id: u64,
    targets: BTreeMap<TargetId, Target>,
}

impl TargetSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a target and returns its id.
    pub fn register(&mut self, descriptor: TargetDescriptor) -> TargetId {
        let id = TargetId::new(self.next_id);
        self.next_id += 1;
        debug!(target_id = %id, name = %descriptor.name, response = ?descriptor.response, "target registered");
        self.targets
            .insert(id, Target::from_descriptor(id, descriptor));
        id
    }

    /// Removes a target. Later hits against `id` become no-ops.
    pub fn unregister(&mut self, id: TargetId) -> Option<Target> {
        self.targets.remove(&id)
    }

    /// Returns a target by id.
    #[must_use]
    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(&id)
    }

    /// Returns a mutable target by id.
    #[must_use]
    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut Target> {
        self.targets.get_mut(&id)
    }

    /// Targets in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Target> + '_ {
        self.targets.values()
    }

    /// Number of registered targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` if no target is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Advances every respawn cycle and scale tween by `dt`, pushing the
    /// resulting render state of animating targets to the scene.
    ///
    /// Returns the phase changes that happened, in target order.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        config: &RespawnConfig,
        rng: &mut R,
        scene: &mut dyn SceneGraph,
    ) -> Vec<(TargetId, Transition)> {
        let mut transitions = Vec::new();
        for target in self.targets.values_mut() {
            if !target.is_animating() {
                continue;
            }
            target.advance(dt, config, rng, &mut transitions);
            if let Some(node) = target.node {
                scene.update_node(node, target.visual_state());
            }
        }
        transitions
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::{plant, respawn_target, RecordingHost};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn advance_for(
        set: &mut TargetSet,
        seconds: f32,
        dt: f32,
        host: &mut RecordingHost,
        rng: &mut ChaCha8Rng,
    ) -> Vec<(TargetId, Transition)> {
        let config = RespawnConfig::default();
        let mut all = Vec::new();
        let steps = (seconds / dt).round() as usize;
        for _ in 0..steps {
            all.extend(set.advance(dt, &config, rng, host));
        }
        all
    }

    mod respawn_tests {
        use super::*;

        #[test]
        fn shrink_is_pushed_to_scene_node() {
            let mut host = RecordingHost::new();
            let mut rng = ChaCha8Rng::seed_from_u64(2);
            let mut set = TargetSet::new();
            let mut descriptor = respawn_target("t", Vec3::ZERO);
            descriptor.node = Some(NodeId(3));
            let id = set.register(descriptor);
            assert_eq!(set.get(id).unwrap().node(), Some(NodeId(3)));

            set.get_mut(id).unwrap().begin_respawn(0.3);
            set.advance(0.0625, &RespawnConfig::default(), &mut rng, &mut host);
            let state = host.node_state(NodeId(3)).unwrap();
            assert!(state.scale < 1.0);
            assert!(state.shown);
        }

        #[test]
        fn begin_respawn_hides_and_shrinks() {
            let mut set = TargetSet::new();
            let id = set.register(respawn_target("t", Vec3::new(0.0, 1.0, -3.0)));
            let target = set.get_mut(id).unwrap();

            assert!(target.begin_respawn(0.3));
            assert!(!target.is_visible());
            assert!(matches!(target.phase(), TargetPhase::Shrinking(_)));
        }

        #[test]
        fn begin_respawn_twice_is_rejected() {
            let mut set = TargetSet::new();
            let id = set.register(respawn_target("t", Vec3::ZERO));
            let target = set.get_mut(id).unwrap();
            assert!(target.begin_respawn(0.3));
            assert!(!target.begin_respawn(0.3));
        }

        #[test]
        fn full_cycle_restores_scale_at_new_position() {
            let mut host = RecordingHost::new();
            let mut rng = ChaCha8Rng::seed_from_u64(3);
            let mut set = TargetSet::new();
            let start = Vec3::new(0.0, 1.0, -3.0);
            let id = set.register(respawn_target("t", start));
            set.get_mut(id).unwrap().begin_respawn(0.3);

            let transitions = advance_for(&mut set, 1.75, 0.0625, &mut host, &mut rng);

            let target = set.get(id).unwrap();
            assert_eq!(target.phase(), TargetPhase::Active);
            assert!(target.is_visible());
            assert_eq!(target.scale(), target.base_scale());
            assert!(RespawnConfig::default().spawn_volume.contains(target.position()));
            assert_ne!(target.position(), start);

            let kinds: Vec<_> = transitions.iter().map(|(_, t)| *t).collect();
            assert_eq!(kinds.len(), 3);
            assert_eq!(kinds[0], Transition::Hidden);
            assert!(matches!(kinds[1], Transition::Relocated(_)));
            assert_eq!(kinds[2], Transition::Restored);
        }

        #[test]
        fn stays_invisible_until_regrown() {
            let mut host = RecordingHost::new();
            let mut rng = ChaCha8Rng::seed_from_u64(3);
            let config = RespawnConfig::default();
            let mut set = TargetSet::new();
            let id = set.register(respawn_target("t", Vec3::ZERO));
            set.get_mut(id).unwrap().begin_respawn(config.shrink_duration);

            // 0.3 shrink + 1.0 hidden + 0.3 grow = 1.6 s; 25 steps of 1/16 = 1.5625 s.
            for _ in 0..25 {
                set.advance(0.0625, &config, &mut rng, &mut host);
                assert!(!set.get(id).unwrap().is_visible());
            }
            set.advance(0.0625, &config, &mut rng, &mut host);
            assert!(set.get(id).unwrap().is_visible());
        }

        #[test]
        fn one_large_step_runs_whole_cycle() {
            let mut host = RecordingHost::new();
            let mut rng = ChaCha8Rng::seed_from_u64(9);
            let mut set = TargetSet::new();
            let id = set.register(respawn_target("t", Vec3::ZERO));
            set.get_mut(id).unwrap().begin_respawn(0.3);

            let transitions = set.advance(5.0, &RespawnConfig::default(), &mut rng, &mut host);
            assert_eq!(transitions.len(), 3);
            assert_eq!(set.get(id).unwrap().phase(), TargetPhase::Active);
        }

        #[test]
        fn zero_dt_makes_no_progress() {
            let mut host = RecordingHost::new();
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let mut set = TargetSet::new();
            let id = set.register(respawn_target("t", Vec3::ZERO));
            set.get_mut(id).unwrap().begin_respawn(0.3);

            for _ in 0..100 {
                set.advance(0.0, &RespawnConfig::default(), &mut rng, &mut host);
            }
            assert!(matches!(
                set.get(id).unwrap().phase(),
                TargetPhase::Shrinking(_)
            ));
        }

        #[test]
        fn pushes_render_state_to_node() {
            let mut host = RecordingHost::new();
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let mut set = TargetSet::new();
            let mut descriptor = respawn_target("t", Vec3::ZERO);
            descriptor.node = Some(NodeId(42));
            let id = set.register(descriptor);
            set.get_mut(id).unwrap().begin_respawn(0.3);

            set.advance(0.1, &RespawnConfig::default(), &mut rng, &mut host);
            let state = host.node_state(NodeId(42)).unwrap();
            assert!(state.shown);
            assert!(state.scale < 1.0);
        }
    }

    mod scale_tests {
        use super::*;

        #[test]
        fn scale_by_tweens_to_goal() {
            let mut host = RecordingHost::new();
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let mut set = TargetSet::new();
            let id = set.register(plant("rose", Vec3::ZERO, 0.2));

            let goal = set.get_mut(id).unwrap().scale_by(0.2, 0.3);
            assert!((goal - 0.2).abs() < 1e-6);

            advance_for(&mut set, 0.5, 0.125, &mut host, &mut rng);
            let target = set.get(id).unwrap();
            assert_eq!(target.scale(), goal);
            assert!(target.scale_tween().is_none());
            assert!(target.is_visible());
        }

        #[test]
        fn mid_tween_hits_compound_on_goal() {
            let mut host = RecordingHost::new();
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let mut set = TargetSet::new();
            let id = set.register(plant("rose", Vec3::ZERO, 1.2));

            set.get_mut(id).unwrap().scale_by(1.2, 0.3);
            set.advance(0.1, &RespawnConfig::default(), &mut rng, &mut host);
            let goal = set.get_mut(id).unwrap().scale_by(1.2, 0.3);

            assert!((goal - 1.44).abs() < 1e-5);
            advance_for(&mut set, 1.0, 0.125, &mut host, &mut rng);
            assert_eq!(set.get(id).unwrap().scale(), goal);
        }
    }

    #[test]
    fn set_visible_is_ignored_during_respawn() {
        let mut set = TargetSet::new();
        let id = set.register(respawn_target("t", Vec3::ZERO));
        let target = set.get_mut(id).unwrap();
        target.begin_respawn(0.3);
        target.set_visible(true);
        assert!(!target.is_visible());
    }

    #[test]
    fn unregister_removes_target() {
        let mut set = TargetSet::new();
        let a = set.register(respawn_target("a", Vec3::ZERO));
        let b = set.register(respawn_target("b", Vec3::ONE));
        assert!(set.unregister(a).is_some());
        assert!(set.get(a).is_none());
        assert_eq!(set.iter().map(Target::id).collect::<Vec<_>>(), vec![b]);
    }
}
