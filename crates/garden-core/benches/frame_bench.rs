use criterion::{black_box, criterion_group, criterion_main, Criterion};
use garden_core::entity::{BoundingVolume, NodeId, Pose, TargetResponse, VisualHandle};
use garden_core::error::{HapticsError, SceneError};
use garden_core::host::{
    Audio, Haptics, SceneGraph, ScoreDisplay, Sound, TargetDescriptor, VisualKind, VisualState,
};
use garden_core::input::{Buttons, FrameInput, InputSnapshot};
use garden_core::Garden;
use glam::{Quat, Vec3};

/// Host that accepts everything and remembers nothing.
struct NullHost {
    next_handle: u64,
}

impl SceneGraph for NullHost {
    fn attach(&mut self, _kind: VisualKind, _pose: Pose) -> Result<VisualHandle, SceneError> {
        self.next_handle += 1;
        Ok(VisualHandle(self.next_handle))
    }
    fn detach(&mut self, _handle: VisualHandle) {}
    fn update_visual(&mut self, _handle: VisualHandle, _state: VisualState) {}
    fn update_node(&mut self, _node: NodeId, _state: VisualState) {}
    fn query_targets(&self) -> Vec<TargetDescriptor> {
        Vec::new()
    }
    fn world_transform(&self, _node: NodeId) -> Option<Pose> {
        None
    }
}

impl Audio for NullHost {
    fn play_one_shot(&mut self, _sound: Sound) {}
}

impl Haptics for NullHost {
    fn pulse(&mut self, _strength: f32, _duration_ms: u32) -> Result<(), HapticsError> {
        Ok(())
    }
}

impl ScoreDisplay for NullHost {
    fn on_score_changed(&mut self, _score: u32) {}
}

fn garden_with_targets(count: u32) -> Garden {
    let mut garden = Garden::new(7);
    for i in 0..count {
        let angle = (i as f32 / count as f32) * std::f32::consts::TAU;
        let response = if i % 2 == 0 {
            TargetResponse::RespawnAndScore
        } else {
            TargetResponse::ScaleByFactor(1.1)
        };
        garden.register_target(TargetDescriptor {
            name: format!("target-{i}"),
            node: Some(NodeId(u64::from(i))),
            position: Quat::from_rotation_y(angle) * Vec3::new(0.0, 1.0, -6.0),
            scale: 1.0,
            volume: BoundingVolume::Sphere { radius: 0.4 },
            response,
        });
    }
    garden
}

fn bench_idle_frame(c: &mut Criterion) {
    let mut garden = garden_with_targets(50);
    let mut host = NullHost { next_handle: 0 };

    c.bench_function("idle_frame_50_targets", |b| {
        b.iter(|| garden.step(black_box(&FrameInput::idle(1.0 / 90.0)), &mut host));
    });
}

fn bench_firing_frames(c: &mut Criterion) {
    // Alternating press/release keeps the pool and burst engine busy.
    let mut garden = garden_with_targets(50);
    let mut host = NullHost { next_handle: 0 };
    let mut input = InputSnapshot::default();
    let mut yaw = 0.0f32;

    c.bench_function("firing_frame_50_targets", |b| {
        b.iter(|| {
            let held = if input.held.is_empty() {
                Buttons::TRIGGER
            } else {
                Buttons::empty()
            };
            yaw = (yaw + 0.07) % std::f32::consts::TAU;
            input = input
                .next(held)
                .with_pose(Pose::new(Vec3::new(0.0, 1.0, 0.0), Quat::from_rotation_y(yaw)));
            garden.step(
                black_box(&FrameInput {
                    dt: 1.0 / 90.0,
                    elapsed: 0.0,
                    input,
                }),
                &mut host,
            );
            garden.take_events().len()
        });
    });
}

criterion_group!(benches, bench_idle_frame, bench_firing_frames);
criterion_main!(benches);
