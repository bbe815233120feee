#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{IVec2, Vec3};
use tileview::camera::{CameraController, InputDelta};
use tileview::options::CameraOptions;
use tileview::scene::{mesh_gen, pack, Actor, ActorKind, Scene};

fn tile_map_pack_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_tile_map");

    for side in [16u32, 64, 128] {
        let blocks: Vec<_> = (0..side * side)
            .map(|i| {
                let tile = IVec2::new((i % side) as i32, (i / side) as i32);
                mesh_gen::tile_block(tile, 0.25, i % 7 == 0, Vec3::ONE)
            })
            .collect();

        group.bench_function(format!("{side}x{side}_blocks"), |b| {
            b.iter(|| black_box(pack(black_box(&blocks))));
        });
    }
    group.finish();
}

fn dirty_actors_benchmark(c: &mut Criterion) {
    let mut scene = Scene::new();
    scene.add_level_mesh(mesh_gen::tile_map(64, 64, 0.25, |t| {
        (t.x % 5 == 0, Vec3::splat(0.5))
    }));
    let ids: Vec<_> = (0..200)
        .map(|i| {
            scene.add_actor(Actor::new(
                ActorKind::Monster,
                IVec2::new(i % 64, i / 64),
                Vec3::X,
                0.25,
            ))
        })
        .collect();
    let _ = scene.pack_dirty();

    let mut step = 0;
    c.bench_function("repack_moved_actor", |b| {
        b.iter(|| {
            step += 1;
            if let Some(actor) = scene.actor_mut(ids[0]) {
                actor.move_to(IVec2::new(step % 64, 0));
            }
            black_box(scene.pack_dirty())
        });
    });
}

fn camera_frame_benchmark(c: &mut Criterion) {
    let mut camera =
        CameraController::new(CameraOptions::default(), 800, 600).unwrap();
    let input = InputDelta {
        rotation: Vec3::Y,
        movement: Vec3::NEG_Z,
        elapsed: 1.0 / 60.0,
        ..Default::default()
    };

    c.bench_function("free_fly_and_matrices", |b| {
        b.iter(|| {
            camera.update_free_fly(black_box(&input));
            black_box(camera.matrices())
        });
    });
}

criterion_group!(
    benches,
    tile_map_pack_benchmark,
    dirty_actors_benchmark,
    camera_frame_benchmark
);
criterion_main!(benches);
