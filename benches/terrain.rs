use criterion::{criterion_group, criterion_main, BatchSize, Criterion, black_box};

use terravox::math::Ray;
use terravox::terrain::{NoiseParams, NoiseTerrain, WaveTerrain};
use terravox::voxel::{InstanceCache, Removal, VoxelPicker, VoxelVolume};

use glam::Vec3;

fn bench_populate_wave_50(c: &mut Criterion) {
    let field = WaveTerrain::default();

    c.bench_function("populate_wave_50", |b| {
        b.iter(|| VoxelVolume::populate(black_box(25), black_box(3), &field));
    });
}

fn bench_populate_noise_50(c: &mut Criterion) {
    let field = NoiseTerrain::new(NoiseParams::default());

    c.bench_function("populate_noise_50", |b| {
        b.iter(|| VoxelVolume::populate(black_box(25), black_box(3), &field));
    });
}

fn bench_pick_center(c: &mut Criterion) {
    let volume = VoxelVolume::populate(25, 3, &WaveTerrain::default());
    let picker = VoxelPicker::default();
    let ray = Ray::new(Vec3::new(0.3, 7.0, 0.3), Vec3::new(0.3, -0.5, -0.8).normalize());

    c.bench_function("pick_center_ray", |b| {
        b.iter(|| picker.pick(black_box(&volume), black_box(&ray)));
    });
}

fn bench_instance_rebuild(c: &mut Criterion) {
    let field = WaveTerrain::default();

    c.bench_function("instance_rebuild_after_removal", |b| {
        b.iter_batched(
            || {
                let volume = VoxelVolume::populate(25, 3, &field);
                let mut cache = InstanceCache::new();
                cache.sync(&volume);
                (volume, cache)
            },
            |(mut volume, mut cache)| {
                let index = volume.len() / 2;
                assert_eq!(volume.remove_at(index), Ok(Removal::Removed));
                // Returned so the drop stays outside the timed section
                (cache.sync(black_box(&volume)), volume, cache)
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_populate_wave_50,
    bench_populate_noise_50,
    bench_pick_center,
    bench_instance_rebuild,
);
criterion_main!(benches);
