//! Benchmarks for the ambuild pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::TempDir;

use ambuild::discovery::{conversion_units, Manifest};
use ambuild::driver::check_staleness;
use ambuild::mapping::{classify, map_output_path};

const CATEGORY_DIRS: &[&str] = &[
    "soundbanks",
    "collections",
    "sounds",
    "events",
    "attenuators",
    "switches",
    "switch_containers",
    "rtpc",
    "effects",
    "environments",
];

/// Build a project with `per_dir` definitions in every category directory.
fn fixture_project(per_dir: usize) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("sounds").join("amplitude_project");

    fs::create_dir_all(&project).unwrap();
    fs::write(project.join("audio_config.json"), "{}").unwrap();
    fs::write(project.join("buses.json"), "{}").unwrap();

    for category in CATEGORY_DIRS {
        let category_dir = project.join(category);
        fs::create_dir_all(&category_dir).unwrap();
        for i in 0..per_dir {
            fs::write(category_dir.join(format!("asset_{:04}.json", i)), "{}").unwrap();
        }
    }

    (dir, project)
}

// -- Mapping benchmarks --

fn bench_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("mapping");

    let paths: Vec<PathBuf> = CATEGORY_DIRS
        .iter()
        .map(|d| PathBuf::from(format!("/game/sounds/amplitude_project/{}/asset.json", d)))
        .chain([
            PathBuf::from("/game/sounds/amplitude_project/audio_config.json"),
            PathBuf::from("/game/other/amplitude_project/misc/asset.json"),
        ])
        .collect();

    group.bench_function("classify_all_rules", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(classify(black_box(path)));
            }
        })
    });

    group.bench_function("map_output_path", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(map_output_path(black_box(path)));
            }
        })
    });

    group.finish();
}

// -- Discovery benchmarks --

fn bench_discovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("discovery");

    let (_small_dir, small) = fixture_project(10);
    let (_large_dir, large) = fixture_project(200);
    let no_schemas: [&Path; 0] = [];
    let manifest = Manifest::default();

    group.bench_function("conversion_units_small", |b| {
        b.iter(|| conversion_units(black_box(&small), &no_schemas, &manifest))
    });

    group.bench_function("conversion_units_large", |b| {
        b.iter(|| conversion_units(black_box(&large), &no_schemas, &manifest))
    });

    // Staleness of every input against a missing target.
    let units = conversion_units(&large, &no_schemas, &manifest).unwrap();
    group.bench_function("staleness_large", |b| {
        b.iter(|| {
            for unit in &units {
                for (input, target) in unit.targets() {
                    black_box(check_staleness(input, unit.schema(), &target).unwrap());
                }
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_mapping, bench_discovery);
criterion_main!(benches);
