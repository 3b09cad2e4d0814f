//! Benchmarks for the tilecast resolution paths.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tilecast::registry::{HandlerRegistry, RegistrationPolicy, RegistryEntry};
use tilecast::translator::{TileLayer, TileMap, TileRef, TileTranslator, TranslationTable};

struct BenchHandler {
    name: String,
}

impl BenchHandler {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl RegistryEntry for BenchHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn policy(&self) -> RegistrationPolicy {
        RegistrationPolicy::permissive()
    }
}

// -- Dispatch benchmarks --

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    let mut registry = HandlerRegistry::new();
    for environment in ["terminal", "json", "scene"] {
        registry
            .register(BenchHandler::new(environment), &[environment])
            .unwrap();
        for translation_type in ["text", "sceneObject", "path"] {
            registry
                .register(
                    BenchHandler::new(translation_type),
                    &[environment, translation_type],
                )
                .unwrap();
        }
    }
    registry
        .register(BenchHandler::new("global"), &["default"])
        .unwrap();

    group.bench_function("select_exact", |b| {
        b.iter(|| {
            registry
                .select(black_box("json"), black_box("sceneObject"), "default")
                .unwrap()
        })
    });

    group.bench_function("select_env_fallback", |b| {
        b.iter(|| {
            registry
                .select(black_box("json"), black_box("unknown"), "default")
                .unwrap()
        })
    });

    group.bench_function("select_global_fallback", |b| {
        b.iter(|| {
            registry
                .select(black_box("unknown"), black_box("unknown"), "default")
                .unwrap()
        })
    });

    group.finish();
}

// -- Translation benchmarks --

fn bench_translation(c: &mut Criterion) {
    let mut group = c.benchmark_group("translation");

    const SIZE: usize = 64;

    let mut layer = TileLayer::new(SIZE, SIZE);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let name = if (x + y) % 2 == 0 { "wall" } else { "floor" };
            layer.set_tile(x, y, TileRef::new("Tiles1", name));
        }
    }
    let mut map = TileMap::new("bench");
    map.add_layer(layer);

    let mut table = TranslationTable::new("bench", "0.1");
    table.add_value("Tiles1", "wall", "text", "W").unwrap();
    table.add_value("Tiles1", "floor", "text", "F").unwrap();

    let mut translator = TileTranslator::new(map, table);
    translator.set_translation_type("text");

    group.bench_function("translate_single", |b| {
        b.iter(|| translator.translate(black_box(0), black_box(3), black_box(5), None))
    });

    group.bench_function("translate_full_map", |b| {
        b.iter(|| {
            for y in 0..SIZE {
                for x in 0..SIZE {
                    translator.translate(0, x, y, None).unwrap();
                }
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_translation);
criterion_main!(benches);
