use criterion::{criterion_group, criterion_main, Criterion};
use gbcore::test::{build_test, TestOptions};

fn benchmark_next_frame(c: &mut Criterion) {
    let mut gb = build_test(TestOptions {
        apu_enabled: Some(false),
        ..Default::default()
    });
    gb.load_rom_empty().unwrap();

    c.bench_function("ppu_next_frame", |b| {
        b.iter(|| {
            gb.next_frame().unwrap();
        })
    });
}

criterion_group!(benches, benchmark_next_frame);
criterion_main!(benches);
