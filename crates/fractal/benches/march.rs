use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fractal::{raymarch, Mandelbulb, PixelProgram, Ray, Resolution, EYE};
use glam::Vec3;

fn bench_sdf(c: &mut Criterion) {
    let sdf = Mandelbulb::at(12.0);
    let p = Vec3::new(0.3, -0.2, 0.8);
    c.bench_function("sdf_sample", |b| b.iter(|| sdf.distance(black_box(p))));
}

fn bench_center_ray(c: &mut Criterion) {
    let sdf = Mandelbulb::at(0.0);
    let ray = Ray::new(EYE, Vec3::NEG_Z);
    c.bench_function("march_center_ray", |b| {
        b.iter(|| raymarch(black_box(&sdf), black_box(&ray)))
    });
}

fn bench_small_frame(c: &mut Criterion) {
    let Ok(resolution) = Resolution::new(32, 24) else {
        return;
    };
    let program = PixelProgram::new(5.0, resolution);
    c.bench_function("shade_32x24", |b| {
        b.iter(|| {
            for row in 0..24 {
                for column in 0..32 {
                    black_box(program.shade_texel(column, row));
                }
            }
        })
    });
}

criterion_group!(benches, bench_sdf, bench_center_ray, bench_small_frame);
criterion_main!(benches);
