use criterion::{Criterion, criterion_group, criterion_main};
use pic_resample::{
    ImageSize, ImageStore, ResamplingFunction, Scaler, Scaling, ScalingF32, ThreadingPolicy,
};

fn synthetic_rgba(width: usize, height: usize) -> Vec<u8> {
    let mut data = vec![0u8; width * height * 4];
    for (i, px) in data.chunks_exact_mut(4).enumerate() {
        let x = i % width;
        let y = i / width;
        px[0] = (x % 256) as u8;
        px[1] = (y % 256) as u8;
        px[2] = ((x + y) % 256) as u8;
        px[3] = 255 - ((x * y) % 128) as u8;
    }
    data
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let (width, height) = (1920usize, 1280usize);
    let src_bytes = synthetic_rgba(width, height);
    let src_f32 = src_bytes
        .iter()
        .map(|&x| x as f32 * (1. / 255.))
        .collect::<Vec<_>>();
    let new_size = ImageSize::new(width / 4, height / 4);

    for (name, function) in [
        ("Lanczos 3", ResamplingFunction::Lanczos3),
        ("Bilinear", ResamplingFunction::Bilinear),
        ("Mitchell", ResamplingFunction::MitchellNetravalli),
    ] {
        c.bench_function(&format!("Pic resample RGBA: {name}"), |b| {
            let mut scaler = Scaler::new(function);
            scaler.set_threading_policy(ThreadingPolicy::Single);
            let store = ImageStore::<u8, 4>::from_slice(&src_bytes, width, height).unwrap();
            b.iter(|| {
                _ = scaler.resize_rgba(new_size, &store).unwrap();
            })
        });
    }

    c.bench_function("Pic resample RGBA with alpha: Lanczos 3", |b| {
        let mut scaler = Scaler::new(ResamplingFunction::Lanczos3);
        scaler.set_threading_policy(ThreadingPolicy::Single);
        scaler.set_premultiply_alpha(true);
        let store = ImageStore::<u8, 4>::from_slice(&src_bytes, width, height).unwrap();
        b.iter(|| {
            _ = scaler.resize_rgba(new_size, &store).unwrap();
        })
    });

    c.bench_function("Pic resample RGBA (Adaptive): Lanczos 3", |b| {
        let mut scaler = Scaler::new(ResamplingFunction::Lanczos3);
        scaler.set_threading_policy(ThreadingPolicy::Adaptive);
        let store = ImageStore::<u8, 4>::from_slice(&src_bytes, width, height).unwrap();
        b.iter(|| {
            _ = scaler.resize_rgba(new_size, &store).unwrap();
        })
    });

    c.bench_function("Pic resample RGBA F32: Lanczos 3", |b| {
        let mut scaler = Scaler::new(ResamplingFunction::Lanczos3);
        scaler.set_threading_policy(ThreadingPolicy::Single);
        let store = ImageStore::<f32, 4>::from_slice(&src_f32, width, height).unwrap();
        b.iter(|| {
            _ = scaler.resize_rgba_f32(new_size, &store).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
