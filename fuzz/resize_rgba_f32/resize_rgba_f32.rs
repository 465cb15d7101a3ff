#![no_main]

use libfuzzer_sys::fuzz_target;
use pic_resample::{ImageSize, ImageStore, ResamplingFunction, Scaler, ScalingF32};

fuzz_target!(|data: (u16, u16, u16, u16, u8, f32)| {
    resize_rgba(
        data.0 as usize,
        data.1 as usize,
        data.2 as usize,
        data.3 as usize,
        ResamplingFunction::from(data.4),
        data.5,
    )
});

fn resize_rgba(
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
    sampler: ResamplingFunction,
    fill: f32,
) {
    if src_width == 0
        || src_width > 2000
        || src_height == 0
        || src_height > 2000
        || dst_width == 0
        || dst_width > 512
        || dst_height == 0
        || dst_height > 512
    {
        return;
    }

    let src_data = vec![fill; src_width * src_height * 4];

    let store = ImageStore::<f32, 4>::from_slice(&src_data, src_width, src_height).unwrap();
    let mut scaler = Scaler::new(sampler);
    let result = scaler.resize_rgba_f32(ImageSize::new(dst_width, dst_height), &store);
    if fill.is_finite() && fill.abs() < 1e30 {
        let resized = result.unwrap();
        assert!(resized.as_bytes().iter().all(|v| (0. ..=1.).contains(v)));
    }
    scaler.set_premultiply_alpha(true);
    _ = scaler.resize_rgba_f32(ImageSize::new(dst_width, dst_height), &store);
}
