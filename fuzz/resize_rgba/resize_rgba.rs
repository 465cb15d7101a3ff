#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pic_resample::{ImageSize, ImageStore, ResamplingFunction, Scaler, Scaling, ThreadingPolicy};

#[derive(Arbitrary, Debug)]
struct Input {
    src_width: u16,
    src_height: u16,
    dst_width: u16,
    dst_height: u16,
    kernel: u8,
    premultiply: bool,
    threads: u8,
}

fuzz_target!(|data: Input| {
    if data.src_width == 0
        || data.src_width > 2000
        || data.src_height == 0
        || data.src_height > 2000
        || data.dst_width == 0
        || data.dst_width > 512
        || data.dst_height == 0
        || data.dst_height > 512
    {
        return;
    }
    let src_width = data.src_width as usize;
    let src_height = data.src_height as usize;

    let src_data = vec![0u8; src_width * src_height * 4];

    let store = ImageStore::<u8, 4>::from_slice(&src_data, src_width, src_height).unwrap();
    let mut scaler = Scaler::new(ResamplingFunction::from(data.kernel));
    scaler.set_premultiply_alpha(data.premultiply);
    scaler.set_threading_policy(ThreadingPolicy::Fixed(data.threads as usize % 4 + 1));
    let resized = scaler
        .resize_rgba(
            ImageSize::new(data.dst_width as usize, data.dst_height as usize),
            &store,
        )
        .unwrap();
    assert!(resized.as_bytes().iter().all(|&v| v == 0));
});
