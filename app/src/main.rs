use std::time::Instant;

use image::{ImageReader, RgbaImage};
use pic_resample::{
    ImageSize, ImageStore, ResamplingFunction, Scaler, Scaling, ThreadingPolicy,
};

fn main() {
    let mut args = std::env::args().skip(1);
    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        eprintln!("usage: app <input> <output> [width] [height] [kernel index]");
        std::process::exit(2);
    };
    let img = ImageReader::open(&input)
        .unwrap()
        .decode()
        .unwrap()
        .to_rgba8();
    let (width, height) = img.dimensions();
    let new_width = args
        .next()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(width as usize / 2);
    let new_height = args
        .next()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(height as usize / 2);
    let function = args
        .next()
        .and_then(|v| v.parse::<u8>().ok())
        .map(ResamplingFunction::from)
        .unwrap_or(ResamplingFunction::Lanczos3);

    let mut scaler = Scaler::new(function);
    scaler.set_threading_policy(ThreadingPolicy::Adaptive);
    scaler.set_premultiply_alpha(true);

    let store =
        ImageStore::<u8, 4>::from_slice(img.as_raw(), width as usize, height as usize).unwrap();

    let start_time = Instant::now();
    let resized = scaler
        .resize_rgba(ImageSize::new(new_width, new_height), &store)
        .unwrap();
    println!(
        "{function:?} {width}x{height} -> {new_width}x{new_height}: {:.2?}",
        start_time.elapsed()
    );

    let dst = RgbaImage::from_raw(
        new_width as u32,
        new_height as u32,
        resized.into_vec(),
    )
    .unwrap();
    dst.save(output).unwrap();
}
