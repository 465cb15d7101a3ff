/*
 * Copyright (c) Radzivon Bartoshyk. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::cancellation::CancellationToken;
use crate::color_group::ColorGroup;
use crate::filter_weights::WeightsBuffer;
use crate::floating_point_horizontal::convolve_horizontal_pass;
use crate::floating_point_vertical::convolve_vertical_pass;
use crate::image_size::ImageSize;
use crate::image_store::ImageStore;
use crate::pixel_component::PixelComponent;
use crate::resample_error::{BufferMismatch, ResampleError, try_vec};
use crate::row_iterator::RowIterator;
use crate::sampler::Kernel;
use crate::threading_policy::ThreadingPolicy;
use crate::{ResamplingFilter, ResamplingFunction};

/// Knobs shared by every resize call
#[derive(Debug, Clone, Default)]
pub struct ScalingOptions {
    pub threading_policy: ThreadingPolicy,
    /// Multiply colour by alpha while convolving, only meaningful for 4 channels
    pub premultiply_alpha: bool,
    pub cancellation: Option<CancellationToken>,
}

impl ScalingOptions {
    pub fn new() -> ScalingOptions {
        ScalingOptions::default()
    }

    pub fn threading_policy(mut self, threading_policy: ThreadingPolicy) -> ScalingOptions {
        self.threading_policy = threading_policy;
        self
    }

    pub fn premultiply_alpha(mut self, premultiply_alpha: bool) -> ScalingOptions {
        self.premultiply_alpha = premultiply_alpha;
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> ScalingOptions {
        self.cancellation = Some(token);
        self
    }
}

#[derive(Debug, Clone)]
/// Represents base scaling structure
pub struct Scaler {
    pub(crate) resampling_filter: ResamplingFilter,
    pub(crate) options: ScalingOptions,
}

pub trait Scaling {
    /// Performs rescaling for RGB, channel order does not matter
    fn resize_rgb(
        &self,
        new_size: ImageSize,
        store: &ImageStore<u8, 3>,
    ) -> Result<ImageStore<'static, u8, 3>, ResampleError>;

    /// Performs rescaling for RGBA, alpha must be the last channel when premultiplying
    fn resize_rgba(
        &self,
        new_size: ImageSize,
        store: &ImageStore<u8, 4>,
    ) -> Result<ImageStore<'static, u8, 4>, ResampleError>;

    fn resize_plane(
        &self,
        new_size: ImageSize,
        store: &ImageStore<u8, 1>,
    ) -> Result<ImageStore<'static, u8, 1>, ResampleError>;
}

pub trait ScalingU16 {
    fn resize_rgb_u16(
        &self,
        new_size: ImageSize,
        store: &ImageStore<u16, 3>,
    ) -> Result<ImageStore<'static, u16, 3>, ResampleError>;

    fn resize_rgba_u16(
        &self,
        new_size: ImageSize,
        store: &ImageStore<u16, 4>,
    ) -> Result<ImageStore<'static, u16, 4>, ResampleError>;

    fn resize_plane_u16(
        &self,
        new_size: ImageSize,
        store: &ImageStore<u16, 1>,
    ) -> Result<ImageStore<'static, u16, 1>, ResampleError>;
}

pub trait ScalingF32 {
    /// Performs rescaling for RGB f32, values are expected in `[0, 1]`
    fn resize_rgb_f32(
        &self,
        new_size: ImageSize,
        store: &ImageStore<f32, 3>,
    ) -> Result<ImageStore<'static, f32, 3>, ResampleError>;

    fn resize_rgba_f32(
        &self,
        new_size: ImageSize,
        store: &ImageStore<f32, 4>,
    ) -> Result<ImageStore<'static, f32, 4>, ResampleError>;

    fn resize_plane_f32(
        &self,
        new_size: ImageSize,
        store: &ImageStore<f32, 1>,
    ) -> Result<ImageStore<'static, f32, 1>, ResampleError>;
}

impl Scaler {
    /// Creates new Scaler instance with corresponding filter
    pub fn new(filter: ResamplingFunction) -> Self {
        Scaler::with_filter(filter.get_resampling_filter())
    }

    /// Scaler over a caller supplied kernel
    pub fn with_filter(filter: ResamplingFilter) -> Self {
        Scaler {
            resampling_filter: filter,
            options: ScalingOptions::default(),
        }
    }

    pub fn set_threading_policy(&mut self, threading_policy: ThreadingPolicy) {
        self.options.threading_policy = threading_policy;
    }

    pub fn set_premultiply_alpha(&mut self, premultiply_alpha: bool) {
        self.options.premultiply_alpha = premultiply_alpha;
    }

    pub fn set_cancellation_token(&mut self, token: Option<CancellationToken>) {
        self.options.cancellation = token;
    }

    pub fn options(&self) -> &ScalingOptions {
        &self.options
    }

    /// Resizes any supported storage with this scaler's kernel and options
    pub fn resize<T: PixelComponent, const N: usize>(
        &self,
        new_size: ImageSize,
        store: &ImageStore<T, N>,
    ) -> Result<ImageStore<'static, T, N>, ResampleError> {
        resize(store, new_size, &self.resampling_filter, &self.options)
    }
}

/// Two pass separable resize of `source` into a freshly allocated image.
///
/// Rows are first reduced to the new width into a buffer of linear vectors,
/// then columns of that buffer are reduced to the new height. Dimensions and
/// kernel are validated before anything is allocated; on failure no output is
/// returned.
pub fn resize<T: PixelComponent, const N: usize, K: Kernel + ?Sized>(
    source: &ImageStore<T, N>,
    new_size: ImageSize,
    kernel: &K,
    options: &ScalingOptions,
) -> Result<ImageStore<'static, T, N>, ResampleError> {
    let source_size = source.get_size();
    if source_size.width == 0 || new_size.width == 0 {
        return Err(ResampleError::InvalidDimension(
            source_size.width,
            new_size.width,
        ));
    }
    if source_size.height == 0 || new_size.height == 0 {
        return Err(ResampleError::InvalidDimension(
            source_size.height,
            new_size.height,
        ));
    }
    let src = source.as_bytes();
    let expected = source_size.width * source_size.height * N;
    if src.len() != expected {
        return Err(ResampleError::BufferMismatch(BufferMismatch {
            expected,
            width: source_size.width,
            height: source_size.height,
            channels: N,
            slice_len: src.len(),
        }));
    }

    let horizontal_weights = WeightsBuffer::new(source_size.width, new_size.width, kernel)?;
    let vertical_weights = WeightsBuffer::new(source_size.height, new_size.height, kernel)?;

    let pool = options.threading_policy.get_pool(new_size);
    let mut iterator = match pool.as_ref() {
        Some(pool) => RowIterator::with_pool(pool),
        None => RowIterator::sequential(),
    };
    if let Some(token) = options.cancellation.as_ref() {
        iterator = iterator.cancellation(token);
    }
    let premultiply_alpha = options.premultiply_alpha && N == 4;

    log::debug!(
        "resizing {}x{} -> {}x{}, {N} channel(s), radius {}, {} worker(s), weights {}+{} packed",
        source_size.width,
        source_size.height,
        new_size.width,
        new_size.height,
        kernel.radius(),
        iterator.max_parallelism(),
        horizontal_weights.packed_len(),
        vertical_weights.packed_len()
    );

    let intermediate_len = new_size
        .width
        .checked_mul(source_size.height)
        .ok_or(ResampleError::OutOfMemory(usize::MAX))?;
    let mut intermediate: Vec<ColorGroup<f32>> = try_vec![ColorGroup::new(); intermediate_len];

    convolve_horizontal_pass::<T, N>(
        src,
        source_size,
        &horizontal_weights,
        &mut intermediate,
        &iterator,
        premultiply_alpha,
    )?;

    let output_len = new_size
        .area()
        .checked_mul(N)
        .ok_or(ResampleError::OutOfMemory(usize::MAX))?;
    let mut output: Vec<T> = try_vec![T::default(); output_len];

    convolve_vertical_pass::<T, N>(
        &intermediate,
        new_size.width,
        &vertical_weights,
        &mut output,
        &iterator,
        premultiply_alpha,
    )?;

    ImageStore::<T, N>::new(output, new_size.width, new_size.height)
}

impl Scaling for Scaler {
    fn resize_rgb(
        &self,
        new_size: ImageSize,
        store: &ImageStore<u8, 3>,
    ) -> Result<ImageStore<'static, u8, 3>, ResampleError> {
        self.resize(new_size, store)
    }

    fn resize_rgba(
        &self,
        new_size: ImageSize,
        store: &ImageStore<u8, 4>,
    ) -> Result<ImageStore<'static, u8, 4>, ResampleError> {
        self.resize(new_size, store)
    }

    fn resize_plane(
        &self,
        new_size: ImageSize,
        store: &ImageStore<u8, 1>,
    ) -> Result<ImageStore<'static, u8, 1>, ResampleError> {
        self.resize(new_size, store)
    }
}

impl ScalingU16 for Scaler {
    fn resize_rgb_u16(
        &self,
        new_size: ImageSize,
        store: &ImageStore<u16, 3>,
    ) -> Result<ImageStore<'static, u16, 3>, ResampleError> {
        self.resize(new_size, store)
    }

    fn resize_rgba_u16(
        &self,
        new_size: ImageSize,
        store: &ImageStore<u16, 4>,
    ) -> Result<ImageStore<'static, u16, 4>, ResampleError> {
        self.resize(new_size, store)
    }

    fn resize_plane_u16(
        &self,
        new_size: ImageSize,
        store: &ImageStore<u16, 1>,
    ) -> Result<ImageStore<'static, u16, 1>, ResampleError> {
        self.resize(new_size, store)
    }
}

impl ScalingF32 for Scaler {
    fn resize_rgb_f32(
        &self,
        new_size: ImageSize,
        store: &ImageStore<f32, 3>,
    ) -> Result<ImageStore<'static, f32, 3>, ResampleError> {
        self.resize(new_size, store)
    }

    fn resize_rgba_f32(
        &self,
        new_size: ImageSize,
        store: &ImageStore<f32, 4>,
    ) -> Result<ImageStore<'static, f32, 4>, ResampleError> {
        self.resize(new_size, store)
    }

    fn resize_plane_f32(
        &self,
        new_size: ImageSize,
        store: &ImageStore<f32, 1>,
    ) -> Result<ImageStore<'static, f32, 1>, ResampleError> {
        self.resize(new_size, store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resample_error::{ResamplePhase, RowFailureKind};

    fn pattern_rgba(width: usize, height: usize) -> Vec<u8> {
        let mut data = vec![0u8; width * height * 4];
        for (i, px) in data.chunks_exact_mut(4).enumerate() {
            let x = i % width;
            let y = i / width;
            px[0] = ((x * 7 + y * 3) % 256) as u8;
            px[1] = ((x * y) % 256) as u8;
            px[2] = ((x ^ y) % 256) as u8;
            px[3] = 255 - ((x + y) % 64) as u8;
        }
        data
    }

    #[test]
    fn box_downscale_averages_blocks() {
        let mut data = Vec::new();
        for _ in 0..4 {
            for v in [0u8, 85, 170, 255] {
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        let store = ImageStore::<u8, 4>::new(data, 4, 4).unwrap();
        let scaler = Scaler::new(ResamplingFunction::Box);
        let resized = scaler.resize_rgba(ImageSize::new(2, 2), &store).unwrap();
        assert_eq!(resized.get_size(), ImageSize::new(2, 2));
        for row in resized.as_bytes().chunks_exact(8) {
            assert_eq!(row, &[43, 43, 43, 255, 213, 213, 213, 255]);
        }
    }

    #[test]
    fn single_pixel_is_replicated() {
        let pixel = [12u8, 200, 77, 255];
        let store = ImageStore::<u8, 4>::from_slice(&pixel, 1, 1).unwrap();
        for function in ResamplingFunction::ALL {
            let resized = Scaler::new(function)
                .resize_rgba(ImageSize::new(4, 4), &store)
                .unwrap();
            for px in resized.as_bytes().chunks_exact(4) {
                assert_eq!(px, &pixel, "{function:?}");
            }
        }
    }

    #[test]
    fn same_size_keeps_pixels() {
        let data = pattern_rgba(7, 5);
        let store = ImageStore::<u8, 4>::from_slice(&data, 7, 5).unwrap();
        for function in ResamplingFunction::ALL {
            let resized = Scaler::new(function)
                .resize_rgba(ImageSize::new(7, 5), &store)
                .unwrap();
            assert_eq!(resized.as_bytes(), &data[..], "{function:?}");
        }
    }

    #[test]
    fn constant_colour_survives_downscale() {
        let data = [90u8, 30, 200, 255].repeat(37 * 23);
        let store = ImageStore::<u8, 4>::new(data, 37, 23).unwrap();
        for function in ResamplingFunction::ALL {
            let resized = Scaler::new(function)
                .resize_rgba(ImageSize::new(11, 7), &store)
                .unwrap();
            for px in resized.as_bytes().chunks_exact(4) {
                for (&c, e) in px.iter().zip([90i32, 30, 200, 255]) {
                    assert!((c as i32 - e).abs() <= 1, "{function:?} {px:?}");
                }
            }
        }
    }

    #[test]
    fn worker_count_does_not_change_output() {
        let data = pattern_rgba(256, 256);
        let store = ImageStore::<u8, 4>::from_slice(&data, 256, 256).unwrap();
        let mut scaler = Scaler::new(ResamplingFunction::Lanczos3);
        let new_size = ImageSize::new(200, 300);
        let single = scaler.resize_rgba(new_size, &store).unwrap();
        scaler.set_threading_policy(ThreadingPolicy::Fixed(4));
        let parallel = scaler.resize_rgba(new_size, &store).unwrap();
        assert_eq!(single.as_bytes(), parallel.as_bytes());
    }

    #[test]
    fn zero_target_is_rejected() {
        let data = pattern_rgba(3, 3);
        let store = ImageStore::<u8, 4>::from_slice(&data, 3, 3).unwrap();
        let scaler = Scaler::new(ResamplingFunction::Bilinear);
        assert_eq!(
            scaler.resize_rgba(ImageSize::new(0, 4), &store).unwrap_err(),
            ResampleError::InvalidDimension(3, 0)
        );
        assert_eq!(
            scaler.resize_rgba(ImageSize::new(4, 0), &store).unwrap_err(),
            ResampleError::InvalidDimension(3, 0)
        );
    }

    #[test]
    fn nan_source_fails_horizontal_pass() {
        let mut data = vec![0.5f32; 4 * 4 * 4];
        data[4 * 4 + 2] = f32::NAN;
        let store = ImageStore::<f32, 4>::new(data, 4, 4).unwrap();
        let mut scaler = Scaler::new(ResamplingFunction::CatmullRom);
        scaler.set_threading_policy(ThreadingPolicy::Fixed(2));
        match scaler.resize_rgba_f32(ImageSize::new(2, 2), &store) {
            Err(ResampleError::AggregateRowFailure(aggregate)) => {
                assert_eq!(aggregate.phase, ResamplePhase::Horizontal);
                assert_eq!(aggregate.failures[0].row, 1);
                assert!(matches!(
                    aggregate.failures[0].kind,
                    RowFailureKind::NonFiniteSample { .. }
                ));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn premultiplied_alpha_stops_colour_bleed() {
        let data = [255u8, 0, 0, 255, 0, 255, 0, 0];
        let store = ImageStore::<u8, 4>::from_slice(&data, 2, 1).unwrap();
        let mut scaler = Scaler::new(ResamplingFunction::Box);
        let straight = scaler.resize_rgba(ImageSize::new(1, 1), &store).unwrap();
        assert!(straight.as_bytes()[1] > 100);
        scaler.set_premultiply_alpha(true);
        let premultiplied = scaler.resize_rgba(ImageSize::new(1, 1), &store).unwrap();
        let px = premultiplied.as_bytes();
        assert_eq!(px[0], 255);
        assert_eq!(px[1], 0);
        assert!((127..=128).contains(&px[3]));
    }

    #[test]
    fn cancelled_resize_returns_nothing() {
        let data = pattern_rgba(16, 16);
        let store = ImageStore::<u8, 4>::from_slice(&data, 16, 16).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let options = ScalingOptions::new().cancellation(token);
        assert_eq!(
            resize(
                &store,
                ImageSize::new(8, 8),
                &ResamplingFunction::Hann,
                &options
            )
            .unwrap_err(),
            ResampleError::Cancelled(ResamplePhase::Horizontal)
        );
    }

    #[test]
    fn custom_kernel_and_u16_planes() {
        fn triangle(x: f32) -> f32 {
            (1. - x.abs()).max(0.)
        }
        let data = (0..64u16).map(|v| v * 1000).collect::<Vec<_>>();
        let store = ImageStore::<u16, 1>::from_slice(&data, 8, 8).unwrap();
        let scaler = Scaler::with_filter(ResamplingFilter::new(triangle, 1.));
        let resized = scaler.resize_plane_u16(ImageSize::new(3, 5), &store).unwrap();
        assert_eq!(resized.as_bytes().len(), 15);
        let same = scaler.resize_plane_u16(ImageSize::new(8, 8), &store).unwrap();
        assert_eq!(same.into_vec(), data);
    }

    #[test]
    fn mismatched_store_is_rejected() {
        let data = [1f32; 6];
        let mut store = ImageStore::<f32, 3>::from_slice(&data, 2, 1).unwrap();
        store.width = 3;
        let scaler = Scaler::new(ResamplingFunction::Bilinear);
        assert!(matches!(
            scaler.resize_rgb_f32(ImageSize::new(1, 1), &store),
            Err(ResampleError::BufferMismatch(_))
        ));
    }
}
