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
use crate::filter_weights::{FilterBounds, WeightsBuffer};
use crate::resample_error::{KernelFault, ResampleError, try_vec};
use crate::sampler::Kernel;

/// Edge weights at or below this magnitude are dropped from a window
const WEIGHT_EPSILON: f64 = 1e-9;

/// Builds the packed windows for one axis.
///
/// Windows are clipped to the source extent and renormalized, so edges never
/// read outside `[0, in_size)`. An axis that keeps its size maps every sample
/// onto itself.
pub(crate) fn generate_weights<K: Kernel + ?Sized>(
    kernel: &K,
    in_size: usize,
    out_size: usize,
) -> Result<WeightsBuffer, ResampleError> {
    if in_size == 0 || out_size == 0 {
        return Err(ResampleError::InvalidDimension(in_size, out_size));
    }
    let radius = kernel.radius();
    if !radius.is_finite() || radius <= 0. {
        return Err(ResampleError::InvalidKernel(KernelFault::NonPositiveRadius(
            radius,
        )));
    }

    if in_size == out_size {
        return identity_weights(in_size);
    }

    let scale = in_size as f64 / out_size as f64;
    let filter_scale_cutoff = scale.max(1.);
    let effective_radius = radius as f64 * filter_scale_cutoff;
    let max_window = ((effective_radius * 2.).ceil() as usize + 1).min(in_size);

    let capacity = max_window
        .checked_mul(out_size)
        .ok_or(ResampleError::OutOfMemory(usize::MAX))?;
    let mut weights: Vec<f32> = Vec::new();
    weights
        .try_reserve_exact(capacity)
        .map_err(|_| ResampleError::OutOfMemory(capacity))?;
    let mut bounds: Vec<FilterBounds> = try_vec![FilterBounds::new(0, 0); out_size];
    let mut offsets: Vec<usize> = try_vec![0usize; out_size];
    let mut local_filters: Vec<f64> = try_vec![0f64; max_window + 1];
    let mut fallbacks = 0usize;

    for (i, (bound, offset)) in bounds.iter_mut().zip(offsets.iter_mut()).enumerate() {
        let center = (i as f64 + 0.5) * scale - 0.5;
        let start = (center - effective_radius).floor().max(0.) as usize;
        let end = (center + effective_radius)
            .ceil()
            .min(in_size as f64)
            .max(0.) as usize;
        let end = end.min(start + local_filters.len());

        let mut taken = 0usize;
        for (k, filter) in (start..end).zip(local_filters.iter_mut()) {
            let dx = ((k as f64 - center) / filter_scale_cutoff) as f32;
            let weight = kernel.weight(dx);
            if !weight.is_finite() {
                return Err(ResampleError::InvalidKernel(KernelFault::NonFiniteWeight(
                    dx,
                )));
            }
            *filter = weight as f64;
            taken += 1;
        }

        let support = &local_filters[..taken];
        let first = support.iter().position(|w| w.abs() > WEIGHT_EPSILON);
        let last = support.iter().rposition(|w| w.abs() > WEIGHT_EPSILON);

        let trimmed = match (first, last) {
            (Some(first), Some(last)) => {
                let slice = &support[first..=last];
                let weights_sum: f64 = slice.iter().sum();
                if weights_sum.abs() > WEIGHT_EPSILON {
                    Some((start + first, slice, weights_sum))
                } else {
                    None
                }
            }
            _ => None,
        };

        *offset = weights.len();
        match trimmed {
            Some((window_start, slice, weights_sum)) => {
                let recpeq = 1. / weights_sum;
                weights.extend(slice.iter().map(|&w| (w * recpeq) as f32));
                *bound = FilterBounds::new(window_start, slice.len());
            }
            None => {
                let nearest = center.round().max(0.).min((in_size - 1) as f64) as usize;
                weights.push(1.);
                *bound = FilterBounds::new(nearest, 1);
                fallbacks += 1;
            }
        }
    }

    if fallbacks > 0 {
        log::debug!(
            "{fallbacks} of {out_size} windows had no kernel support and fell back to the nearest sample"
        );
    }

    weights.shrink_to_fit();
    log::trace!(
        "built weights {in_size} -> {out_size}: {} packed of {} worst case",
        weights.len(),
        capacity
    );

    Ok(WeightsBuffer::from_packed(in_size, weights, bounds, offsets))
}

fn identity_weights(size: usize) -> Result<WeightsBuffer, ResampleError> {
    let weights: Vec<f32> = try_vec![1f32; size];
    let mut bounds: Vec<FilterBounds> = try_vec![FilterBounds::new(0, 1); size];
    let mut offsets: Vec<usize> = try_vec![0usize; size];
    for (i, (bound, offset)) in bounds.iter_mut().zip(offsets.iter_mut()).enumerate() {
        *bound = FilterBounds::new(i, 1);
        *offset = i;
    }
    Ok(WeightsBuffer::from_packed(size, weights, bounds, offsets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ResamplingFilter, ResamplingFunction};

    fn check_invariants(buffer: &WeightsBuffer, in_size: usize, out_size: usize) {
        assert_eq!(buffer.destination_size(), out_size);
        assert_eq!(buffer.source_size(), in_size);
        for window in buffer.windows() {
            assert!(!window.is_empty());
            assert!(window.right() <= in_size);
            assert!((window.sum() - 1.).abs() < 1e-5, "sum {}", window.sum());
        }
    }

    #[test]
    fn windows_are_normalized_and_clipped() {
        let sizes = [(1, 7), (7, 1), (2, 3), (13, 5), (100, 33), (33, 100), (640, 17)];
        for function in ResamplingFunction::ALL {
            for &(in_size, out_size) in sizes.iter() {
                let buffer = generate_weights(&function, in_size, out_size).unwrap();
                check_invariants(&buffer, in_size, out_size);
            }
        }
    }

    #[test]
    fn same_size_is_identity() {
        for function in ResamplingFunction::ALL {
            let buffer = generate_weights(&function, 9, 9).unwrap();
            for (d, window) in buffer.windows().enumerate() {
                assert_eq!(window.left, d);
                assert_eq!(window.weights, &[1f32]);
            }
        }
    }

    #[test]
    fn single_source_sample_gives_unit_windows() {
        for function in ResamplingFunction::ALL {
            let buffer = generate_weights(&function, 1, 4).unwrap();
            for window in buffer.windows() {
                assert_eq!(window.left, 0);
                assert_eq!(window.weights, &[1f32]);
            }
        }
    }

    #[test]
    fn box_downscale_averages_pairs() {
        let buffer = generate_weights(&ResamplingFunction::Box, 4, 2).unwrap();
        let first = buffer.window(0).unwrap();
        assert_eq!(first.left, 0);
        assert_eq!(first.weights, &[0.5f32, 0.5]);
        let second = buffer.window(1).unwrap();
        assert_eq!(second.left, 2);
        assert_eq!(second.weights, &[0.5f32, 0.5]);
    }

    #[test]
    fn downscale_widens_support() {
        let buffer = generate_weights(&ResamplingFunction::Bilinear, 400, 100).unwrap();
        let middle = buffer.window(50).unwrap();
        assert!(middle.len() >= 7);
        let upscale = generate_weights(&ResamplingFunction::Bilinear, 100, 400).unwrap();
        assert!(upscale.max_window_len() <= 2);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            generate_weights(&ResamplingFunction::Bilinear, 0, 4).unwrap_err(),
            ResampleError::InvalidDimension(0, 4)
        );
        assert_eq!(
            generate_weights(&ResamplingFunction::Bilinear, 4, 0).unwrap_err(),
            ResampleError::InvalidDimension(4, 0)
        );
    }

    #[test]
    fn oversized_axis_reports_out_of_memory() {
        assert_eq!(
            generate_weights(&ResamplingFunction::Lanczos3, usize::MAX / 2, 4).unwrap_err(),
            ResampleError::OutOfMemory(usize::MAX)
        );
    }

    #[test]
    fn bad_kernels_are_rejected() {
        fn flat(_: f32) -> f32 {
            1.
        }
        fn broken(_: f32) -> f32 {
            f32::NAN
        }
        for radius in [0f32, -1., f32::NAN, f32::INFINITY] {
            let filter = ResamplingFilter::new(flat, radius);
            assert!(matches!(
                generate_weights(&filter, 8, 4),
                Err(ResampleError::InvalidKernel(KernelFault::NonPositiveRadius(_)))
            ));
        }
        let filter = ResamplingFilter::new(broken, 1.);
        assert!(matches!(
            generate_weights(&filter, 8, 4),
            Err(ResampleError::InvalidKernel(KernelFault::NonFiniteWeight(_)))
        ));
    }

    #[test]
    fn silent_kernel_falls_back_to_nearest() {
        fn silent(_: f32) -> f32 {
            0.
        }
        let filter = ResamplingFilter::new(silent, 1.);
        let buffer = generate_weights(&filter, 10, 4).unwrap();
        check_invariants(&buffer, 10, 4);
        for window in buffer.windows() {
            assert_eq!(window.len(), 1);
        }
        assert_eq!(buffer.window(0).unwrap().left, 1);
        assert_eq!(buffer.window(3).unwrap().left, 8);
    }
}
