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
use crate::color_group::ColorGroup;
use crate::filter_weights::WeightsBuffer;
use crate::image_size::{ImageSize, Region};
use crate::pixel_component::{PixelComponent, row_to_vectors};
use crate::resample_error::{ResampleError, ResamplePhase, RowFailureKind};
use crate::row_iterator::RowIterator;

/// Convolves one widened source row into `dst`, one window per destination column
#[inline]
pub(crate) fn convolve_row_handler_floating_point(
    weights: &WeightsBuffer,
    src: &[ColorGroup<f32>],
    dst: &mut [ColorGroup<f32>],
) -> Result<(), RowFailureKind> {
    for (x, (window, dst)) in weights.windows().zip(dst.iter_mut()).enumerate() {
        let sums = window.compute_weighted_row_sum(src)?;
        if !sums.is_finite() {
            return Err(RowFailureKind::NonFiniteSample { column: x });
        }
        *dst = sums;
    }
    Ok(())
}

/// Reduces every source row to the destination width.
///
/// `intermediate` is `weights.destination_size() x source_size.height` vectors,
/// each worker widens its rows into a scratch of `source_size.width` vectors.
pub(crate) fn convolve_horizontal_pass<T: PixelComponent, const CHANNELS: usize>(
    src: &[T],
    source_size: ImageSize,
    weights: &WeightsBuffer,
    intermediate: &mut [ColorGroup<f32>],
    iterator: &RowIterator,
    premultiply_alpha: bool,
) -> Result<(), ResampleError> {
    let dst_width = weights.destination_size();
    let src_stride = source_size.width * CHANNELS;
    let region = Region::new(0, 0, dst_width, source_size.height);

    iterator
        .iterate(
            region,
            intermediate,
            dst_width,
            1,
            source_size.width,
            |y, dst_row: &mut [ColorGroup<f32>], scratch: &mut [ColorGroup<f32>]| {
                let src_row = src.get(y * src_stride..(y + 1) * src_stride).ok_or(
                    RowFailureKind::WindowOutOfBounds {
                        left: y * src_stride,
                        size: src_stride,
                        len: src.len(),
                    },
                )?;
                row_to_vectors::<T, CHANNELS>(src_row, scratch, premultiply_alpha);
                convolve_row_handler_floating_point(weights, scratch, dst_row)
            },
        )
        .map_err(|err| err.into_resample_error(ResamplePhase::Horizontal))?;

    log::trace!(
        "horizontal pass {}x{} -> {dst_width}x{} done",
        source_size.width,
        source_size.height,
        source_size.height
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResamplingFunction;

    #[test]
    fn box_halves_a_row() {
        let weights = WeightsBuffer::new(4, 2, &ResamplingFunction::Box).unwrap();
        let src = [0f32, 0.25, 0.5, 1.]
            .iter()
            .map(|&v| ColorGroup::dup(v))
            .collect::<Vec<_>>();
        let mut dst = vec![ColorGroup::new(); 2];
        convolve_row_handler_floating_point(&weights, &src, &mut dst).unwrap();
        assert_eq!(dst[0], ColorGroup::dup(0.125));
        assert_eq!(dst[1], ColorGroup::dup(0.75));
    }

    #[test]
    fn nan_source_is_reported_with_its_row() {
        let weights = WeightsBuffer::new(3, 2, &ResamplingFunction::Bilinear).unwrap();
        let mut src = vec![0.5f32; 3 * 4];
        src[3 * 2 + 1] = f32::NAN;
        let mut intermediate = vec![ColorGroup::new(); 2 * 4];
        let result = convolve_horizontal_pass::<f32, 1>(
            &src,
            ImageSize::new(3, 4),
            &weights,
            &mut intermediate,
            &RowIterator::sequential(),
            false,
        );
        match result {
            Err(ResampleError::AggregateRowFailure(aggregate)) => {
                assert_eq!(aggregate.phase, ResamplePhase::Horizontal);
                assert_eq!(aggregate.failures.len(), 1);
                assert_eq!(aggregate.failures[0].row, 2);
                assert!(matches!(
                    aggregate.failures[0].kind,
                    RowFailureKind::NonFiniteSample { .. }
                ));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
