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
use crate::filter_weights::{WeightsBuffer, WeightsWindow};
use crate::image_size::Region;
use crate::pixel_component::{PixelComponent, vectors_to_row};
use crate::resample_error::{ResampleError, ResamplePhase, RowFailureKind};
use crate::row_iterator::RowIterator;

/// Accumulates the intermediate rows a vertical window covers into `dst`.
///
/// Rows are added in window order, so the sum for a column never depends on
/// how output rows were partitioned.
#[inline]
pub(crate) fn convolve_column_handler_floating_point(
    window: &WeightsWindow,
    src: &[ColorGroup<f32>],
    src_stride: usize,
    dst: &mut [ColorGroup<f32>],
) -> Result<(), RowFailureKind> {
    dst.fill(ColorGroup::new());
    for (i, &weight) in window.weights.iter().enumerate() {
        let y = window.left + i;
        let src_row = src.get(y * src_stride..(y + 1) * src_stride).ok_or(
            RowFailureKind::WindowOutOfBounds {
                left: window.left,
                size: window.len(),
                len: src.len() / src_stride.max(1),
            },
        )?;
        for (acc, &px) in dst.iter_mut().zip(src_row.iter()) {
            *acc = acc.mul_add(px, weight);
        }
    }
    if let Some(column) = dst.iter().position(|v| !v.is_finite()) {
        return Err(RowFailureKind::NonFiniteSample { column });
    }
    Ok(())
}

/// Reduces the intermediate columns to the destination height and narrows
/// each row back into `dst`.
pub(crate) fn convolve_vertical_pass<T: PixelComponent, const CHANNELS: usize>(
    intermediate: &[ColorGroup<f32>],
    width: usize,
    weights: &WeightsBuffer,
    dst: &mut [T],
    iterator: &RowIterator,
    premultiplied_alpha: bool,
) -> Result<(), ResampleError> {
    let dst_height = weights.destination_size();
    let region = Region::new(0, 0, width, dst_height);

    iterator
        .iterate(
            region,
            dst,
            width * CHANNELS,
            CHANNELS,
            width,
            |y, dst_row: &mut [T], scratch: &mut [ColorGroup<f32>]| {
                let window = weights.window(y).ok_or(RowFailureKind::WindowOutOfBounds {
                    left: y,
                    size: 1,
                    len: dst_height,
                })?;
                convolve_column_handler_floating_point(&window, intermediate, width, scratch)?;
                vectors_to_row::<T, CHANNELS>(scratch, dst_row, premultiplied_alpha);
                Ok(())
            },
        )
        .map_err(|err| err.into_resample_error(ResamplePhase::Vertical))?;

    log::trace!("vertical pass -> {width}x{dst_height} done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResamplingFunction;

    #[test]
    fn column_sum_uses_window_rows() {
        let src = [0f32, 1., 0.5, 0.25, 1., 0.75]
            .iter()
            .map(|&v| ColorGroup::dup(v))
            .collect::<Vec<_>>();
        let weights = [0.5f32, 0.5];
        let window = WeightsWindow {
            left: 1,
            weights: &weights,
        };
        let mut dst = vec![ColorGroup::dup(9f32); 2];
        convolve_column_handler_floating_point(&window, &src, 2, &mut dst).unwrap();
        assert_eq!(dst[0], ColorGroup::dup(0.75));
        assert_eq!(dst[1], ColorGroup::dup(0.5));
    }

    #[test]
    fn window_past_the_buffer_fails() {
        let src = vec![ColorGroup::dup(1f32); 4];
        let weights = [1f32];
        let window = WeightsWindow {
            left: 4,
            weights: &weights,
        };
        let mut dst = vec![ColorGroup::new(); 1];
        assert_eq!(
            convolve_column_handler_floating_point(&window, &src, 1, &mut dst),
            Err(RowFailureKind::WindowOutOfBounds {
                left: 4,
                size: 1,
                len: 4
            })
        );
    }

    #[test]
    fn vertical_pass_writes_rows() {
        let weights = WeightsBuffer::new(2, 1, &ResamplingFunction::Box).unwrap();
        let intermediate = vec![
            ColorGroup::from_components(0.2f32, 0.4, 0.6, 1.),
            ColorGroup::from_components(0.6f32, 0.8, 1., 1.),
        ];
        let mut dst = [0u8; 4];
        convolve_vertical_pass::<u8, 4>(
            &intermediate,
            1,
            &weights,
            &mut dst,
            &RowIterator::sequential(),
            false,
        )
        .unwrap();
        assert_eq!(dst, [102, 153, 204, 255]);
    }
}
