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
use crate::math::weights::generate_weights;
use crate::resample_error::{ResampleError, RowFailureKind};
use crate::sampler::Kernel;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub(crate) struct FilterBounds {
    pub start: usize,
    pub size: usize,
}

impl FilterBounds {
    pub(crate) fn new(start: usize, size: usize) -> FilterBounds {
        FilterBounds { start, size }
    }
}

/// Weights contributing to one destination sample along one axis
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WeightsWindow<'a> {
    /// First source sample the window covers
    pub left: usize,
    pub weights: &'a [f32],
}

impl WeightsWindow<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// One past the last source sample the window covers
    #[inline]
    pub fn right(&self) -> usize {
        self.left + self.weights.len()
    }

    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// `sum(w[i] * row[left + i])` over the window
    #[inline]
    pub(crate) fn compute_weighted_row_sum(
        &self,
        row: &[ColorGroup<f32>],
    ) -> Result<ColorGroup<f32>, RowFailureKind> {
        let src = row
            .get(self.left..self.right())
            .ok_or(RowFailureKind::WindowOutOfBounds {
                left: self.left,
                size: self.len(),
                len: row.len(),
            })?;
        let mut sums = ColorGroup::new();
        for (&weight, &px) in self.weights.iter().zip(src.iter()) {
            sums = sums.mul_add(px, weight);
        }
        Ok(sums)
    }
}

/// Every window of one axis packed into a single allocation.
///
/// Windows keep only their clipped support, `offsets[i]` locates window `i`
/// inside `weights`.
#[derive(Debug, Clone)]
pub struct WeightsBuffer {
    weights: Vec<f32>,
    bounds: Vec<FilterBounds>,
    offsets: Vec<usize>,
    source_size: usize,
    max_window: usize,
}

impl WeightsBuffer {
    /// Precomputes windows mapping `source_size` samples onto `destination_size`
    pub fn new<K: Kernel + ?Sized>(
        source_size: usize,
        destination_size: usize,
        kernel: &K,
    ) -> Result<WeightsBuffer, ResampleError> {
        generate_weights(kernel, source_size, destination_size)
    }

    pub(crate) fn from_packed(
        source_size: usize,
        weights: Vec<f32>,
        bounds: Vec<FilterBounds>,
        offsets: Vec<usize>,
    ) -> WeightsBuffer {
        debug_assert_eq!(bounds.len(), offsets.len());
        debug_assert!(
            bounds
                .iter()
                .zip(offsets.iter())
                .all(|(b, &o)| b.size > 0
                    && b.start + b.size <= source_size
                    && o + b.size <= weights.len())
        );
        let max_window = bounds.iter().map(|b| b.size).max().unwrap_or(0);
        WeightsBuffer {
            weights,
            bounds,
            offsets,
            source_size,
            max_window,
        }
    }

    #[inline]
    pub fn source_size(&self) -> usize {
        self.source_size
    }

    #[inline]
    pub fn destination_size(&self) -> usize {
        self.bounds.len()
    }

    /// Widest window support along this axis
    #[inline]
    pub fn max_window_len(&self) -> usize {
        self.max_window
    }

    /// Number of weights actually stored
    #[inline]
    pub fn packed_len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn window(&self, index: usize) -> Option<WeightsWindow<'_>> {
        let bounds = self.bounds.get(index)?;
        let offset = *self.offsets.get(index)?;
        let weights = self.weights.get(offset..offset + bounds.size)?;
        Some(WeightsWindow {
            left: bounds.start,
            weights,
        })
    }

    pub fn windows(&self) -> impl ExactSizeIterator<Item = WeightsWindow<'_>> + '_ {
        self.bounds
            .iter()
            .zip(self.offsets.iter())
            .map(|(bounds, &offset)| WeightsWindow {
                left: bounds.start,
                weights: &self.weights[offset..offset + bounds.size],
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResamplingFunction;

    #[test]
    fn window_lookup_matches_iteration() {
        let buffer = WeightsBuffer::new(37, 11, &ResamplingFunction::Lanczos3).unwrap();
        assert_eq!(buffer.destination_size(), 11);
        assert_eq!(buffer.windows().len(), 11);
        for (i, window) in buffer.windows().enumerate() {
            assert_eq!(buffer.window(i), Some(window));
        }
        assert!(buffer.window(11).is_none());
        assert!(buffer.packed_len() <= 11 * buffer.max_window_len());
    }

    #[test]
    fn weighted_row_sum_rejects_short_rows() {
        let weights = [0.5f32, 0.5];
        let window = WeightsWindow {
            left: 3,
            weights: &weights,
        };
        let row = vec![ColorGroup::dup(1f32); 4];
        assert_eq!(
            window.compute_weighted_row_sum(&row),
            Err(RowFailureKind::WindowOutOfBounds {
                left: 3,
                size: 2,
                len: 4
            })
        );
        let row = vec![ColorGroup::dup(1f32); 5];
        assert_eq!(
            window.compute_weighted_row_sum(&row),
            Ok(ColorGroup::dup(1f32))
        );
    }
}
