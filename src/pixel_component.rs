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
use crate::alpha_handle::{premultiply_group, unpremultiply_group};
use crate::color_group::ColorGroup;
use std::fmt::Debug;

/// Rounds half away from zero and clamps into `[0, max]`
#[inline(always)]
#[allow(clippy::manual_clamp)]
pub(crate) fn round_saturate(v: f32, max: f32) -> f32 {
    v.round().min(max).max(0.)
}

/// Storage type of a single channel.
///
/// Conversion into the unit range is lossless for every value the storage can
/// represent, write-back clamps into `[0, 1]` and rounds integer storage half
/// away from zero.
pub trait PixelComponent: Copy + Default + Debug + Send + Sync + 'static {
    fn to_unit(self) -> f32;
    fn from_unit(v: f32) -> Self;
}

impl PixelComponent for u8 {
    #[inline(always)]
    fn to_unit(self) -> f32 {
        self as f32 * (1. / 255.)
    }

    #[inline(always)]
    fn from_unit(v: f32) -> u8 {
        round_saturate(v * 255., 255.) as u8
    }
}

impl PixelComponent for u16 {
    #[inline(always)]
    fn to_unit(self) -> f32 {
        self as f32 * (1. / 65535.)
    }

    #[inline(always)]
    fn from_unit(v: f32) -> u16 {
        round_saturate(v * 65535., 65535.) as u16
    }
}

impl PixelComponent for f32 {
    #[inline(always)]
    fn to_unit(self) -> f32 {
        self
    }

    #[inline(always)]
    #[allow(clippy::manual_clamp)]
    fn from_unit(v: f32) -> f32 {
        v.min(1.).max(0.)
    }
}

/// Widens an interleaved row of `CHANNELS` components into linear vectors
#[inline]
pub(crate) fn row_to_vectors<T: PixelComponent, const CHANNELS: usize>(
    src: &[T],
    dst: &mut [ColorGroup<f32>],
    premultiply_alpha: bool,
) {
    for (px, group) in src.chunks_exact(CHANNELS).zip(dst.iter_mut()) {
        let mut lanes = [0f32; 4];
        for (lane, &c) in lanes.iter_mut().zip(px.iter()) {
            *lane = c.to_unit();
        }
        let loaded = ColorGroup::from_slice::<CHANNELS>(&lanes);
        *group = if premultiply_alpha && CHANNELS == 4 {
            premultiply_group(loaded)
        } else {
            loaded
        };
    }
}

/// Narrows linear vectors back into an interleaved row, clamping every channel
#[inline]
pub(crate) fn vectors_to_row<T: PixelComponent, const CHANNELS: usize>(
    src: &[ColorGroup<f32>],
    dst: &mut [T],
    premultiplied_alpha: bool,
) {
    for (&group, px) in src.iter().zip(dst.chunks_exact_mut(CHANNELS)) {
        let group = if premultiplied_alpha && CHANNELS == 4 {
            unpremultiply_group(group)
        } else {
            group
        };
        for (c, lane) in px.iter_mut().zip(group.to_array()) {
            *c = T::from_unit(lane);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u8_round_trip_is_lossless() {
        for v in 0..=255u8 {
            assert_eq!(u8::from_unit(v.to_unit()), v);
        }
    }

    #[test]
    fn u16_round_trip_is_lossless() {
        for v in (0..=65535u16).step_by(97) {
            assert_eq!(u16::from_unit(v.to_unit()), v);
        }
        assert_eq!(u16::from_unit(65535u16.to_unit()), 65535);
    }

    #[test]
    fn write_back_clamps() {
        assert_eq!(u8::from_unit(2.9), 255);
        assert_eq!(u8::from_unit(-0.4), 0);
        assert_eq!(u16::from_unit(1.5), 65535);
        assert_eq!(f32::from_unit(1.25), 1.);
        assert_eq!(f32::from_unit(-0.25), 0.);
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(round_saturate(0.5, 255.), 1.);
        assert_eq!(round_saturate(2.5, 255.), 3.);
        assert_eq!(round_saturate(42.5, 255.), 43.);
        assert_eq!(round_saturate(212.5, 255.), 213.);
        assert_eq!(round_saturate(42.49, 255.), 42.);
        assert_eq!(round_saturate(32767.5, 65535.), 32768.);
        assert_eq!(round_saturate(255.5, 255.), 255.);
        assert_eq!(round_saturate(-0.5, 255.), 0.);
    }

    #[test]
    fn rows_convert_with_three_channels() {
        let src = [0u8, 51, 255, 102, 204, 0];
        let mut vectors = vec![ColorGroup::<f32>::new(); 2];
        row_to_vectors::<u8, 3>(&src, &mut vectors, true);
        assert_eq!(vectors[0].a, 0.);
        let mut dst = [0u8; 6];
        vectors_to_row::<u8, 3>(&vectors, &mut dst, true);
        assert_eq!(dst, src);
    }
}
