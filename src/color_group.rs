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
use crate::mlaf::mlaf;
use num_traits::{Float, MulAdd};
use std::ops::{Add, Mul};

/// Four lane linear colour vector every row is widened to before convolution
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct ColorGroup<J: Copy> {
    pub(crate) r: J,
    pub(crate) g: J,
    pub(crate) b: J,
    pub(crate) a: J,
}

impl<J> ColorGroup<J>
where
    J: Copy + Default,
{
    #[inline(always)]
    pub(crate) fn new() -> ColorGroup<J> {
        ColorGroup {
            r: J::default(),
            g: J::default(),
            b: J::default(),
            a: J::default(),
        }
    }

    #[inline(always)]
    pub(crate) fn from_components(r: J, g: J, b: J, a: J) -> ColorGroup<J> {
        ColorGroup { r, g, b, a }
    }

    #[cfg(test)]
    #[inline(always)]
    pub(crate) fn dup(v: J) -> ColorGroup<J> {
        ColorGroup {
            r: v,
            g: v,
            b: v,
            a: v,
        }
    }

    /// Reads the first `COMPS` lanes from an interleaved pixel, the rest stay zeroed
    #[inline(always)]
    pub(crate) fn from_slice<const COMPS: usize>(src: &[J]) -> ColorGroup<J> {
        let mut group = ColorGroup::new();
        if COMPS > 0 {
            group.r = src[0];
        }
        if COMPS > 1 {
            group.g = src[1];
        }
        if COMPS > 2 {
            group.b = src[2];
        }
        if COMPS > 3 {
            group.a = src[3];
        }
        group
    }

    #[inline(always)]
    pub(crate) fn to_array(self) -> [J; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl<J> ColorGroup<J>
where
    J: Copy + Default + Mul<J, Output = J> + Add<J, Output = J> + MulAdd<J, Output = J>,
{
    /// `self + rhs * weight`, lane by lane
    #[inline(always)]
    pub(crate) fn mul_add(self, rhs: ColorGroup<J>, weight: J) -> ColorGroup<J> {
        ColorGroup::from_components(
            mlaf(self.r, rhs.r, weight),
            mlaf(self.g, rhs.g, weight),
            mlaf(self.b, rhs.b, weight),
            mlaf(self.a, rhs.a, weight),
        )
    }
}

impl<J: Copy + Float + Default> ColorGroup<J> {
    #[inline(always)]
    pub(crate) fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

impl<J> Mul<J> for ColorGroup<J>
where
    J: Copy + Mul<Output = J> + Default + 'static,
{
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: J) -> Self::Output {
        ColorGroup::from_components(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_load_zeroes_missing_lanes() {
        let group = ColorGroup::<f32>::from_slice::<2>(&[0.25, 0.5]);
        assert_eq!(group.to_array(), [0.25, 0.5, 0., 0.]);
    }

    #[test]
    fn mul_add_accumulates_every_lane() {
        let acc = ColorGroup::dup(1f32);
        let px = ColorGroup::from_components(1f32, 2., 3., 4.);
        let r = acc.mul_add(px, 0.5);
        assert_eq!(r.to_array(), [1.5, 2., 2.5, 3.]);
        assert!(r.is_finite());
        assert!(!ColorGroup::from_components(f32::NAN, 0., 0., 0.).is_finite());
    }
}
