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

/// Scales colour lanes by alpha so transparent pixels carry no colour weight
#[inline(always)]
pub(crate) fn premultiply_group(px: ColorGroup<f32>) -> ColorGroup<f32> {
    ColorGroup::from_components(px.r * px.a, px.g * px.a, px.b * px.a, px.a)
}

/// Inverse of [premultiply_group], fully transparent pixels come out black
#[inline(always)]
pub(crate) fn unpremultiply_group(px: ColorGroup<f32>) -> ColorGroup<f32> {
    if px.a <= 0. {
        return ColorGroup::new();
    }
    let recip = 1. / px.a;
    let colors = px * recip;
    ColorGroup::from_components(colors.r, colors.g, colors.b, px.a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premultiply_round_trip() {
        let px = ColorGroup::from_components(0.5f32, 0.25, 1., 0.5);
        let restored = unpremultiply_group(premultiply_group(px));
        assert!((restored.r - 0.5).abs() < 1e-6);
        assert!((restored.g - 0.25).abs() < 1e-6);
        assert!((restored.b - 1.).abs() < 1e-6);
        assert_eq!(restored.a, 0.5);
    }

    #[test]
    fn transparent_unpremultiplies_to_zero() {
        let px = ColorGroup::from_components(0.3f32, 0.3, 0.3, 0.);
        assert_eq!(unpremultiply_group(px), ColorGroup::new());
    }
}
