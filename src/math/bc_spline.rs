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
use crate::math::mla;
use num_traits::{AsPrimitive, MulAdd};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Mitchell-Netravali family of cubic splines, support of 2
#[inline(always)]
pub fn bc_spline<
    V: Copy
        + Add<Output = V>
        + Mul<Output = V>
        + Sub<Output = V>
        + Div<Output = V>
        + MulAdd<V, Output = V>
        + 'static
        + PartialEq
        + PartialOrd
        + Neg<Output = V>,
>(
    d: V,
    b: V,
    c: V,
) -> V
where
    f32: AsPrimitive<V>,
{
    let mut x = d;
    if x < 0.0f32.as_() {
        x = -x;
    }
    let dp = x * x;
    let tp = dp * x;
    if x < 1f32.as_() {
        return mla(
            12f32.as_() - 9f32.as_() * b - 6f32.as_() * c,
            tp,
            mla(
                (-18f32).as_() + 12f32.as_() * b + 6f32.as_() * c,
                dp,
                6f32.as_() - 2f32.as_() * b,
            ),
        ) * (1f32.as_() / 6f32.as_());
    } else if x < 2f32.as_() {
        return mla(
            -b - 6f32.as_() * c,
            tp,
            mla(
                6f32.as_() * b + 30f32.as_() * c,
                dp,
                mla(
                    (-12f32).as_() * b - 48f32.as_() * c,
                    x,
                    8f32.as_() * b + 24f32.as_() * c,
                ),
            ),
        ) * (1f32.as_() / 6f32.as_());
    }
    0f32.as_()
}

#[inline(always)]
pub fn hermite_spline(x: f32) -> f32 {
    bc_spline(x, 0., 0.)
}

#[inline(always)]
pub fn b_spline(x: f32) -> f32 {
    bc_spline(x, 1., 0.)
}

#[inline(always)]
pub fn mitchell_netravalli(x: f32) -> f32 {
    bc_spline(x, 1. / 3., 1. / 3.)
}

#[inline(always)]
pub fn catmull_rom(x: f32) -> f32 {
    bc_spline(x, 0., 0.5)
}

#[inline(always)]
#[allow(clippy::excessive_precision)]
pub fn robidoux(x: f32) -> f32 {
    bc_spline(x, 0.37821575509399867, 0.31089212245300067)
}

#[inline(always)]
#[allow(clippy::excessive_precision)]
pub fn robidoux_sharp(x: f32) -> f32 {
    bc_spline(x, 0.2620145123990142, 0.3689927438004929)
}
