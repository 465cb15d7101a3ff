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
use num_traits::{AsPrimitive, MulAdd, Signed};
use std::ops::{Add, Mul, Neg, Sub};

/// Keys cubic convolution with `a = -0.5`
pub fn bicubic_spline<
    V: Copy
        + Mul<Output = V>
        + Sub<Output = V>
        + Add<Output = V>
        + 'static
        + Neg<Output = V>
        + Signed
        + PartialOrd
        + MulAdd<V, Output = V>,
>(
    d: V,
) -> V
where
    f32: AsPrimitive<V>,
{
    let a: V = (-0.5f32).as_();
    let modulo = d.abs();
    if modulo >= 2f32.as_() {
        return 0f32.as_();
    }
    let floatd = modulo * modulo;
    let triplet = floatd * modulo;
    if modulo <= 1f32.as_() {
        return mla(
            a + 2f32.as_(),
            triplet,
            mla(-(a + 3f32.as_()), floatd, 1f32.as_()),
        );
    }
    mla(
        a,
        triplet,
        mla(
            (-5f32).as_() * a,
            floatd,
            mla(8f32.as_() * a, modulo, (-4f32).as_() * a),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bicubic_interpolates() {
        assert!((bicubic_spline(0f32) - 1.).abs() < 1e-6);
        assert!(bicubic_spline(1f32).abs() < 1e-6);
        assert!(bicubic_spline(-1f32).abs() < 1e-6);
        assert_eq!(bicubic_spline(2f32), 0.);
        assert!(bicubic_spline(1.5f32) < 0.);
    }
}
