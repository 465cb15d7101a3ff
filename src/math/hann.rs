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
use crate::math::sinc::sinc;
use num_traits::{AsPrimitive, Float, FloatConst};

/// Sinc under a raised cosine window spanning three lobes
#[inline(always)]
pub fn hann<V: Float + FloatConst + 'static>(x: V) -> V
where
    f32: AsPrimitive<V>,
{
    let length: V = 3f32.as_();
    if x.abs() >= length {
        return 0f32.as_();
    }
    let window = 0.5f32.as_() + 0.5f32.as_() * (V::PI() * x / length).cos();
    sinc(x) * window
}

/// Sinc under a parabolic window spanning three lobes
#[inline(always)]
pub fn welch<V: Float + FloatConst + 'static>(x: V) -> V
where
    f32: AsPrimitive<V>,
{
    let length: V = 3f32.as_();
    if x.abs() >= length {
        return 0f32.as_();
    }
    let r = x / length;
    sinc(x) * (1f32.as_() - r * r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_close_at_radius() {
        assert_eq!(hann(0f32), 1.);
        assert_eq!(welch(0f32), 1.);
        assert_eq!(hann(3f32), 0.);
        assert_eq!(welch(-3.2f32), 0.);
    }
}
