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
use crate::math::*;

/// Weight generating function with bounded support.
///
/// `weight` is evaluated on offsets already rescaled into the kernel's own
/// coordinates, so it only has to be meaningful on `[-radius, radius]`.
pub trait Kernel: Sync {
    fn radius(&self) -> f32;
    fn weight(&self, x: f32) -> f32;
}

impl<K: Kernel + ?Sized> Kernel for &K {
    #[inline]
    fn radius(&self) -> f32 {
        (**self).radius()
    }

    #[inline]
    fn weight(&self, x: f32) -> f32 {
        (**self).weight(x)
    }
}

/// Plain function kernel, custom filters are built with [ResamplingFilter::new]
#[derive(Copy, Clone, Debug)]
pub struct ResamplingFilter {
    pub kernel: fn(f32) -> f32,
    pub radius: f32,
}

impl ResamplingFilter {
    pub fn new(kernel: fn(f32) -> f32, radius: f32) -> ResamplingFilter {
        ResamplingFilter { kernel, radius }
    }
}

impl Kernel for ResamplingFilter {
    #[inline]
    fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    fn weight(&self, x: f32) -> f32 {
        (self.kernel)(x)
    }
}

#[derive(Debug, Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum ResamplingFunction {
    Box,
    Bilinear,
    Bicubic,
    CatmullRom,
    #[default]
    MitchellNetravalli,
    Hermite,
    BSpline,
    Robidoux,
    RobidouxSharp,
    Lanczos2,
    Lanczos3,
    Lanczos4,
    Lanczos5,
    Lanczos8,
    Welch,
    Hann,
}

impl ResamplingFunction {
    pub const ALL: [ResamplingFunction; 16] = [
        ResamplingFunction::Box,
        ResamplingFunction::Bilinear,
        ResamplingFunction::Bicubic,
        ResamplingFunction::CatmullRom,
        ResamplingFunction::MitchellNetravalli,
        ResamplingFunction::Hermite,
        ResamplingFunction::BSpline,
        ResamplingFunction::Robidoux,
        ResamplingFunction::RobidouxSharp,
        ResamplingFunction::Lanczos2,
        ResamplingFunction::Lanczos3,
        ResamplingFunction::Lanczos4,
        ResamplingFunction::Lanczos5,
        ResamplingFunction::Lanczos8,
        ResamplingFunction::Welch,
        ResamplingFunction::Hann,
    ];

    pub fn get_resampling_filter(&self) -> ResamplingFilter {
        match self {
            ResamplingFunction::Box => ResamplingFilter::new(box_weight, 0.5),
            ResamplingFunction::Bilinear => ResamplingFilter::new(bilinear, 1.),
            ResamplingFunction::Bicubic => ResamplingFilter::new(bicubic_spline, 2.),
            ResamplingFunction::CatmullRom => ResamplingFilter::new(catmull_rom, 2.),
            ResamplingFunction::MitchellNetravalli => {
                ResamplingFilter::new(mitchell_netravalli, 2.)
            }
            ResamplingFunction::Hermite => ResamplingFilter::new(hermite_spline, 2.),
            ResamplingFunction::BSpline => ResamplingFilter::new(b_spline, 2.),
            ResamplingFunction::Robidoux => ResamplingFilter::new(robidoux, 2.),
            ResamplingFunction::RobidouxSharp => ResamplingFilter::new(robidoux_sharp, 2.),
            ResamplingFunction::Lanczos2 => ResamplingFilter::new(lanczos2, 2.),
            ResamplingFunction::Lanczos3 => ResamplingFilter::new(lanczos3, 3.),
            ResamplingFunction::Lanczos4 => ResamplingFilter::new(lanczos4, 4.),
            ResamplingFunction::Lanczos5 => ResamplingFilter::new(lanczos5, 5.),
            ResamplingFunction::Lanczos8 => ResamplingFilter::new(lanczos8, 8.),
            ResamplingFunction::Welch => ResamplingFilter::new(welch, 3.),
            ResamplingFunction::Hann => ResamplingFilter::new(hann, 3.),
        }
    }
}

impl From<u8> for ResamplingFunction {
    fn from(value: u8) -> Self {
        ResamplingFunction::ALL[value as usize % ResamplingFunction::ALL.len()]
    }
}

impl Kernel for ResamplingFunction {
    #[inline]
    fn radius(&self) -> f32 {
        self.get_resampling_filter().radius
    }

    #[inline]
    fn weight(&self, x: f32) -> f32 {
        (self.get_resampling_filter().kernel)(x)
    }
}
