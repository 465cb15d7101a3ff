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
#![deny(deprecated)]
#![allow(clippy::too_many_arguments)]
#![forbid(unsafe_code)]

mod alpha_handle;
mod cancellation;
mod color_group;
mod filter_weights;
mod floating_point_horizontal;
mod floating_point_vertical;
mod image_size;
mod image_store;
mod math;
mod mlaf;
mod pixel_component;
mod resample_error;
mod row_iterator;
mod sampler;
mod scaler;
mod threading_policy;

pub use cancellation::CancellationToken;
pub use filter_weights::{WeightsBuffer, WeightsWindow};
pub use image_size::{ImageSize, Region};
pub use image_store::ImageStore;
pub use math::*;
pub use pixel_component::PixelComponent;
pub use resample_error::{
    AggregateRowFailure, BufferMismatch, KernelFault, ResampleError, ResamplePhase, RowFailure,
    RowFailureKind,
};
pub use row_iterator::{DEFAULT_MIN_PIXELS_PER_TASK, RowIterator, RowIteratorError};
pub use sampler::*;
pub use scaler::{Scaler, Scaling, ScalingF32, ScalingOptions, ScalingU16, resize};
pub use threading_policy::*;
