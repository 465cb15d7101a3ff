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
use crate::image_size::Region;
use std::error::Error;
use std::fmt::Display;

/// Buffer mismatch error description
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BufferMismatch {
    pub expected: usize,
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub slice_len: usize,
}

/// Reason a kernel was rejected before any weights were produced
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum KernelFault {
    /// Radius is zero, negative or not finite
    NonPositiveRadius(f32),
    /// Kernel returned NaN or infinity for the given offset
    NonFiniteWeight(f32),
}

/// Pass of the separable convolution a failure belongs to
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResamplePhase {
    Horizontal,
    Vertical,
}

impl Display for ResamplePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResamplePhase::Horizontal => f.write_str("horizontal"),
            ResamplePhase::Vertical => f.write_str("vertical"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RowFailureKind {
    /// Window did not fit the row it was applied to
    WindowOutOfBounds { left: usize, size: usize, len: usize },
    /// Weighted sum produced NaN or infinity
    NonFiniteSample { column: usize },
    Custom(String),
}

impl Display for RowFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowFailureKind::WindowOutOfBounds { left, size, len } => f.write_fmt(format_args!(
                "window [{left}, {}) does not fit a row of {len} samples",
                left + size
            )),
            RowFailureKind::NonFiniteSample { column } => {
                f.write_fmt(format_args!("non finite sample at column {column}"))
            }
            RowFailureKind::Custom(message) => f.write_str(message),
        }
    }
}

/// Failure of a single row action
#[derive(Clone, Debug, PartialEq)]
pub struct RowFailure {
    pub row: usize,
    pub kind: RowFailureKind,
}

/// Every row failure collected from one pass, reported after all workers joined
#[derive(Clone, Debug, PartialEq)]
pub struct AggregateRowFailure {
    pub phase: ResamplePhase,
    pub failures: Vec<RowFailure>,
}

/// Error enumeration type
#[derive(Debug, Clone, PartialEq)]
pub enum ResampleError {
    /// Zero extent along one axis, as `(source, destination)`
    InvalidDimension(usize, usize),
    InvalidKernel(KernelFault),
    BufferMismatch(BufferMismatch),
    RegionOutOfBounds(Region),
    AggregateRowFailure(AggregateRowFailure),
    Cancelled(ResamplePhase),
    OutOfMemory(usize),
}

impl ResampleError {
    /// Returns error as int code
    #[inline]
    pub fn code(&self) -> usize {
        match self {
            ResampleError::InvalidDimension(_, _) => 1,
            ResampleError::InvalidKernel(_) => 2,
            ResampleError::BufferMismatch(_) => 3,
            ResampleError::RegionOutOfBounds(_) => 4,
            ResampleError::AggregateRowFailure(_) => 5,
            ResampleError::Cancelled(_) => 6,
            ResampleError::OutOfMemory(_) => 7,
        }
    }
}

impl Display for ResampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResampleError::InvalidDimension(source, destination) => f.write_fmt(format_args!(
                "Image dimensions must be positive, but received source {source} and destination {destination}",
            )),
            ResampleError::InvalidKernel(KernelFault::NonPositiveRadius(radius)) => f.write_fmt(
                format_args!("Kernel radius must be positive and finite, but got {radius}"),
            ),
            ResampleError::InvalidKernel(KernelFault::NonFiniteWeight(offset)) => f.write_fmt(
                format_args!("Kernel produced a non finite weight at offset {offset}"),
            ),
            ResampleError::BufferMismatch(buffer_mismatch) => f.write_fmt(format_args!(
                "Image buffer len expected to be {} [w({})*h({})*channels({})] but received {}",
                buffer_mismatch.expected,
                buffer_mismatch.width,
                buffer_mismatch.height,
                buffer_mismatch.channels,
                buffer_mismatch.slice_len,
            )),
            ResampleError::RegionOutOfBounds(region) => f.write_fmt(format_args!(
                "Region {}x{} at ({}, {}) does not fit the buffer",
                region.width, region.height, region.x, region.y
            )),
            ResampleError::AggregateRowFailure(aggregate) => {
                f.write_fmt(format_args!(
                    "{} row(s) failed during the {} pass",
                    aggregate.failures.len(),
                    aggregate.phase
                ))?;
                if let Some(first) = aggregate.failures.first() {
                    f.write_fmt(format_args!(", first at row {}: {}", first.row, first.kind))?;
                }
                Ok(())
            }
            ResampleError::Cancelled(phase) => {
                f.write_fmt(format_args!("Resampling was cancelled during the {phase} pass"))
            }
            ResampleError::OutOfMemory(capacity) => f.write_fmt(format_args!(
                "There is no enough memory to allocate {capacity} elements"
            )),
        }
    }
}

impl Error for ResampleError {}

macro_rules! try_vec {
    () => {
        Vec::new()
    };
    ($elem:expr; $n:expr) => {{
        let mut v = Vec::new();
        v.try_reserve_exact($n)
            .map_err(|_| crate::resample_error::ResampleError::OutOfMemory($n))?;
        v.resize($n, $elem);
        v
    }};
}

pub(crate) use try_vec;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_failure_reports_first_row() {
        let error = ResampleError::AggregateRowFailure(AggregateRowFailure {
            phase: ResamplePhase::Vertical,
            failures: vec![
                RowFailure {
                    row: 7,
                    kind: RowFailureKind::NonFiniteSample { column: 3 },
                },
                RowFailure {
                    row: 9,
                    kind: RowFailureKind::Custom("boom".to_string()),
                },
            ],
        });
        let message = error.to_string();
        assert!(message.contains("2 row(s)"));
        assert!(message.contains("vertical"));
        assert!(message.contains("row 7"));
        assert_eq!(error.code(), 5);
    }

    #[test]
    fn try_vec_allocates() {
        fn make() -> Result<Vec<u8>, ResampleError> {
            Ok(try_vec![3u8; 16])
        }
        assert_eq!(make().unwrap(), vec![3u8; 16]);
    }
}
