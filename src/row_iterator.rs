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
use crate::cancellation::CancellationToken;
use crate::image_size::Region;
use crate::resample_error::{
    AggregateRowFailure, ResampleError, ResamplePhase, RowFailure, RowFailureKind,
};
use rayon::ThreadPool;
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::prelude::ParallelSliceMut;
use std::error::Error;
use std::fmt::Display;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Smallest amount of pixels worth handing to a separate worker
pub const DEFAULT_MIN_PIXELS_PER_TASK: usize = 4096;

#[derive(Debug, Clone, PartialEq)]
pub enum RowIteratorError {
    RegionOutOfBounds(Region),
    /// Every failed row, ordered by row index
    RowsFailed(Vec<RowFailure>),
    Cancelled,
}

impl RowIteratorError {
    pub(crate) fn into_resample_error(self, phase: ResamplePhase) -> ResampleError {
        match self {
            RowIteratorError::RegionOutOfBounds(region) => {
                ResampleError::RegionOutOfBounds(region)
            }
            RowIteratorError::RowsFailed(failures) => {
                ResampleError::AggregateRowFailure(AggregateRowFailure { phase, failures })
            }
            RowIteratorError::Cancelled => ResampleError::Cancelled(phase),
        }
    }
}

impl Display for RowIteratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowIteratorError::RegionOutOfBounds(region) => f.write_fmt(format_args!(
                "Region {}x{} at ({}, {}) does not fit the buffer",
                region.width, region.height, region.x, region.y
            )),
            RowIteratorError::RowsFailed(failures) => {
                f.write_fmt(format_args!("{} row(s) failed", failures.len()))
            }
            RowIteratorError::Cancelled => f.write_str("Row iteration was cancelled"),
        }
    }
}

impl Error for RowIteratorError {}

/// Fans row work out over a pool in contiguous partitions.
///
/// Each partition gets its own scratch buffer, rows are handed out exactly once
/// and `iterate` returns only after every partition finished. A failed row
/// stops new partitions from starting, failures are reported once the
/// in-flight ones drained.
#[derive(Debug, Clone, Copy)]
pub struct RowIterator<'a> {
    pool: Option<&'a ThreadPool>,
    max_parallelism: usize,
    min_pixels_per_task: usize,
    cancellation: Option<&'a CancellationToken>,
}

impl Default for RowIterator<'_> {
    fn default() -> Self {
        RowIterator::sequential()
    }
}

impl<'a> RowIterator<'a> {
    /// Runs on rayon's global pool with at most `max_parallelism` partitions
    pub fn new(max_parallelism: usize) -> RowIterator<'a> {
        RowIterator {
            pool: None,
            max_parallelism: max_parallelism.max(1),
            min_pixels_per_task: DEFAULT_MIN_PIXELS_PER_TASK,
            cancellation: None,
        }
    }

    pub fn sequential() -> RowIterator<'a> {
        RowIterator::new(1)
    }

    pub fn with_pool(pool: &'a ThreadPool) -> RowIterator<'a> {
        RowIterator {
            pool: Some(pool),
            max_parallelism: pool.current_num_threads().max(1),
            min_pixels_per_task: DEFAULT_MIN_PIXELS_PER_TASK,
            cancellation: None,
        }
    }

    pub fn min_pixels_per_task(mut self, min_pixels_per_task: usize) -> RowIterator<'a> {
        self.min_pixels_per_task = min_pixels_per_task.max(1);
        self
    }

    pub fn cancellation(mut self, token: &'a CancellationToken) -> RowIterator<'a> {
        self.cancellation = Some(token);
        self
    }

    #[inline]
    pub fn max_parallelism(&self) -> usize {
        self.max_parallelism
    }

    /// Number of partitions and rows per partition for `region`
    pub fn partition_plan(&self, region: Region) -> (usize, usize) {
        if region.is_empty() {
            return (0, 0);
        }
        let max_steps = (region.width * region.height).div_ceil(self.min_pixels_per_task);
        let steps = self.max_parallelism.min(max_steps).max(1);
        let step_height = region.height.div_ceil(steps);
        (region.height.div_ceil(step_height), step_height)
    }

    /// Invokes `action(y, row, scratch)` once per row of `region`.
    ///
    /// `buffer` holds rows of `stride` elements with `channels` elements per
    /// pixel; `row` is the part of row `y` covered by the region and `scratch`
    /// is `scratch_len` elements owned by the current partition.
    #[allow(clippy::too_many_arguments)]
    pub fn iterate<T, S, F>(
        &self,
        region: Region,
        buffer: &mut [T],
        stride: usize,
        channels: usize,
        scratch_len: usize,
        action: F,
    ) -> Result<(), RowIteratorError>
    where
        T: Send,
        S: Clone + Default + Send,
        F: Fn(usize, &mut [T], &mut [S]) -> Result<(), RowFailureKind> + Sync,
    {
        if region.is_empty() {
            return Ok(());
        }
        let x0 = region.x * channels;
        let x1 = region.right() * channels;
        let required = (region.bottom() - 1) * stride + x1;
        if channels == 0 || stride < x1 || buffer.len() < required {
            return Err(RowIteratorError::RegionOutOfBounds(region));
        }

        let (steps, step_height) = self.partition_plan(region);
        let rows_end = (region.bottom() * stride).min(buffer.len());
        let rows = &mut buffer[region.y * stride..rows_end];
        let chunk_len = stride * step_height;

        let stop = AtomicBool::new(false);
        let cancelled = AtomicBool::new(false);
        let failures: Mutex<Vec<RowFailure>> = Mutex::new(Vec::new());

        let run_partition = |partition: usize, chunk: &mut [T], scratch: &mut [S]| {
            if stop.load(Ordering::Acquire) {
                return;
            }
            if self.cancellation.is_some_and(|token| token.is_cancelled()) {
                cancelled.store(true, Ordering::Release);
                stop.store(true, Ordering::Release);
                return;
            }
            let first_row = region.y + partition * step_height;
            for (r, row) in chunk.chunks_mut(stride).enumerate() {
                let y = first_row + r;
                if let Err(kind) = action(y, &mut row[x0..x1], &mut *scratch) {
                    let mut guard = match failures.lock() {
                        Ok(guard) => guard,
                        Err(poisoned) => poisoned.into_inner(),
                    };
                    guard.push(RowFailure { row: y, kind });
                    stop.store(true, Ordering::Release);
                    break;
                }
            }
        };

        log::trace!(
            "iterating {} rows in {steps} partition(s) of {step_height}",
            region.height
        );

        if steps <= 1 {
            let mut scratch = vec![S::default(); scratch_len];
            for (partition, chunk) in rows.chunks_mut(chunk_len).enumerate() {
                run_partition(partition, chunk, scratch.as_mut_slice());
            }
        } else {
            let mut job = || {
                rows.par_chunks_mut(chunk_len).enumerate().for_each_init(
                    || vec![S::default(); scratch_len],
                    |scratch, (partition, chunk)| {
                        run_partition(partition, chunk, scratch.as_mut_slice())
                    },
                );
            };
            match self.pool {
                Some(pool) => pool.install(job),
                None => job(),
            }
        }

        let mut failures = match failures.into_inner() {
            Ok(failures) => failures,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !failures.is_empty() {
            failures.sort_by_key(|failure| failure.row);
            return Err(RowIteratorError::RowsFailed(failures));
        }
        if cancelled.load(Ordering::Acquire) {
            return Err(RowIteratorError::Cancelled);
        }
        Ok(())
    }
}
