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
use crate::ImageSize;
use rayon::ThreadPool;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub enum ThreadingPolicy {
    #[default]
    Single,
    Fixed(usize),
    /// One worker per 256x256 block of output, bounded by the machine
    Adaptive,
}

impl ThreadingPolicy {
    pub fn get_threads_count(&self, for_size: ImageSize) -> usize {
        match self {
            ThreadingPolicy::Single => 1,
            ThreadingPolicy::Fixed(thread_count) => (*thread_count).max(1),
            ThreadingPolicy::Adaptive => {
                let box_size = 256 * 256;
                let new_box_size = for_size.height * for_size.width;
                let available = std::thread::available_parallelism()
                    .map(|v| v.get())
                    .unwrap_or(1);
                (new_box_size / box_size).clamp(1, available.clamp(1, 16))
            }
        }
    }

    /// Builds a dedicated pool, `None` means the caller's thread does all the work
    pub fn get_pool(&self, for_size: ImageSize) -> Option<ThreadPool> {
        if *self == ThreadingPolicy::Single {
            return None;
        }
        let threads_count = self.get_threads_count(for_size);
        if threads_count <= 1 {
            return None;
        }
        match rayon::ThreadPoolBuilder::new()
            .num_threads(threads_count)
            .build()
        {
            Ok(pool) => Some(pool),
            Err(err) => {
                log::warn!("failed to build a pool of {threads_count} workers, running single threaded: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_counts() {
        let size = ImageSize::new(1024, 1024);
        assert_eq!(ThreadingPolicy::Single.get_threads_count(size), 1);
        assert_eq!(ThreadingPolicy::Fixed(0).get_threads_count(size), 1);
        assert_eq!(ThreadingPolicy::Fixed(6).get_threads_count(size), 6);
        assert_eq!(
            ThreadingPolicy::Adaptive.get_threads_count(ImageSize::new(16, 16)),
            1
        );
        let adaptive = ThreadingPolicy::Adaptive.get_threads_count(size);
        assert!((1..=16).contains(&adaptive));
    }

    #[test]
    fn single_has_no_pool() {
        assert!(
            ThreadingPolicy::Single
                .get_pool(ImageSize::new(4096, 4096))
                .is_none()
        );
        assert!(
            ThreadingPolicy::Fixed(1)
                .get_pool(ImageSize::new(4096, 4096))
                .is_none()
        );
    }

    #[test]
    fn fixed_pool_has_requested_workers() {
        let pool = ThreadingPolicy::Fixed(3)
            .get_pool(ImageSize::new(8, 8))
            .unwrap();
        assert_eq!(pool.current_num_threads(), 3);
    }
}
