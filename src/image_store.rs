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
use crate::pixel_component::PixelComponent;
use crate::resample_error::{BufferMismatch, ResampleError, try_vec};

/// Interleaved image with `N` components per pixel and tightly packed rows
#[derive(Debug)]
pub struct ImageStore<'a, T, const N: usize>
where
    T: PixelComponent,
{
    pub(crate) buffer: BufferStore<'a, T>,
    pub channels: usize,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug)]
pub(crate) enum BufferStore<'a, T: Copy> {
    Borrowed(&'a [T]),
    Owned(Vec<T>),
}

impl<T: Copy> BufferStore<'_, T> {
    pub(crate) fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }
}

fn check_buffer<const N: usize>(
    slice_len: usize,
    width: usize,
    height: usize,
) -> Result<(), ResampleError> {
    if width == 0 || height == 0 {
        return Err(ResampleError::InvalidDimension(width, height));
    }
    let expected = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(N))
        .ok_or(ResampleError::OutOfMemory(usize::MAX))?;
    if slice_len != expected {
        return Err(ResampleError::BufferMismatch(BufferMismatch {
            expected,
            width,
            height,
            channels: N,
            slice_len,
        }));
    }
    Ok(())
}

impl<T, const N: usize> ImageStore<'static, T, N>
where
    T: PixelComponent,
{
    pub fn new(
        slice_ref: Vec<T>,
        width: usize,
        height: usize,
    ) -> Result<ImageStore<'static, T, N>, ResampleError> {
        check_buffer::<N>(slice_ref.len(), width, height)?;
        Ok(ImageStore::<T, N> {
            buffer: BufferStore::Owned(slice_ref),
            channels: N,
            width,
            height,
        })
    }

    /// Zero filled image, failing instead of aborting when memory is short
    pub fn alloc(width: usize, height: usize) -> Result<ImageStore<'static, T, N>, ResampleError> {
        if width == 0 || height == 0 {
            return Err(ResampleError::InvalidDimension(width, height));
        }
        let len = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(N))
            .ok_or(ResampleError::OutOfMemory(usize::MAX))?;
        let vc: Vec<T> = try_vec![T::default(); len];
        Ok(ImageStore::<T, N> {
            buffer: BufferStore::Owned(vc),
            channels: N,
            width,
            height,
        })
    }
}

impl<'a, T, const N: usize> ImageStore<'a, T, N>
where
    T: PixelComponent,
{
    pub fn from_slice(
        slice_ref: &'a [T],
        width: usize,
        height: usize,
    ) -> Result<ImageStore<'a, T, N>, ResampleError> {
        check_buffer::<N>(slice_ref.len(), width, height)?;
        Ok(ImageStore::<T, N> {
            buffer: BufferStore::Borrowed(slice_ref),
            channels: N,
            width,
            height,
        })
    }

    pub fn get_size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }

    /// Components per row
    #[inline]
    pub fn stride(&self) -> usize {
        self.width * N
    }

    pub fn as_bytes(&self) -> &[T] {
        self.buffer.borrow()
    }

    /// Takes the pixels out, copying only when the store borrows them
    pub fn into_vec(self) -> Vec<T> {
        match self.buffer {
            BufferStore::Borrowed(p) => p.to_vec(),
            BufferStore::Owned(v) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_buffer_is_rejected() {
        let store = ImageStore::<u8, 4>::new(vec![0u8; 15], 2, 2);
        assert_eq!(
            store.unwrap_err(),
            ResampleError::BufferMismatch(BufferMismatch {
                expected: 16,
                width: 2,
                height: 2,
                channels: 4,
                slice_len: 15,
            })
        );
    }

    #[test]
    fn empty_image_is_rejected() {
        let data: [f32; 0] = [];
        assert_eq!(
            ImageStore::<f32, 1>::from_slice(&data, 0, 3).unwrap_err(),
            ResampleError::InvalidDimension(0, 3)
        );
        assert!(ImageStore::<u16, 3>::alloc(4, 0).is_err());
    }

    #[test]
    fn borrowed_store_copies_on_into_vec() {
        let data = [1u16, 2, 3, 4, 5, 6];
        let store = ImageStore::<u16, 3>::from_slice(&data, 2, 1).unwrap();
        assert_eq!(store.get_size(), ImageSize::new(2, 1));
        assert_eq!(store.stride(), 6);
        assert_eq!(store.into_vec(), data.to_vec());
        let owned = ImageStore::<u8, 1>::alloc(3, 2).unwrap();
        assert_eq!(owned.as_bytes(), &[0u8; 6]);
    }
}
