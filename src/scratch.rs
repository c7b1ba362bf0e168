// Copyright (c) 2024-present, parquet-core contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Process-wide scratch-buffer pool (spec §5, §9).
//!
//! Internal per-call scratch — e.g. the `i32` buffer a delta codec
//! materializes its prefix/suffix length stream into before encoding —
//! may be drawn from this pool instead of freshly allocated. This is
//! strictly an optimization: every caller here also works correctly with
//! a plain `Vec::new()`, and nothing in this crate's correctness depends
//! on the pool being used.

use std::cell::RefCell;

thread_local! {
    static I32_POOL: RefCell<Vec<Vec<i32>>> = const { RefCell::new(Vec::new()) };
    static BYTE_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}

/// Borrows an empty `Vec<i32>` from the thread-local pool, or allocates a
/// fresh one if the pool is empty. Returns it to the pool (truncated to
/// empty) when dropped.
pub fn take_i32_buf() -> ScratchBuf<i32> {
    let buf = I32_POOL.with_borrow_mut(|pool| pool.pop().unwrap_or_default());
    ScratchBuf { buf: Some(buf) }
}

/// Borrows an empty `Vec<u8>` from the thread-local pool, or allocates a
/// fresh one if the pool is empty.
pub fn take_byte_buf() -> ScratchBuf<u8> {
    let buf = BYTE_POOL.with_borrow_mut(|pool| pool.pop().unwrap_or_default());
    ScratchBuf { buf: Some(buf) }
}

/// An owned buffer borrowed from [`take_i32_buf`] or [`take_byte_buf`].
/// Derefs to the underlying `Vec`; truncated and returned to its pool on
/// drop (release = truncate-then-return-to-pool, per spec §5).
pub struct ScratchBuf<T> {
    buf: Option<Vec<T>>,
}

impl<T> std::ops::Deref for ScratchBuf<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        #[allow(clippy::expect_used)]
        self.buf.as_ref().expect("buf only taken in Drop")
    }
}

impl<T> std::ops::DerefMut for ScratchBuf<T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        #[allow(clippy::expect_used)]
        self.buf.as_mut().expect("buf only taken in Drop")
    }
}

impl Drop for ScratchBuf<i32> {
    fn drop(&mut self) {
        if let Some(mut buf) = self.buf.take() {
            buf.clear();
            I32_POOL.with_borrow_mut(|pool| pool.push(buf));
        }
    }
}

impl Drop for ScratchBuf<u8> {
    fn drop(&mut self) {
        if let Some(mut buf) = self.buf.take() {
            buf.clear();
            BYTE_POOL.with_borrow_mut(|pool| pool.push(buf));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn scratch_buf_behaves_like_a_fresh_vec() {
        let mut buf = take_i32_buf();
        assert!(buf.is_empty());
        buf.push(1);
        buf.push(2);
        assert_eq!(&buf[..], &[1, 2]);
    }

    #[test]
    fn dropped_buffers_are_recycled_empty() {
        {
            let mut buf = take_i32_buf();
            buf.extend_from_slice(&[1, 2, 3, 4, 5]);
        }
        let recycled = take_i32_buf();
        assert!(recycled.is_empty());
    }

    #[test]
    fn byte_pool_round_trips_too() {
        let mut buf = take_byte_buf();
        buf.extend_from_slice(b"hello");
        assert_eq!(&buf[..], b"hello");
    }
}
