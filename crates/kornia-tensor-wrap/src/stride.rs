//! Compile-time classification of tensor strides.
//!
//! A stride layout is a tuple of slot markers, one per dimension, from the
//! first (slowest changing) to the last (fastest changing) dimension:
//!
//! - [`Rt`]: the stride is given at run time and stored in the wrap.
//! - [`Ct<B>`]: the stride is the constant `B` bytes.
//! - [`SizeOf<T>`]: the stride is the constant `size_of::<T>()` bytes.
//!
//! Run-time slots always come first. Only well-formed tuples implement
//! [`StrideSpec`], so a constant slot before a run-time slot is rejected by the
//! compiler:
//!
//! ```compile_fail
//! use kornia_tensor_wrap::{Ct, Rt, TensorWrap};
//!
//! let _wrap = TensorWrap::<u8, (Ct<4>, Rt)>::default();
//! ```
//!
//! and so is a stride tuple with more than four dimensions:
//!
//! ```compile_fail
//! use kornia_tensor_wrap::{Rt, SizeOf, TensorWrap};
//!
//! let _wrap = TensorWrap::<u8, (Rt, Rt, Rt, Rt, SizeOf<u8>)>::default();
//! ```

use std::{fmt, marker::PhantomData};

/// The highest number of dimensions of a wrap.
pub const MAX_RANK: usize = 4;

/// Value stored in [`StrideSpec::STRIDES`] for run-time slots.
pub const RUNTIME_STRIDE: i32 = -1;

/// Run-time stride slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rt;

/// Constant stride slot of `BYTES` bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ct<const BYTES: i32>;

/// Constant stride slot of `size_of::<T>()` bytes.
pub struct SizeOf<T>(PhantomData<T>);

/// A stride slot whose value is known at compile time.
pub trait ConstStride {
    /// The stride in bytes.
    const BYTES: i32;
}

impl<const B: i32> ConstStride for Ct<B> {
    const BYTES: i32 = B;
}

impl<T> ConstStride for SizeOf<T> {
    const BYTES: i32 = std::mem::size_of::<T>() as i32;
}

/// Storage of the run-time strides of a wrap: `[i32; RUNTIME]`.
pub trait RuntimeStrides:
    Copy + Default + fmt::Debug + PartialEq + AsRef<[i32]> + AsMut<[i32]> + Send + Sync + 'static
{
}

impl RuntimeStrides for [i32; 0] {}
impl RuntimeStrides for [i32; 1] {}
impl RuntimeStrides for [i32; 2] {}
impl RuntimeStrides for [i32; 3] {}
impl RuntimeStrides for [i32; 4] {}

/// A sequence of stride slots classified into run-time and constant strides.
///
/// # Examples
///
/// ```
/// use kornia_tensor_wrap::{Ct, Rt, SizeOf, StrideSpec, RUNTIME_STRIDE};
///
/// type Nhwc = (Rt, Rt, Ct<3>, SizeOf<u8>);
///
/// assert_eq!(Nhwc::RANK, 4);
/// assert_eq!(Nhwc::RUNTIME, 2);
/// assert_eq!(Nhwc::CONSTANT, 2);
/// assert_eq!(Nhwc::STRIDES, [RUNTIME_STRIDE, RUNTIME_STRIDE, 3, 1]);
/// ```
pub trait StrideSpec {
    /// Number of dimensions.
    const RANK: usize;

    /// Number of leading dimensions with a run-time stride.
    const RUNTIME: usize;

    /// Number of trailing dimensions with a constant stride.
    const CONSTANT: usize = Self::RANK - Self::RUNTIME;

    /// Stride per dimension, [`RUNTIME_STRIDE`] for run-time slots and 0 past `RANK`.
    const STRIDES: [i32; MAX_RANK];

    /// The run-time strides stored in a wrap.
    type Runtime: RuntimeStrides;
}

/// Copies `slots` into a zero-padded array of [`MAX_RANK`] strides.
const fn padded<const K: usize>(slots: [i32; K]) -> [i32; MAX_RANK] {
    let mut out = [0; MAX_RANK];
    let mut i = 0;
    while i < K {
        out[i] = slots[i];
        i += 1;
    }
    out
}

macro_rules! count {
    () => { 0usize };
    ($head:tt $($tail:tt)*) => { 1usize + count!($($tail)*) };
}

macro_rules! runtime_slot {
    ($rt:ident) => {
        RUNTIME_STRIDE
    };
}

macro_rules! impl_stride_spec {
    ([$($rt:ident),*] [$($c:ident),*]) => {
        impl<$($c: ConstStride),*> StrideSpec for ($($rt,)* $($c,)*) {
            const RANK: usize = count!($($rt)* $($c)*);
            const RUNTIME: usize = count!($($rt)*);
            const STRIDES: [i32; MAX_RANK] = padded([$(runtime_slot!($rt),)* $($c::BYTES,)*]);
            type Runtime = [i32; count!($($rt)*)];
        }
    };
}

impl_stride_spec!([Rt] []);
impl_stride_spec!([] [C0]);

impl_stride_spec!([Rt, Rt] []);
impl_stride_spec!([Rt] [C0]);
impl_stride_spec!([] [C0, C1]);

impl_stride_spec!([Rt, Rt, Rt] []);
impl_stride_spec!([Rt, Rt] [C0]);
impl_stride_spec!([Rt] [C0, C1]);
impl_stride_spec!([] [C0, C1, C2]);

impl_stride_spec!([Rt, Rt, Rt, Rt] []);
impl_stride_spec!([Rt, Rt, Rt] [C0]);
impl_stride_spec!([Rt, Rt] [C0, C1]);
impl_stride_spec!([Rt] [C0, C1, C2]);
impl_stride_spec!([] [C0, C1, C2, C3]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_all_runtime() {
        type S = (Rt, Rt, Rt);
        assert_eq!(S::RANK, 3);
        assert_eq!(S::RUNTIME, 3);
        assert_eq!(S::CONSTANT, 0);
        assert_eq!(S::STRIDES, [-1, -1, -1, 0]);
        assert_eq!(<S as StrideSpec>::Runtime::default(), [0, 0, 0]);
    }

    #[test]
    fn classify_all_constant() {
        type S = (Ct<64>, Ct<16>, SizeOf<f32>);
        assert_eq!(S::RANK, 3);
        assert_eq!(S::RUNTIME, 0);
        assert_eq!(S::CONSTANT, 3);
        assert_eq!(S::STRIDES, [64, 16, 4, 0]);
        assert_eq!(<S as StrideSpec>::Runtime::default().len(), 0);
    }

    #[test]
    fn classify_mixed() {
        type S = (Rt, Rt, Rt, SizeOf<[u8; 4]>);
        assert_eq!(S::RANK, 4);
        assert_eq!(S::RUNTIME, 3);
        assert_eq!(S::CONSTANT, 1);
        assert_eq!(S::STRIDES, [-1, -1, -1, 4]);

        type S1 = (SizeOf<u16>,);
        assert_eq!(S1::RANK, 1);
        assert_eq!(S1::RUNTIME, 0);
        assert_eq!(S1::STRIDES, [2, 0, 0, 0]);

        type S2 = (Rt, Ct<12>);
        assert_eq!(S2::RANK, 2);
        assert_eq!(S2::RUNTIME, 1);
        assert_eq!(S2::STRIDES, [-1, 12, 0, 0]);
    }
}
