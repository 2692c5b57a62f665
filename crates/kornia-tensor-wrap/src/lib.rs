#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! A wrap is a small, copyable value that turns a tensor coordinate into the address of
//! an element of a strided buffer. It does not own the buffer, nor does it know the
//! tensor extents: kernels receive it by value, one copy per worker, and compute
//! addresses with plain 32-bit arithmetic.
//!
//! The strides of a wrap are described by a tuple of slots, see [`stride`]. Leading
//! slots are [`Rt`] and are given when the wrap is built; trailing slots are constant
//! ([`Ct`], [`SizeOf`]) and cost nothing at run time.
//!
//! Wraps are built from a raw pointer ([`TensorWrap::new`]), from an image descriptor
//! ([`TensorWrap::from_image`]) or from a tensor descriptor
//! ([`TensorWrap::from_tensor`], [`create_tensor_wrap_nhwc`]).
//!
//! ```rust
//! use kornia_tensor_data::{CpuAllocator, Tensor, TensorLayout};
//! use kornia_tensor_wrap::{create_tensor_wrap_nhwc, Int4, Tensor4DWrap};
//!
//! let tensor = Tensor::new(TensorLayout::Nhwc, &[1, 480, 640, 3], 1, 256, CpuAllocator).unwrap();
//!
//! let dst = create_tensor_wrap_nhwc::<u8, _>(&tensor);
//! unsafe { *dst.get_unchecked_mut(Int4 { x: 2, y: 10, z: 20, w: 0 }) = 255 };
//!
//! let src: Tensor4DWrap<u8> = dst.into();
//! assert_eq!(unsafe { *src.get_unchecked([0, 20, 10, 2]) }, 255);
//! ```

/// Tensor coordinates.
pub mod coord;

/// Shortcuts for wraps with a packed innermost dimension.
pub mod dims;

/// Error types for building wraps.
pub mod error;

/// Wraps of image tensors built through the access planner.
pub mod factory;

/// Stride slots and their classification.
pub mod stride;

/// The read-only and read-write wraps.
pub mod wrap;

pub use crate::coord::{Coord, Int2, Int3, Int4};
pub use crate::dims::{
    Dims, SelectWrap, Tensor1DWrap, Tensor1DWrapMut, Tensor2DWrap, Tensor2DWrapMut, Tensor3DWrap,
    Tensor3DWrapMut, Tensor4DWrap, Tensor4DWrapMut, TensorNDWrap, TensorNDWrapMut,
};
pub use crate::error::TensorWrapError;
pub use crate::factory::{
    create_tensor_wrap_nhw, create_tensor_wrap_nhwc, try_create_tensor_wrap_nhw,
    try_create_tensor_wrap_nhwc,
};
pub use crate::stride::{
    ConstStride, Ct, RuntimeStrides, Rt, SizeOf, StrideSpec, MAX_RANK, RUNTIME_STRIDE,
};
pub use crate::wrap::{TensorWrap, TensorWrapMut};
