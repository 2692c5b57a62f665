#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `kornia-tensor-data` describes pitch-linear tensors and images the way kernels see
//! them: a base address, a layout and one byte stride per axis. Descriptors are plain
//! values that never own memory; the owning [`Tensor`] and [`Image`] buffers export
//! them on demand.
//!
//! - [`StridedTensorData`] / [`TensorDataStrided`]: N-D tensor descriptors.
//! - [`StridedImageData`] / [`ImageDataStrided`]: multi-plane image descriptors.
//! - [`TensorDataAccessStridedImagePlanar`]: sample/row/column/channel strides of
//!   image tensors, independent of the axis order.
//!
//! ```rust
//! use kornia_tensor_data::{
//!     CpuAllocator, Tensor, TensorDataAccessStridedImagePlanar, TensorLayout,
//! };
//!
//! let tensor = Tensor::new(TensorLayout::Nhwc, &[2, 480, 640, 4], 1, 256, CpuAllocator).unwrap();
//! let access = TensorDataAccessStridedImagePlanar::create(&tensor).unwrap();
//!
//! assert_eq!(access.col_stride(), 4);
//! assert_eq!(access.row_stride(), 2560);
//! assert_eq!(access.sample_stride(), 480 * 2560);
//! ```

/// Image-planar access planning over tensor descriptors.
pub mod access;

/// Allocators for pitch-linear buffers.
pub mod allocator;

/// Error types for the descriptors and buffers.
pub mod error;

/// Image descriptors.
pub mod image_data;

/// Tensor layouts and axes.
pub mod layout;

/// Two-dimensional sizes.
pub mod size;

/// Owned byte storage.
pub mod storage;

/// Owning pitch-linear tensors and images.
pub mod tensor;

/// Tensor descriptors.
pub mod tensor_data;

pub use crate::access::TensorDataAccessStridedImagePlanar;
pub use crate::allocator::{CpuAllocator, TensorAllocator, TensorAllocatorError};
pub use crate::error::TensorDataError;
pub use crate::image_data::{ImageDataStrided, ImagePlaneStrided, StridedImageData};
pub use crate::layout::{Axis, TensorLayout};
pub use crate::size::ImageSize;
pub use crate::tensor::{Image, Tensor};
pub use crate::tensor_data::{StridedTensorData, TensorDataStrided, MAX_TENSOR_RANK};
