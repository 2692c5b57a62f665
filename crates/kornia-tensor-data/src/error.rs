use crate::allocator::TensorAllocatorError;
use crate::layout::TensorLayout;

/// An error type for tensor and image descriptors.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TensorDataError {
    /// The layout label is not one of the supported layouts.
    #[error("Unknown tensor layout \"{0}\"")]
    InvalidLayout(String),

    /// The number of shape or stride entries does not match the layout rank.
    #[error("Layout {layout} has rank {expected}, but got {actual} entries")]
    RankMismatch {
        /// The layout of the descriptor.
        layout: TensorLayout,
        /// The rank implied by the layout.
        expected: usize,
        /// The number of entries given.
        actual: usize,
    },

    /// A dimension size is negative.
    #[error("Invalid size {size} at axis {axis}")]
    InvalidShape {
        /// The axis holding the invalid size.
        axis: usize,
        /// The invalid size.
        size: i64,
    },

    /// The row alignment is not a power of two.
    #[error("Row alignment must be a power of two, got {0}")]
    InvalidAlignment(usize),

    /// The tensor layout has no row and column axes.
    #[error("Tensor with layout {0} is not an image-planar tensor")]
    NotImagePlanar(TensorLayout),

    /// The descriptor does not hold the requested plane.
    #[error("Plane index {index} out of bounds for an image with {num_planes} planes")]
    PlaneOutOfBounds {
        /// The requested plane.
        index: usize,
        /// The number of planes in the image.
        num_planes: usize,
    },

    /// An image must have between one and four planes.
    #[error("Invalid number of planes {0}")]
    InvalidPlaneCount(usize),

    /// The buffer size overflows the address space.
    #[error("Buffer size overflows for shape {0:?}")]
    SizeOverflow(Vec<i64>),

    /// Memory allocation failed.
    #[error("Allocation error: {0}")]
    AllocatorError(#[from] TensorAllocatorError),
}
