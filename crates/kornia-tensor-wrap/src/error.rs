use kornia_tensor_data::{TensorDataError, TensorLayout};

/// An error type for building tensor wraps from descriptors.
///
/// The panicking constructors report the same conditions through the `Display` of
/// this type.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TensorWrapError {
    /// The tensor has fewer axes than the wrap has dimensions.
    #[error("Tensor rank {rank} is smaller than the {dims} dimensions of the wrap")]
    RankTooSmall {
        /// Rank of the tensor.
        rank: usize,
        /// Dimensions of the wrap.
        dims: usize,
    },

    /// A tensor stride differs from the constant stride of the wrap.
    #[error("Stride mismatch at axis {axis}: the wrap expects {expected} bytes, the tensor has {actual} bytes")]
    StrideMismatch {
        /// The mismatching axis.
        axis: usize,
        /// The constant stride of the wrap.
        expected: i32,
        /// The stride reported by the tensor.
        actual: i64,
    },

    /// A tensor stride does not fit in 32 bits.
    #[error("Stride {stride} at axis {axis} does not fit in a 32-bit integer")]
    StrideOverflow {
        /// The overflowing axis.
        axis: usize,
        /// The stride reported by the tensor.
        stride: i64,
    },

    /// The tensor stores channels in separate planes, so the channel is not the innermost
    /// axis of a pixel.
    #[error("Tensor with layout {0} is planar, expected interleaved channels (NHWC or HWC)")]
    PlanarLayout(TensorLayout),

    /// The tensor descriptor could not be accessed as an image.
    #[error(transparent)]
    TensorData(#[from] TensorDataError),
}
