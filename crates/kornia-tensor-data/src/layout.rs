use std::fmt;
use std::str::FromStr;

use crate::error::TensorDataError;

/// A named axis of a tensor layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Sample (batch) axis.
    N,
    /// Channel axis.
    C,
    /// Row axis.
    H,
    /// Column axis.
    W,
}

/// The order of the axes of a tensor, from the first (slowest changing) to the last
/// (fastest changing) axis.
///
/// # Examples
///
/// ```
/// use kornia_tensor_data::{Axis, TensorLayout};
///
/// let layout: TensorLayout = "NHWC".parse().unwrap();
/// assert_eq!(layout, TensorLayout::Nhwc);
/// assert_eq!(layout.rank(), 4);
/// assert_eq!(layout.axis_index(Axis::W), Some(2));
/// assert_eq!(layout.to_string(), "NHWC");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TensorLayout {
    /// Batch of interleaved images.
    Nhwc,
    /// Single interleaved image.
    Hwc,
    /// Batch of planar images.
    Nchw,
    /// Single planar image.
    Chw,
    /// Batch of feature vectors.
    Nc,
    /// Batch of multi-channel signals.
    Ncw,
}

impl TensorLayout {
    /// All supported layouts.
    pub const ALL: [TensorLayout; 6] = [
        TensorLayout::Nhwc,
        TensorLayout::Hwc,
        TensorLayout::Nchw,
        TensorLayout::Chw,
        TensorLayout::Nc,
        TensorLayout::Ncw,
    ];

    /// Returns the axes of the layout in memory order.
    pub fn axes(&self) -> &'static [Axis] {
        match self {
            TensorLayout::Nhwc => &[Axis::N, Axis::H, Axis::W, Axis::C],
            TensorLayout::Hwc => &[Axis::H, Axis::W, Axis::C],
            TensorLayout::Nchw => &[Axis::N, Axis::C, Axis::H, Axis::W],
            TensorLayout::Chw => &[Axis::C, Axis::H, Axis::W],
            TensorLayout::Nc => &[Axis::N, Axis::C],
            TensorLayout::Ncw => &[Axis::N, Axis::C, Axis::W],
        }
    }

    /// Returns the number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.axes().len()
    }

    /// Returns the position of `axis` in the layout, if present.
    pub fn axis_index(&self, axis: Axis) -> Option<usize> {
        self.axes().iter().position(|&a| a == axis)
    }

    /// Returns true if the layout describes images, i.e. it has both row and column axes.
    pub fn is_image(&self) -> bool {
        self.axis_index(Axis::H).is_some() && self.axis_index(Axis::W).is_some()
    }

    /// Returns true if channels are stored in separate planes.
    pub fn is_planar(&self) -> bool {
        match (self.axis_index(Axis::C), self.axis_index(Axis::H)) {
            (Some(c), Some(h)) => c < h,
            _ => false,
        }
    }

    /// Returns the canonical upper-case label of the layout.
    pub fn as_str(&self) -> &'static str {
        match self {
            TensorLayout::Nhwc => "NHWC",
            TensorLayout::Hwc => "HWC",
            TensorLayout::Nchw => "NCHW",
            TensorLayout::Chw => "CHW",
            TensorLayout::Nc => "NC",
            TensorLayout::Ncw => "NCW",
        }
    }
}

impl fmt::Display for TensorLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TensorLayout {
    type Err = TensorDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TensorLayout::ALL
            .into_iter()
            .find(|layout| layout.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TensorDataError::InvalidLayout(s.to_string()))
    }
}
