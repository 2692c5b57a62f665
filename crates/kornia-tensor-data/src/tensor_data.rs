use crate::{error::TensorDataError, layout::TensorLayout};

/// The highest rank a tensor descriptor can hold.
pub const MAX_TENSOR_RANK: usize = 4;

/// Read-only description of a strided (pitch-linear) tensor in memory.
///
/// All queries are cheap and side-effect free. Strides are in bytes and follow the
/// order of the layout axes, from the slowest to the fastest changing axis.
pub trait StridedTensorData {
    /// Returns the layout of the tensor.
    fn layout(&self) -> TensorLayout;

    /// Returns the number of axes.
    fn rank(&self) -> usize {
        self.layout().rank()
    }

    /// Returns the number of elements along `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= self.rank()`.
    fn shape(&self, axis: usize) -> i64;

    /// Returns the distance in bytes between two consecutive elements along `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= self.rank()`.
    fn stride(&self, axis: usize) -> i64;

    /// Returns the address of the first element.
    fn base_ptr(&self) -> *mut u8;
}

/// A plain exported tensor descriptor.
///
/// The descriptor does not own the memory it points to; it is only valid while the
/// buffer it was exported from is alive.
///
/// # Examples
///
/// ```
/// use kornia_tensor_data::{StridedTensorData, TensorDataStrided, TensorLayout};
///
/// let mut data = vec![0u8; 2 * 3 * 4];
/// let desc = TensorDataStrided::new(
///     data.as_mut_ptr(),
///     TensorLayout::Hwc,
///     &[2, 3, 4],
///     &[12, 4, 1],
/// )
/// .unwrap();
///
/// assert_eq!(desc.rank(), 3);
/// assert_eq!(desc.stride(0), 12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TensorDataStrided {
    base_ptr: *mut u8,
    layout: TensorLayout,
    shape: [i64; MAX_TENSOR_RANK],
    strides: [i64; MAX_TENSOR_RANK],
}

impl TensorDataStrided {
    /// Creates a new descriptor.
    ///
    /// # Arguments
    ///
    /// * `base_ptr` - The address of the first element.
    /// * `layout` - The axis order of the tensor.
    /// * `shape` - The number of elements per axis.
    /// * `strides` - The byte stride per axis.
    ///
    /// # Errors
    ///
    /// Returns an error if `shape` or `strides` do not have one entry per layout axis,
    /// or if a size is negative.
    pub fn new(
        base_ptr: *mut u8,
        layout: TensorLayout,
        shape: &[i64],
        strides: &[i64],
    ) -> Result<Self, TensorDataError> {
        let rank = layout.rank();
        for len in [shape.len(), strides.len()] {
            if len != rank {
                return Err(TensorDataError::RankMismatch {
                    layout,
                    expected: rank,
                    actual: len,
                });
            }
        }
        if let Some(axis) = shape.iter().position(|&s| s < 0) {
            return Err(TensorDataError::InvalidShape {
                axis,
                size: shape[axis],
            });
        }

        let mut desc = Self {
            base_ptr,
            layout,
            shape: [0; MAX_TENSOR_RANK],
            strides: [0; MAX_TENSOR_RANK],
        };
        desc.shape[..rank].copy_from_slice(shape);
        desc.strides[..rank].copy_from_slice(strides);
        Ok(desc)
    }

    /// Returns the shape of all axes.
    #[inline]
    pub fn shape_slice(&self) -> &[i64] {
        &self.shape[..self.layout.rank()]
    }

    /// Returns the strides of all axes.
    #[inline]
    pub fn strides_slice(&self) -> &[i64] {
        &self.strides[..self.layout.rank()]
    }
}

impl StridedTensorData for TensorDataStrided {
    #[inline]
    fn layout(&self) -> TensorLayout {
        self.layout
    }

    #[inline]
    fn shape(&self, axis: usize) -> i64 {
        self.shape_slice()[axis]
    }

    #[inline]
    fn stride(&self, axis: usize) -> i64 {
        self.strides_slice()[axis]
    }

    #[inline]
    fn base_ptr(&self) -> *mut u8 {
        self.base_ptr
    }
}

impl<D: StridedTensorData + ?Sized> StridedTensorData for &D {
    fn layout(&self) -> TensorLayout {
        (**self).layout()
    }

    fn rank(&self) -> usize {
        (**self).rank()
    }

    fn shape(&self, axis: usize) -> i64 {
        (**self).shape(axis)
    }

    fn stride(&self, axis: usize) -> i64 {
        (**self).stride(axis)
    }

    fn base_ptr(&self) -> *mut u8 {
        (**self).base_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_nhwc() -> Result<(), TensorDataError> {
        let mut data = vec![0u8; 2 * 4 * 8 * 3];
        let desc = TensorDataStrided::new(
            data.as_mut_ptr(),
            TensorLayout::Nhwc,
            &[2, 4, 8, 3],
            &[96, 24, 3, 1],
        )?;
        assert_eq!(desc.rank(), 4);
        assert_eq!(desc.layout(), TensorLayout::Nhwc);
        assert_eq!(desc.shape_slice(), &[2, 4, 8, 3]);
        assert_eq!(desc.strides_slice(), &[96, 24, 3, 1]);
        assert_eq!(desc.shape(2), 8);
        assert_eq!(desc.stride(1), 24);
        assert_eq!(desc.base_ptr(), data.as_mut_ptr());
        Ok(())
    }

    #[test]
    fn descriptor_rank_mismatch() {
        let res = TensorDataStrided::new(
            std::ptr::null_mut(),
            TensorLayout::Hwc,
            &[4, 8],
            &[8, 1],
        );
        assert_eq!(
            res,
            Err(TensorDataError::RankMismatch {
                layout: TensorLayout::Hwc,
                expected: 3,
                actual: 2,
            })
        );

        let res = TensorDataStrided::new(
            std::ptr::null_mut(),
            TensorLayout::Nc,
            &[4, 8],
            &[8, 1, 1],
        );
        assert!(matches!(res, Err(TensorDataError::RankMismatch { actual: 3, .. })));
    }

    #[test]
    fn descriptor_negative_shape() {
        let res = TensorDataStrided::new(
            std::ptr::null_mut(),
            TensorLayout::Nc,
            &[4, -1],
            &[4, 1],
        );
        assert_eq!(res, Err(TensorDataError::InvalidShape { axis: 1, size: -1 }));
    }

    #[test]
    #[should_panic]
    fn descriptor_axis_out_of_rank() {
        let desc =
            TensorDataStrided::new(std::ptr::null_mut(), TensorLayout::Nc, &[4, 2], &[2, 1])
                .unwrap();
        desc.stride(2);
    }
}
