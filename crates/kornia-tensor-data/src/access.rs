use crate::{
    error::TensorDataError,
    layout::{Axis, TensorLayout},
    tensor_data::StridedTensorData,
};

/// Image-oriented accessor over a strided tensor descriptor.
///
/// Maps the layout axes of an image tensor (`NHWC`, `HWC`, `NCHW`, `CHW`) to the
/// sample, row, column and channel strides that kernels need, regardless of where
/// each axis sits in the layout.
///
/// # Examples
///
/// ```
/// use kornia_tensor_data::{TensorDataAccessStridedImagePlanar, TensorDataStrided, TensorLayout};
///
/// let mut data = vec![0u8; 3 * 16 * 64];
/// let desc = TensorDataStrided::new(
///     data.as_mut_ptr(),
///     TensorLayout::Chw,
///     &[3, 16, 60],
///     &[1024, 64, 1],
/// )
/// .unwrap();
///
/// let access = TensorDataAccessStridedImagePlanar::create(&desc).unwrap();
/// assert_eq!(access.num_channels(), 3);
/// assert_eq!(access.row_stride(), 64);
/// assert_eq!(access.col_stride(), 1);
/// assert_eq!(access.chan_stride(), 1024);
/// assert_eq!(access.sample_stride(), 0);
/// ```
#[derive(Debug)]
pub struct TensorDataAccessStridedImagePlanar<'a, D: StridedTensorData + ?Sized> {
    data: &'a D,
    idx_n: Option<usize>,
    idx_c: Option<usize>,
    idx_h: usize,
    idx_w: usize,
}

impl<'a, D: StridedTensorData + ?Sized> TensorDataAccessStridedImagePlanar<'a, D> {
    /// Creates the accessor for `data`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorDataError::NotImagePlanar`] if the layout has no row or no column axis.
    pub fn create(data: &'a D) -> Result<Self, TensorDataError> {
        let layout = data.layout();
        let (Some(idx_h), Some(idx_w)) = (layout.axis_index(Axis::H), layout.axis_index(Axis::W))
        else {
            return Err(TensorDataError::NotImagePlanar(layout));
        };
        Ok(Self {
            data,
            idx_n: layout.axis_index(Axis::N),
            idx_c: layout.axis_index(Axis::C),
            idx_h,
            idx_w,
        })
    }

    /// Returns the layout of the wrapped tensor.
    #[inline]
    pub fn layout(&self) -> TensorLayout {
        self.data.layout()
    }

    /// Returns the address of the first element.
    #[inline]
    pub fn base_ptr(&self) -> *mut u8 {
        self.data.base_ptr()
    }

    /// Number of samples, 1 for layouts without a sample axis.
    pub fn num_samples(&self) -> i64 {
        self.idx_n.map_or(1, |i| self.data.shape(i))
    }

    /// Number of rows of each sample.
    pub fn num_rows(&self) -> i64 {
        self.data.shape(self.idx_h)
    }

    /// Number of columns of each row.
    pub fn num_cols(&self) -> i64 {
        self.data.shape(self.idx_w)
    }

    /// Number of channels, 1 for layouts without a channel axis.
    pub fn num_channels(&self) -> i64 {
        self.idx_c.map_or(1, |i| self.data.shape(i))
    }

    /// Bytes between two samples, 0 for layouts without a sample axis.
    pub fn sample_stride(&self) -> i64 {
        self.idx_n.map_or(0, |i| self.data.stride(i))
    }

    /// Bytes between two rows.
    pub fn row_stride(&self) -> i64 {
        self.data.stride(self.idx_h)
    }

    /// Bytes between two columns.
    pub fn col_stride(&self) -> i64 {
        self.data.stride(self.idx_w)
    }

    /// Bytes between two channels, 0 for layouts without a channel axis.
    pub fn chan_stride(&self) -> i64 {
        self.idx_c.map_or(0, |i| self.data.stride(i))
    }
}
