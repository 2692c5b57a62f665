use crate::{
    allocator::{CpuAllocator, TensorAllocator},
    error::TensorDataError,
    image_data::{ImageDataStrided, ImagePlaneStrided, StridedImageData},
    layout::{Axis, TensorLayout},
    size::ImageSize,
    storage::TensorStorage,
    tensor_data::{StridedTensorData, TensorDataStrided},
};

/// Minimum alignment of the first byte of every buffer.
const BASE_ALIGN: usize = 16;

/// Computes the byte strides of a pitch-linear tensor.
///
/// The last axis is packed with `dtype_size` bytes per element and every other axis
/// is packed over the next one, except the row axis whose stride is rounded up to
/// `row_align`. The row axis is `H` for image layouts and the second to last axis
/// otherwise.
///
/// # Examples
///
/// ```
/// use kornia_tensor_data::{tensor::get_pitch_strides, TensorLayout};
///
/// // 2 images of 3x5 RGB8 pixels, rows aligned to 32 bytes
/// let strides = get_pitch_strides(TensorLayout::Nhwc, &[2, 3, 5, 3], 1, 32).unwrap();
/// assert_eq!(strides, vec![96, 32, 3, 1]);
/// ```
pub fn get_pitch_strides(
    layout: TensorLayout,
    shape: &[i64],
    dtype_size: usize,
    row_align: usize,
) -> Result<Vec<i64>, TensorDataError> {
    let rank = layout.rank();
    if shape.len() != rank {
        return Err(TensorDataError::RankMismatch {
            layout,
            expected: rank,
            actual: shape.len(),
        });
    }
    if let Some(axis) = shape.iter().position(|&s| s < 0) {
        return Err(TensorDataError::InvalidShape {
            axis,
            size: shape[axis],
        });
    }
    if !row_align.is_power_of_two() || row_align > i64::MAX as usize {
        return Err(TensorDataError::InvalidAlignment(row_align));
    }

    let overflow = || TensorDataError::SizeOverflow(shape.to_vec());
    let row_axis = layout.axis_index(Axis::H).or(rank.checked_sub(2));
    let align = row_align as i64;

    let mut strides = vec![0; rank];
    let mut stride = i64::try_from(dtype_size).map_err(|_| overflow())?;
    for axis in (0..rank).rev() {
        if Some(axis) == row_axis {
            stride = stride.checked_add(align - 1).ok_or_else(overflow)? & !(align - 1);
        }
        strides[axis] = stride;
        stride = stride.checked_mul(shape[axis]).ok_or_else(overflow)?;
    }
    Ok(strides)
}

/// An owning pitch-linear tensor buffer.
///
/// The buffer is zero-initialised, freed on drop, and describes itself through
/// [`StridedTensorData`] so that kernels can wrap it without copying.
///
/// # Examples
///
/// ```
/// use kornia_tensor_data::{CpuAllocator, StridedTensorData, Tensor, TensorLayout};
///
/// let tensor = Tensor::new(TensorLayout::Hwc, &[480, 640, 3], 1, 256, CpuAllocator).unwrap();
/// assert_eq!(tensor.stride(0), 2048);
/// assert_eq!(tensor.stride(1), 3);
/// assert_eq!(tensor.len_bytes(), 480 * 2048);
/// ```
#[derive(Debug)]
pub struct Tensor<A: TensorAllocator = CpuAllocator> {
    storage: TensorStorage<A>,
    desc: TensorDataStrided,
}

impl<A: TensorAllocator> Tensor<A> {
    /// Allocates a zeroed pitch-linear tensor.
    ///
    /// # Arguments
    ///
    /// * `layout` - The axis order of the tensor.
    /// * `shape` - The number of elements per axis.
    /// * `dtype_size` - The size in bytes of one element of the last axis.
    /// * `row_align` - The alignment in bytes of every row, a power of two.
    /// * `alloc` - The allocator for the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not match the layout, the alignment is not a
    /// power of two, the size overflows or the allocation fails.
    pub fn new(
        layout: TensorLayout,
        shape: &[i64],
        dtype_size: usize,
        row_align: usize,
        alloc: A,
    ) -> Result<Self, TensorDataError> {
        let strides = get_pitch_strides(layout, shape, dtype_size, row_align)?;
        let len = match shape.first() {
            Some(&outer) => strides[0].checked_mul(outer),
            None => Some(0),
        }
        .and_then(|len| usize::try_from(len).ok())
        .ok_or_else(|| TensorDataError::SizeOverflow(shape.to_vec()))?;

        let mut storage = TensorStorage::new(len, row_align.max(BASE_ALIGN), alloc)?;
        let desc = TensorDataStrided::new(storage.as_mut_ptr(), layout, shape, &strides)?;

        log::debug!(
            "allocated {layout} tensor with shape {shape:?}, strides {strides:?} ({len} bytes)"
        );

        Ok(Self { storage, desc })
    }

    /// Exports the plain descriptor of the tensor.
    ///
    /// The descriptor points into this buffer and must not outlive it. Writing through
    /// it requires that no other reference to the buffer is in use.
    #[inline]
    pub fn export_data(&self) -> TensorDataStrided {
        self.desc
    }

    /// Returns the shape of all axes.
    #[inline]
    pub fn shape_slice(&self) -> &[i64] {
        self.desc.shape_slice()
    }

    /// Returns the byte strides of all axes.
    #[inline]
    pub fn strides_slice(&self) -> &[i64] {
        self.desc.strides_slice()
    }

    /// Returns the size of the buffer in bytes, row padding included.
    #[inline]
    pub fn len_bytes(&self) -> usize {
        self.storage.len()
    }

    /// Returns the whole buffer as bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.storage.as_slice()
    }

    /// Returns the whole buffer as mutable bytes.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.storage.as_mut_slice()
    }
}

impl<A: TensorAllocator> StridedTensorData for Tensor<A> {
    #[inline]
    fn layout(&self) -> TensorLayout {
        self.desc.layout()
    }

    #[inline]
    fn shape(&self, axis: usize) -> i64 {
        self.desc.shape(axis)
    }

    #[inline]
    fn stride(&self, axis: usize) -> i64 {
        self.desc.stride(axis)
    }

    #[inline]
    fn base_ptr(&self) -> *mut u8 {
        self.desc.base_ptr()
    }
}

/// An owning single-plane pitch-linear image.
///
/// The pixels are stored as an `HWC` tensor with one channel of `pixel_size` bytes.
///
/// # Examples
///
/// ```
/// use kornia_tensor_data::{CpuAllocator, Image, ImageSize, StridedImageData};
///
/// let image = Image::new(ImageSize { width: 150, height: 100 }, 4, 64, CpuAllocator).unwrap();
/// assert_eq!(image.plane(0).row_stride, 640);
/// assert_eq!(image.size().to_string(), "150x100");
/// ```
#[derive(Debug)]
pub struct Image<A: TensorAllocator = CpuAllocator> {
    tensor: Tensor<A>,
    plane: ImagePlaneStrided,
}

impl<A: TensorAllocator> Image<A> {
    /// Allocates a zeroed image.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `pixel_size` - The size of one pixel in bytes.
    /// * `row_align` - The alignment in bytes of every row, a power of two.
    /// * `alloc` - The allocator for the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is negative, the row stride does not fit in 32 bits
    /// or the allocation fails.
    pub fn new(
        size: ImageSize,
        pixel_size: usize,
        row_align: usize,
        alloc: A,
    ) -> Result<Self, TensorDataError> {
        let shape = [size.height as i64, size.width as i64, 1];
        let tensor = Tensor::new(TensorLayout::Hwc, &shape, pixel_size, row_align, alloc)?;
        let row_stride = i32::try_from(tensor.stride(0))
            .map_err(|_| TensorDataError::SizeOverflow(shape.to_vec()))?;
        let plane = ImagePlaneStrided {
            width: size.width,
            height: size.height,
            row_stride,
            base_ptr: tensor.base_ptr(),
        };
        Ok(Self { tensor, plane })
    }

    /// Exports the plain descriptor of the image.
    ///
    /// The same aliasing rules as [`Tensor::export_data`] apply.
    #[inline]
    pub fn export_data(&self) -> ImageDataStrided {
        ImageDataStrided::from_plane(self.plane)
    }

    /// Returns the pixels as an `HWC` tensor with a single channel.
    #[inline]
    pub fn as_tensor(&self) -> &Tensor<A> {
        &self.tensor
    }

    /// Returns the whole buffer as bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.tensor.as_bytes()
    }

    /// Returns the whole buffer as mutable bytes.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.tensor.as_bytes_mut()
    }
}

impl<A: TensorAllocator> StridedImageData for Image<A> {
    fn size(&self) -> ImageSize {
        ImageSize {
            width: self.plane.width,
            height: self.plane.height,
        }
    }

    fn num_planes(&self) -> usize {
        1
    }

    fn plane(&self, index: usize) -> ImagePlaneStrided {
        assert_eq!(index, 0, "image has a single plane");
        self.plane
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_strides_nhwc() -> Result<(), TensorDataError> {
        let strides = get_pitch_strides(TensorLayout::Nhwc, &[2, 3, 5, 3], 1, 32)?;
        assert_eq!(strides, vec![96, 32, 3, 1]);

        let strides = get_pitch_strides(TensorLayout::Nhwc, &[2, 3, 8, 4], 1, 32)?;
        assert_eq!(strides, vec![96, 32, 4, 1]);
        Ok(())
    }

    #[test]
    fn pitch_strides_planar() -> Result<(), TensorDataError> {
        let strides = get_pitch_strides(TensorLayout::Nchw, &[1, 3, 4, 10], 4, 64)?;
        assert_eq!(strides, vec![768, 256, 64, 4]);

        let strides = get_pitch_strides(TensorLayout::Chw, &[3, 4, 10], 4, 1)?;
        assert_eq!(strides, vec![160, 40, 4]);
        Ok(())
    }

    #[test]
    fn pitch_strides_non_image() -> Result<(), TensorDataError> {
        let strides = get_pitch_strides(TensorLayout::Nc, &[7, 3], 2, 8)?;
        assert_eq!(strides, vec![8, 2]);

        let strides = get_pitch_strides(TensorLayout::Ncw, &[2, 3, 5], 4, 32)?;
        assert_eq!(strides, vec![96, 32, 4]);
        Ok(())
    }

    #[test]
    fn pitch_strides_errors() {
        assert_eq!(
            get_pitch_strides(TensorLayout::Hwc, &[2, 3, 4], 1, 3),
            Err(TensorDataError::InvalidAlignment(3))
        );
        assert!(matches!(
            get_pitch_strides(TensorLayout::Hwc, &[2, 3], 1, 4),
            Err(TensorDataError::RankMismatch { .. })
        ));
        assert!(matches!(
            get_pitch_strides(TensorLayout::Hwc, &[2, 3, i64::MAX], 4, 4),
            Err(TensorDataError::SizeOverflow(_))
        ));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn pitch_strides_alignment_beyond_i64() {
        let row_align = 1usize << 63;
        assert_eq!(
            get_pitch_strides(TensorLayout::Hwc, &[2, 3, 4], 1, row_align),
            Err(TensorDataError::InvalidAlignment(row_align))
        );
        assert_eq!(
            get_pitch_strides(TensorLayout::Hwc, &[1, 3, 4], 1, 1 << 62).map(|s| s[0]),
            Ok(1 << 62)
        );
    }

    #[test]
    fn tensor_alloc() -> Result<(), TensorDataError> {
        let mut tensor = Tensor::new(TensorLayout::Nhwc, &[2, 3, 5, 3], 1, 32, CpuAllocator)?;
        assert_eq!(tensor.len_bytes(), 192);
        assert_eq!(tensor.shape_slice(), &[2, 3, 5, 3]);
        assert_eq!(tensor.strides_slice(), &[96, 32, 3, 1]);
        assert_eq!(tensor.base_ptr() as usize % 32, 0);
        assert!(tensor.as_bytes().iter().all(|&b| b == 0));

        tensor.as_bytes_mut()[96 + 32 + 3] = 42;
        let desc = tensor.export_data();
        assert_eq!(desc.base_ptr(), tensor.base_ptr());
        let value = unsafe { *desc.base_ptr().add(131) };
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn tensor_empty() -> Result<(), TensorDataError> {
        let tensor = Tensor::new(TensorLayout::Hwc, &[0, 3, 3], 1, 1, CpuAllocator)?;
        assert_eq!(tensor.len_bytes(), 0);
        assert!(tensor.as_bytes().is_empty());
        Ok(())
    }

    #[test]
    fn image_alloc() -> Result<(), TensorDataError> {
        let image = Image::new(ImageSize::from([10, 4]), 3, 16, CpuAllocator)?;
        assert_eq!(image.num_planes(), 1);
        assert_eq!(image.size(), ImageSize::from([10, 4]));

        let plane = image.export_data().plane(0);
        assert_eq!(plane.row_stride, 32);
        assert_eq!(plane.width, 10);
        assert_eq!(plane.height, 4);
        assert_eq!(plane.base_ptr, image.as_tensor().base_ptr());
        assert_eq!(image.as_bytes().len(), 128);
        Ok(())
    }

    #[test]
    fn image_negative_size() {
        let res = Image::new(ImageSize::from([-1, 4]), 1, 1, CpuAllocator);
        assert!(matches!(res, Err(TensorDataError::InvalidShape { axis: 1, .. })));
    }
}
