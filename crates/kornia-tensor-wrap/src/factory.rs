use kornia_tensor_data::{StridedTensorData, TensorDataAccessStridedImagePlanar};

use crate::{
    dims::{Tensor3DWrapMut, Tensor4DWrapMut},
    error::TensorWrapError,
};

/// Plans the access to an interleaved image tensor, rejecting planar layouts.
fn interleaved_access<D>(
    tensor: &D,
) -> Result<TensorDataAccessStridedImagePlanar<'_, D>, TensorWrapError>
where
    D: StridedTensorData + ?Sized,
{
    let access = TensorDataAccessStridedImagePlanar::create(tensor)?;
    let layout = access.layout();
    if layout.is_planar() {
        return Err(TensorWrapError::PlanarLayout(layout));
    }
    Ok(access)
}

fn checked_stride(axis: usize, stride: i64) -> Result<i32, TensorWrapError> {
    i32::try_from(stride).map_err(|_| TensorWrapError::StrideOverflow { axis, stride })
}

/// Creates a 3D wrap addressing `[sample, row, column]` of an image tensor.
///
/// The sample and row strides are read from the tensor; the column stride is
/// `size_of::<T>()`. Tensors without a sample axis get a sample stride of 0, so any
/// sample index addresses the single image.
///
/// # Errors
///
/// Returns an error if the tensor has no row or column axis, if its channels are
/// planar (`NCHW`, `CHW`), or if a stride does not fit in 32 bits.
pub fn try_create_tensor_wrap_nhw<T, D>(tensor: &D) -> Result<Tensor3DWrapMut<T>, TensorWrapError>
where
    D: StridedTensorData + ?Sized,
{
    let access = interleaved_access(tensor)?;
    let strides = [
        checked_stride(0, access.sample_stride())?,
        checked_stride(1, access.row_stride())?,
    ];

    log::debug!("creating NHW wrap over {} tensor with strides {strides:?}", access.layout());

    Ok(Tensor3DWrapMut::new(access.base_ptr(), strides))
}

/// Creates a 4D wrap addressing `[sample, row, column, channel]` of an image tensor.
///
/// The sample, row and column strides are read from the tensor; the channel stride is
/// `size_of::<T>()`.
///
/// # Errors
///
/// Returns an error if the tensor has no row or column axis, if its channels are
/// planar (`NCHW`, `CHW`), or if a stride does not fit in 32 bits.
///
/// # Examples
///
/// ```
/// use kornia_tensor_data::{CpuAllocator, Tensor, TensorLayout};
/// use kornia_tensor_wrap::{try_create_tensor_wrap_nhwc, Int4};
///
/// let tensor = Tensor::new(TensorLayout::Nhwc, &[2, 4, 6, 3], 1, 32, CpuAllocator).unwrap();
/// let wrap = try_create_tensor_wrap_nhwc::<u8, _>(&tensor).unwrap();
///
/// assert_eq!(wrap.strides(), &[128, 32, 3]);
/// assert_eq!(wrap.ptr(Int4::new(2, 5, 3, 1)), wrap.ptr([1, 3, 5, 2]));
/// ```
pub fn try_create_tensor_wrap_nhwc<T, D>(
    tensor: &D,
) -> Result<Tensor4DWrapMut<T>, TensorWrapError>
where
    D: StridedTensorData + ?Sized,
{
    let access = interleaved_access(tensor)?;
    let strides = [
        checked_stride(0, access.sample_stride())?,
        checked_stride(1, access.row_stride())?,
        checked_stride(2, access.col_stride())?,
    ];

    log::debug!("creating NHWC wrap over {} tensor with strides {strides:?}", access.layout());

    Ok(Tensor4DWrapMut::new(access.base_ptr(), strides))
}

/// Creates a 3D wrap addressing `[sample, row, column]` of an image tensor.
///
/// # Panics
///
/// Panics on any condition reported by [`try_create_tensor_wrap_nhw`]. Callers are
/// expected to have validated the tensor layout.
#[track_caller]
pub fn create_tensor_wrap_nhw<T, D>(tensor: &D) -> Tensor3DWrapMut<T>
where
    D: StridedTensorData + ?Sized,
{
    match try_create_tensor_wrap_nhw(tensor) {
        Ok(wrap) => wrap,
        Err(e) => panic!("{e}"),
    }
}

/// Creates a 4D wrap addressing `[sample, row, column, channel]` of an image tensor.
///
/// # Panics
///
/// Panics on any condition reported by [`try_create_tensor_wrap_nhwc`].
#[track_caller]
pub fn create_tensor_wrap_nhwc<T, D>(tensor: &D) -> Tensor4DWrapMut<T>
where
    D: StridedTensorData + ?Sized,
{
    match try_create_tensor_wrap_nhwc(tensor) {
        Ok(wrap) => wrap,
        Err(e) => panic!("{e}"),
    }
}
