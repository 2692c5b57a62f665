use std::{fmt, marker::PhantomData};

use kornia_tensor_data::{StridedImageData, StridedTensorData};

use crate::{
    coord::Coord,
    error::TensorWrapError,
    stride::{ConstStride, Rt, StrideSpec},
};

/// Compile-time guard against coordinates with more entries than the wrap has
/// dimensions.
trait CoordFits<C: Coord>: StrideSpec {
    const FITS: ();
}

impl<S: StrideSpec, C: Coord> CoordFits<C> for S {
    const FITS: () = assert!(
        C::LEN <= S::RANK,
        "coordinate has more entries than the wrap has dimensions"
    );
}

/// Byte offset of `coord` given the run-time strides of a wrap.
///
/// Missing trailing coordinates contribute nothing. The sum stays in 32 bits so that
/// the only 64-bit operation is the final pointer addition.
#[inline(always)]
#[allow(clippy::needless_range_loop)]
fn byte_offset<S: StrideSpec, C: Coord>(strides: &S::Runtime, coord: C) -> i32 {
    #[allow(clippy::let_unit_value)]
    let () = <S as CoordFits<C>>::FITS;

    let c = coord.outer_first();
    let runtime = strides.as_ref();
    let num_runtime = if C::LEN < S::RUNTIME { C::LEN } else { S::RUNTIME };
    let num_dims = if C::LEN < S::RANK { C::LEN } else { S::RANK };

    let mut offset = 0;
    for i in 0..num_runtime {
        offset += c[i] * runtime[i];
    }
    for i in S::RUNTIME..num_dims {
        offset += c[i] * S::STRIDES[i];
    }
    offset
}

/// Reads the run-time strides of `S` from a tensor descriptor, checking its constant
/// strides along the way.
fn tensor_strides<S: StrideSpec, D: StridedTensorData + ?Sized>(
    tensor: &D,
) -> Result<S::Runtime, TensorWrapError> {
    let rank = tensor.rank();
    if rank < S::RANK {
        return Err(TensorWrapError::RankTooSmall {
            rank,
            dims: S::RANK,
        });
    }

    let mut strides = S::Runtime::default();
    for axis in 0..S::RANK {
        let stride = tensor.stride(axis);
        if axis < S::RUNTIME {
            strides.as_mut()[axis] = i32::try_from(stride)
                .map_err(|_| TensorWrapError::StrideOverflow { axis, stride })?;
        } else if stride != S::STRIDES[axis] as i64 {
            return Err(TensorWrapError::StrideMismatch {
                axis,
                expected: S::STRIDES[axis],
                actual: stride,
            });
        }
    }

    log::debug!(
        "wrapping {} tensor in {} dimensions with run-time strides {:?}",
        tensor.layout(),
        S::RANK,
        strides.as_ref()
    );

    Ok(strides)
}

/// Read-only, non-owning wrap of an N-D tensor.
///
/// The wrap holds a base address and the run-time strides of `S`; the constant strides
/// live in the type. It is a plain value: copies are independent and can be handed to
/// any number of workers, each computing addresses with no synchronization.
///
/// The wrap never checks coordinates against the tensor extents and does not keep the
/// wrapped buffer alive.
///
/// # Examples
///
/// ```
/// use kornia_tensor_wrap::{Ct, Rt, TensorWrap};
///
/// // NHWC tensor of RGB8 pixels: run-time image and row pitches, constant pixel and
/// // channel pitches.
/// let data = vec![0u8; 2 * 4 * 32];
/// let wrap = TensorWrap::<u8, (Rt, Rt, Ct<3>, Ct<1>)>::new(data.as_ptr(), [128, 32]);
///
/// let base = data.as_ptr();
/// assert_eq!(wrap.ptr([1, 2, 3, 1]), base.wrapping_add(128 + 64 + 9 + 1));
///
/// // a row pointer only needs the leading coordinates
/// assert_eq!(wrap.ptr([1, 2]), base.wrapping_add(192));
/// ```
///
/// Passing fewer or more run-time strides than the stride tuple declares does not
/// compile:
///
/// ```compile_fail
/// use kornia_tensor_wrap::Tensor3DWrap;
///
/// let data = vec![0u8; 64];
/// let _wrap = Tensor3DWrap::<u8>::new(data.as_ptr(), [16]);
/// ```
///
/// neither does addressing with more coordinates than dimensions:
///
/// ```compile_fail
/// use kornia_tensor_wrap::Tensor2DWrap;
///
/// let data = vec![0u8; 64];
/// let wrap = Tensor2DWrap::<u8>::new(data.as_ptr(), [16]);
/// let _p = wrap.ptr([0, 1, 2]);
/// ```
pub struct TensorWrap<T, S: StrideSpec> {
    data: *const u8,
    strides: S::Runtime,
    _marker: PhantomData<(*const T, fn() -> S)>,
}

impl<T, S: StrideSpec> TensorWrap<T, S> {
    /// Number of dimensions of the wrap.
    pub const NUM_DIMENSIONS: usize = S::RANK;

    /// Number of dimensions with a run-time stride.
    pub const VARIABLE_STRIDES: usize = S::RUNTIME;

    /// Number of dimensions with a constant stride.
    pub const CONSTANT_STRIDES: usize = S::CONSTANT;

    /// Wraps `data` with the given run-time strides.
    ///
    /// # Arguments
    ///
    /// * `data` - Address of the first element.
    /// * `strides` - Each run-time stride in bytes, from the first to the last run-time
    ///   dimension.
    #[inline]
    pub fn new<U>(data: *const U, strides: S::Runtime) -> Self {
        Self {
            data: data.cast(),
            strides,
            _marker: PhantomData,
        }
    }

    /// Wraps a strided tensor.
    ///
    /// The first `NUM_DIMENSIONS` axes of the tensor are matched one to one with the
    /// dimensions of the wrap.
    ///
    /// # Errors
    ///
    /// Returns an error if the tensor has fewer axes than the wrap, if a constant stride
    /// of the wrap differs from the tensor stride, or if a run-time stride does not fit
    /// in 32 bits.
    pub fn try_from_tensor<D: StridedTensorData + ?Sized>(
        tensor: &D,
    ) -> Result<Self, TensorWrapError> {
        let strides = tensor_strides::<S, D>(tensor)?;
        Ok(Self::new(tensor.base_ptr().cast_const(), strides))
    }

    /// Wraps a strided tensor.
    ///
    /// # Panics
    ///
    /// Panics on any condition reported by [`TensorWrap::try_from_tensor`]. These are
    /// defects of the caller, which is expected to have validated the tensor.
    #[track_caller]
    pub fn from_tensor<D: StridedTensorData + ?Sized>(tensor: &D) -> Self {
        match Self::try_from_tensor(tensor) {
            Ok(wrap) => wrap,
            Err(e) => panic!("{e}"),
        }
    }

    /// Returns the run-time strides in bytes.
    #[inline]
    pub fn strides(&self) -> &[i32] {
        self.strides.as_ref()
    }

    /// Returns the wrapped base address.
    #[inline]
    pub fn base_ptr(&self) -> *const u8 {
        self.data
    }

    /// Returns a pointer to the element at `coord`, or to the start of the sub-tensor
    /// when `coord` has fewer entries than the wrap has dimensions.
    ///
    /// Computing the pointer is always safe; dereferencing it is subject to the rules
    /// of [`TensorWrap::get_unchecked`].
    #[inline(always)]
    pub fn ptr<C: Coord>(&self, coord: C) -> *const T {
        let offset = byte_offset::<S, C>(&self.strides, coord);
        self.data.wrapping_offset(offset as isize).cast()
    }

    /// Returns a reference to the element at `coord`.
    ///
    /// # Safety
    ///
    /// `coord` must address an initialised and properly aligned `T` inside the wrapped
    /// buffer, the buffer must outlive the returned reference, and the element must not
    /// be written while the reference is alive.
    #[inline(always)]
    pub unsafe fn get_unchecked<C: Coord>(&self, coord: C) -> &T {
        &*self.ptr(coord)
    }
}

impl<T, C: ConstStride> TensorWrap<T, (Rt, C)> {
    /// Wraps the first plane of a pitch-linear image.
    ///
    /// Only two-dimensional wraps with a run-time row stride and a constant pixel
    /// stride can be built from an image.
    ///
    /// # Examples
    ///
    /// ```
    /// use kornia_tensor_data::{CpuAllocator, Image, ImageSize};
    /// use kornia_tensor_wrap::Tensor2DWrap;
    ///
    /// let image = Image::new(ImageSize { width: 150, height: 10 }, 4, 64, CpuAllocator).unwrap();
    /// let wrap = Tensor2DWrap::<u32>::from_image(&image);
    ///
    /// assert_eq!(wrap.strides(), &[640]);
    /// assert_eq!(wrap.ptr([5, 10]), wrap.base_ptr().wrapping_add(3240).cast());
    /// ```
    pub fn from_image<I: StridedImageData + ?Sized>(image: &I) -> Self {
        let plane = image.plane(0);
        log::debug!(
            "wrapping {} image plane with row stride {}",
            image.size(),
            plane.row_stride
        );
        Self::new(plane.base_ptr.cast_const(), [plane.row_stride])
    }
}

impl<T, S: StrideSpec> Clone for TensorWrap<T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S: StrideSpec> Copy for TensorWrap<T, S> {}

impl<T, S: StrideSpec> Default for TensorWrap<T, S> {
    fn default() -> Self {
        Self::new(std::ptr::null::<u8>(), S::Runtime::default())
    }
}

impl<T, S: StrideSpec> fmt::Debug for TensorWrap<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorWrap")
            .field("data", &self.data)
            .field("strides", &self.strides.as_ref())
            .field("constant_strides", &&S::STRIDES[S::RUNTIME..S::RANK])
            .finish()
    }
}

// SAFETY: the wrap only hands out shared access to `T`
unsafe impl<T: Sync, S: StrideSpec> Send for TensorWrap<T, S> {}
unsafe impl<T: Sync, S: StrideSpec> Sync for TensorWrap<T, S> {}

/// Read-write, non-owning wrap of an N-D tensor.
///
/// Same addressing as [`TensorWrap`] over a mutable base address. Copies of the wrap may
/// be used concurrently as long as workers write disjoint elements.
///
/// # Examples
///
/// ```
/// use kornia_tensor_wrap::{Int2, Tensor2DWrapMut};
///
/// let mut data = vec![0f32; 4 * 8];
/// let wrap = Tensor2DWrapMut::<f32>::new(data.as_mut_ptr(), [32]);
///
/// unsafe {
///     *wrap.get_unchecked_mut([2, 3]) = 1.5;
///     *wrap.get_unchecked_mut(Int2 { x: 0, y: 3 }) = 2.5;
/// }
/// assert_eq!(data[2 * 8 + 3], 1.5);
/// assert_eq!(data[3 * 8], 2.5);
/// ```
pub struct TensorWrapMut<T, S: StrideSpec> {
    data: *mut u8,
    strides: S::Runtime,
    _marker: PhantomData<(*mut T, fn() -> S)>,
}

impl<T, S: StrideSpec> TensorWrapMut<T, S> {
    /// Number of dimensions of the wrap.
    pub const NUM_DIMENSIONS: usize = S::RANK;

    /// Number of dimensions with a run-time stride.
    pub const VARIABLE_STRIDES: usize = S::RUNTIME;

    /// Number of dimensions with a constant stride.
    pub const CONSTANT_STRIDES: usize = S::CONSTANT;

    /// Wraps `data` with the given run-time strides.
    ///
    /// # Arguments
    ///
    /// * `data` - Address of the first element.
    /// * `strides` - Each run-time stride in bytes, from the first to the last run-time
    ///   dimension.
    #[inline]
    pub fn new<U>(data: *mut U, strides: S::Runtime) -> Self {
        Self {
            data: data.cast(),
            strides,
            _marker: PhantomData,
        }
    }

    /// Wraps a strided tensor.
    ///
    /// # Errors
    ///
    /// Same conditions as [`TensorWrap::try_from_tensor`].
    pub fn try_from_tensor<D: StridedTensorData + ?Sized>(
        tensor: &D,
    ) -> Result<Self, TensorWrapError> {
        let strides = tensor_strides::<S, D>(tensor)?;
        Ok(Self::new(tensor.base_ptr(), strides))
    }

    /// Wraps a strided tensor.
    ///
    /// # Panics
    ///
    /// Panics on any condition reported by [`TensorWrap::try_from_tensor`].
    #[track_caller]
    pub fn from_tensor<D: StridedTensorData + ?Sized>(tensor: &D) -> Self {
        match Self::try_from_tensor(tensor) {
            Ok(wrap) => wrap,
            Err(e) => panic!("{e}"),
        }
    }

    /// Returns the run-time strides in bytes.
    #[inline]
    pub fn strides(&self) -> &[i32] {
        self.strides.as_ref()
    }

    /// Returns the wrapped base address.
    #[inline]
    pub fn base_ptr(&self) -> *mut u8 {
        self.data
    }

    /// Returns a mutable pointer to the element at `coord`, or to the start of the
    /// sub-tensor when `coord` has fewer entries than the wrap has dimensions.
    #[inline(always)]
    pub fn ptr<C: Coord>(&self, coord: C) -> *mut T {
        let offset = byte_offset::<S, C>(&self.strides, coord);
        self.data.wrapping_offset(offset as isize).cast()
    }

    /// Returns a reference to the element at `coord`.
    ///
    /// # Safety
    ///
    /// Same contract as [`TensorWrap::get_unchecked`].
    #[inline(always)]
    pub unsafe fn get_unchecked<C: Coord>(&self, coord: C) -> &T {
        &*self.ptr(coord)
    }

    /// Returns a mutable reference to the element at `coord`.
    ///
    /// # Safety
    ///
    /// `coord` must address an initialised and properly aligned `T` inside the wrapped
    /// buffer, the buffer must outlive the returned reference, and no other reference to
    /// the same element, through this wrap, a copy of it or the buffer owner, may be
    /// alive at the same time.
    #[inline(always)]
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn get_unchecked_mut<C: Coord>(&self, coord: C) -> &mut T {
        &mut *self.ptr(coord)
    }

    /// Returns a read-only wrap over the same elements.
    #[inline]
    pub fn as_const(&self) -> TensorWrap<T, S> {
        TensorWrap::new(self.data.cast_const(), self.strides)
    }
}

impl<T, C: ConstStride> TensorWrapMut<T, (Rt, C)> {
    /// Wraps the first plane of a pitch-linear image.
    ///
    /// See [`TensorWrap::from_image`].
    pub fn from_image<I: StridedImageData + ?Sized>(image: &I) -> Self {
        let plane = image.plane(0);
        log::debug!(
            "wrapping {} image plane with row stride {}",
            image.size(),
            plane.row_stride
        );
        Self::new(plane.base_ptr, [plane.row_stride])
    }
}

impl<T, S: StrideSpec> Clone for TensorWrapMut<T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S: StrideSpec> Copy for TensorWrapMut<T, S> {}

impl<T, S: StrideSpec> Default for TensorWrapMut<T, S> {
    fn default() -> Self {
        Self::new(std::ptr::null_mut::<u8>(), S::Runtime::default())
    }
}

impl<T, S: StrideSpec> fmt::Debug for TensorWrapMut<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorWrapMut")
            .field("data", &self.data)
            .field("strides", &self.strides.as_ref())
            .field("constant_strides", &&S::STRIDES[S::RUNTIME..S::RANK])
            .finish()
    }
}

impl<T, S: StrideSpec> From<TensorWrapMut<T, S>> for TensorWrap<T, S> {
    fn from(wrap: TensorWrapMut<T, S>) -> Self {
        wrap.as_const()
    }
}

// SAFETY: writes through copies of the wrap are only sound for disjoint elements, which
// `get_unchecked_mut` requires from its callers
unsafe impl<T: Send + Sync, S: StrideSpec> Send for TensorWrapMut<T, S> {}
unsafe impl<T: Send + Sync, S: StrideSpec> Sync for TensorWrapMut<T, S> {}
