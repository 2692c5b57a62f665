use crate::{
    stride::{Rt, SizeOf},
    wrap::{TensorWrap, TensorWrapMut},
};

/// Read-only 1D wrap of a packed array of `T`.
pub type Tensor1DWrap<T> = TensorWrap<T, (SizeOf<T>,)>;

/// Read-only 2D wrap with a run-time row stride.
pub type Tensor2DWrap<T> = TensorWrap<T, (Rt, SizeOf<T>)>;

/// Read-only 3D wrap with run-time plane and row strides.
pub type Tensor3DWrap<T> = TensorWrap<T, (Rt, Rt, SizeOf<T>)>;

/// Read-only 4D wrap with three run-time strides.
pub type Tensor4DWrap<T> = TensorWrap<T, (Rt, Rt, Rt, SizeOf<T>)>;

/// Read-write 1D wrap of a packed array of `T`.
pub type Tensor1DWrapMut<T> = TensorWrapMut<T, (SizeOf<T>,)>;

/// Read-write 2D wrap with a run-time row stride.
pub type Tensor2DWrapMut<T> = TensorWrapMut<T, (Rt, SizeOf<T>)>;

/// Read-write 3D wrap with run-time plane and row strides.
pub type Tensor3DWrapMut<T> = TensorWrapMut<T, (Rt, Rt, SizeOf<T>)>;

/// Read-write 4D wrap with three run-time strides.
pub type Tensor4DWrapMut<T> = TensorWrapMut<T, (Rt, Rt, Rt, SizeOf<T>)>;

/// Number of dimensions as a type, see [`TensorNDWrap`].
pub struct Dims<const N: usize>;

/// Maps a number of dimensions to its wrap shortcuts.
///
/// Only implemented for 1 to 4 dimensions.
pub trait SelectWrap<T> {
    /// The read-only wrap.
    type Wrap;
    /// The read-write wrap.
    type WrapMut;
}

impl<T> SelectWrap<T> for Dims<1> {
    type Wrap = Tensor1DWrap<T>;
    type WrapMut = Tensor1DWrapMut<T>;
}

impl<T> SelectWrap<T> for Dims<2> {
    type Wrap = Tensor2DWrap<T>;
    type WrapMut = Tensor2DWrapMut<T>;
}

impl<T> SelectWrap<T> for Dims<3> {
    type Wrap = Tensor3DWrap<T>;
    type WrapMut = Tensor3DWrapMut<T>;
}

impl<T> SelectWrap<T> for Dims<4> {
    type Wrap = Tensor4DWrap<T>;
    type WrapMut = Tensor4DWrapMut<T>;
}

/// Read-only wrap of `N` dimensions with a packed innermost dimension.
///
/// # Examples
///
/// ```
/// use kornia_tensor_wrap::{Tensor3DWrap, TensorNDWrap};
///
/// let data = vec![0u16; 64];
/// let wrap: TensorNDWrap<u16, 3> = Tensor3DWrap::new(data.as_ptr(), [64, 16]);
/// assert_eq!(<TensorNDWrap<u16, 3>>::NUM_DIMENSIONS, 3);
/// // 64 + 16 + 2 bytes
/// assert_eq!(wrap.ptr([1, 1, 1]), data.as_ptr().wrapping_add(41));
/// ```
///
/// There is no wrap of zero or more than four dimensions:
///
/// ```compile_fail
/// use kornia_tensor_wrap::TensorNDWrap;
///
/// let _wrap = TensorNDWrap::<u8, 5>::default();
/// ```
///
/// ```compile_fail
/// use kornia_tensor_wrap::TensorNDWrapMut;
///
/// let _wrap = TensorNDWrapMut::<u8, 0>::default();
/// ```
pub type TensorNDWrap<T, const N: usize> = <Dims<N> as SelectWrap<T>>::Wrap;

/// Read-write wrap of `N` dimensions with a packed innermost dimension.
pub type TensorNDWrapMut<T, const N: usize> = <Dims<N> as SelectWrap<T>>::WrapMut;
