use crate::stride::MAX_RANK;

/// A tensor coordinate accepted by the wraps.
///
/// Arrays list the coordinates from the first (slowest changing) to the last
/// (fastest changing) dimension. The vector types [`Int2`], [`Int3`] and [`Int4`]
/// follow the GPU convention instead: `x` is the last dimension, `y` the one before
/// it and so on, so `Int2 { x, y }` addresses `[y, x]`.
///
/// # Examples
///
/// ```
/// use kornia_tensor_wrap::{Coord, Int3};
///
/// assert_eq!([2i32, 3, 1].outer_first(), [2, 3, 1, 0]);
/// assert_eq!(Int3 { x: 1, y: 3, z: 2 }.outer_first(), [2, 3, 1, 0]);
/// assert_eq!(7i32.outer_first(), [7, 0, 0, 0]);
/// ```
pub trait Coord: Copy {
    /// Number of coordinates.
    const LEN: usize;

    /// Returns the coordinates from the first to the last dimension, zero padded.
    fn outer_first(self) -> [i32; MAX_RANK];
}

impl Coord for i32 {
    const LEN: usize = 1;

    #[inline(always)]
    fn outer_first(self) -> [i32; MAX_RANK] {
        [self, 0, 0, 0]
    }
}

impl<const K: usize> Coord for [i32; K] {
    const LEN: usize = K;

    #[inline(always)]
    fn outer_first(self) -> [i32; MAX_RANK] {
        let mut out = [0; MAX_RANK];
        let n = if K < MAX_RANK { K } else { MAX_RANK };
        out[..n].copy_from_slice(&self[..n]);
        out
    }
}

/// Two-dimensional coordinate, `x` being the fastest changing dimension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Int2 {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

/// Three-dimensional coordinate, `x` being the fastest changing dimension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Int3 {
    /// Fastest changing coordinate.
    pub x: i32,
    /// Middle coordinate.
    pub y: i32,
    /// Slowest changing coordinate.
    pub z: i32,
}

/// Four-dimensional coordinate, `x` being the fastest changing dimension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Int4 {
    /// Fastest changing coordinate.
    pub x: i32,
    /// Second fastest changing coordinate.
    pub y: i32,
    /// Second slowest changing coordinate.
    pub z: i32,
    /// Slowest changing coordinate.
    pub w: i32,
}

impl Int2 {
    /// Creates a coordinate from its components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Int3 {
    /// Creates a coordinate from its components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl Int4 {
    /// Creates a coordinate from its components.
    pub const fn new(x: i32, y: i32, z: i32, w: i32) -> Self {
        Self { x, y, z, w }
    }
}

impl Coord for Int2 {
    const LEN: usize = 2;

    #[inline(always)]
    fn outer_first(self) -> [i32; MAX_RANK] {
        [self.y, self.x, 0, 0]
    }
}

impl Coord for Int3 {
    const LEN: usize = 3;

    #[inline(always)]
    fn outer_first(self) -> [i32; MAX_RANK] {
        [self.z, self.y, self.x, 0]
    }
}

impl Coord for Int4 {
    const LEN: usize = 4;

    #[inline(always)]
    fn outer_first(self) -> [i32; MAX_RANK] {
        [self.w, self.z, self.y, self.x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_are_outer_first() {
        assert_eq!([0i32; 0].outer_first(), [0, 0, 0, 0]);
        assert_eq!([5i32].outer_first(), [5, 0, 0, 0]);
        assert_eq!([5i32, 10].outer_first(), [5, 10, 0, 0]);
        assert_eq!([2i32, 3, 1, 0].outer_first(), [2, 3, 1, 0]);
        assert_eq!(<[i32; 3] as Coord>::LEN, 3);
    }

    #[test]
    fn vectors_are_inner_first() {
        assert_eq!(Int2::new(10, 5).outer_first(), [5, 10, 0, 0]);
        assert_eq!(Int3::new(1, 3, 2).outer_first(), [2, 3, 1, 0]);
        assert_eq!(Int4::new(0, 1, 3, 2).outer_first(), [2, 3, 1, 0]);
        assert_eq!(<Int4 as Coord>::LEN, 4);
        assert_eq!(<i32 as Coord>::LEN, 1);
    }
}
