/// Image size in pixels
///
/// Sizes compare by width first and then by height.
///
/// # Examples
///
/// ```
/// use kornia_tensor_data::ImageSize;
///
/// let size = ImageSize {
///     width: 640,
///     height: 480,
/// };
///
/// assert_eq!(size.to_string(), "640x480");
/// assert!(size < ImageSize { width: 640, height: 481 });
/// assert!(size > ImageSize { width: 320, height: 1080 });
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: i32,
    /// Height of the image in pixels
    pub height: i32,
}

impl ImageSize {
    /// Returns the number of pixels.
    #[inline]
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<[i32; 2]> for ImageSize {
    fn from(size: [i32; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

impl From<ImageSize> for [i32; 2] {
    fn from(size: ImageSize) -> Self {
        [size.width, size.height]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_width_first() {
        let a = ImageSize::from([10, 20]);
        let b = ImageSize::from([10, 30]);
        let c = ImageSize::from([11, 0]);
        assert!(a < b);
        assert!(b < c);
        assert_ne!(a, b);
        assert_eq!(a, ImageSize { width: 10, height: 20 });
        assert_eq!(<[i32; 2]>::from(c), [11, 0]);
    }

    #[test]
    fn display_and_area() {
        let size = ImageSize::from([1920, 1080]);
        assert_eq!(format!("{size}"), "1920x1080");
        assert_eq!(size.area(), 2_073_600);
    }
}
