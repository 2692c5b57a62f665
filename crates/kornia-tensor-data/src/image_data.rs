use crate::{error::TensorDataError, size::ImageSize};

/// The highest number of planes an image descriptor can hold.
pub const MAX_IMAGE_PLANES: usize = 4;

/// One plane of a pitch-linear image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImagePlaneStrided {
    /// Width of the plane in pixels.
    pub width: i32,
    /// Height of the plane in pixels.
    pub height: i32,
    /// Distance in bytes between the start of two consecutive rows.
    pub row_stride: i32,
    /// Address of the first pixel of the plane.
    pub base_ptr: *mut u8,
}

impl Default for ImagePlaneStrided {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            row_stride: 0,
            base_ptr: std::ptr::null_mut(),
        }
    }
}

/// Read-only description of a pitch-linear image made of one or more planes.
pub trait StridedImageData {
    /// Returns the size of the first plane.
    fn size(&self) -> ImageSize;

    /// Returns the number of planes.
    fn num_planes(&self) -> usize;

    /// Returns the plane at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_planes()`.
    fn plane(&self, index: usize) -> ImagePlaneStrided;
}

/// A plain exported image descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageDataStrided {
    planes: [ImagePlaneStrided; MAX_IMAGE_PLANES],
    num_planes: usize,
}

impl ImageDataStrided {
    /// Creates a descriptor for an image with a single plane.
    pub fn from_plane(plane: ImagePlaneStrided) -> Self {
        let mut planes = [ImagePlaneStrided::default(); MAX_IMAGE_PLANES];
        planes[0] = plane;
        Self {
            planes,
            num_planes: 1,
        }
    }

    /// Creates a descriptor from a list of planes.
    ///
    /// # Errors
    ///
    /// Returns an error if no plane or more than [`MAX_IMAGE_PLANES`] planes are given.
    pub fn from_planes(planes: &[ImagePlaneStrided]) -> Result<Self, TensorDataError> {
        if planes.is_empty() || planes.len() > MAX_IMAGE_PLANES {
            return Err(TensorDataError::InvalidPlaneCount(planes.len()));
        }
        let mut desc = Self::from_plane(planes[0]);
        desc.planes[..planes.len()].copy_from_slice(planes);
        desc.num_planes = planes.len();
        Ok(desc)
    }

    /// Returns the plane at `index`, or an error if the image has fewer planes.
    pub fn try_plane(&self, index: usize) -> Result<ImagePlaneStrided, TensorDataError> {
        if index >= self.num_planes {
            return Err(TensorDataError::PlaneOutOfBounds {
                index,
                num_planes: self.num_planes,
            });
        }
        Ok(self.planes[index])
    }
}

impl StridedImageData for ImageDataStrided {
    fn size(&self) -> ImageSize {
        ImageSize {
            width: self.planes[0].width,
            height: self.planes[0].height,
        }
    }

    #[inline]
    fn num_planes(&self) -> usize {
        self.num_planes
    }

    fn plane(&self, index: usize) -> ImagePlaneStrided {
        self.planes[..self.num_planes][index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_plane() -> Result<(), TensorDataError> {
        let mut data = vec![0u8; 480 * 640];
        let image = ImageDataStrided::from_plane(ImagePlaneStrided {
            width: 160,
            height: 480,
            row_stride: 640,
            base_ptr: data.as_mut_ptr(),
        });
        assert_eq!(image.num_planes(), 1);
        assert_eq!(image.size(), ImageSize::from([160, 480]));
        assert_eq!(image.plane(0).row_stride, 640);
        assert_eq!(image.plane(0).base_ptr, data.as_mut_ptr());
        assert_eq!(
            image.try_plane(1),
            Err(TensorDataError::PlaneOutOfBounds {
                index: 1,
                num_planes: 1
            })
        );
        Ok(())
    }

    #[test]
    fn multi_plane() -> Result<(), TensorDataError> {
        let luma = ImagePlaneStrided {
            width: 64,
            height: 32,
            row_stride: 64,
            base_ptr: std::ptr::null_mut(),
        };
        let chroma = ImagePlaneStrided {
            width: 32,
            height: 16,
            row_stride: 64,
            base_ptr: std::ptr::null_mut(),
        };
        let image = ImageDataStrided::from_planes(&[luma, chroma])?;
        assert_eq!(image.num_planes(), 2);
        assert_eq!(image.plane(1), chroma);
        assert_eq!(image.size(), ImageSize::from([64, 32]));

        assert!(ImageDataStrided::from_planes(&[]).is_err());
        assert!(ImageDataStrided::from_planes(&[luma; 5]).is_err());
        Ok(())
    }
}
