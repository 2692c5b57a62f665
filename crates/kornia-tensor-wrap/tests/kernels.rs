use approx::assert_relative_eq;
use kornia_tensor_data::{CpuAllocator, StridedTensorData, Tensor, TensorLayout};
use kornia_tensor_wrap::{
    create_tensor_wrap_nhwc, try_create_tensor_wrap_nhwc, Ct, Int4, Rt, SizeOf, Tensor4DWrap,
    TensorWrap, TensorWrapError, TensorWrapMut,
};
use rand::Rng;
use rayon::prelude::*;

#[test]
fn parallel_fill_disjoint_rows() -> Result<(), TensorWrapError> {
    let (samples, rows, cols) = (2, 37, 53);
    let tensor = Tensor::new(TensorLayout::Nhwc, &[samples, rows, cols, 3], 1, 64, CpuAllocator)?;
    let dst = create_tensor_wrap_nhwc::<u8, _>(&tensor);

    // one worker per row, each holding its own copy of the wrap
    (0..(samples * rows) as i32).into_par_iter().for_each(|i| {
        let wrap = dst;
        let (n, y) = (i / rows as i32, i % rows as i32);
        for x in 0..cols as i32 {
            for c in 0..3 {
                let value = ((n * 7 + y * 3 + x + c) % 251) as u8;
                unsafe { *wrap.get_unchecked_mut(Int4::new(c, x, y, n)) = value };
            }
        }
    });

    let strides = tensor.strides_slice();
    let bytes = tensor.as_bytes();
    for n in 0..samples {
        for y in 0..rows {
            for x in 0..cols {
                for c in 0..3 {
                    let offset = n * strides[0] + y * strides[1] + x * strides[2] + c;
                    let expected = ((n * 7 + y * 3 + x + c) % 251) as u8;
                    assert_eq!(bytes[offset as usize], expected);
                }
            }
        }
    }
    Ok(())
}

#[test]
fn normalize_hwc_to_nchw() -> Result<(), TensorWrapError> {
    let (rows, cols) = (12, 17);
    let mean = [0.485f32, 0.456, 0.406];
    let stddev = [0.229f32, 0.224, 0.225];

    let mut src = Tensor::new(TensorLayout::Hwc, &[rows, cols, 3], 1, 32, CpuAllocator)?;
    let row_stride = src.stride(0) as usize;
    for (y, row) in src.as_bytes_mut().chunks_exact_mut(row_stride).enumerate() {
        for (i, v) in row[..cols as usize * 3].iter_mut().enumerate() {
            *v = ((y * 31 + i * 5) % 256) as u8;
        }
    }
    let dst = Tensor::new(TensorLayout::Nchw, &[1, 3, rows, cols], 4, 32, CpuAllocator)?;

    let src_wrap: Tensor4DWrap<u8> = try_create_tensor_wrap_nhwc::<u8, _>(&src)?.into();
    let dst_wrap = TensorWrapMut::<f32, (Rt, Rt, Rt, SizeOf<f32>)>::try_from_tensor(&dst)?;

    (0..rows as i32).into_par_iter().for_each(|y| {
        for x in 0..cols as i32 {
            for c in 0..3 {
                let pixel = unsafe { *src_wrap.get_unchecked([0, y, x, c]) };
                let value = (pixel as f32 / 255.0 - mean[c as usize]) / stddev[c as usize];
                unsafe { *dst_wrap.get_unchecked_mut([0, c, y, x]) = value };
            }
        }
    });

    let src_view = TensorWrap::<u8, (Rt, Ct<3>, Ct<1>)>::try_from_tensor(&src)?;
    let dst_view = dst_wrap.as_const();
    for y in 0..rows as i32 {
        for x in 0..cols as i32 {
            for c in 0..3 {
                let pixel = unsafe { *src_view.get_unchecked([y, x, c]) };
                assert_eq!(pixel, ((y * 31 + (x * 3 + c) * 5) % 256) as u8);

                let value = unsafe { *dst_view.get_unchecked(Int4::new(x, y, c, 0)) };
                let expected = (pixel as f32 / 255.0 - mean[c as usize]) / stddev[c as usize];
                assert_relative_eq!(value, expected, epsilon = 1e-6);
            }
        }
    }
    Ok(())
}

#[test]
fn random_offsets_match_reference() {
    let mut rng = rand::rng();
    let data = vec![0u8; 16];
    let base = data.as_ptr();

    for _ in 0..1000 {
        let strides: [i32; 3] = [
            rng.random_range(0..4096),
            rng.random_range(0..1024),
            rng.random_range(0..256),
        ];
        let coord: [i32; 4] = [
            rng.random_range(-64..64),
            rng.random_range(-64..64),
            rng.random_range(-64..64),
            rng.random_range(-64..64),
        ];
        let wrap = TensorWrap::<u32, (Rt, Rt, Rt, Ct<4>)>::new(base, strides);

        let expected = coord[0] as isize * strides[0] as isize
            + coord[1] as isize * strides[1] as isize
            + coord[2] as isize * strides[2] as isize
            + coord[3] as isize * 4;
        assert_eq!(wrap.ptr(coord), base.wrapping_offset(expected).cast());

        // leading coordinates address the start of the sub-tensor
        let row = [coord[0], coord[1]];
        assert_eq!(wrap.ptr(row), wrap.ptr([coord[0], coord[1], 0, 0]));
        assert_eq!(
            wrap.ptr(Int4::new(coord[3], coord[2], coord[1], coord[0])),
            wrap.ptr(coord)
        );
    }
}
