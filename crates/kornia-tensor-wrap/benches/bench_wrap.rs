use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kornia_tensor_data::{CpuAllocator, Tensor, TensorLayout};
use kornia_tensor_wrap::{create_tensor_wrap_nhwc, Ct, Rt, Tensor4DWrap, TensorWrap};
use rand::Rng;

fn bench_ptr(c: &mut Criterion) {
    let mut group = c.benchmark_group("ptr");
    let mut rng = rand::rng();

    let data = vec![0u8; 1 << 20];
    let runtime = Tensor4DWrap::<f32>::new(data.as_ptr(), [1 << 18, 1 << 12, 16]);
    let constant = TensorWrap::<f32, (Rt, Ct<4096>, Ct<16>, Ct<4>)>::new(data.as_ptr(), [1 << 18]);

    let coords: Vec<[i32; 4]> = (0..1024)
        .map(|_| {
            [
                rng.random_range(0..4),
                rng.random_range(0..64),
                rng.random_range(0..256),
                rng.random_range(0..4),
            ]
        })
        .collect();

    group.bench_function("runtime_strides", |bencher| {
        bencher.iter(|| {
            for &coord in &coords {
                black_box(runtime.ptr(coord));
            }
        })
    });

    group.bench_function("constant_strides", |bencher| {
        bencher.iter(|| {
            for &coord in &coords {
                black_box(constant.ptr(coord));
            }
        })
    });

    let strides = [1i64 << 18, 1 << 12, 16, 4];
    group.bench_function("index_arithmetic_i64", |bencher| {
        bencher.iter(|| {
            for coord in &coords {
                let offset: i64 = coord.iter().zip(&strides).map(|(&c, &s)| c as i64 * s).sum();
                black_box(data.as_ptr().wrapping_offset(offset as isize));
            }
        })
    });

    group.finish();
}

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_nhwc");

    let test_sizes = vec![(64, 64), (256, 256), (640, 480)];

    for (width, height) in test_sizes {
        let tensor = Tensor::new(
            TensorLayout::Nhwc,
            &[1, height as i64, width as i64, 3],
            1,
            64,
            CpuAllocator,
        )
        .unwrap();
        let dst = create_tensor_wrap_nhwc::<u8, _>(&tensor);

        group.bench_function(format!("u8_{width}x{height}"), |bencher| {
            bencher.iter(|| {
                for y in 0..height {
                    for x in 0..width {
                        for ch in 0..3 {
                            unsafe { *dst.get_unchecked_mut([0, y, x, ch]) = (x ^ y) as u8 };
                        }
                    }
                }
                black_box(dst)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ptr, bench_fill);
criterion_main!(benches);
