use criterion::{Criterion, criterion_group, criterion_main};

use rasterbits::{
    Image, ImageSize, PixelFormat, ReaderRgba, RGB8, RGBA8, RGBA16, YUV420P, YUV444P, YUVA420P,
    color_convert,
};
use std::hint::black_box;

const IMAGE_WIDTH: usize = 1920;
const IMAGE_HEIGHT: usize = 1080;

const SIZE: ImageSize = ImageSize::new(IMAGE_WIDTH, IMAGE_HEIGHT);

fn do_convert(src: &Image, dst: &mut Image) {
    assert!(color_convert(black_box(src), black_box(dst)));
}

#[cfg(feature = "multi-thread")]
fn do_convert_multi_thread(src: &Image, dst: &mut Image) {
    use rasterbits::color_convert_multi_thread;

    assert!(color_convert_multi_thread(black_box(src), black_box(dst)));
}

type ConvertFunction = fn(&Image, &mut Image);

fn run_benchmarks(c: &mut Criterion, do_convert: ConvertFunction, s: &str) {
    let mut rgb = Image::create(SIZE, RGB8);
    let mut rgba = Image::create(SIZE, RGBA8);
    let mut yuv444 = Image::create(SIZE, YUV444P);
    let mut yuv420 = Image::create(SIZE, YUV420P);
    let mut yuva420 = Image::create(SIZE, YUVA420P);

    c.bench_function(&format!("RGB to YUV444p {s}"), |b| {
        b.iter(|| {
            do_convert(&rgb, &mut yuv444);
        })
    });

    c.bench_function(&format!("YUV444p to RGB {s}"), |b| {
        b.iter(|| {
            do_convert(&yuv444, &mut rgb);
        })
    });

    c.bench_function(&format!("RGBA to YUV444p {s}"), |b| {
        b.iter(|| {
            do_convert(&rgba, &mut yuv444);
        })
    });

    c.bench_function(&format!("YUV444p to RGBA {s}"), |b| {
        b.iter(|| {
            do_convert(&yuv444, &mut rgba);
        })
    });

    c.bench_function(&format!("RGBA to YUV420p {s}"), |b| {
        b.iter(|| do_convert(&rgba, &mut yuv420))
    });

    c.bench_function(&format!("YUV420p to RGBA {s}"), |b| {
        b.iter(|| {
            do_convert(&yuv420, &mut rgba);
        })
    });

    c.bench_function(&format!("RGBA to YUVA420p {s}"), |b| {
        b.iter(|| {
            do_convert(&rgba, &mut yuva420);
        })
    });
}

fn read_all(image: &Image) -> u64 {
    ReaderRgba::<u16>::new(image)
        .map(|px| u64::from(px.r) + u64::from(px.a))
        .sum()
}

fn readers(c: &mut Criterion) {
    let formats: [(&str, PixelFormat); 3] =
        [("RGBA8", RGBA8), ("RGBA16", RGBA16), ("YUV420p", YUV420P)];

    for (name, format) in formats {
        let image = Image::create(SIZE, format);

        c.bench_function(&format!("read {name} as RGBA u16"), |b| {
            b.iter(|| read_all(black_box(&image)))
        });
    }
}

fn single_threaded(c: &mut Criterion) {
    run_benchmarks(c, do_convert, "single threaded")
}

#[cfg(feature = "multi-thread")]
fn multi_threaded(c: &mut Criterion) {
    run_benchmarks(c, do_convert_multi_thread, "multi threaded")
}

#[cfg(feature = "multi-thread")]
criterion_group!(img, single_threaded, multi_threaded, readers);

#[cfg(not(feature = "multi-thread"))]
criterion_group!(img, single_threaded, readers);

criterion_main!(img);
