use rasterbits::{
    FormatId, Image, ImageSize, PixelFormat, PixelType, Point, ReaderRgba, RgbaPixel, WriterRgba,
    YUV444P, color_convert,
};

const WRITTEN: RgbaPixel<f64> = RgbaPixel {
    r: 0.25,
    g: 0.5,
    b: 0.75,
    a: 0.5,
};

fn float_formats() -> impl Iterator<Item = (FormatId, PixelFormat)> {
    FormatId::variants()
        .into_iter()
        .map(|id| (id, *id.format()))
        .filter(|(_, format)| format.layout.normalized)
}

fn has_alpha(format: &PixelFormat) -> bool {
    matches!(format.pixel_type, PixelType::Rgba | PixelType::Bgra)
}

#[test]
fn catalog_has_float_formats() {
    assert_eq!(float_formats().count(), 15);
}

#[test]
fn float_formats_through_every_sample_type() {
    for (id, format) in float_formats() {
        let mut image = Image::create(ImageSize::new(3, 2), format);
        let pt = Point::new(2, 1);

        WriterRgba::<f64>::new(&mut image).at(&WRITTEN, pt);

        let wide = ReaderRgba::<f64>::new(&image).at(pt);
        assert_eq!(wide.r, 0.25, "{id:?}");

        let expected_alpha = if has_alpha(&format) { 0.5 } else { 1.0 };
        assert_eq!(wide.a, expected_alpha, "{id:?}");

        let single = ReaderRgba::<f32>::new(&image).at(pt);
        assert_eq!(
            single,
            RgbaPixel {
                r: wide.r as f32,
                g: wide.g as f32,
                b: wide.b as f32,
                a: wide.a as f32,
            },
            "{id:?}"
        );

        let bytes = ReaderRgba::<u8>::new(&image).at(pt);
        let to_u8 = |v: f64| (v * 255.0).round() as u8;
        assert_eq!(
            bytes,
            RgbaPixel {
                r: to_u8(wide.r),
                g: to_u8(wide.g),
                b: to_u8(wide.b),
                a: to_u8(wide.a),
            },
            "{id:?}"
        );
        assert_eq!(bytes.r, 64, "{id:?}");
    }
}

#[test]
fn u8_writes_into_float_formats() {
    for (id, format) in float_formats() {
        let mut image = Image::create(ImageSize::new(1, 1), format);
        let pt = Point::new(0, 0);

        WriterRgba::<u8>::new(&mut image).at(
            &RgbaPixel {
                r: 255,
                g: 0,
                b: 0,
                a: 255,
            },
            pt,
        );

        let pixel = ReaderRgba::<f32>::new(&image).at(pt);

        assert_eq!(pixel.r, 1.0, "{id:?}");
        assert_eq!(pixel.a, 1.0, "{id:?}");
    }
}

#[test]
fn rgb_float_formats_convert_to_yuv() {
    for (id, format) in float_formats() {
        if !format.pixel_type.is_rgb_family() {
            continue;
        }

        let mut image = Image::create(ImageSize::new(2, 2), format);
        {
            let mut writer = WriterRgba::<f32>::new(&mut image);
            let white = RgbaPixel {
                r: 1.0,
                g: 1.0,
                b: 1.0,
                a: 1.0,
            };

            while writer.next(&white) {}
        }

        let mut yuv = Image::create(image.size(), YUV444P);
        assert!(color_convert(&image, &mut yuv), "{id:?}");

        let (y, chroma) = yuv.buffer().split_at(4);
        assert!(y.iter().all(|&v| v == 255), "{id:?}");
        assert!(chroma.iter().all(|&v| v == 128), "{id:?}");
    }
}
