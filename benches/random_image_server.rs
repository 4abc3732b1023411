use criterion::{Criterion, criterion_group, criterion_main};
use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use random_image_server::ImageIndex;
use random_image_server::features::extract_from_bytes;
use random_image_server::selector::select;
use std::hint::black_box;
use std::io::Cursor;
use std::path::PathBuf;

fn geotagged_jpeg() -> Vec<u8> {
    let dms = |d: u32, m: u32, s: u32| {
        Value::Rational(vec![
            Rational::from((d, 1)),
            Rational::from((m, 1)),
            Rational::from((s, 100)),
        ])
    };
    let fields = [
        Field {
            tag: Tag::GPSLatitudeRef,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![b"N".to_vec()]),
        },
        Field {
            tag: Tag::GPSLatitude,
            ifd_num: In::PRIMARY,
            value: dms(48, 51, 2376),
        },
        Field {
            tag: Tag::GPSLongitudeRef,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![b"E".to_vec()]),
        },
        Field {
            tag: Tag::GPSLongitude,
            ifd_num: In::PRIMARY,
            value: dms(2, 21, 759),
        },
        Field {
            tag: Tag::DateTimeOriginal,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![b"2022:05:17 18:30:00".to_vec()]),
        },
    ];
    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false).unwrap();
    let tiff = tiff.into_inner();

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&u16::try_from(tiff.len() + 8).unwrap().to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

fn bench(c: &mut Criterion) {
    let paths = (0..10_000)
        .map(|i| PathBuf::from(format!("images/{i:05}.jpg")))
        .collect();
    let index = ImageIndex::from_paths(paths).unwrap();
    let mut rng = rand::rng();

    c.bench_function("select::seeded", |b| {
        b.iter(|| select(&index, black_box(Some(42)), &mut rng).path().to_path_buf());
    });
    c.bench_function("select::random", |b| {
        b.iter(|| select(&index, None, &mut rng).path().to_path_buf());
    });

    let jpeg = geotagged_jpeg();
    c.bench_function("extract_from_bytes", |b| {
        b.iter(|| extract_from_bytes(black_box(&jpeg)));
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
