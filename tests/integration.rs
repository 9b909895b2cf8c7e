use mosaique_rs::image_pipeline::{
    Algorithm, BakeConfig, CpuDebayer, DecodeError, DecodedMosaicSet, MosaicChannel, MosaicView,
    Msq3BakePipeline, RgbImage, TiffCompression,
    conversions::output_file_name,
    debayer::{demosaic, demosaic_pixel},
    metrics::{QualityMetrics, evaluate, psnr, ssim},
    mosaicing::{apply_bayer_mosaic, colorized_view, combine_channels},
    msq3::{decode, encode, is_container},
};

const ALGORITHMS: [Algorithm; 2] = [Algorithm::Bilinear, Algorithm::Mhc];

#[rustfmt::skip]
const EXAMPLE: [u8; 16] = [
    10, 20, 10, 20,
    30, 40, 30, 40,
    10, 20, 10, 20,
    30, 40, 30, 40,
];

fn container(width: u32, height: u32, channels: [&[u8]; 3]) -> Vec<u8> {
    let mut bytes = b"MSQ3\x01".to_vec();
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.push(80);
    for channel in channels {
        bytes.extend_from_slice(&(channel.len() as u32).to_le_bytes());
        bytes.extend_from_slice(channel);
    }
    bytes
}

/// 16x12 ramp, linear along both axes.
fn gradient_image() -> RgbImage {
    let (w, h) = (16, 12);
    let mut data = Vec::with_capacity(w * h * 4);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&[(x * 16) as u8, (y * 20) as u8, ((x + y) * 9) as u8, 255]);
        }
    }
    RgbImage { width: w, height: h, data }
}

fn gradient_rgb() -> (usize, usize, Vec<u8>) {
    let image = gradient_image();
    (image.width, image.height, image.to_rgb())
}

fn pixels(image: &RgbImage) -> Vec<[u8; 4]> {
    image
        .data
        .chunks_exact(4)
        .map(|p| [p[0], p[1], p[2], p[3]])
        .collect()
}

#[test]
fn example_mosaic_bilinear_fixture() {
    let view = MosaicView::plane(&EXAMPLE, 4, 4, MosaicChannel::R).unwrap();
    let image = demosaic(&view, Algorithm::Bilinear);

    #[rustfmt::skip]
    let expected: Vec<[u8; 4]> = vec![
        [10, 18, 25, 255], [10, 20, 30, 255], [10, 20, 30, 255], [15, 20, 30, 255],
        [10, 30, 35, 255], [10, 25, 40, 255], [10, 30, 40, 255], [15, 28, 40, 255],
        [10, 23, 35, 255], [10, 20, 40, 255], [10, 25, 40, 255], [15, 20, 40, 255],
        [20, 30, 35, 255], [20, 30, 40, 255], [20, 30, 40, 255], [25, 33, 40, 255],
    ];
    assert_eq!(pixels(&image), expected);

    // (1, 1) is a B site: own sample 40, G from the cross, R from the diagonals.
    assert_eq!(image.pixel(1, 1), [10, 25, 40, 255]);
}

#[test]
fn example_mosaic_mhc_fixture() {
    let view = MosaicView::plane(&EXAMPLE, 4, 4, MosaicChannel::R).unwrap();
    let image = demosaic(&view, Algorithm::Mhc);

    let tile = [
        [[10, 25, 40, 255], [10, 20, 25, 255]],
        [[13, 30, 28, 255], [10, 25, 40, 255]],
    ];
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(image.pixel(x, y), tile[y % 2][x % 2], "({x}, {y})");
        }
    }
}

#[test]
fn flat_field_at_origin() {
    let flat = [128u8; 16];
    let view = MosaicView::plane(&flat, 4, 4, MosaicChannel::G).unwrap();
    for algorithm in ALGORITHMS {
        assert_eq!(demosaic_pixel(&view, 0, 0, algorithm), [128, 128, 128, 255], "{algorithm}");
    }

    // Bilinear is flat everywhere.
    let image = demosaic(&view, Algorithm::Bilinear);
    assert!(pixels(&image).iter().all(|p| *p == [128, 128, 128, 255]));

    // The MHC weights at G sites sum to 6/8, so a flat field is not preserved there.
    assert_eq!(demosaic_pixel(&view, 1, 0, Algorithm::Mhc), [96, 128, 96, 255]);
    assert_eq!(demosaic_pixel(&view, 1, 1, Algorithm::Mhc), [128, 128, 128, 255]);
}

#[test]
fn demosaic_is_deterministic() {
    let (w, h, rgb) = gradient_rgb();
    let cfa = apply_bayer_mosaic(&rgb, w, h).unwrap();
    let view = MosaicView::plane(&cfa, w, h, MosaicChannel::R).unwrap();
    for algorithm in ALGORITHMS {
        assert_eq!(demosaic(&view, algorithm), demosaic(&view, algorithm));
    }
}

#[test]
fn demosaic_is_order_independent() {
    let (w, h, rgb) = gradient_rgb();
    let cfa = apply_bayer_mosaic(&rgb, w, h).unwrap();
    let view = MosaicView::plane(&cfa, w, h, MosaicChannel::B).unwrap();

    for algorithm in ALGORITHMS {
        let whole = CpuDebayer::sequential().process(&view, algorithm);

        // Reverse scan order, column-major, pixel by pixel.
        let mut scattered = vec![[0u8; 4]; w * h];
        for x in (0..w).rev() {
            for y in (0..h).rev() {
                scattered[y * w + x] = demosaic_pixel(&view, x, y, algorithm);
            }
        }
        assert_eq!(pixels(&whole), scattered, "{algorithm}");

        // Uneven row bands computed out of order.
        let debayer = CpuDebayer::new();
        let mut bands = vec![
            (5..12, debayer.process_rows(&view, algorithm, 5..12)),
            (0..1, debayer.process_rows(&view, algorithm, 0..1)),
            (1..5, debayer.process_rows(&view, algorithm, 1..5)),
        ];
        bands.sort_by_key(|(rows, _)| rows.start);
        let joined: Vec<u8> = bands.into_iter().flat_map(|(_, data)| data).collect();
        assert_eq!(joined, whole.data, "{algorithm}");
    }
}

#[test]
fn bilinear_reproduces_linear_ramp_away_from_borders() {
    let (w, h, rgb) = gradient_rgb();
    let cfa = apply_bayer_mosaic(&rgb, w, h).unwrap();
    let view = MosaicView::plane(&cfa, w, h, MosaicChannel::R).unwrap();
    let image = demosaic(&view, Algorithm::Bilinear);
    let original = gradient_image();

    for y in 2..h - 2 {
        for x in 2..w - 2 {
            assert_eq!(image.pixel(x, y), original.pixel(x, y), "({x}, {y})");
        }
    }
}

#[test]
fn reconstruction_quality_against_source() {
    let (w, h, rgb) = gradient_rgb();
    let cfa = apply_bayer_mosaic(&rgb, w, h).unwrap();
    let view = MosaicView::plane(&cfa, w, h, MosaicChannel::R).unwrap();
    let original = gradient_image();

    assert_eq!(psnr(&original, &demosaic(&view, Algorithm::Bilinear)), Some(22.69));
    assert_eq!(psnr(&original, &demosaic(&view, Algorithm::Mhc)), Some(19.58));

    // 7x7 windows on a 16x12 image.
    assert_eq!(
        evaluate(&original, &demosaic(&view, Algorithm::Bilinear)),
        Some(QualityMetrics { psnr: 22.69, ssim: 0.9655 })
    );
    assert_eq!(ssim(&original, &demosaic(&view, Algorithm::Mhc)), Some(0.8453));
}

#[test]
fn colorized_view_matches_source_at_each_site() {
    let original = gradient_image();
    let (w, h) = (original.width, original.height);
    let cfa = apply_bayer_mosaic(&original.to_rgb(), w, h).unwrap();
    let view = colorized_view(&cfa, w, h).unwrap();

    for y in 0..h {
        for x in 0..w {
            let [r, g, b, _] = original.pixel(x, y);
            let expected = match (y % 2, x % 2) {
                (0, 0) => [r, 0, 0, 255],
                (1, 1) => [0, 0, b, 255],
                _ => [0, g, 0, 255],
            };
            assert_eq!(view.pixel(x, y), expected, "({x}, {y})");
        }
    }
}

#[test]
fn combined_texture_matches_planes() {
    let (w, h, rgb) = gradient_rgb();
    let set = DecodedMosaicSet {
        width: w as u32,
        height: h as u32,
        quality: 90,
        channel_r: apply_bayer_mosaic(&rgb, w, h).unwrap(),
        channel_g: rgb.iter().step_by(3).copied().collect(),
        channel_b: rgb.iter().skip(2).step_by(3).copied().collect(),
    };
    let combined = combine_channels(&set).unwrap();

    for channel in MosaicChannel::ALL {
        let plane = MosaicView::plane(set.channel(channel), w, h, channel).unwrap();
        let packed = MosaicView::combined(&combined, w, h, 4, channel).unwrap();
        for algorithm in ALGORITHMS {
            assert_eq!(demosaic(&plane, algorithm), demosaic(&packed, algorithm));
        }
    }
}

#[test]
fn degenerate_dimensions() {
    for (w, h) in [(1, 1), (1, 7), (7, 1), (2, 2), (2, 3)] {
        let data: Vec<u8> = (0..w * h).map(|i| (i * 40) as u8).collect();
        let view = MosaicView::plane(&data, w, h, MosaicChannel::R).unwrap();
        for algorithm in ALGORITHMS {
            let image = demosaic(&view, algorithm);
            assert_eq!(image.data.len(), w * h * 4);
        }
    }
}

#[test]
fn decode_rejects_short_input() {
    let valid = container(1, 1, [&[1], &[2], &[3]]);
    for len in 0..=13 {
        assert!(matches!(decode(&valid[..len]), Err(DecodeError::TooSmall { .. })));
    }
}

#[test]
fn decode_rejects_bad_magic() {
    for magic in [b"MSQ2", b"msq3", b"\0\0\0\0", b"RIFF"] {
        let mut data = container(1, 1, [&[1], &[2], &[3]]);
        data[..4].copy_from_slice(magic);
        assert!(matches!(decode(&data), Err(DecodeError::BadMagic { .. })));
        assert!(!is_container(&data));
    }
}

#[test]
fn decode_dimension_boundary() {
    let data = container(16385, 1, [&[1], &[2], &[3]]);
    assert_eq!(
        decode(&data),
        Err(DecodeError::InvalidDimensions { width: 16385, height: 1 })
    );

    let data = container(16384, 1, [&[1], &[2], &[3]]);
    assert_eq!(decode(&data).unwrap().width, 16384);
}

#[test]
fn is_container_ignores_version_and_dimensions() {
    let mut data = container(0, 0, [&[], &[], &[]]);
    data[4] = 42;
    assert!(is_container(&data));
    assert!(decode(&data).is_err());
    assert!(!is_container(&data[..13]));
}

#[test]
fn container_round_trip() {
    let (w, h, rgb) = gradient_rgb();
    let mosaic = apply_bayer_mosaic(&rgb, w, h).unwrap();
    let set = DecodedMosaicSet {
        width: w as u32,
        height: h as u32,
        quality: 55,
        channel_r: mosaic.clone(),
        channel_g: mosaic.iter().map(|v| v / 2).collect(),
        channel_b: mosaic.iter().rev().copied().collect(),
    };

    let first = decode(&encode(&set).unwrap()).unwrap();
    let second = decode(&encode(&first).unwrap()).unwrap();
    assert_eq!(first, set);
    assert_eq!(second.channel_r, set.channel_r);
    assert_eq!(second.channel_g, set.channel_g);
    assert_eq!(second.channel_b, set.channel_b);
}

#[test]
fn bake_file_writes_three_tiffs() {
    let (w, h, rgb) = gradient_rgb();
    let mosaic = apply_bayer_mosaic(&rgb, w, h).unwrap();
    let set = DecodedMosaicSet {
        width: w as u32,
        height: h as u32,
        quality: 70,
        channel_r: mosaic.clone(),
        channel_g: EXAMPLE.iter().cycle().take(w * h).copied().collect(),
        channel_b: vec![200; w * h],
    };

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scene.msq3");
    std::fs::write(&input, encode(&set).unwrap()).unwrap();
    let out_dir = dir.path().join("baked");

    let config = BakeConfig::builder()
        .algorithm(Algorithm::Mhc)
        .compression(TiffCompression::DeflateBalanced)
        .build();
    let pipeline = Msq3BakePipeline::new(config);
    let report = pipeline.bake_file(&input, &out_dir).unwrap();

    assert_eq!(report.outputs.len(), 3);
    for (channel, path) in MosaicChannel::ALL.into_iter().zip(&report.outputs) {
        assert_eq!(path, &out_dir.join(output_file_name("scene", channel)));

        let file = std::fs::File::open(path).unwrap();
        let mut decoder = tiff::decoder::Decoder::new(std::io::BufReader::new(file)).unwrap();
        assert_eq!(decoder.dimensions().unwrap(), (w as u32, h as u32));
        let pixels = match decoder.read_image().unwrap() {
            tiff::decoder::DecodingResult::U8(pixels) => pixels,
            _ => panic!("expected 8-bit samples"),
        };

        let view = MosaicView::plane(set.channel(channel), w, h, channel).unwrap();
        assert_eq!(pixels, demosaic(&view, Algorithm::Mhc).data);
    }
    assert!(report.timings.get_step("write B").is_some());
}

#[test]
fn bake_file_reports_decode_errors() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.msq3");
    std::fs::write(&input, b"MSQ3\x02 not really").unwrap();

    let pipeline = Msq3BakePipeline::new(BakeConfig::default());
    let err = pipeline.bake_file(&input, dir.path()).unwrap_err();
    assert!(err.to_string().contains("unsupported MSQ3 version 2"));
    assert!(!dir.path().join("broken_Image1.tiff").exists());
}

#[test]
fn bake_file_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Msq3BakePipeline::new(BakeConfig::default());
    let err = pipeline
        .bake_file(dir.path().join("missing.msq3"), dir.path())
        .unwrap_err();
    assert!(matches!(
        err,
        mosaique_rs::image_pipeline::ConversionError::InputReadError(_)
    ));
}
