//! End-to-end pipeline tests: configuration-built chains applied to
//! whole clips.

use frame_aug::{Pipeline, Sample, TransformConfig, TransformError};
use image::{Rgb, RgbImage};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

fn clip(frames: usize, width: u32, height: u32) -> Vec<RgbImage> {
    (0..frames)
        .map(|f| {
            RgbImage::from_fn(width, height, move |x, y| {
                Rgb([
                    ((x + f as u32) % 256) as u8,
                    ((y + f as u32) % 256) as u8,
                    ((x + y) % 256) as u8,
                ])
            })
        })
        .collect()
}

#[test]
fn evaluation_pipeline_produces_normalized_clip_array() {
    let pipeline = Pipeline::from_json(
        r#"[
            {"name": "Scale", "short_size": 224},
            {"name": "CenterCrop", "target_size": 224},
            {"name": "Image2Array"},
            {"name": "Normalization", "mean": [0.5, 0.5, 0.5], "std": [0.5, 0.5, 0.5]}
        ]"#,
    )
    .unwrap();

    let mut rng = StdRng::seed_from_u64(42);
    let sample = pipeline
        .apply(Sample::from_images(clip(3, 320, 240)), &mut rng)
        .unwrap();

    let array = sample.imgs.array().unwrap();
    assert_eq!(array.shape(), &[3, 3, 224, 224]);
    for &v in array.iter() {
        assert!((-1.0..=1.0).contains(&v), "value out of range: {v}");
    }
}

#[test]
fn training_pipeline_is_deterministic_under_a_seed() {
    let configs = vec![
        TransformConfig::Scale { short_size: 128 },
        TransformConfig::MultiScaleCrop {
            target_size: 112,
            scales: vec![1.0, 0.875, 0.75, 0.66],
            max_distort: 1,
            fix_crop: true,
            more_fix_crop: true,
        },
        TransformConfig::RandomFlip { p: 0.5 },
        TransformConfig::Image2Array,
        TransformConfig::Normalization {
            mean: vec![0.485, 0.456, 0.406],
            std: vec![0.229, 0.224, 0.225],
        },
    ];
    let pipeline = Pipeline::from_configs(configs).unwrap();

    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        pipeline
            .apply(Sample::from_images(clip(4, 171, 128)), &mut rng)
            .unwrap()
            .imgs
            .into_array()
            .unwrap()
    };

    let first = run(7);
    let second = run(7);
    assert_eq!(first.shape(), &[4, 3, 112, 112]);
    assert_eq!(first, second);
}

#[test]
fn metadata_travels_untouched_through_every_stage() {
    let pipeline = Pipeline::from_json(
        r#"[
            {"name": "Scale", "short_size": 64},
            {"name": "RandomCrop", "target_size": 64},
            {"name": "RandomFlip"},
            {"name": "Image2Array"},
            {"name": "Normalization", "mean": [0.0, 0.0, 0.0], "std": [1.0, 1.0, 1.0]}
        ]"#,
    )
    .unwrap();

    let mut rng = StdRng::seed_from_u64(1);
    let sample = Sample::from_images(clip(2, 96, 72))
        .with_meta("filename", json!("clip_000042.mp4"))
        .with_meta("label", json!(17))
        .with_meta("frame_indices", json!([4, 12, 20]));
    let out = pipeline.apply(sample, &mut rng).unwrap();

    assert_eq!(out.meta["filename"], json!("clip_000042.mp4"));
    assert_eq!(out.meta["label"], json!(17));
    assert_eq!(out.meta["frame_indices"], json!([4, 12, 20]));
}

#[test]
fn misordered_pipeline_fails_at_the_offending_stage() {
    let pipeline = Pipeline::from_json(
        r#"[
            {"name": "Normalization", "mean": [0.5, 0.5, 0.5], "std": [0.5, 0.5, 0.5]}
        ]"#,
    )
    .unwrap();

    let mut rng = StdRng::seed_from_u64(0);
    let err = pipeline
        .apply(Sample::from_images(clip(1, 32, 32)), &mut rng)
        .unwrap_err();
    assert!(matches!(err, TransformError::InvalidInput { .. }));
}

#[test]
fn invalid_configuration_fails_at_build_time() {
    let err = Pipeline::from_json(r#"[{"name": "NoSuchTransform"}]"#).unwrap_err();
    assert!(matches!(err, TransformError::InvalidConfiguration { .. }));

    let err = Pipeline::from_json(
        r#"[{"name": "Normalization", "mean": [0.5], "std": [0.5, 0.5, 0.5]}]"#,
    )
    .unwrap_err();
    assert!(matches!(err, TransformError::InvalidConfiguration { .. }));
}

#[test]
fn crop_too_large_for_clip_aborts_the_sample() {
    let pipeline = Pipeline::from_json(
        r#"[
            {"name": "Scale", "short_size": 64},
            {"name": "CenterCrop", "target_size": 128}
        ]"#,
    )
    .unwrap();

    let mut rng = StdRng::seed_from_u64(0);
    let err = pipeline
        .apply(Sample::from_images(clip(2, 96, 72)), &mut rng)
        .unwrap_err();
    match err {
        TransformError::ImageTooSmall { target, .. } => assert_eq!(target, 128),
        other => panic!("unexpected error: {other}"),
    }
}
