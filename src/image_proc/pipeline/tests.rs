use std::time::Duration;

use ndarray::{array, Array2, Array3};

use crate::image_proc::common::ProcError;
use crate::image_proc::masking::MaskPolicy;
use crate::image_proc::pipeline::{
    CalibrationSet, CorrectionPipeline, PipelineConfig, PipelineTimings, Timer,
};

fn train() -> Array3<f32> {
    array![
        [[11.0, 12.0], [13.0, 500.0]],
        [[21.0, 22.0], [f32::NAN, 24.0]],
    ]
}

#[test]
fn test_config_builder() {
    let config = PipelineConfig::builder()
        .policy(MaskPolicy::Zero)
        .threshold(0.0f32, 100.0)
        .moving_average_window(5)
        .build()
        .unwrap();

    assert_eq!(config.policy, MaskPolicy::Zero);
    assert_eq!(config.threshold.unwrap().upper(), 100.0);
    assert_eq!(config.moving_average_window, 5);

    let default = PipelineConfig::<f32>::builder().build().unwrap();
    assert_eq!(default, PipelineConfig::default());
    assert_eq!(default.policy, MaskPolicy::Nan);
}

#[test]
fn test_config_builder_rejects_invalid_values() {
    let window = PipelineConfig::<f32>::builder().moving_average_window(0).build();
    assert!(matches!(window, Err(ProcError::InvalidArgument(_))));

    let threshold = PipelineConfig::builder().threshold(5.0f64, -5.0).build();
    assert!(matches!(threshold, Err(ProcError::InvalidArgument(_))));
}

#[test]
fn test_process_train() {
    let config = PipelineConfig::builder()
        .threshold(0.0f32, 100.0)
        .build()
        .unwrap();
    let mut pipeline = CorrectionPipeline::new(config)
        .unwrap()
        .with_calibration(CalibrationSet::Offset(Array3::from_elem((2, 2, 2), 1.0)))
        .with_bad_pixels(array![[false, true], [false, false]]);

    let mut frames = train();
    let mut flags = Array3::from_elem((2, 2, 2), false);
    let mean = pipeline
        .process(frames.view_mut(), None, Some(flags.view_mut()))
        .unwrap();

    assert_eq!(mean[[0, 0]], 15.0);
    assert!(mean[[0, 1]].is_nan());
    assert_eq!(mean[[1, 0]], 12.0);
    assert_eq!(mean[[1, 1]], 23.0);

    assert!(frames[[0, 1, 1]].is_nan());
    assert_eq!(
        flags,
        array![[[false, true], [false, true]], [[false, true], [true, false]]]
    );

    let average = pipeline.average().unwrap();
    assert_eq!(average[[0, 0]], 15.0);
    assert_eq!(pipeline.average_count(), 1);
}

#[test]
fn test_process_with_keep_and_gain_offset() {
    let config = PipelineConfig::builder()
        .policy(MaskPolicy::Zero)
        .build()
        .unwrap();
    let mut pipeline = CorrectionPipeline::new(config).unwrap().with_calibration(
        CalibrationSet::GainOffset {
            gain: Array3::from_elem((2, 2, 2), 2.0),
            offset: Array3::from_elem((2, 2, 2), 1.0),
        },
    );

    let mut frames = train();
    let mean = pipeline.process(frames.view_mut(), Some(&[1]), None).unwrap();

    assert_eq!(mean, array![[40.0, 42.0], [0.0, 46.0]]);
}

#[test]
fn test_moving_average_across_trains() {
    let config = PipelineConfig::builder()
        .moving_average_window(2)
        .build()
        .unwrap();
    let mut pipeline = CorrectionPipeline::<f64>::new(config).unwrap();

    for value in [2.0, 4.0, 8.0] {
        let mut frames = Array3::from_elem((3, 2, 2), value);
        pipeline.process(frames.view_mut(), None, None).unwrap();
    }

    assert_eq!(pipeline.average_count(), 2);
    assert_eq!(pipeline.average().unwrap()[[1, 1]], 5.5);

    pipeline.reset_average();
    assert!(pipeline.average().is_none());
}

#[test]
fn test_invalid_calibration_leaves_train_unchanged() {
    let mut pipeline = CorrectionPipeline::new(PipelineConfig::default())
        .unwrap()
        .with_calibration(CalibrationSet::Gain(Array3::from_elem((3, 2, 2), 2.0f32)));

    let mut frames = train();
    let result = pipeline.process(frames.view_mut(), None, None);

    assert!(matches!(result, Err(ProcError::ShapeMismatch { .. })));
    assert_eq!(frames[[0, 0, 0]], 11.0);
    assert_eq!(frames[[0, 1, 1]], 500.0);
    assert_eq!(pipeline.average_count(), 0);
}

#[test]
fn test_invalid_keep_leaves_train_unchanged() {
    let mut pipeline = CorrectionPipeline::new(PipelineConfig::default())
        .unwrap()
        .with_calibration(CalibrationSet::Offset(Array3::from_elem((2, 2, 2), 1.0f32)));

    let mut frames = train();
    let mut flags = Array3::from_elem((2, 2, 2), false);
    let result = pipeline.process(frames.view_mut(), Some(&[0, 5]), Some(flags.view_mut()));

    assert!(matches!(result, Err(ProcError::InvalidArgument(_))));
    assert_eq!(frames[[1, 0, 0]], 21.0);
    assert!(flags.iter().all(|&f| !f));
}

#[test]
fn test_invalid_bad_pixel_shape_is_rejected() {
    let mut pipeline = CorrectionPipeline::new(PipelineConfig::default())
        .unwrap()
        .with_bad_pixels(Array2::from_elem((3, 3), true));

    let mut frames = train();
    let result = pipeline.process(frames.view_mut(), None, None);

    assert!(matches!(result, Err(ProcError::ShapeMismatch { .. })));
    assert_eq!(frames[[0, 0, 1]], 12.0);
}

#[test]
fn test_set_config_changes_window() {
    let mut pipeline = CorrectionPipeline::<f32>::new(PipelineConfig::default()).unwrap();
    let config = PipelineConfig::builder()
        .moving_average_window(4)
        .build()
        .unwrap();

    pipeline.set_config(config).unwrap();
    assert_eq!(pipeline.config().moving_average_window, 4);

    let invalid = PipelineConfig {
        moving_average_window: 0,
        ..PipelineConfig::default()
    };
    assert!(pipeline.set_config(invalid).is_err());
    assert_eq!(pipeline.config().moving_average_window, 4);
}

#[test]
fn test_timings_recorded() {
    let mut pipeline = CorrectionPipeline::new(PipelineConfig::default())
        .unwrap()
        .with_calibration(CalibrationSet::Offset(Array3::zeros((2, 2, 2))));

    let mut frames = train();
    pipeline.process(frames.view_mut(), None, None).unwrap();

    let names: Vec<&str> = pipeline.last_timings().steps().iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["correct", "mask", "nanmean", "moving_average"]);
}

#[test]
fn test_pipeline_timings() {
    let mut timings = PipelineTimings::new();
    timings.add_step("a", Duration::from_millis(3));
    timings.add_step("b", Duration::from_millis(1));
    let value = timings.time("c", || 42);

    assert_eq!(value, 42);
    assert_eq!(timings.steps().len(), 3);
    assert_eq!(timings.get_step("a"), Some(Duration::from_millis(3)));
    assert!(timings.get_step("missing").is_none());
    assert!(timings.total_duration() >= Duration::from_millis(4));

    let summary = timings.summary();
    assert!(summary.contains("Pipeline Timing Summary"));
    assert!(summary.contains("Total"));

    let (name, _) = Timer::start("step").stop();
    assert_eq!(name, "step");
}
