use frame_correction_rs::image_proc::{
    CalibrationSet, CorrectionPipeline, MaskPolicy, PipelineConfig,
};
use frame_correction_rs::logger::{self, info, warn};
use ndarray::{Array2, Array3};

const FRAMES: usize = 16;
const ROWS: usize = 512;
const COLS: usize = 128;
const TRAINS: usize = 10;

/// Synthetic train: a ramp with a few saturated and missing samples.
fn make_train(seed: usize) -> Array3<f32> {
    Array3::from_shape_fn((FRAMES, ROWS, COLS), |(i, j, k)| {
        let v = (seed * 7 + i * 3 + j + k) % 1000;
        match v {
            0 => f32::NAN,
            999 => 60_000.0,
            _ => 100.0 + v as f32,
        }
    })
}

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting correction demo...");

    let config = PipelineConfig::builder()
        .policy(MaskPolicy::Nan)
        .threshold(0.0, 10_000.0)
        .moving_average_window(TRAINS)
        .build()?;

    let shape = (FRAMES, ROWS, COLS);
    let calibration = CalibrationSet::GainOffset {
        gain: Array3::from_elem(shape, 1.5),
        offset: Array3::from_elem(shape, 100.0),
    };
    let bad_pixels = Array2::from_shape_fn((ROWS, COLS), |(j, k)| j % 64 == 0 && k % 16 == 0);

    let mut pipeline = CorrectionPipeline::new(config)?
        .with_calibration(calibration)
        .with_bad_pixels(bad_pixels);

    info!("Correction pipeline initialized");
    info!("Mask policy: {:?}", pipeline.config().policy);
    info!("Moving average window: {}", pipeline.config().moving_average_window);

    let mut flags = Array3::from_elem(shape, false);
    for seed in 0..TRAINS {
        let mut train = make_train(seed);
        match pipeline.process(train.view_mut(), None, Some(flags.view_mut())) {
            Ok(mean) => info!(
                train = seed,
                nan_pixels = mean.iter().filter(|v| v.is_nan()).count(),
                "Train corrected"
            ),
            Err(e) => warn!("Train {} failed: {}", seed, e),
        }
    }

    let flagged = flags.iter().filter(|&&f| f).count();
    info!(
        flagged,
        total = flags.len(),
        averaged = pipeline.average_count(),
        "Processing complete"
    );
    println!("{}", pipeline.last_timings().summary());

    Ok(())
}
