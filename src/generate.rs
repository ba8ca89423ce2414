use anyhow::{Context, Result, bail};
use tracing::info;

use prfmap_convolve::convolve_stimulus;
use prfmap_io::{Volume, read_volume, read_volume_streamed, write_volume};
use prfmap_model::hrf;
use prfmap_timecourse::generate_time_courses;

use crate::cli::GenerateArgs;
use crate::config::{self, PrfConfig};
use crate::convert;

/// Run the full model-generation pipeline.
pub fn run(args: GenerateArgs) -> Result<()> {
    let cfg = config::load(&args.config)?;

    let output = args
        .output
        .or_else(|| cfg.io.output.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("no output path: set [io].output in config or use --output")
        })?;
    let n_chunks = args.chunks.unwrap_or(cfg.run.n_chunks);

    // Step 1: Load the stimulus tensor.
    let stimulus = load_stimulus(&cfg)?;
    let (width, height, n_volumes) = stimulus.dim();
    info!(width, height, n_volumes, "stimulus loaded");
    if (width, height) != (cfg.model.width, cfg.model.height) {
        bail!(
            "stimulus is {width}x{height} but [model] declares {}x{}",
            cfg.model.width,
            cfg.model.height
        );
    }

    // Step 2: Build the HRF.
    let hrf = hrf(n_volumes, cfg.model.tr)
        .with_context(|| format!("HRF construction failed for TR {}", cfg.model.tr))?;

    // Step 3: Convolve pixel-wise stimulus time courses with the HRF.
    let flat = stimulus
        .into_shape((width * height, n_volumes))
        .context("failed to flatten stimulus for convolution")?;
    let convolved = convolve_stimulus(flat.view(), &hrf, n_volumes, n_chunks)
        .context("pixel-wise HRF convolution failed")?;
    let stimulus = convolved
        .into_shape((width, height, n_volumes))
        .context("failed to reshape convolved stimulus")?;
    info!("pixel time courses convolved");

    // Step 4: Build the candidate parameter grid.
    let grid = convert::build_parameter_grid(&cfg.model)?;
    info!(n_combinations = grid.nrows(), "parameter grid built");

    // Step 5: Generate pRF model time courses.
    let courses = generate_time_courses(
        grid.view(),
        (width, height),
        n_volumes,
        stimulus.view(),
        n_chunks,
    )
    .context("pRF time course generation failed")?;

    // Step 6: Write output.
    let out = courses.mapv(|v| v as f32);
    write_volume(&output, &out)
        .with_context(|| format!("failed to write output: {}", output.display()))?;
    info!(
        path = %output.display(),
        rows = out.nrows(),
        "pRF time courses written"
    );
    Ok(())
}

/// Load the configured stimulus file and reduce it to `[w, h, volumes]`.
pub fn load_stimulus(cfg: &PrfConfig) -> Result<ndarray::Array3<f64>> {
    let path = cfg.io.stimulus.as_ref().ok_or_else(|| {
        anyhow::anyhow!("no stimulus path: set [io].stimulus in config")
    })?;

    let volume: Volume = if cfg.io.streamed {
        read_volume_streamed(path)
    } else {
        read_volume(path)
    }
    .with_context(|| format!("failed to read stimulus: {}", path.display()))?;

    volume
        .to_stimulus_tensor()
        .with_context(|| format!("stimulus is not a 3-D image: {}", path.display()))
}
