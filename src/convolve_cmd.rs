use anyhow::{Context, Result};
use tracing::info;

use prfmap_convolve::convolve_stimulus;
use prfmap_io::write_volume;
use prfmap_model::hrf;

use crate::cli::ConvolveArgs;
use crate::config;
use crate::generate::load_stimulus;

/// Run the standalone pixel-wise HRF convolution stage.
pub fn run(args: ConvolveArgs) -> Result<()> {
    let cfg = config::load(&args.config)?;
    let n_chunks = args.chunks.unwrap_or(cfg.run.n_chunks);

    let stimulus = load_stimulus(&cfg)?;
    let (width, height, n_volumes) = stimulus.dim();
    info!(width, height, n_volumes, "stimulus loaded");

    let hrf = hrf(n_volumes, cfg.model.tr)
        .with_context(|| format!("HRF construction failed for TR {}", cfg.model.tr))?;

    let flat = stimulus
        .into_shape((width * height, n_volumes))
        .context("failed to flatten stimulus for convolution")?;
    let convolved = convolve_stimulus(flat.view(), &hrf, n_volumes, n_chunks)
        .context("pixel-wise HRF convolution failed")?;

    let out = convolved
        .into_shape((width, height, n_volumes))
        .context("failed to reshape convolved stimulus")?
        .mapv(|v| v as f32);
    write_volume(&args.output, &out)
        .with_context(|| format!("failed to write output: {}", args.output.display()))?;
    info!(path = %args.output.display(), "convolved stimulus written");
    Ok(())
}
