//! blockray - per-block geometry for a voxel ray tracer
//!
//! Headless probe: renders the demo block row to a PNG

mod config;
mod probe;

use anyhow::{Context, Result};
use config::{ProbeConfig, ShaderMode};
use probe::{ProbeScene, World};
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting blockray v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let mut config = match &cli.config {
        Some(path) => ProbeConfig::load_from_path(path),
        None => ProbeConfig::load(),
    };
    cli.apply(&mut config);

    let block_digest = blockray_models::blocks::digest();
    let liquid_digest = blockray_liquid::tables().digest();
    info!(blocks = %block_digest, liquid = %liquid_digest, "table digests");

    let world = World::demo();
    let scene = ProbeScene::from_config(&config).context("building probe scene")?;
    let (image, stats) = probe::render(&config, &world, &scene);

    image
        .save(&config.out)
        .with_context(|| format!("writing {}", config.out.display()))?;
    info!(
        path = %config.out.display(),
        width = config.width,
        height = config.height,
        primary_rays = stats.primary_rays,
        hits = stats.hits,
        "wrote probe image"
    );
    Ok(())
}

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    out: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    shader: Option<ShaderMode>,
    samples: Option<u32>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--out" => {
                    if let Some(path) = args.next() {
                        opts.out = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--out requires a file path");
                    }
                }
                "--width" => opts.width = parse_u32(&mut args, "--width"),
                "--height" => opts.height = parse_u32(&mut args, "--height"),
                "--samples" => opts.samples = parse_u32(&mut args, "--samples"),
                "--shader" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<ShaderMode>() {
                            Ok(mode) => opts.shader = Some(mode),
                            Err(err) => tracing::error!(%err, "--shader must be still or animated"),
                        }
                    } else {
                        tracing::error!("--shader requires still or animated");
                    }
                }
                other => tracing::warn!(arg = other, "ignoring unknown argument"),
            }
        }

        opts
    }

    fn apply(&self, config: &mut ProbeConfig) {
        if let Some(out) = &self.out {
            config.out = out.clone();
        }
        if let Some(width) = self.width {
            config.width = width.max(1);
        }
        if let Some(height) = self.height {
            config.height = height.max(1);
        }
        if let Some(samples) = self.samples {
            config.samples = samples.max(1);
        }
        if let Some(shader) = self.shader {
            config.water.shader = shader;
        }
    }
}

fn parse_u32<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Option<u32> {
    let Some(raw) = args.next() else {
        tracing::error!("{flag} requires an integer");
        return None;
    };
    match raw.parse::<u32>() {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::error!(%err, value = %raw, "{flag} must be an integer");
            None
        }
    }
}
