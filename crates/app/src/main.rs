use std::path::PathBuf;

use asset_generator_core::{generate, CommandRenderer, RootConfig, ToolConfig, DEFAULT_ASSET_ROOT};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt::writer::MakeWriterExt, EnvFilter};

fn main() -> asset_generator_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        tracing::error!(error = %err, details = ?err, "asset generation failed");
        return Err(err);
    }
    Ok(())
}

fn run(cli: &Cli) -> asset_generator_core::Result<()> {
    tracing::info!(config = ?cli.config, "loading asset configuration");
    let config = RootConfig::from_file(&cli.config)?;

    // Relative roots resolve against the working directory.
    let asset_root = std::env::current_dir()?.join(&cli.asset_root);

    let tools = ToolConfig {
        magick: cli.magick.clone(),
        ffmpeg: cli.ffmpeg.clone(),
    };
    for program in tools.missing() {
        tracing::warn!(program, "external tool did not respond to `-version`");
    }

    let mut renderer = CommandRenderer::new(tools);
    generate(&config, &asset_root, &mut renderer)?;
    Ok(())
}

fn init_tracing() {
    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate placeholder PNG, MP4 and WebM assets from a JSON description",
    long_about = None
)]
struct Cli {
    /// Path to the asset configuration file.
    config: PathBuf,
    /// Directory the asset tree is written into.
    #[arg(long, default_value = DEFAULT_ASSET_ROOT)]
    asset_root: PathBuf,
    /// ImageMagick executable used to draw frames.
    #[arg(long, default_value = "magick")]
    magick: String,
    /// ffmpeg executable used to encode transitions.
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: String,
}
