//! SwitchView CLI - host a switch on a headless screen.

mod activity;
mod error;
mod session;

use activity::MainActivity;
use clap::{Parser, Subcommand};
use error::CliError;
use session::SessionConfig;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use switchview_core::{Constraints, DisplayMetrics};
use switchview_widgets::{StyleAttributes, SwitchView};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "switchview")]
#[command(about = "Animated toggle switch on a headless screen")]
#[command(version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tap the switch and log every state change
    Run {
        /// YAML style file
        #[arg(short, long)]
        style: Option<PathBuf>,

        /// Display density (device pixels per dp)
        #[arg(long, default_value = "1.0")]
        density: f32,

        /// Exact switch width in device pixels
        #[arg(long)]
        width: Option<f32>,

        /// Exact switch height in device pixels
        #[arg(long)]
        height: Option<f32>,

        /// Number of taps
        #[arg(short, long, default_value = "1")]
        taps: u32,

        /// Milliseconds between taps
        #[arg(long, default_value = "500")]
        tap_interval_ms: u64,

        /// Milliseconds per frame
        #[arg(long, default_value = "16")]
        frame_ms: u64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one frame's draw commands as JSON
    Render {
        /// YAML style file
        #[arg(short, long)]
        style: Option<PathBuf>,

        /// Display density (device pixels per dp)
        #[arg(long, default_value = "1.0")]
        density: f32,

        /// Render in the checked state
        #[arg(long)]
        checked: bool,
    },
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            style,
            density,
            width,
            height,
            taps,
            tap_interval_ms,
            frame_ms,
            json,
        } => {
            if frame_ms == 0 {
                return Err(CliError::InvalidArgument(
                    "frame-ms must be at least 1".to_string(),
                ));
            }
            let config = SessionConfig {
                taps,
                tap_interval: Duration::from_millis(tap_interval_ms),
                frame: Duration::from_millis(frame_ms),
            };
            run(style.as_deref(), density, width, height, config, json)
        }
        Commands::Render {
            style,
            density,
            checked,
        } => render(style.as_deref(), density, checked),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();
}

fn metrics(density: f32) -> Result<DisplayMetrics, CliError> {
    if density.is_finite() && density > 0.0 {
        Ok(DisplayMetrics::new(density))
    } else {
        Err(CliError::InvalidArgument(format!(
            "density must be positive, got {density}"
        )))
    }
}

fn load_style(path: Option<&Path>) -> Result<StyleAttributes, CliError> {
    let Some(path) = path else {
        return Ok(StyleAttributes::default());
    };
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadStyle {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(StyleAttributes::from_yaml_str(&text)?)
}

fn constraints(width: Option<f32>, height: Option<f32>) -> Constraints {
    let mut c = Constraints::unbounded();
    if let Some(w) = width {
        c = c.with_exact_width(w);
    }
    if let Some(h) = height {
        c = c.with_exact_height(h);
    }
    c
}

fn build_activity(style: Option<&Path>, density: f32) -> Result<MainActivity, CliError> {
    let metrics = metrics(density)?;
    let attrs = load_style(style)?;
    let switch = SwitchView::from_attributes(&attrs, metrics)?;
    Ok(MainActivity::new(switch, metrics))
}

fn run(
    style: Option<&Path>,
    density: f32,
    width: Option<f32>,
    height: Option<f32>,
    config: SessionConfig,
    json: bool,
) -> Result<(), CliError> {
    let mut activity = build_activity(style, density)?;
    activity.layout(constraints(width, height));
    let report = session::run(&mut activity, config);

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{report}")?;
    }
    Ok(())
}

fn render(style: Option<&Path>, density: f32, checked: bool) -> Result<(), CliError> {
    let mut activity = build_activity(style, density)?;
    if checked {
        activity.switch_mut().set_checked(true);
    }
    activity.layout(Constraints::unbounded());

    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &activity.render())?;
    writeln!(out)?;
    Ok(())
}
