// ratiofit: fit a target aspect ratio into a base resolution's pixel budget.
//
// Subcommands:
//   fit      — fit a ratio or preset, print the result, optionally write an SVG
//   simplify — reduce WIDTH:HEIGHT by its GCD
//   approx   — closest simple fraction to a decimal ratio
//   range    — ratio control range for a base resolution
//   presets  — list built-in and configured presets
//   config   — print the effective configuration as TOML

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{info, warn};

use ratiofit::calculator::{Calculator, Snapshot};
use ratiofit::config::Config;
use ratiofit::format::group_thousands;
use ratiofit::preset::{find_in, parse_dimension, parse_ratio};
use ratiofit::range::{SliderRange, derive_range_with};
use ratiofit::ratio::RatioLabel;
use ratiofit::svg::render_snapshot_svg;
use ratiofit::{Resolution, Settings};

#[derive(Parser)]
#[command(
    name = "ratiofit",
    version,
    about = "Fit a target aspect ratio into a base resolution's pixel budget"
)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Fit a ratio into the pixel budget of WIDTH×HEIGHT
    Fit {
        width: String,
        height: String,
        /// Target ratio: 16:9, 16/9, 16x9 or 1.777 (defaults to the base ratio)
        #[arg(long, conflicts_with = "preset")]
        ratio: Option<String>,
        /// Target preset label, e.g. 16:9
        #[arg(long)]
        preset: Option<String>,
        /// Grid step for both sides (overrides config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        step: Option<u32>,
        /// Use the grid-free legacy fitter
        #[arg(long, conflicts_with = "step")]
        legacy: bool,
        /// Write an SVG visualization to this path
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Reduce WIDTH:HEIGHT to lowest terms
    Simplify { width: String, height: String },
    /// Closest simple fraction to a decimal ratio
    Approx {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Largest denominator to consider (overrides config)
        #[arg(long)]
        max_denominator: Option<u64>,
    },
    /// Ratio control range for a base resolution
    Range { width: String, height: String },
    /// List available presets
    Presets,
    /// Print the effective configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Cmd::Fit {
            width,
            height,
            ratio,
            preset,
            step,
            legacy,
            svg,
        } => {
            let mut settings = config.settings();
            if let Some(step) = step {
                settings = settings.step(step);
            }
            if legacy {
                settings = settings.legacy();
            }
            cmd_fit(
                &config,
                settings,
                &width,
                &height,
                ratio.as_deref(),
                preset.as_deref(),
                svg.as_deref(),
            )
        }
        Cmd::Simplify { width, height } => {
            let label = RatioLabel::exact(parse_dimension(&width), parse_dimension(&height));
            println!("{label}");
            Ok(())
        }
        Cmd::Approx {
            value,
            max_denominator,
        } => {
            let max = max_denominator.unwrap_or(config.display.max_denominator);
            println!("{}", RatioLabel::approximate(value, max));
            Ok(())
        }
        Cmd::Range { width, height } => cmd_range(&config.settings(), &width, &height),
        Cmd::Presets => {
            for p in config.presets()? {
                println!("{:<10} {:.4}", p.label, p.ratio);
            }
            Ok(())
        }
        Cmd::Config => {
            print!("{}", config.to_toml_string().context("failed to serialize config")?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => {
            info!("no config file given, using defaults");
            Ok(Config::default())
        }
    }
}

fn cmd_fit(
    config: &Config,
    settings: Settings,
    width: &str,
    height: &str,
    ratio: Option<&str>,
    preset: Option<&str>,
    svg_path: Option<&Path>,
) -> anyhow::Result<()> {
    let mut calc = Calculator::new(settings);
    let mut snap = *calc.set_base_str(width, height);
    if snap.range.is_disabled() {
        warn!("base {width}×{height} is not a usable resolution; ratio selection disabled");
    }

    let requested = match (ratio, preset) {
        (Some(text), _) => {
            Some(parse_ratio(text).with_context(|| format!("invalid --ratio {text:?}"))?)
        }
        (None, Some(label)) => {
            let presets = config.presets()?;
            let preset = find_in(&presets, label)
                .with_context(|| format!("unknown preset {label:?} (see `ratiofit presets`)"))?;
            Some(preset.ratio)
        }
        (None, None) => None,
    };
    if let Some(requested) = requested {
        snap = *calc.set_ratio(requested);
        if !snap.range.is_disabled() && snap.selected_ratio != requested {
            warn!(
                "ratio {requested} is outside the allowed range, clamped to {:.6}",
                snap.selected_ratio
            );
        }
    }

    print_snapshot(&snap);

    if let Some(path) = svg_path {
        std::fs::write(path, render_snapshot_svg(&snap))
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_range(settings: &Settings, width: &str, height: &str) -> anyhow::Result<()> {
    let raw = Resolution::new(parse_dimension(width), parse_dimension(height));
    let base = settings.effective_base(raw);
    match derive_range_with(base.ratio(), base.pixels(), &settings.range) {
        SliderRange::Disabled => println!("disabled"),
        SliderRange::Active(r) => println!(
            "min {:.6}  max {:.6}  step {:.6}  ({} positions)",
            r.min,
            r.max,
            r.step,
            r.positions()
        ),
    }
    Ok(())
}

fn print_snapshot(snap: &Snapshot) {
    let base = snap.base;
    let target = snap.target;
    println!(
        "base         {} × {}  ({} px)",
        group_thousands(base.width.into()),
        group_thousands(base.height.into()),
        group_thousands(base.pixels())
    );
    println!("base ratio   {}", snap.base_label);
    match snap.range {
        SliderRange::Disabled => println!("range        disabled"),
        SliderRange::Active(r) => {
            println!("range        {:.6} – {:.6} (step {:.6})", r.min, r.max, r.step)
        }
    }
    println!("ratio        {}", snap.selected_label);
    println!(
        "target       {} × {}  ({} px, {:.1}% of budget)",
        group_thousands(target.width.into()),
        group_thousands(target.height.into()),
        group_thousands(target.pixels()),
        snap.budget_usage() * 100.0
    );
    println!("target ratio {}", snap.target_label());
    println!("preview      {} × {}", snap.preview.width, snap.preview.height);
}
