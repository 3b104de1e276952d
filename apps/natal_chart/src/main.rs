use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;
use urania::ephemeris::julian_day_from_utc;
use urania::{ChartEngine, SnapshotEphemeris};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute a natal chart and print it as JSON")]
struct Args {
    /// Ephemeris snapshot JSON (provider output captured for one instant).
    #[arg(long)]
    snapshot: PathBuf,

    /// Geographic latitude in degrees, north positive. Defaults to the snapshot's site.
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Geographic longitude in degrees, east positive. Defaults to the snapshot's site.
    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<f64>,

    /// House system code or name. Defaults to the system the snapshot was captured with.
    #[arg(long)]
    house_system: Option<String>,

    /// Only report the five major aspects.
    #[arg(long)]
    no_minor: bool,

    /// Birth instant (RFC 3339). Defaults to the snapshot's Julian day.
    #[arg(long)]
    instant: Option<DateTime<Utc>>,

    /// Chart settings TOML (otherwise configs/chart.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    pretty: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let settings = urania_config::load_chart_settings(args.config.as_deref())?;
    let ephemeris = SnapshotEphemeris::load(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", args.snapshot.display()))?;

    let julian_day = match args.instant {
        Some(instant) => julian_day_from_utc(instant),
        None => ephemeris.julian_day_value(),
    };
    let captured = ephemeris.snapshot();
    let latitude = args.latitude.unwrap_or(captured.latitude);
    let longitude = args.longitude.unwrap_or(captured.longitude);
    let house_system = args
        .house_system
        .clone()
        .unwrap_or_else(|| captured.house_system.code().to_string());
    let include_minor = settings.include_minor_aspects && !args.no_minor;

    log::info!(
        "Computing chart at JD {} for ({}, {}) with {}",
        julian_day,
        latitude,
        longitude,
        house_system
    );

    let engine = ChartEngine::with_settings(ephemeris, settings);
    let chart = engine
        .compute_birth_chart(julian_day, latitude, longitude, &house_system, include_minor)
        .context("Chart computation failed")?;

    if !chart.is_consistent() {
        log::warn!("{} bodies were placed in the fallback house", chart.inconsistencies.len());
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&chart)?
    } else {
        serde_json::to_string(&chart)?
    };
    println!("{json}");
    Ok(())
}
