use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use metro_sim::{Fleet, ServiceWindow};
use metro_track::{LineDefinition, StaticTrackNetwork, TrackNetwork};
use tracing_subscriber::EnvFilter;

mod kochi;
mod output;

use output::write_line_geojson;

#[derive(Parser, Debug)]
#[command(
    name = "line-probe",
    author,
    version,
    about = "Exercise a metro line end to end",
    long_about = "Builds a track network from a line definition, spawns a simulated \
                  fleet, and advances it tick by tick while logging every resolved \
                  position.\n\n\
                  With no --line argument the built-in Kochi Metro Line 1 table is \
                  used. Line definition files are JSON: an id, a display name, and \
                  an ordered station list with lat/lng coordinates."
)]
struct Args {
    /// Line definition JSON file (defaults to the built-in Kochi Line 1)
    #[arg(short, long)]
    line: Option<PathBuf>,

    /// Number of simulated trains
    #[arg(short, long, default_value = "4")]
    trains: usize,

    /// Number of ticks to simulate
    #[arg(long, default_value = "40")]
    ticks: u64,

    /// Progress fraction each train covers per tick
    #[arg(long, default_value = "0.05")]
    step: f64,

    /// Gate movement on the 05:30-22:30 daily service window
    #[arg(long)]
    service_window: bool,

    /// Write the track polyline and stations to this GeoJSON file
    #[arg(short, long)]
    geojson: Option<PathBuf>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn load_line(args: &Args) -> Result<LineDefinition> {
    let Some(path) = &args.line else {
        return Ok(kochi::line_one());
    };

    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read line definition {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse line definition {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let line = load_line(&args)?;
    tracing::info!(
        line = %line.name,
        stations = line.stations.len(),
        "building track network"
    );

    let network: Arc<dyn TrackNetwork> =
        Arc::new(StaticTrackNetwork::new(line).context("Failed to build track network")?);

    let total_km: f64 = network.segments().iter().map(|s| s.distance_km()).sum();
    tracing::info!(
        segments = network.segments().len(),
        polyline_points = network.track_polyline().0.len(),
        total_km = (total_km * 100.0).round() / 100.0,
        "network ready"
    );

    if let Some(path) = &args.geojson {
        write_line_geojson(path, network.as_ref())?;
        tracing::info!(path = %path.display(), "wrote line GeoJSON");
    }

    let mut fleet = Fleet::new(network, args.trains).context("Failed to spawn fleet")?;
    if args.service_window {
        fleet = fleet.with_service_window(ServiceWindow::daily(
            chrono::NaiveTime::from_hms_opt(5, 30, 0).expect("valid time"),
            chrono::NaiveTime::from_hms_opt(22, 30, 0).expect("valid time"),
        ));
    }

    for tick in 0..args.ticks {
        let now = chrono::Local::now().naive_local();
        fleet.advance_all(args.step, now);

        for train in fleet.trains() {
            let leg = &fleet.legs()[train.leg];
            tracing::info!(
                tick,
                train = %train.id,
                from = &*leg.from.name,
                to = &*leg.to.name,
                progress = train.progress,
                lat = train.position.y(),
                lng = train.position.x(),
            );
        }
    }

    Ok(())
}
