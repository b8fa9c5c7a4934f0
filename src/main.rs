use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;

use areamap::config::FileConfig;
use areamap::domain::ShapeId;
use areamap::session::{Event, Outcome, Session};
use areamap::shapes::ShapeCollection;

/// Measure and exchange polygon areas stored in KML files
///
/// Examples:
///   # List the polygons of a file with their areas in km²
///   areamap show fazenda.kml
///
///   # Export one polygon of a file to its own KML
///   areamap export fazenda.kml --shape "Reserva Legal" -o out/
///
///   # Measure a polygon given as lon,lat vertices and save it
///   areamap draw --coords "-47.1,-22.1 -47.0,-22.1 -47.0,-22.0" --name "Lote 3"
#[derive(Parser, Debug)]
#[command(name = "areamap")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches areamap.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a KML file and print each polygon with its area
    Show {
        /// KML file to read
        file: PathBuf,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Import a KML file and export its polygons one file each
    Export {
        /// KML file to read
        file: PathBuf,

        /// Only export the polygon with this name
        #[arg(short = 's', long)]
        shape: Option<String>,

        /// Output directory (defaults to output_dir from config, else ".")
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Build a polygon from lon,lat vertices, print its area and export it
    Draw {
        /// Space separated "lon,lat" vertices
        #[arg(long, allow_hyphen_values = true)]
        coords: String,

        /// Polygon name (defaults to the configured prefix and a number)
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Output directory (defaults to output_dir from config, else ".")
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = match args.config {
        Some(ref config_path) => FileConfig::from_path(config_path)?,
        None => FileConfig::load().unwrap_or_default(),
    };

    let verbose = args.verbose || file_config.verbose;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "warn" }),
    )
    .init();

    let mut session = Session::new(ShapeCollection::with_name_prefix(
        file_config.name_prefix.clone(),
    ));

    match args.command {
        Command::Show { file, json } => {
            load(&mut session, &file)?;
            print_summary(&session, json || file_config.json)?;
        }
        Command::Export {
            file,
            shape,
            output,
        } => {
            load(&mut session, &file)?;

            let ids: Vec<_> = match shape {
                Some(ref name) => match session.shapes().find_by_name(name) {
                    Some(found) => vec![found.id],
                    None => bail!("No polygon named {:?} in {}", name, file.display()),
                },
                None => session.shapes().iter().map(|s| s.id).collect(),
            };

            let dir = output_dir(output, &file_config)?;
            for id in ids {
                export(&mut session, id, &dir)?;
            }
        }
        Command::Draw {
            coords,
            name,
            output,
        } => {
            let ring = parse_coords(&coords)?;
            if ring.len() < 3 {
                bail!("A polygon needs at least 3 vertices, got {}", ring.len());
            }

            let id = match session.dispatch(Event::DrawCreated { ring, name }) {
                Outcome::Added(id) => id,
                other => bail!("Failed to create polygon: {:?}", other),
            };
            print_summary(&session, file_config.json)?;

            let dir = output_dir(output, &file_config)?;
            export(&mut session, id, &dir)?;
        }
    }

    Ok(())
}

/// Read a KML file into the session, replacing whatever it held
fn load(session: &mut Session, file: &Path) -> Result<()> {
    let spinner = create_spinner(&format!("Reading {}...", file.display()));
    let start = Instant::now();

    let contents =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    match session.dispatch(Event::FileLoaded {
        file_name,
        contents,
    }) {
        Outcome::Imported(report) => {
            spinner.finish_with_message(format!(
                "Imported {} polygons from {} [{:.1}s]",
                report.imported_count,
                report.file_name,
                start.elapsed().as_secs_f32()
            ));
            Ok(())
        }
        Outcome::Failed(message) => {
            spinner.abandon();
            bail!("Failed to import {}: {}", file.display(), message)
        }
        other => {
            spinner.abandon();
            bail!("Unexpected import outcome: {:?}", other)
        }
    }
}

fn export(session: &mut Session, id: ShapeId, dir: &Path) -> Result<()> {
    match session.dispatch(Event::ExportRequested { id }) {
        Outcome::Exported(file) => {
            let path = file
                .write_to(dir)
                .with_context(|| format!("Failed to write {}", file.file_name))?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Outcome::Failed(message) => bail!("Failed to export polygon: {}", message),
        other => bail!("Unexpected export outcome: {:?}", other),
    }
}

fn print_summary(session: &Session, json: bool) -> Result<()> {
    let panel = session.panel();
    let bounds = session.shapes().bounds();

    if json {
        let listing = serde_json::json!({
            "panel": panel,
            "bounds": bounds,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&listing).context("Failed to serialize listing")?
        );
        return Ok(());
    }

    println!();
    println!("{}", panel);
    if let Some(b) = bounds {
        let (lon, lat) = b.center();
        println!(
            "Bounds: ({:.4}, {:.4}) -> ({:.4}, {:.4}), centered on ({:.4}, {:.4})",
            b.min_lon, b.min_lat, b.max_lon, b.max_lat, lon, lat
        );
    }
    println!();
    Ok(())
}

fn output_dir(output: Option<PathBuf>, config: &FileConfig) -> Result<PathBuf> {
    let dir = output
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    Ok(dir)
}

/// Parse "lon,lat lon,lat ..." into vertex pairs. A third altitude value is
/// accepted and ignored.
fn parse_coords(text: &str) -> Result<Vec<(f64, f64)>> {
    text.split_whitespace()
        .map(|tuple| {
            let mut parts = tuple.split(',');
            let (Some(lon), Some(lat)) = (parts.next(), parts.next()) else {
                bail!("Expected lon,lat but got {:?}", tuple);
            };
            let lon: f64 = lon
                .parse()
                .with_context(|| format!("Invalid longitude in {:?}", tuple))?;
            let lat: f64 = lat
                .parse()
                .with_context(|| format!("Invalid latitude in {:?}", tuple))?;
            Ok((lon, lat))
        })
        .collect()
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
