//! skylog CLI - Command-line interface
//!
//! Reads a JSON telemetry batch from a file, runs one ingestion call
//! against in-memory collaborators, and prints the JSON response
//! envelope.

use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::process;

use skylog::airport::AirportFileParser;
use skylog::config::ConfigFile;
use skylog::ingest::{IngestResponse, IngestService, MemoryAirportDirectory, MemoryFlightStore};
use skylog::position::parse_batch;

#[derive(Parser)]
#[command(name = "skylog")]
#[command(version = skylog::VERSION)]
#[command(about = "Ingest GPS telemetry batches into logbook flight records", long_about = None)]
struct Args {
    /// JSON telemetry batch file (array of {time, latitude, longitude, altitude})
    #[arg(long)]
    input: PathBuf,

    /// Reference airport directory file (id latitude longitude name per line)
    #[arg(long)]
    airports: Option<PathBuf>,

    /// Config file path (defaults to ~/.skylog/config.ini)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured groundspeed cutoff, in knots
    #[arg(long)]
    cutoff: Option<f64>,

    /// Write the raw batch to an audit file before processing
    #[arg(long)]
    audit: bool,
}

fn main() {
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => ConfigFile::load_from(path),
        None => ConfigFile::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let _logging_guard =
        match skylog::logging::init_logging(&config.logging.directory, &config.logging.file) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Warning: file logging unavailable: {}", e);
                None
            }
        };

    // Apply command-line overrides
    let mut ingest_config = config.ingest_config();
    if let Some(cutoff) = args.cutoff {
        if cutoff <= 0.0 {
            eprintln!("Error: cutoff must be a positive number of knots");
            process::exit(1);
        }
        ingest_config.cutoff_knots = cutoff;
    }
    if args.audit {
        ingest_config.audit = true;
    }

    // Load the reference airport pool
    let reference_path = args.airports.or(config.airports.reference_file);
    let reference = match &reference_path {
        Some(path) => {
            let file = match File::open(path) {
                Ok(file) => file,
                Err(e) => {
                    eprintln!("Error opening airports file {}: {}", path.display(), e);
                    process::exit(1);
                }
            };
            match AirportFileParser::parse_all(file) {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("Error reading airports file {}: {}", path.display(), e);
                    process::exit(1);
                }
            }
        }
        None => Vec::new(),
    };

    // Read the telemetry batch
    let batch_text = match std::fs::read_to_string(&args.input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading batch file {}: {}", args.input.display(), e);
            process::exit(1);
        }
    };
    let samples = match parse_batch(&batch_text) {
        Ok(samples) => samples,
        Err(e) => {
            eprintln!("Error parsing telemetry batch: {}", e);
            process::exit(1);
        }
    };

    println!("Ingesting telemetry batch:");
    println!("  Input:    {}", args.input.display());
    println!("  Samples:  {}", samples.len());
    println!("  Airports: {}", reference.len());
    println!("  Cutoff:   {} kn", ingest_config.cutoff_knots);
    println!();

    let service = IngestService::new(
        MemoryAirportDirectory::new(reference),
        MemoryFlightStore::new(),
        ingest_config,
    );

    let response = IngestResponse::from_result(service.ingest(samples));
    let ok = response.ok;

    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing response: {}", e);
            process::exit(1);
        }
    }

    if !ok {
        process::exit(1);
    }
}
