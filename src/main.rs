use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use time::format_description::well_known::Rfc3339;
use tracing::Level;

use notecounter::capture::{self, ImageFileSource};
use notecounter::detection::{DEFAULT_CONFIDENCE_THRESHOLD, format_rupiah};
use notecounter::export;
use notecounter::{CounterConfig, CycleOutcome, HttpRecognizer, ScriptedDetection, Session};

#[derive(Parser)]
#[command(name = "notecounter")]
#[command(about = "Count banknotes from recognizer detections")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Minimum confidence for a detection to count
    #[arg(
        long,
        default_value_t = DEFAULT_CONFIDENCE_THRESHOLD,
        global = true
    )]
    threshold: f32,

    /// Milliseconds during which the same denomination is not counted again
    #[arg(long, default_value_t = 2000, global = true)]
    cooldown_ms: u64,

    /// Write the ledger as CSV to this file
    #[arg(long, value_name = "PATH", global = true)]
    csv: Option<PathBuf>,

    /// Write the ledger table as a PNG to this file
    #[arg(long, value_name = "PATH", global = true)]
    png: Option<PathBuf>,

    /// Print the ledger as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Send captured frames to the recognizer and count the notes found
    Count {
        /// Frame images, processed in order
        #[arg(value_name = "FRAME", required = true)]
        frames: Vec<PathBuf>,

        /// Recognizer detect endpoint
        #[arg(long, default_value = notecounter::config::DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,

        /// File name sent with each upload
        #[arg(long, default_value = notecounter::config::DEFAULT_UPLOAD_NAME)]
        upload_name: String,
    },

    /// Feed recorded detections (JSON array) through the gates
    Replay {
        /// JSON file of {"denomination", "confidence", "at_ms"} objects
        #[arg(value_name = "EVENTS")]
        events: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let mut config = CounterConfig::new()
        .with_confidence_threshold(args.threshold)
        .with_cooldown(Duration::from_millis(args.cooldown_ms));

    let session = match &args.command {
        Command::Count {
            frames,
            endpoint,
            timeout_secs,
            upload_name,
        } => {
            config = config
                .with_endpoint(endpoint.clone())
                .with_request_timeout(Duration::from_secs(*timeout_secs))
                .with_upload_name(upload_name.clone());
            config.validate()?;

            let recognizer = HttpRecognizer::from_config(&config)?;
            let mut session = Session::new(config);
            // Acquired before the first cycle; dropped on every exit path
            let mut source = ImageFileSource::open(frames.clone())?;

            tracing::info!(
                endpoint = recognizer.endpoint(),
                frames = source.remaining(),
                "starting capture"
            );
            let report = capture::drive(&mut session, &mut source, &recognizer).await?;
            if args.json {
                tracing::info!(
                    cycles = report.cycles(),
                    accepted = report.accepted,
                    "capture finished"
                );
            } else {
                println!(
                    "Cycles: {} (accepted {}, low confidence {}, duplicates {}, empty {}, failed {})",
                    report.cycles(),
                    report.accepted,
                    report.low_confidence,
                    report.duplicates,
                    report.no_detection,
                    report.failed
                );
            }
            session
        }
        Command::Replay { events } => {
            config.validate()?;
            let raw = std::fs::read_to_string(events)
                .with_context(|| format!("Failed to read events file {:?}", events))?;
            let detections: Vec<ScriptedDetection> = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse events file {:?}", events))?;

            let mut session = Session::new(config);
            let origin = Instant::now();
            let echo = args.verbose && !args.json;
            for detection in detections {
                match session.process(detection.into_event(origin)) {
                    CycleOutcome::Accepted { summary, .. } => {
                        if echo {
                            println!("  + {}", summary);
                        }
                    }
                    CycleOutcome::Rejected(reason) => {
                        if echo {
                            println!("  - {} ({})", reason, reason.code());
                        }
                    }
                }
            }
            session
        }
    };

    print_results(&session, args.verbose, args.json)?;

    let snapshot = session.ledger().snapshot();
    if let Some(path) = &args.csv {
        export::save_csv(&snapshot, path)?;
        tracing::info!(path = %path.display(), "CSV written");
    }
    if let Some(path) = &args.png {
        export::save_png(&snapshot, path)?;
        tracing::info!(path = %path.display(), "table image written");
    }

    Ok(())
}

fn print_results(session: &Session, verbose: bool, json: bool) -> anyhow::Result<()> {
    let snapshot = session.ledger().snapshot();

    // The JSON document is the only thing on stdout in JSON mode
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("\n=== Money Count ===");
    if snapshot.entries.is_empty() {
        println!("No notes counted.");
    } else {
        println!("{:>8}  {:>14}  {:>16}", "JUMLAH", "NOMINAL", "SUBTOTAL");
        for entry in &snapshot.entries {
            println!(
                "{:>8}  {:>14}  {:>16}",
                entry.count(),
                format_rupiah(entry.denomination().value()),
                format_rupiah(entry.subtotal())
            );
        }
    }
    println!("TOTAL: {}", format_rupiah(snapshot.total));

    if verbose {
        let history = session.tracker().history();
        if !history.is_empty() {
            println!("\nAccepted detections:");
            for tracked in history {
                println!(
                    "  {} {} ({:.1}%) at {}",
                    tracked.id,
                    tracked.event.denomination,
                    f64::from(tracked.event.confidence) * 100.0,
                    tracked.accepted_at.format(&Rfc3339)?
                );
            }
        }

        if let Some(report) = session.performance().report() {
            println!(
                "\nRecognizer latency over {} calls: mean {:?}, p50 {:?}, p95 {:?}, max {:?}",
                report.count, report.mean, report.p50, report.p95, report.max
            );
        }
    }

    Ok(())
}
