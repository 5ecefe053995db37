//! cueprep CLI entry point

use clap::Parser;
use cueprep::analysis::PrecomputedAnalysis;
use cueprep::config::{Cli, Settings};
use cueprep::export;
use cueprep::pipeline::{self, Backends};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli);

    // Validate inputs
    if let Err(e) = validate_inputs(&cli) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    // Build settings from CLI
    let settings = Settings::from_cli(&cli);

    // Load the captured raw analysis; it backs all three collaborator seams
    let precomputed = match PrecomputedAnalysis::load(&cli.raw) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let backends = Backends {
        structure: &precomputed,
        key: &precomputed,
        stems: &precomputed,
    };

    // Run the pipeline
    let result = match pipeline::analyze(&cli.audio, cli.vdj_db.as_deref(), &settings, &backends) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Fatal error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Write result JSON if requested
    if let Some(output_path) = &cli.output {
        if let Err(e) = export::write_result_json(&result, output_path) {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    }

    print_summary(&cli, &result);

    ExitCode::SUCCESS
}

fn init_logging(cli: &Cli) {
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = if cli.quiet { "error" } else { filter };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

fn validate_inputs(cli: &Cli) -> Result<(), String> {
    if !cli.raw.exists() {
        return Err(format!(
            "Raw analysis file does not exist: {}\n\n  Tip: Capture the analyzer service's JSON output first.\n  Example:\n    cueprep -a ~/Music/track.m4a -r ./track.analysis.json --vdj-db ~/VirtualDJ/database.xml",
            cli.raw.display()
        ));
    }

    if cli.max_cues == 0 {
        return Err("--max-cues must be at least 1".to_string());
    }

    Ok(())
}

fn print_summary(cli: &Cli, result: &cueprep::AnalysisResult) {
    println!();
    println!("Track: {}", cli.audio.display());
    if result.key.is_empty() {
        println!("BPM: {:.1}  Key: (unavailable)", result.bpm);
    } else {
        println!(
            "BPM: {:.1}  Key: {} ({})",
            result.bpm, result.key, result.key_camelot
        );
    }
    println!();

    for segment in &result.segments {
        println!(
            "  {:>8.2}s - {:>8.2}s  {:<16} [{}]",
            segment.start,
            segment.end,
            segment.label,
            if segment.bars == 1 {
                "1 bar".to_string()
            } else {
                format!("{} bars", segment.bars)
            }
        );
    }

    println!();
    if cli.vdj_db.is_some() {
        if result.vdj_written {
            println!("✓ Cue points written to VDJ database");
        } else {
            println!("✗ VDJ database not updated (see warnings above)");
        }
    }
    if let Some(output) = &cli.output {
        println!("✓ Result written to {}", output.display());
    }
}
