//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::config::AppConfig;
use liberation_core::{
    AlumniRecord, Evaluation, EvaluationContext, Path, ProgressionEngine, ProgressionError,
    Stage, SystemClock, TrackingStatus, get_tracking_status,
};
use std::path::{Path as FsPath, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of a single-record file (1 MB).
const MAX_RECORD_FILE_SIZE: u64 = 1024 * 1024;

/// Maximum size of a batch file (100 MB).
const MAX_BATCH_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &FsPath, max_size: u64) -> Result<(), ProgressionError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| ProgressionError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(ProgressionError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve a user-supplied input path to a regular file.
///
/// Canonicalizes the path (resolving ".." and symlinks) and rejects
/// directories.
fn validate_file_path(path: &FsPath) -> Result<PathBuf, ProgressionError> {
    let canonical = path.canonicalize().map_err(|e| {
        ProgressionError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(ProgressionError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Read and decode a JSON file after path and size checks.
fn read_json<T: serde::de::DeserializeOwned>(
    path: &FsPath,
    max_size: u64,
) -> Result<T, ProgressionError> {
    let canonical = validate_file_path(path)?;
    validate_file_size(&canonical, max_size)?;

    let content = std::fs::read_to_string(&canonical)
        .map_err(|e| ProgressionError::IoError(format!("Cannot read file: {}", e)))?;

    serde_json::from_str(&content)
        .map_err(|e| ProgressionError::SerializationError(format!("Invalid JSON: {}", e)))
}

/// Build the engine described by the configuration.
fn build_engine(config: &AppConfig) -> Result<ProgressionEngine, ProgressionError> {
    ProgressionEngine::with_clock(SystemClock, config.engine)
}

/// Evaluation context for an optional `YYYY-MM-DD` date, else today.
fn context_for(
    engine: &ProgressionEngine,
    today: Option<&str>,
) -> Result<EvaluationContext, ProgressionError> {
    Ok(match api::parse_today(today)? {
        Some(date) => engine.context_on(date),
        None => engine.context(),
    })
}

fn print_json(value: &impl serde::Serialize) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

fn display_stage(stage: Option<Stage>) -> String {
    stage
        .map(|s| format!("{} ({})", s.label(), s))
        .unwrap_or_else(|| "-".to_string())
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &AppConfig, host: &str, port: u16) -> Result<(), ProgressionError> {
    let engine = build_engine(config)?;

    println!("Liberation Progression Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:          {}", host);
    println!("  Port:          {}", port);
    println!("  Median income: {}", config.engine.national_median_income);
    println!("  Cutoff month:  {}", config.engine.academic_cutoff_month);
    println!();
    println!("Endpoints:");
    println!("  GET  /health      - Health check");
    println!("  GET  /paths       - List paths and stages");
    println!("  POST /evaluate    - Evaluate one record");
    println!("  POST /tracking    - Compare two stages");
    println!("  POST /auto-update - Gate and update a batch");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, engine).await
}

// =============================================================================
// EVALUATE COMMAND
// =============================================================================

/// Evaluate one record from a JSON file.
pub fn cmd_evaluate(
    config: &AppConfig,
    json_mode: bool,
    file: &FsPath,
    today: Option<&str>,
) -> Result<(), ProgressionError> {
    let engine = build_engine(config)?;
    let ctx = context_for(&engine, today)?;
    let record: AlumniRecord = read_json(file, MAX_RECORD_FILE_SIZE)?;
    let evaluation = Evaluation::of(&record, &ctx);

    tracing::debug!(file = %file.display(), ?evaluation, "Evaluated record");

    if json_mode {
        print_json(&evaluation);
        return Ok(());
    }

    println!("Alumni Progression");
    println!("==================");
    println!("Evaluated on:  {}", evaluation.evaluated_on);
    println!("Cohort year:   {}", record.cohort_year);
    println!("College year:  {}", evaluation.college_year);
    println!();
    println!(
        "Path:          {}",
        evaluation
            .path
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| "insufficient data".to_string())
    );
    println!("Stage:         {}", display_stage(evaluation.stage));
    println!("Expected:      {}", display_stage(evaluation.expected_stage));
    println!("Next:          {}", display_stage(evaluation.next_stage));
    println!("Progress:      {:.2}", evaluation.percent_complete);
    println!("Tracking:      {}", evaluation.tracking_status);
    println!();
    println!(
        "Auto-advance due: {}",
        if evaluation.should_auto_advance {
            "yes"
        } else {
            "no"
        }
    );
    println!(
        "Auto-update due:  {}",
        if evaluation.should_auto_update {
            "yes"
        } else {
            "no"
        }
    );

    Ok(())
}

// =============================================================================
// BATCH COMMAND
// =============================================================================

/// Run the auto-update gate over a JSON array of records.
pub fn cmd_batch(
    config: &AppConfig,
    json_mode: bool,
    file: &FsPath,
    today: Option<&str>,
) -> Result<(), ProgressionError> {
    let engine = build_engine(config)?;
    let ctx = context_for(&engine, today)?;
    let records: Vec<AlumniRecord> = read_json(file, MAX_BATCH_FILE_SIZE)?;

    let (outcomes, summary) = engine.run_batch(&records, &ctx);
    let due = outcomes.iter().filter(|o| o.due).count();
    tracing::info!(
        records = records.len(),
        due,
        evaluated_on = %ctx.today(),
        "Auto-update batch evaluated"
    );

    if json_mode {
        let output = serde_json::json!({
            "evaluated_on": ctx.today(),
            "outcomes": outcomes,
            "summary": summary,
        });
        print_json(&output);
        return Ok(());
    }

    println!("Auto-Update Batch ({})", ctx.today());
    println!("=============================");
    for (i, outcome) in outcomes.iter().enumerate() {
        match outcome.update {
            Some(update) => println!(
                "  #{:<5} due   stage: {:<28} status: {}{}",
                i,
                display_stage(update.current_stage),
                update.tracking_status,
                update
                    .path_type
                    .map(|p| format!("  path: {}", p.as_str()))
                    .unwrap_or_default()
            ),
            None => println!("  #{:<5} skip", i),
        }
    }
    println!();
    println!("Records:    {}", summary.total);
    println!("Due:        {}", due);
    for status in [
        TrackingStatus::OnTrack,
        TrackingStatus::NearTrack,
        TrackingStatus::OffTrack,
        TrackingStatus::Unknown,
    ] {
        println!("{:<11} {}", format!("{}:", status), summary.count(status));
    }

    Ok(())
}

// =============================================================================
// TRACK COMMAND
// =============================================================================

/// Compare an expected and an actual stage on a path.
pub fn cmd_track(
    json_mode: bool,
    expected: &str,
    actual: &str,
    path: &str,
) -> Result<(), ProgressionError> {
    let expected: Stage = expected.parse()?;
    let actual: Stage = actual.parse()?;
    let path: Path = path.parse()?;

    let status = get_tracking_status(Some(expected), Some(actual), path);

    if json_mode {
        print_json(&serde_json::json!({
            "expected": expected,
            "actual": actual,
            "path": path,
            "tracking_status": status,
        }));
    } else {
        println!("{} vs {} on {}: {}", actual, expected, path, status);
    }
    Ok(())
}

// =============================================================================
// PATHS COMMAND
// =============================================================================

/// List every path with its stages.
pub fn cmd_paths(json_mode: bool) -> Result<(), ProgressionError> {
    let paths = api::PathsResponse::default();

    if json_mode {
        print_json(&paths);
        return Ok(());
    }

    for ladder in &paths.paths {
        println!("{} ({})", ladder.name, ladder.path);
        for (i, stage) in ladder.stages.iter().enumerate() {
            println!("  {}. {:<14} {}", i + 1, stage.stage.as_str(), stage.label);
        }
        println!();
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
