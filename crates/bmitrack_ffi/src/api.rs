//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Absorb core failures into response envelopes for the single-screen UI.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - A failed record never yields a measurement payload; the UI appends to
//!   its history mirror only from a confirmed success envelope.
//! - The store location is configured explicitly once per process, not
//!   opened implicitly at import time.

use bmitrack_core::db::open_db;
use bmitrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Measurement, SqliteEntryRepository, TrackerService,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

const BMI_DB_FILE_NAME: &str = "bmitrack.sqlite3";
static BMI_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Configures the directory holding the history database file.
///
/// The UI calls this once at startup with its app-documents directory,
/// before any record/history call.
///
/// # FFI contract
/// - Sync call; does not touch the file system.
/// - Idempotent for the same directory; conflicting reconfiguration
///   returns an error message.
/// - Never panics; returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_dir(dir: String) -> String {
    let trimmed = dir.trim();
    if trimmed.is_empty() {
        return "db dir cannot be empty".to_string();
    }
    let candidate = PathBuf::from(trimmed).join(BMI_DB_FILE_NAME);

    let active = BMI_DB_PATH.get_or_init(|| candidate.clone());
    if active == &candidate {
        String::new()
    } else {
        warn!(
            "event=db_configure module=ffi status=error error_code=db_path_conflict active={} requested={}",
            active.display(),
            candidate.display()
        );
        format!(
            "db path already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            candidate.display()
        )
    }
}

/// History entry shape handed to the UI for result and list display.
///
/// `bmi` is the stored full-precision value; rounding for display happens
/// on the Dart side.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementView {
    /// Store-assigned, strictly increasing identifier.
    pub id: i64,
    /// Local calendar date captured at creation time.
    pub date: String,
    /// Weight in pounds.
    pub weight: f64,
    /// Height in inches.
    pub height: f64,
    /// Full-precision BMI value.
    pub bmi: f64,
    /// Display label for the derived band (`Underweight`..`Obese`).
    pub category: String,
}

impl From<Measurement> for MeasurementView {
    fn from(value: Measurement) -> Self {
        Self {
            id: value.id,
            date: value.date,
            weight: value.weight,
            height: value.height,
            bmi: value.bmi,
            category: value.category.display_label().to_string(),
        }
    }
}

/// Response envelope for the submit action.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordResponse {
    /// Whether the measurement was durably recorded.
    pub ok: bool,
    /// Confirmed record; present only when `ok` is true.
    pub measurement: Option<MeasurementView>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Response envelope for history restore.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryResponse {
    /// Whether the history was loaded.
    pub ok: bool,
    /// Entries in insertion order (empty on failure).
    pub entries: Vec<MeasurementView>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Records a measurement from the two raw text inputs.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Invalid input creates no entry and returns a validation message.
/// - On success the envelope carries the store-confirmed record; the UI
///   appends it to the history mirror as-is.
#[flutter_rust_bridge::frb(sync)]
pub fn record_measurement(weight: String, height: String) -> RecordResponse {
    match with_tracker_service(|service| service.record(weight.as_str(), height.as_str())) {
        Ok(measurement) => RecordResponse {
            ok: true,
            measurement: Some(measurement.into()),
            message: "Measurement recorded.".to_string(),
        },
        Err(message) => RecordResponse {
            ok: false,
            measurement: None,
            message,
        },
    }
}

/// Loads the full history in insertion order.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Restores the history list across application restarts.
#[flutter_rust_bridge::frb(sync)]
pub fn load_history() -> HistoryResponse {
    match with_tracker_service(|service| service.history()) {
        Ok(entries) => {
            let entries: Vec<MeasurementView> =
                entries.into_iter().map(MeasurementView::from).collect();
            let message = if entries.is_empty() {
                "No entries yet.".to_string()
            } else {
                format!("Loaded {} entry(ies).", entries.len())
            };
            HistoryResponse {
                ok: true,
                entries,
                message,
            }
        }
        Err(message) => HistoryResponse {
            ok: false,
            entries: Vec::new(),
            message,
        },
    }
}

fn resolve_db_path() -> PathBuf {
    BMI_DB_PATH
        .get_or_init(|| std::env::temp_dir().join(BMI_DB_FILE_NAME))
        .clone()
}

fn with_tracker_service<T>(
    f: impl FnOnce(
        &TrackerService<SqliteEntryRepository<'_>>,
    ) -> Result<T, bmitrack_core::ServiceError>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("history DB open failed: {err}"))?;
    let repo = SqliteEntryRepository::try_new(&conn)
        .map_err(|err| format!("history store init failed: {err}"))?;
    let service = TrackerService::new(repo);
    f(&service).map_err(|err| err.to_string())
}
