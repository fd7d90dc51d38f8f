//! History store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the append-only history API over canonical `bmi_entries`
//!   storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - The contract is append and read-all only; no update or delete
//!   operation exists.
//! - Write paths must call `NewEntry::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - `append` returns only after the row is durably committed; callers
//!   update any display mirror exclusively from the returned record.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::bmi::Category;
use crate::model::measurement::{EntryValidationError, Measurement, NewEntry};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    date,
    weight,
    height,
    bmi
FROM bmi_entries";

const REQUIRED_COLUMNS: &[&str] = &["id", "date", "weight", "height", "bmi"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for history persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is not initialized to {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Append-only history store contract.
pub trait EntryRepository {
    /// Persists a new entry and returns the fully populated record,
    /// including the store-assigned id and derived category.
    fn append(&self, entry: &NewEntry) -> RepoResult<Measurement>;

    /// Returns the full history in insertion order.
    fn load_all(&self) -> RepoResult<Vec<Measurement>>;
}

/// SQLite-backed history store.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    /// Attaches to an initialized connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is stale.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the
    ///   `bmi_entries` shape does not match this binary's expectations.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'bmi_entries'
            );",
            [],
            |row| row.get(0),
        )?;
        if table_exists == 0 {
            return Err(RepoError::MissingRequiredTable("bmi_entries"));
        }

        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('bmi_entries');")?;
        let mut rows = stmt.query([])?;
        let mut present = Vec::new();
        while let Some(row) = rows.next()? {
            present.push(row.get::<_, String>(0)?);
        }
        for column in REQUIRED_COLUMNS.iter().copied() {
            if !present.iter().any(|name| name == column) {
                return Err(RepoError::MissingRequiredColumn {
                    table: "bmi_entries",
                    column,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn append(&self, entry: &NewEntry) -> RepoResult<Measurement> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO bmi_entries (date, weight, height, bmi)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                entry.date.as_str(),
                entry.weight,
                entry.height,
                entry.bmi
            ],
        )?;

        // last_insert_rowid is per-connection and this store is
        // single-writer, so the rowid belongs to the insert above.
        let id = self.conn.last_insert_rowid();

        Ok(Measurement {
            id,
            date: entry.date.clone(),
            weight: entry.weight,
            height: entry.height,
            bmi: entry.bmi,
            category: Category::classify(entry.bmi),
        })
    }

    fn load_all(&self) -> RepoResult<Vec<Measurement>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<Measurement> {
    let id: i64 = row.get("id")?;
    let weight: f64 = row.get("weight")?;
    let height: f64 = row.get("height")?;
    let bmi: f64 = row.get("bmi")?;

    if !(weight.is_finite() && weight > 0.0) {
        return Err(RepoError::InvalidData(format!(
            "invalid weight value `{weight}` in bmi_entries.weight (id {id})"
        )));
    }
    if !(height.is_finite() && height > 0.0) {
        return Err(RepoError::InvalidData(format!(
            "invalid height value `{height}` in bmi_entries.height (id {id})"
        )));
    }
    if !bmi.is_finite() {
        return Err(RepoError::InvalidData(format!(
            "invalid bmi value `{bmi}` in bmi_entries.bmi (id {id})"
        )));
    }

    Ok(Measurement {
        id,
        date: row.get("date")?,
        weight,
        height,
        bmi,
        category: Category::classify(bmi),
    })
}
