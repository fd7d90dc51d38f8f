use bmitrack_core::db::migrations::latest_version;
use bmitrack_core::db::{open_db, open_db_in_memory};
use bmitrack_core::{
    Category, EntryRepository, Measurement, NewEntry, RepoError, ServiceError,
    SqliteEntryRepository, TrackerService,
};
use rusqlite::Connection;

fn entry(date: &str, weight: f64, height: f64) -> NewEntry {
    NewEntry {
        date: date.to_string(),
        weight,
        height,
        bmi: weight / (height * height) * 703.0,
    }
}

#[test]
fn append_returns_fully_populated_measurement() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let recorded = repo.append(&entry("1/15/2026", 150.0, 65.0)).unwrap();

    assert_eq!(recorded.date, "1/15/2026");
    assert_eq!(recorded.weight, 150.0);
    assert_eq!(recorded.height, 65.0);
    assert_eq!(recorded.bmi, 150.0 / 4225.0 * 703.0);
    assert_eq!(recorded.category, Category::Overweight);
    assert!(recorded.id >= 1);
}

#[test]
fn append_ordering_yields_strictly_increasing_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let first = repo.append(&entry("1/15/2026", 150.0, 65.0)).unwrap();
    let second = repo.append(&entry("1/16/2026", 151.0, 65.0)).unwrap();
    let third = repo.append(&entry("1/17/2026", 149.5, 65.0)).unwrap();

    assert!(first.id < second.id && second.id < third.id);

    let history = repo.load_all().unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(
        history.iter().map(|m| m.id).collect::<Vec<_>>(),
        vec![first.id, second.id, third.id]
    );
    assert_eq!(history[0].date, "1/15/2026");
    assert_eq!(history[2].date, "1/17/2026");
}

#[test]
fn load_all_is_stable_across_repeated_calls() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    repo.append(&entry("1/15/2026", 150.0, 65.0)).unwrap();
    repo.append(&entry("1/16/2026", 120.0, 70.0)).unwrap();

    let first_read = repo.load_all().unwrap();
    let second_read = repo.load_all().unwrap();
    assert_eq!(first_read, second_read);
}

#[test]
fn category_is_recomputed_from_stored_bmi_on_load() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    repo.append(&entry("1/15/2026", 120.0, 70.0)).unwrap();

    let history = repo.load_all().unwrap();
    assert_eq!(history[0].category, Category::Underweight);
    assert_eq!(history[0].category, Category::classify(history[0].bmi));
}

#[test]
fn history_survives_close_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bmitrack.sqlite3");

    let recorded: Measurement;
    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteEntryRepository::try_new(&conn).unwrap();
        recorded = repo.append(&entry("1/15/2026", 150.0, 65.0)).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();
    let history = repo.load_all().unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0], recorded);
}

#[test]
fn append_validates_entry_before_touching_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let err = repo.append(&entry("1/15/2026", 0.0, 65.0)).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.load_all().unwrap().is_empty());
}

#[test]
fn load_all_rejects_corrupt_persisted_rows() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO bmi_entries (date, weight, height, bmi)
         VALUES ('1/15/2026', -10.0, 65.0, 24.0);",
        [],
    )
    .unwrap();

    let repo = SqliteEntryRepository::try_new(&conn).unwrap();
    let err = repo.load_all().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteEntryRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteEntryRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("bmi_entries"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE bmi_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            weight REAL NOT NULL,
            height REAL NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteEntryRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "bmi_entries",
            column: "bmi"
        })
    ));
}

#[test]
fn service_records_from_raw_text_and_returns_confirmed_entry() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();
    let service = TrackerService::new(repo);

    let recorded = service.record_on("1/15/2026", "150", "65").unwrap();
    assert_eq!(recorded.category, Category::Overweight);
    assert_eq!(recorded.bmi, 150.0 / 4225.0 * 703.0);

    let history = service.history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0], recorded);
}

#[test]
fn service_record_captures_a_wall_clock_date() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();
    let service = TrackerService::new(repo);

    let recorded = service.record("120", "70").unwrap();
    assert!(!recorded.date.is_empty());
    assert_eq!(recorded.category, Category::Underweight);
}

#[test]
fn invalid_input_is_rejected_before_any_store_interaction() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();
    let service = TrackerService::new(repo);

    for (weight, height) in [
        ("", "65"),
        ("150", ""),
        ("heavy", "65"),
        ("150", "tall"),
        ("-150", "65"),
        ("150", "0"),
    ] {
        let err = service.record_on("1/15/2026", weight, height).unwrap_err();
        assert!(matches!(err, ServiceError::Input(_)));
    }

    assert!(service.history().unwrap().is_empty());
}

#[test]
fn no_mutation_api_exists_and_reads_do_not_change_state() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let recorded = repo.append(&entry("1/15/2026", 150.0, 65.0)).unwrap();
    for _ in 0..3 {
        let history = repo.load_all().unwrap();
        assert_eq!(history, vec![recorded.clone()]);
    }

    let row_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM bmi_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(row_count, 1);
}
