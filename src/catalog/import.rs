//! Bulk movement import.
//!
//! Accepts comma- or tab-separated files. Besides the catalog's own header,
//! common spreadsheet column names are understood (`Exercise_Name`,
//! `Movement_Group`, ...). A bad row is recorded and the import carries on.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::csv_table::split_list;
use crate::error::{LiftlogError, Result};

use super::movement::Movement;
use super::store::{MovementDraft, MovementStore};

const NAME_COLUMNS: &[&str] = &["name", "exercise_name", "exercise name", "exercise"];
const ID_COLUMNS: &[&str] = &["id"];
const CATEGORY_COLUMNS: &[&str] = &["category", "movement_group", "body_region"];
const UNIT_COLUMNS: &[&str] = &["default_unit", "unit"];
const PRIMARY_COLUMNS: &[&str] = &["primary_muscle"];
const SECONDARY_COLUMNS: &[&str] = &["secondary_muscles"];
const NOTES_COLUMNS: &[&str] = &["notes"];

/// A row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRowError {
    /// Line number in the import file.
    pub line: u64,
    /// Why the row was rejected.
    pub message: String,
}

/// Tally of an import run.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Movements added to the catalog.
    pub inserted: Vec<Movement>,
    /// Rows skipped because the movement already exists.
    pub skipped: usize,
    /// Rows that failed validation or parsing.
    pub errors: Vec<ImportRowError>,
}

impl ImportReport {
    /// Number of inserted movements.
    pub fn inserted_count(&self) -> usize {
        self.inserted.len()
    }

    /// Number of errored rows.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// Column positions resolved from the import file header.
#[derive(Debug, Default)]
struct ColumnMap {
    name: usize,
    id: Option<usize>,
    category: Option<usize>,
    default_unit: Option<usize>,
    primary_muscle: Option<usize>,
    secondary_muscles: Option<usize>,
    notes: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Option<Self> {
        let find = |aliases: &[&str]| {
            headers
                .iter()
                .position(|h| aliases.contains(&h.trim().to_lowercase().as_str()))
        };

        Some(Self {
            name: find(NAME_COLUMNS)?,
            id: find(ID_COLUMNS),
            category: find(CATEGORY_COLUMNS),
            default_unit: find(UNIT_COLUMNS),
            primary_muscle: find(PRIMARY_COLUMNS),
            secondary_muscles: find(SECONDARY_COLUMNS),
            notes: find(NOTES_COLUMNS),
        })
    }

    fn draft(&self, record: &StringRecord) -> MovementDraft {
        let get = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        MovementDraft {
            id: Some(get(self.id)).filter(|s| !s.is_empty()),
            name: get(Some(self.name)),
            category: get(self.category),
            default_unit: get(self.default_unit),
            primary_muscle: get(self.primary_muscle),
            secondary_muscles: split_list(&get(self.secondary_muscles)),
            notes: get(self.notes),
        }
    }
}

/// Pick the delimiter from the header line.
fn detect_delimiter(text: &str) -> u8 {
    match text.lines().next() {
        Some(first) if first.contains('\t') => b'\t',
        _ => b',',
    }
}

/// Import movements from `path` into `store`.
///
/// Rows whose name already exists (ignoring case) or whose id collides are
/// skipped. All new movements are appended in one write at the end.
///
/// # Errors
///
/// Fails as a whole only when the import file cannot be read or has no
/// name column, or when the catalog itself cannot be read or written.
pub fn import_movements(store: &MovementStore, path: &Path) -> Result<ImportReport> {
    let text = fs::read_to_string(path).map_err(|e| LiftlogError::file(path, e))?;
    let mut report = ImportReport::default();
    if text.trim().is_empty() {
        return Ok(report);
    }

    let delimiter = detect_delimiter(&text);
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| LiftlogError::MalformedCsv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();
    let columns = ColumnMap::from_headers(&headers).ok_or_else(|| LiftlogError::MalformedCsv {
        path: path.to_path_buf(),
        message: format!(
            "no name column (expected one of: {})",
            NAME_COLUMNS.join(", ")
        ),
    })?;

    let existing = store.list_or_empty()?;
    let mut seen_ids: HashSet<String> = existing.iter().map(|m| m.id.clone()).collect();
    let mut seen_names: HashSet<String> =
        existing.iter().map(|m| m.name.to_lowercase()).collect();

    for (idx, result) in reader.records().enumerate() {
        let fallback_line = idx as u64 + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
                report.errors.push(ImportRowError {
                    line,
                    message: e.to_string(),
                });
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(fallback_line);

        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let movement = match columns.draft(&record).into_movement() {
            Ok(movement) => movement,
            Err(e) => {
                report.errors.push(ImportRowError {
                    line,
                    message: e.to_string(),
                });
                continue;
            }
        };

        if seen_names.contains(&movement.name.to_lowercase()) || seen_ids.contains(&movement.id)
        {
            tracing::debug!("Skipping existing movement {} (line {})", movement.id, line);
            report.skipped += 1;
            continue;
        }

        seen_ids.insert(movement.id.clone());
        seen_names.insert(movement.name.to_lowercase());
        report.inserted.push(movement);
    }

    store.append_all(&report.inserted)?;
    tracing::info!(
        "Imported {} movements ({} skipped, {} errors) from {:?}",
        report.inserted_count(),
        report.skipped,
        report.error_count(),
        path
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, MovementStore) {
        let temp = TempDir::new().unwrap();
        let store = MovementStore::new(temp.path().join("movements.csv"));
        (temp, store)
    }

    #[test]
    fn imports_tab_separated_spreadsheet_export() {
        let (temp, store) = setup();
        let file = temp.path().join("import.tsv");
        fs::write(
            &file,
            "Exercise_Name\tMovement_Group\nSnatch\tFull Body\nClean\tFull Body\n",
        )
        .unwrap();

        let report = import_movements(&store, &file).unwrap();
        assert_eq!(report.inserted_count(), 2);
        assert_eq!(report.skipped, 0);

        let all = store.list().unwrap();
        assert_eq!(all[0].id, "snatch");
        assert_eq!(all[0].category, "Full Body");
        assert_eq!(all[1].id, "clean");
    }

    #[test]
    fn imports_catalog_schema() {
        let (temp, store) = setup();
        let file = temp.path().join("import.csv");
        fs::write(
            &file,
            "id,name,category,default_unit,primary_muscle,secondary_muscles,notes\n\
             ohp,Overhead Press,push,kg,shoulders,\"triceps,upper chest\",strict\n",
        )
        .unwrap();

        import_movements(&store, &file).unwrap();
        let ohp = store.resolve("ohp").unwrap();
        assert_eq!(ohp.name, "Overhead Press");
        assert_eq!(ohp.secondary_muscles, vec!["triceps", "upper chest"]);
        assert_eq!(ohp.notes, "strict");
    }

    #[test]
    fn existing_and_repeated_names_are_skipped() {
        let (temp, store) = setup();
        store.add(MovementDraft::named("Snatch"), false).unwrap();
        let file = temp.path().join("import.csv");
        fs::write(&file, "name\nsnatch\nClean\nCLEAN\n").unwrap();

        let report = import_movements(&store, &file).unwrap();
        assert_eq!(report.inserted_count(), 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn bad_rows_are_tallied_not_fatal() {
        let (temp, store) = setup();
        let file = temp.path().join("import.csv");
        fs::write(&file, "name,category\nJerk,olympic\n,legs\n???,misc\nLunge,legs\n").unwrap();

        let report = import_movements(&store, &file).unwrap();
        assert_eq!(report.inserted_count(), 2);
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.errors[0].line, 3);
        assert_eq!(report.errors[1].line, 4);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let (temp, store) = setup();
        let file = temp.path().join("import.csv");
        fs::write(&file, "name,category\nJerk,olympic\n,\n").unwrap();

        let report = import_movements(&store, &file).unwrap();
        assert_eq!(report.inserted_count(), 1);
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn missing_name_column_fails_whole_import() {
        let (temp, store) = setup();
        let file = temp.path().join("import.csv");
        fs::write(&file, "title\nJerk\n").unwrap();

        let err = import_movements(&store, &file).unwrap_err();
        assert!(matches!(err, LiftlogError::MalformedCsv { .. }));
        assert!(!store.exists());
    }

    #[test]
    fn missing_import_file_is_file_not_found() {
        let (temp, store) = setup();
        let err = import_movements(&store, &temp.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LiftlogError::FileNotFound { .. }));
    }

    #[test]
    fn empty_import_file_inserts_nothing() {
        let (temp, store) = setup();
        let file = temp.path().join("import.csv");
        fs::write(&file, "").unwrap();
        let report = import_movements(&store, &file).unwrap();
        assert_eq!(report.inserted_count(), 0);
    }

    #[test]
    fn delimiter_detection() {
        assert_eq!(detect_delimiter("a\tb\n1,2"), b'\t');
        assert_eq!(detect_delimiter("a,b\n1\t2"), b',');
        assert_eq!(detect_delimiter(""), b',');
    }
}
