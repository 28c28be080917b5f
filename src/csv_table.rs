//! Header-checked CSV files.
//!
//! Both data files are plain CSV with a fixed header. [`CsvTable`] owns the
//! file-level concerns: creating the file with its header, verifying the
//! header on every read and append, appending whole rows in a single write,
//! and rewriting the file through a temporary sibling.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::{LiftlogError, Result};

/// A CSV file with a fixed header.
#[derive(Debug, Clone)]
pub struct CsvTable {
    path: PathBuf,
    header: &'static [&'static str],
}

/// A data row along with its 1-based line number in the file.
#[derive(Debug, Clone)]
pub struct Row {
    /// Line number (the header is line 1).
    pub line: u64,
    /// Raw field values, same order as the header.
    pub record: StringRecord,
}

impl Row {
    /// Get a field by position, empty when missing.
    pub fn field(&self, idx: usize) -> &str {
        self.record.get(idx).unwrap_or("")
    }
}

impl CsvTable {
    /// Create a table handle. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>, header: &'static [&'static str]) -> Self {
        Self {
            path: path.into(),
            header,
        }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the canonical header.
    pub fn header(&self) -> &'static [&'static str] {
        self.header
    }

    /// Check whether the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| LiftlogError::file(parent, e))?;
            }
        }
        Ok(())
    }

    /// Create the file with its header if it does not exist.
    ///
    /// Returns `true` when the file was created.
    pub fn init(&self) -> Result<bool> {
        if self.exists() {
            self.check_header()?;
            return Ok(false);
        }
        self.ensure_dir()?;

        let bytes = encode_rows(Some(self.header), &[])?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|e| LiftlogError::file(&self.path, e))?;
        file.write_all(&bytes)
            .map_err(|e| LiftlogError::file(&self.path, e))?;

        tracing::info!("Created {:?}", self.path);
        Ok(true)
    }

    /// Read every data row.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file is missing and `MalformedCsv` if
    /// the header differs or a row has the wrong number of fields.
    pub fn read_rows(&self) -> Result<Vec<Row>> {
        let file = File::open(&self.path).map_err(|e| LiftlogError::file(&self.path, e))?;
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);

        let headers = reader.headers().map_err(|e| self.malformed(e))?.clone();
        self.verify_header(&headers)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| self.malformed(e))?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            if record.len() != self.header.len() {
                return Err(LiftlogError::MalformedCsv {
                    path: self.path.clone(),
                    message: format!(
                        "line {} has {} fields, expected {}",
                        line,
                        record.len(),
                        self.header.len()
                    ),
                });
            }
            rows.push(Row { line, record });
        }

        tracing::debug!("Read {} rows from {:?}", rows.len(), self.path);
        Ok(rows)
    }

    /// Append rows, creating the file with its header if needed.
    ///
    /// All rows are encoded first and written with one `write_all`, so an
    /// encoding failure leaves the file untouched.
    pub fn append(&self, rows: &[Vec<String>]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let needs_header = !self.exists();
        if needs_header {
            self.ensure_dir()?;
        } else {
            self.check_header()?;
        }

        let bytes = encode_rows(needs_header.then_some(self.header), rows)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| LiftlogError::file(&self.path, e))?;
        file.write_all(&bytes)
            .map_err(|e| LiftlogError::file(&self.path, e))?;

        tracing::debug!("Appended {} rows to {:?}", rows.len(), self.path);
        Ok(())
    }

    /// Replace the whole file with the given rows.
    pub fn rewrite(&self, rows: &[Vec<String>]) -> Result<()> {
        self.ensure_dir()?;
        write_atomically(&self.path, &encode_rows(Some(self.header), rows)?)
    }

    /// Read just the header line of an existing file and verify it.
    pub fn check_header(&self) -> Result<()> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.open_error(e))?;
        let headers = reader.headers().map_err(|e| self.malformed(e))?.clone();
        self.verify_header(&headers)
    }

    fn verify_header(&self, headers: &StringRecord) -> Result<()> {
        let matches = headers.len() == self.header.len()
            && headers
                .iter()
                .zip(self.header.iter())
                .all(|(found, expected)| found.trim() == *expected);
        if matches {
            Ok(())
        } else {
            Err(LiftlogError::MalformedCsv {
                path: self.path.clone(),
                message: format!(
                    "unexpected header '{}', expected '{}'",
                    headers.iter().collect::<Vec<_>>().join(","),
                    self.header.join(",")
                ),
            })
        }
    }

    fn malformed(&self, err: csv::Error) -> LiftlogError {
        LiftlogError::MalformedCsv {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }

    fn open_error(&self, err: csv::Error) -> LiftlogError {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => LiftlogError::file(&self.path, io),
            other => LiftlogError::MalformedCsv {
                path: self.path.clone(),
                message: format!("{:?}", other),
            },
        }
    }
}

/// Encode an optional header plus rows into CSV bytes.
pub fn encode_rows(header: Option<&[&str]>, rows: &[Vec<String>]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().flexible(false).from_writer(Vec::new());
    if let Some(header) = header {
        writer.write_record(header)?;
    }
    for row in rows {
        writer.write_record(row)?;
    }
    writer.into_inner().map_err(|e| {
        LiftlogError::Io(std::io::Error::new(
            e.error().kind(),
            e.error().to_string(),
        ))
    })
}

/// Write bytes to a temporary sibling and rename it over `path`.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "liftlog".to_string());
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&tmp, bytes).map_err(|e| LiftlogError::file(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        LiftlogError::file(path, e)
    })
}

/// Resolve a path for comparison, following symlinks where the file or
/// its parent directory exists.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    match (fs::canonicalize(parent), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

/// Whether two paths name the same file.
pub fn same_file(a: &Path, b: &Path) -> bool {
    normalize_path(a) == normalize_path(b)
}

/// Split a list cell on commas or semicolons, dropping empty items.
pub fn split_list(cell: &str) -> Vec<String> {
    cell.split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Join a list into a single cell.
pub fn join_list(items: &[String]) -> String {
    items.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &[&str] = &["id", "name"];

    fn row(id: &str, name: &str) -> Vec<String> {
        vec![id.to_string(), name.to_string()]
    }

    #[test]
    fn init_creates_header_once() {
        let temp = TempDir::new().unwrap();
        let table = CsvTable::new(temp.path().join("t.csv"), HEADER);

        assert!(table.init().unwrap());
        assert!(!table.init().unwrap());
        assert_eq!(fs::read_to_string(table.path()).unwrap(), "id,name\n");
    }

    #[test]
    fn init_creates_missing_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let table = CsvTable::new(temp.path().join("a/b/t.csv"), HEADER);
        assert!(table.init().unwrap());
        assert!(table.exists());
    }

    #[test]
    fn append_then_read_keeps_order_and_lines() {
        let temp = TempDir::new().unwrap();
        let table = CsvTable::new(temp.path().join("t.csv"), HEADER);

        table.append(&[row("a", "Alpha")]).unwrap();
        table.append(&[row("b", "Beta, with comma")]).unwrap();

        let rows = table.read_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field(0), "a");
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[1].field(1), "Beta, with comma");
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn read_missing_file_is_file_not_found() {
        let temp = TempDir::new().unwrap();
        let table = CsvTable::new(temp.path().join("missing.csv"), HEADER);
        let err = table.read_rows().unwrap_err();
        assert!(matches!(err, LiftlogError::FileNotFound { .. }));
    }

    #[test]
    fn wrong_header_is_rejected_on_read_and_append() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("t.csv");
        fs::write(&path, "name,id\nAlpha,a\n").unwrap();
        let table = CsvTable::new(&path, HEADER);

        assert!(matches!(
            table.read_rows().unwrap_err(),
            LiftlogError::MalformedCsv { .. }
        ));
        assert!(matches!(
            table.append(&[row("b", "Beta")]).unwrap_err(),
            LiftlogError::MalformedCsv { .. }
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "name,id\nAlpha,a\n");
    }

    #[test]
    fn short_row_is_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("t.csv");
        fs::write(&path, "id,name\na\n").unwrap();
        let table = CsvTable::new(&path, HEADER);

        let err = table.read_rows().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn rewrite_replaces_content() {
        let temp = TempDir::new().unwrap();
        let table = CsvTable::new(temp.path().join("t.csv"), HEADER);
        table.append(&[row("a", "Alpha"), row("b", "Beta")]).unwrap();

        table.rewrite(&[row("c", "Gamma")]).unwrap();

        let rows = table.read_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field(0), "c");
    }

    #[test]
    fn same_file_sees_through_relative_segments() {
        let temp = TempDir::new().unwrap();
        let data = temp.path().join("data");
        fs::create_dir(&data).unwrap();
        fs::write(data.join("workouts.csv"), "x\n").unwrap();

        assert!(same_file(
            &data.join("workouts.csv"),
            &data.join("..").join("data").join("workouts.csv")
        ));
        // Missing files compare through their parent.
        assert!(same_file(
            &data.join("summary.csv"),
            &temp.path().join("data/./summary.csv")
        ));
        assert!(!same_file(&data.join("workouts.csv"), &data.join("movements.csv")));
    }

    #[test]
    fn split_list_accepts_commas_and_semicolons() {
        assert_eq!(
            split_list("triceps, front delts;; lats"),
            vec!["triceps", "front delts", "lats"]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn join_list_uses_commas() {
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(join_list(&items), "a,b");
    }
}
