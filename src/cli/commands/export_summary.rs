//! Export-summary command implementation.
//!
//! The `liftlog export-summary` command writes a derived CSV of the archive,
//! one row per set by default or grouped per workout or movement.

use std::path::PathBuf;

use crate::archive::{export_summary, overwrite_error, SetArchive, SummaryFilter};
use crate::csv_table::same_file;
use crate::cli::args::ExportSummaryArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The export-summary command implementation.
pub struct ExportSummaryCommand {
    archive: SetArchive,
    default_out: PathBuf,
    data_files: Vec<PathBuf>,
    args: ExportSummaryArgs,
}

impl ExportSummaryCommand {
    /// Create a new export-summary command.
    ///
    /// `default_out` is used when `--out` is not given.
    pub fn new(archive: SetArchive, default_out: PathBuf, args: ExportSummaryArgs) -> Self {
        Self {
            archive,
            default_out,
            data_files: Vec::new(),
            args,
        }
    }

    /// Refuse to write the export over any of these files.
    pub fn protecting(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.data_files.extend(files);
        self
    }

    fn filter(&self) -> SummaryFilter {
        let id = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };
        SummaryFilter {
            workout_id: id(&self.args.workout_id),
            movement_id: id(&self.args.movement_id),
            from: self.args.from,
            to: self.args.to,
        }
    }
}

impl Command for ExportSummaryCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let out = self.args.out.clone().unwrap_or_else(|| self.default_out.clone());
        if self.data_files.iter().any(|file| same_file(&out, file)) {
            return Err(overwrite_error(&out));
        }
        let report = export_summary(&self.archive, &out, self.args.group_by, &self.filter())?;

        ui.message(&format!(
            "Exported {} rows ({} sets, per {}) to {}",
            report.rows,
            report.sets,
            self.args.group_by,
            out.display()
        ));

        Ok(CommandResult::success())
    }
}
