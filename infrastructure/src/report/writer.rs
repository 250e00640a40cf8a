//! Report file writer.
//!
//! Writes a run's [`Report`] as pretty-printed JSON to
//! `<dir>/<crew>_report_YYYYMMDD.json`. A second save on the same day
//! overwrites the first.

use chrono::{Local, NaiveDate};
use crew_domain::Report;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ReportWriteError {
    #[error("Failed to create report directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes JSON reports into one directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for `crew` on `date`: `<crew>_report_YYYYMMDD.json`.
    ///
    /// Characters that are awkward in file names are replaced by `_`.
    pub fn file_name(crew: &str, date: NaiveDate) -> String {
        let stem: String = crew
            .trim()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let stem = if stem.is_empty() { "crew".to_string() } else { stem };
        format!("{}_report_{}.json", stem, date.format("%Y%m%d"))
    }

    /// Write `report` using today's local date; returns the written path
    pub fn write(&self, crew: &str, report: &Report) -> Result<PathBuf, ReportWriteError> {
        self.write_dated(crew, report, Local::now().date_naive())
    }

    pub fn write_dated(
        &self,
        crew: &str,
        report: &Report,
        date: NaiveDate,
    ) -> Result<PathBuf, ReportWriteError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| ReportWriteError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(Self::file_name(crew, date));
        let json = report.to_json_pretty()?;
        std::fs::write(&path, json).map_err(|source| ReportWriteError::Write {
            path: path.clone(),
            source,
        })?;

        info!("Report written to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            ReportWriter::file_name("support_analysis", date()),
            "support_analysis_report_20250307.json"
        );
        assert_eq!(
            ReportWriter::file_name("feature design/v2", date()),
            "feature_design_v2_report_20250307.json"
        );
        assert_eq!(ReportWriter::file_name("  ", date()), "crew_report_20250307.json");
    }

    #[test]
    fn test_write_creates_directory_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("reports/nested"));
        let report = Report::new(
            vec!["Login issues dominate".to_string()],
            vec!["Add SSO".to_string()],
        );

        let path = writer.write_dated("support", &report, date()).unwrap();
        assert_eq!(path, dir.path().join("reports/nested/support_report_20250307.json"));

        let written: Report =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, report);
    }

    #[test]
    fn test_empty_report_is_still_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = ReportWriter::new(dir.path())
            .write("empty", &Report::default())
            .unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("\"findings\": []"));
    }

    #[test]
    fn test_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a dir").unwrap();

        let err = ReportWriter::new(blocker.join("reports"))
            .write_dated("x", &Report::default(), date())
            .unwrap_err();
        assert!(matches!(err, ReportWriteError::CreateDir { .. }));
    }
}
