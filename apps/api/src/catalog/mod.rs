//! In-memory job catalog: the system of record for every query path.
//!
//! Built once at startup from a JSONL corpus and read-only afterwards.
//! Load order is preserved and serves as the tie-break order for every stable
//! operation downstream.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::job::{JobRecord, NormalizedJob};

pub struct JobCatalog {
    jobs: Vec<NormalizedJob>,
}

impl JobCatalog {
    /// Builds a catalog from raw records, normalizing each one.
    pub fn from_records(records: Vec<JobRecord>) -> Self {
        Self {
            jobs: records.into_iter().map(NormalizedJob::new).collect(),
        }
    }

    /// Loads and normalizes the corpus from a JSONL file (one job per line).
    /// Blank lines are skipped; a malformed line is logged and skipped so one
    /// bad record cannot take down startup. A missing or unreadable file is
    /// fatal — there is no catalog to serve without it.
    pub fn load_jsonl(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open jobs corpus at {}", path.display()))?;
        let reader = BufReader::new(file);

        let mut jobs = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line =
                line.with_context(|| format!("failed to read jobs corpus {}", path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<JobRecord>(&line) {
                Ok(record) => jobs.push(NormalizedJob::new(record)),
                Err(e) => {
                    tracing::warn!(line = line_no + 1, "skipping malformed job record: {e}")
                }
            }
        }

        tracing::info!(count = jobs.len(), path = %path.display(), "job catalog loaded");
        Ok(Self { jobs })
    }

    /// Read-only view of every job in load order.
    pub fn all(&self) -> &[NormalizedJob] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_jsonl_normalizes_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"job_title":"Backend Developer","company_name":"Acme"}}"#
        )
        .unwrap();
        writeln!(file).unwrap();
        writeln!(
            file,
            r#"{{"job_title":"Backend Engineer","company_name":"Beta"}}"#
        )
        .unwrap();

        let catalog = JobCatalog::load_jsonl(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.all()[0].normalized_title, "backend developer");
        assert_eq!(catalog.all()[1].normalized_company, "beta");
    }

    #[test]
    fn test_load_jsonl_skips_malformed_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"job_title":"Data Analyst"}}"#).unwrap();
        writeln!(file, "not json at all").unwrap();
        writeln!(file, r#"{{"job_title":"Data Scientist"}}"#).unwrap();

        let catalog = JobCatalog::load_jsonl(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_load_jsonl_missing_file_is_an_error() {
        assert!(JobCatalog::load_jsonl("/nonexistent/jobs.jsonl").is_err());
    }

    #[test]
    fn test_missing_fields_normalize_to_empty() {
        let catalog = JobCatalog::from_records(vec![JobRecord {
            job_title: Some("Designer".into()),
            company_name: None,
            job_location: None,
            job_description: None,
            apply_link: None,
            source: None,
            posted_date: None,
        }]);
        let job = &catalog.all()[0];
        assert_eq!(job.normalized_company, "");
        assert_eq!(job.normalized_location, "");
        assert_eq!(job.normalized_description, "");
    }
}
