//! Job record types shared by the catalog, search engine, and both matchers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lowercases a raw field into its canonical matching form.
/// Absent fields normalize to the empty string, never `None`.
pub fn normalize(raw: Option<&str>) -> String {
    raw.map(str::to_lowercase).unwrap_or_default()
}

/// A job listing as it appears in the JSONL corpus. Field names follow the
/// scraped feed; every field may be missing on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub job_location: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub apply_link: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub posted_date: Option<NaiveDate>,
}

/// A `JobRecord` plus its derived lowercase fields, computed once at catalog
/// load and never recomputed. The derived fields stay server-side: they are
/// never serialized back out.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedJob {
    #[serde(flatten)]
    pub record: JobRecord,
    #[serde(skip)]
    pub normalized_title: String,
    #[serde(skip)]
    pub normalized_location: String,
    #[serde(skip)]
    pub normalized_company: String,
    #[serde(skip)]
    pub normalized_description: String,
}

impl NormalizedJob {
    pub fn new(record: JobRecord) -> Self {
        let normalized_title = normalize(record.job_title.as_deref());
        let normalized_location = normalize(record.job_location.as_deref());
        let normalized_company = normalize(record.company_name.as_deref());
        let normalized_description = normalize(record.job_description.as_deref());
        Self {
            record,
            normalized_title,
            normalized_location,
            normalized_company,
            normalized_description,
        }
    }
}

/// A job surfaced by a resume-matching strategy. `score` is present only on
/// records ranked by the lexical matcher and is omitted from JSON otherwise.
#[derive(Debug, Clone, Serialize)]
pub struct RankedJob {
    #[serde(flatten)]
    pub job: NormalizedJob,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

/// Field access the search engine needs, so it can run over plain catalog
/// records and ranked matcher output alike.
pub trait JobFields {
    fn normalized_title(&self) -> &str;
    fn normalized_location(&self) -> &str;
    fn normalized_company(&self) -> &str;
    /// Lowercased string form of the named sortable field. Unknown or absent
    /// fields yield the empty string, which sorts first ascending.
    fn sort_key(&self, field: &str) -> String;
}

impl JobFields for NormalizedJob {
    fn normalized_title(&self) -> &str {
        &self.normalized_title
    }

    fn normalized_location(&self) -> &str {
        &self.normalized_location
    }

    fn normalized_company(&self) -> &str {
        &self.normalized_company
    }

    fn sort_key(&self, field: &str) -> String {
        let raw = match field {
            "job_title" => self.record.job_title.as_deref(),
            "company_name" => self.record.company_name.as_deref(),
            "job_location" => self.record.job_location.as_deref(),
            "job_description" => self.record.job_description.as_deref(),
            "apply_link" => self.record.apply_link.as_deref(),
            "source" => self.record.source.as_deref(),
            "posted_date" => {
                return self
                    .record
                    .posted_date
                    .map(|d| d.to_string())
                    .unwrap_or_default()
            }
            _ => None,
        };
        normalize(raw)
    }
}

impl JobFields for RankedJob {
    fn normalized_title(&self) -> &str {
        &self.job.normalized_title
    }

    fn normalized_location(&self) -> &str {
        &self.job.normalized_location
    }

    fn normalized_company(&self) -> &str {
        &self.job.normalized_company
    }

    fn sort_key(&self, field: &str) -> String {
        if field == "score" {
            return self.score.map(|s| s.to_string()).unwrap_or_default();
        }
        self.job.sort_key(field)
    }
}
