//! Zero-shot role classification client and the substring filter that turns
//! predicted role labels into a catalog subset.
//!
//! The model call is the whole ranking for this path: labels come back
//! ordered by relevance and the core only matches titles against them.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::JobCatalog;
use crate::errors::AppError;
use crate::matching::{MatchOutcome, ResumeMatchStrategy};
use crate::models::job::{NormalizedJob, RankedJob};

const HF_API_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli";
/// Only this prefix of the resume is classified; enough signal, bounded cost.
pub const MAX_CLASSIFY_CHARS: usize = 1000;
/// How many predicted labels are kept for title matching.
pub const TOP_ROLES: usize = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The fixed label vocabulary the classifier chooses from.
pub const CANDIDATE_ROLES: [&str; 11] = [
    "Software Engineer",
    "Data Scientist",
    "Frontend Developer",
    "Backend Developer",
    "Full Stack Developer",
    "Project Manager",
    "Product Manager",
    "DevOps Engineer",
    "Data Analyst",
    "HR Specialist",
    "Marketing Manager",
];

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("classifier API token not configured")]
    MissingToken,
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
    parameters: ClassifyParameters<'a>,
}

#[derive(Debug, Serialize)]
struct ClassifyParameters<'a> {
    candidate_labels: &'a [&'a str],
    multi_label: bool,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyResponse {
    pub labels: Vec<String>,
    #[serde(default)]
    pub scores: Vec<f64>,
}

/// Thin client for the hosted zero-shot endpoint. No retries: an upstream
/// failure surfaces to the caller as a failed matching request.
#[derive(Clone)]
pub struct ClassifierClient {
    client: reqwest::Client,
    api_token: Option<String>,
}

impl ClassifierClient {
    pub fn new(api_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            api_token,
        }
    }

    /// Classifies the resume prefix against the role vocabulary and returns
    /// the top labels, lowercased, in the model's relevance order.
    pub async fn predict_roles(&self, resume_text: &str) -> Result<Vec<String>, ClassifierError> {
        let token = self
            .api_token
            .as_deref()
            .ok_or(ClassifierError::MissingToken)?;
        let prefix = classify_prefix(resume_text);
        let body = ClassifyRequest {
            inputs: &prefix,
            parameters: ClassifyParameters {
                candidate_labels: &CANDIDATE_ROLES,
                multi_label: true,
            },
        };

        let response = self
            .client
            .post(HF_API_URL)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ClassifyResponse = response.json().await?;
        Ok(top_roles(parsed.labels))
    }
}

/// Role-classification matching strategy: predict roles, keep jobs whose
/// title mentions any of them, echo the labels.
pub struct RoleClassification {
    pub client: ClassifierClient,
}

#[async_trait]
impl ResumeMatchStrategy for RoleClassification {
    async fn rank(
        &self,
        resume_text: &str,
        catalog: &JobCatalog,
    ) -> Result<MatchOutcome, AppError> {
        let roles = self
            .client
            .predict_roles(resume_text)
            .await
            .map_err(|e| AppError::Classifier(format!("role prediction failed: {e}")))?;
        tracing::info!(?roles, "predicted roles");
        Ok(MatchOutcome {
            jobs: filter_by_roles(&roles, catalog.all()),
            predicted_roles: Some(roles),
        })
    }
}

fn classify_prefix(resume_text: &str) -> String {
    resume_text.chars().take(MAX_CLASSIFY_CHARS).collect()
}

fn top_roles(labels: Vec<String>) -> Vec<String> {
    labels
        .into_iter()
        .take(TOP_ROLES)
        .map(|label| label.to_lowercase())
        .collect()
}

/// Keeps jobs whose normalized title contains any predicted role label.
/// No further scoring; the upstream ordering is the ranking for this path.
pub fn filter_by_roles(roles: &[String], jobs: &[NormalizedJob]) -> Vec<RankedJob> {
    jobs.iter()
        .filter(|job| {
            roles
                .iter()
                .any(|role| job.normalized_title.contains(role.as_str()))
        })
        .map(|job| RankedJob {
            job: job.clone(),
            score: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobRecord;

    fn job(title: &str) -> NormalizedJob {
        NormalizedJob::new(JobRecord {
            job_title: Some(title.to_string()),
            company_name: None,
            job_location: None,
            job_description: None,
            apply_link: None,
            source: None,
            posted_date: None,
        })
    }

    #[test]
    fn test_classify_response_deserializes() {
        let json = r#"{
            "sequence": "experienced backend developer",
            "labels": ["Backend Developer", "Software Engineer", "DevOps Engineer"],
            "scores": [0.91, 0.74, 0.33]
        }"#;
        let parsed: ClassifyResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.labels.len(), 3);
        assert_eq!(parsed.labels[0], "Backend Developer");
        assert_eq!(parsed.scores[0], 0.91);
    }

    #[test]
    fn test_top_roles_lowercases_and_truncates() {
        let labels = vec![
            "Backend Developer".to_string(),
            "Software Engineer".to_string(),
            "DevOps Engineer".to_string(),
            "Data Analyst".to_string(),
        ];
        let roles = top_roles(labels);
        assert_eq!(
            roles,
            vec!["backend developer", "software engineer", "devops engineer"]
        );
    }

    #[test]
    fn test_classify_prefix_bounds_input() {
        let long = "x".repeat(5000);
        assert_eq!(classify_prefix(&long).chars().count(), MAX_CLASSIFY_CHARS);
        assert_eq!(classify_prefix("short resume"), "short resume");
    }

    #[test]
    fn test_filter_by_roles_matches_titles_as_substrings() {
        let jobs = vec![
            job("Senior Backend Developer"),
            job("Florist"),
            job("Data Analyst II"),
        ];
        let roles = vec!["backend developer".to_string(), "data analyst".to_string()];
        let matched = filter_by_roles(&roles, &jobs);
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|m| m.score.is_none()));
    }

    #[test]
    fn test_filter_by_roles_keeps_catalog_order() {
        let jobs = vec![job("Data Analyst"), job("Backend Developer")];
        let roles = vec!["backend developer".to_string(), "data analyst".to_string()];
        let matched = filter_by_roles(&roles, &jobs);
        let titles: Vec<_> = matched
            .iter()
            .map(|m| m.job.record.job_title.as_deref().unwrap())
            .collect();
        assert_eq!(titles, vec!["Data Analyst", "Backend Developer"]);
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_any_network_call() {
        let client = ClassifierClient::new(None);
        let err = client.predict_roles("some resume").await.unwrap_err();
        assert!(matches!(err, ClassifierError::MissingToken));
    }
}
