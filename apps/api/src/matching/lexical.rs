//! Lexical overlap matcher: weighted substring containment between resume
//! tokens and job title/description. No stemming, no embeddings — the
//! ranking is intentionally a simple, deterministic term-overlap count.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::catalog::JobCatalog;
use crate::errors::AppError;
use crate::matching::{MatchOutcome, ResumeMatchStrategy};
use crate::models::job::{NormalizedJob, RankedJob};

/// Tokens shorter than this are discarded — removes most stop-words without
/// carrying a stop-word list.
const MIN_TOKEN_CHARS: usize = 4;
const TITLE_WEIGHT: u32 = 2;
const DESCRIPTION_WEIGHT: u32 = 1;

pub struct LexicalOverlap;

#[async_trait]
impl ResumeMatchStrategy for LexicalOverlap {
    async fn rank(
        &self,
        resume_text: &str,
        catalog: &JobCatalog,
    ) -> Result<MatchOutcome, AppError> {
        Ok(MatchOutcome {
            jobs: score_catalog(resume_text, catalog.all()),
            predicted_roles: None,
        })
    }
}

/// Scores every job against the resume and returns the matches ranked by
/// score descending. Zero-score jobs are dropped, not ranked last. Equal
/// scores keep catalog load order (stable sort is the tie-break policy).
pub fn score_catalog(resume_text: &str, jobs: &[NormalizedJob]) -> Vec<RankedJob> {
    let tokens = resume_tokens(resume_text);
    let mut ranked: Vec<RankedJob> = jobs
        .iter()
        .filter_map(|job| {
            let score = score_job(&tokens, job);
            (score > 0).then(|| RankedJob {
                job: job.clone(),
                score: Some(score),
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Distinct qualifying resume words. Each word scores a job at most once no
/// matter how often the resume repeats it.
fn resume_tokens(resume_text: &str) -> HashSet<String> {
    resume_text
        .to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Title hits weigh double; a token can hit both the title and the
/// description of the same job and contribute both weights.
fn score_job(tokens: &HashSet<String>, job: &NormalizedJob) -> u32 {
    let mut score = 0;
    for token in tokens {
        if job.normalized_title.contains(token.as_str()) {
            score += TITLE_WEIGHT;
        }
        if job.normalized_description.contains(token.as_str()) {
            score += DESCRIPTION_WEIGHT;
        }
    }
    score
}
