//! Filter / sort / paginate engine shared by plain search and both resume
//! matching paths.

pub mod handlers;

use serde::{Deserialize, Serialize};

use crate::models::job::JobFields;

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 10;

/// Query parameters exactly as they arrive on the wire. Numeric fields stay
/// strings here; all coercion happens in `QuerySpec::from_raw`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawQuery {
    pub title: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Validated query: lowercased non-empty filters and positive page/limit.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    pub title: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub sort_by: Option<String>,
    pub order: SortOrder,
    pub page: usize,
    pub limit: usize,
}

impl QuerySpec {
    /// The single place where missing or garbage input becomes defaults.
    /// Nothing here can fail: empty filters mean "no filter", and
    /// non-numeric or non-positive page/limit fall back to 1 and 10.
    pub fn from_raw(raw: &RawQuery) -> Self {
        Self {
            title: lower_filter(&raw.title),
            location: lower_filter(&raw.location),
            company: lower_filter(&raw.company),
            sort_by: raw.sort_by.clone().filter(|s| !s.is_empty()),
            order: match raw.order.as_deref() {
                Some("desc") => SortOrder::Desc,
                _ => SortOrder::Asc,
            },
            page: coerce_positive(&raw.page, DEFAULT_PAGE),
            limit: coerce_positive(&raw.limit, DEFAULT_LIMIT),
        }
    }
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self::from_raw(&RawQuery::default())
    }
}

fn lower_filter(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn coerce_positive(raw: &Option<String>, default: usize) -> usize {
    raw.as_deref()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(default)
}

/// One page of results. `total` always reflects the full filtered count,
/// even when the requested page is past the end.
#[derive(Debug, Serialize)]
pub struct SearchPage<T> {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub jobs: Vec<T>,
}

/// Applies the query to an ordered sequence of jobs: AND of substring filters
/// over the normalized fields, optional stable sort, then pagination.
/// Never fails; a page past the end is simply empty.
pub fn apply<T: JobFields + Clone>(input: &[T], query: &QuerySpec) -> SearchPage<T> {
    let mut filtered: Vec<&T> = input.iter().collect();

    if let Some(title) = &query.title {
        filtered.retain(|job| job.normalized_title().contains(title.as_str()));
    }
    if let Some(location) = &query.location {
        filtered.retain(|job| job.normalized_location().contains(location.as_str()));
    }
    if let Some(company) = &query.company {
        filtered.retain(|job| job.normalized_company().contains(company.as_str()));
    }

    if let Some(field) = &query.sort_by {
        // Stable sort; descending reverses the comparator, not the sequence,
        // so equal keys keep their pre-sort relative order.
        filtered.sort_by(|a, b| {
            let ord = a.sort_key(field).cmp(&b.sort_key(field));
            match query.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }

    let total = filtered.len();
    let start = (query.page - 1).saturating_mul(query.limit);
    let jobs = filtered
        .into_iter()
        .skip(start)
        .take(query.limit)
        .cloned()
        .collect();

    SearchPage {
        total,
        page: query.page,
        limit: query.limit,
        jobs,
    }
}
