//! Jobscout API — in-memory job search, keyword popularity tracking, and
//! resume-to-job matching over a JSONL job corpus.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod keywords;
pub mod matching;
pub mod models;
pub mod routes;
pub mod search;
pub mod state;
