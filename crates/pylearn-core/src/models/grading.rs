//! Code execution and grading models.

use serde::{Deserialize, Serialize};

/// The result of running a snippet without grading it.
///
/// Exactly one of `output` and `error` is populated on a well-behaved
/// backend, but both are optional here since execution timeouts produce
/// neither stdout nor a structured error payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunCodeOutput {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The result of grading a submission against a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOutput {
    pub passed: bool,
    #[serde(default)]
    pub output: Option<String>,
    pub expected: String,
    pub message: String,
    /// Keywords the code was required to use but didn't.
    #[serde(default)]
    pub missing_keywords: Option<Vec<String>>,
    /// Set when this submission completed the whole topic.
    #[serde(default)]
    pub topic_completed: Option<bool>,
}
