//! Question models.

use serde::{Deserialize, Serialize};

/// A question as it appears inside a topic listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub order: u32,
    pub is_completed: bool,
}

/// A single question with everything needed to work on it.
///
/// `hint`, `submitted_code` and `attempts` were added to the backend
/// later; they default when a deployment doesn't serialize them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDetail {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub expected_output: String,
    pub order: u32,
    pub is_completed: bool,
    pub topic_title: String,
    /// Id of the owning topic.
    pub topic: u64,
    #[serde(default)]
    pub hint: Option<String>,
    /// The user's most recent submission, if any.
    #[serde(default)]
    pub submitted_code: Option<String>,
    #[serde(default)]
    pub attempts: Option<u32>,
}
