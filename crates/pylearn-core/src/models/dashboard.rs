//! Dashboard models.

use serde::{Deserialize, Serialize};

use super::{TopicSummary, User};

/// Aggregate progress counts across the whole curriculum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total_topics: u32,
    pub completed_topics: u32,
    pub total_questions: u32,
    pub completed_questions: u32,
}

/// The dashboard payload: the user, their aggregate progress, and every
/// topic with its per-user flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub user: User,
    pub progress: ProgressSummary,
    pub topics: Vec<TopicSummary>,
}
