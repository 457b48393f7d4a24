//! Topic models.

use serde::{Deserialize, Serialize};

use super::QuestionSummary;

/// A topic as it appears in list views, with per-user progress flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub order: u32,
    pub is_unlocked: bool,
    pub is_completed: bool,
    pub questions_count: u32,
    pub completed_count: u32,
}

/// A single topic with its theory content and nested questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicDetail {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub theory: String,
    pub order: u32,
    pub questions: Vec<QuestionSummary>,
    pub is_unlocked: bool,
    pub is_completed: bool,
}
