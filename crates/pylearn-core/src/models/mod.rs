//! API data models.
//!
//! These mirror the JSON shapes the backend serializes. Fields newer
//! backend versions added are optional with serde defaults so older
//! deployments still deserialize.

mod dashboard;
mod grading;
mod question;
mod topic;
mod user;

pub use dashboard::{Dashboard, ProgressSummary};
pub use grading::{RunCodeOutput, SubmitOutput};
pub use question::{QuestionDetail, QuestionSummary};
pub use topic::{TopicDetail, TopicSummary};
pub use user::User;
