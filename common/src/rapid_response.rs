//! Course fixtures for rapid response problem submissions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseData {
    pub course_id: String,
    pub blocks: Vec<ProblemBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemBlock {
    pub id: String,
    pub choicegroup_id: String,
    pub answer_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EnrollmentStatus {
    pub is_active: bool,
}
