// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// The text content of the question.
    pub content: String,

    /// Subject area tag (e.g. "geography").
    pub topic: String,

    /// The canonical correct answer. Compared trimmed and case-folded.
    pub answer: String,

    /// Question type tag: 'multiple_choice' or 'short_answer'.
    /// Does not change how grading works.
    pub q_type: String,

    /// List of choices for multiple-choice questions, absent for
    /// short-answer ones. Stored as a JSON array in the database.
    pub options: Option<Json<Vec<String>>>,

    /// Points awarded for a correct answer.
    pub points: i64,
}

/// DTO for the public question list (`/api/questions`).
/// Deliberately minimal: id and content only.
#[derive(Debug, Serialize)]
pub struct QuestionSummary {
    pub id: i64,
    pub content: String,
}

/// DTO for questions on a test page. Everything except the answer.
#[derive(Debug, Serialize)]
pub struct TestQuestion {
    pub id: i64,
    pub content: String,
    pub topic: String,
    pub q_type: String,
    pub options: Option<Json<Vec<String>>>,
    pub points: i64,
}

impl From<Question> for TestQuestion {
    fn from(q: Question) -> Self {
        TestQuestion {
            id: q.id,
            content: q.content,
            topic: q.topic,
            q_type: q.q_type,
            options: q.options,
            points: q.points,
        }
    }
}

/// DTO for creating a new question.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub content: String,
    #[validate(length(min = 1, max = 100))]
    pub topic: String,
    #[validate(length(min = 1, max = 500))]
    pub answer: String,
    #[validate(length(min = 1, max = 20))]
    pub q_type: String,
    #[validate(custom(function = validate_options))]
    pub options: Option<Vec<String>>,
    #[serde(default = "default_points")]
    pub points: i64,
}

fn default_points() -> i64 {
    1
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.is_empty() {
        return Err(validator::ValidationError::new("options_cannot_be_empty"));
    }
    for opt in options {
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}
