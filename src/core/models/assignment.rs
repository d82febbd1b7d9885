//! Assignment (homework) model

use crate::core::error::ValidationError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A homework item with a deadline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Unique identifier
    pub id: Uuid,
    /// Subject the work belongs to
    pub subject: String,
    /// Short title
    pub title: String,
    /// Deadline. Only its calendar day matters for filtering and reminders.
    pub deadline: NaiveDateTime,
    /// Starred items are always listed as important
    pub is_starred: bool,
    /// How to hand the work in (free text, may be empty)
    pub submission_method: String,
}

/// User input for a new assignment, validated by [`AssignmentDraft::build`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentDraft {
    /// Subject (required)
    pub subject: String,
    /// Title (required)
    pub title: String,
    /// Deadline
    pub deadline: NaiveDateTime,
    /// Submission method (optional)
    pub submission_method: String,
}

impl AssignmentDraft {
    /// Turn the draft into an unstarred assignment with a fresh identifier
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] when the subject or title is blank.
    pub fn build(self) -> Result<Assignment, ValidationError> {
        require("subject", &self.subject)?;
        require("title", &self.title)?;
        Ok(Assignment {
            id: Uuid::new_v4(),
            subject: self.subject,
            title: self.title,
            deadline: self.deadline,
            is_starred: false,
            submission_method: self.submission_method,
        })
    }
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField { field })
    } else {
        Ok(())
    }
}

impl Assignment {
    /// Calendar day of the deadline
    #[must_use]
    pub fn deadline_day(&self) -> NaiveDate {
        self.deadline.date()
    }

    /// Whether the deadline day is before the day of `now`
    #[must_use]
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.deadline_day() < now.date()
    }

    /// Flip the star flag and return the new value
    pub fn toggle_star(&mut self) -> bool {
        self.is_starred = !self.is_starred;
        self.is_starred
    }
}
