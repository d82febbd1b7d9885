//! Lesson model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A class held in one timetable cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Unique identifier
    pub id: Uuid,
    /// Subject name (e.g. "Math"). Used to find the other days a class meets.
    pub subject: String,
    /// Teacher name
    pub teacher: String,
}

impl Lesson {
    /// Create a lesson with a fresh identifier
    #[must_use]
    pub fn new(subject: impl Into<String>, teacher: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            teacher: teacher.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_creation() {
        let lesson = Lesson::new("Math", "Tanaka");
        assert_eq!(lesson.subject, "Math");
        assert_eq!(lesson.teacher, "Tanaka");
    }

    #[test]
    fn test_lessons_get_distinct_ids() {
        let a = Lesson::new("Math", "Tanaka");
        let b = Lesson::new("Math", "Tanaka");
        assert_ne!(a.id, b.id);
        assert_ne!(a, b);
    }
}
