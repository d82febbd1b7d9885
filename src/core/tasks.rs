//! Assignment list operations
//!
//! Assignments are kept as a plain ordered list (the stored blob); these
//! helpers address entries by id.

use crate::core::error::ValidationError;
use crate::core::models::{Assignment, AssignmentDraft};
use uuid::Uuid;

/// Validate a draft and append it. Returns a copy of the new assignment.
///
/// # Errors
///
/// Returns [`ValidationError`] and leaves the list unchanged when a required field is blank.
pub fn add(list: &mut Vec<Assignment>, draft: AssignmentDraft) -> Result<Assignment, ValidationError> {
    let assignment = draft.build()?;
    list.push(assignment.clone());
    Ok(assignment)
}

/// Assignment with `id`
#[must_use]
pub fn find(list: &[Assignment], id: Uuid) -> Option<&Assignment> {
    list.iter().find(|a| a.id == id)
}

/// Replace the assignment with the same id. Returns `false` when none matches.
///
/// # Errors
///
/// Returns [`ValidationError`] when the edited subject or title is blank.
pub fn update(list: &mut [Assignment], updated: Assignment) -> Result<bool, ValidationError> {
    crate::core::models::assignment::require("subject", &updated.subject)?;
    crate::core::models::assignment::require("title", &updated.title)?;
    Ok(list.iter_mut().find(|a| a.id == updated.id).is_some_and(|slot| {
        *slot = updated;
        true
    }))
}

/// Remove and return the assignment with `id`
pub fn remove(list: &mut Vec<Assignment>, id: Uuid) -> Option<Assignment> {
    let index = list.iter().position(|a| a.id == id)?;
    Some(list.remove(index))
}

/// Toggle the star on the assignment with `id`, returning the new state
pub fn toggle_star(list: &mut [Assignment], id: Uuid) -> Option<bool> {
    list.iter_mut().find(|a| a.id == id).map(Assignment::toggle_star)
}

/// Resolve a full id or a unique id prefix (as shown in listings)
#[must_use]
pub fn resolve_prefix<'a, T>(items: &'a [T], prefix: &str, id_of: impl Fn(&T) -> Uuid) -> Option<&'a T> {
    let prefix = prefix.trim().to_ascii_lowercase();
    if prefix.is_empty() {
        return None;
    }
    let mut matches = items
        .iter()
        .filter(|item| id_of(*item).to_string().starts_with(&prefix));
    let first = matches.next()?;
    matches.next().is_none().then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft(title: &str) -> AssignmentDraft {
        AssignmentDraft {
            subject: "English".to_string(),
            title: title.to_string(),
            deadline: NaiveDate::from_ymd_opt(2025, 6, 10)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            submission_method: "Teams".to_string(),
        }
    }

    #[test]
    fn test_add_and_find() {
        let mut list = Vec::new();
        let added = add(&mut list, draft("Essay")).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(find(&list, added.id).unwrap().title, "Essay");
    }

    #[test]
    fn test_add_invalid_creates_nothing() {
        let mut list = Vec::new();
        assert!(add(&mut list, draft("")).is_err());
        assert!(list.is_empty());
    }

    #[test]
    fn test_update_in_place() {
        let mut list = Vec::new();
        let first = add(&mut list, draft("Essay")).unwrap();
        add(&mut list, draft("Reading")).unwrap();

        let mut edited = first.clone();
        edited.title = "Essay v2".to_string();
        assert_eq!(update(&mut list, edited), Ok(true));
        assert_eq!(list[0].title, "Essay v2");

        let mut blank = first;
        blank.subject = String::new();
        assert!(update(&mut list, blank).is_err());
        assert_eq!(list[0].subject, "English");

        let stranger = draft("Other").build().unwrap();
        assert_eq!(update(&mut list, stranger), Ok(false));
    }

    #[test]
    fn test_remove_and_toggle() {
        let mut list = Vec::new();
        let a = add(&mut list, draft("Essay")).unwrap();
        assert_eq!(toggle_star(&mut list, a.id), Some(true));
        assert!(list[0].is_starred);
        assert_eq!(remove(&mut list, a.id).map(|r| r.id), Some(a.id));
        assert!(remove(&mut list, a.id).is_none());
        assert!(toggle_star(&mut list, a.id).is_none());
    }

    #[test]
    fn test_resolve_prefix() {
        let mut list = Vec::new();
        let a = add(&mut list, draft("Essay")).unwrap();
        let full = a.id.to_string();
        assert_eq!(resolve_prefix(&list, &full, |x| x.id).map(|x| x.id), Some(a.id));
        assert_eq!(resolve_prefix(&list, &full[..8], |x| x.id).map(|x| x.id), Some(a.id));
        assert!(resolve_prefix(&list, "", |x| x.id).is_none());
        assert!(resolve_prefix(&list, "zzzz", |x| x.id).is_none());
    }
}
