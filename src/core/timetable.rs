//! Weekly timetable grid
//!
//! The grid is indexed by `[period row][weekday column]`, with columns 0..5
//! for Monday..Saturday. Every accessor is bounds-tolerant: a row or column
//! outside the stored grid reads as an empty cell, never a panic.
//!
//! The grid and the period list are stored separately and only correlated by
//! row index; [`lesson_period`] is the one place where they are joined.

use crate::core::error::ValidationError;
use crate::core::models::{
    period_for_row, ClassPeriod, Lesson, Weekday, WeekdayLimits, SCHOOL_DAY_COUNT,
};
use crate::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One timetable row (a period across Monday..Saturday)
pub type Row = [Option<Lesson>; SCHOOL_DAY_COUNT];

/// Serialized form: a list of rows, each a list of optional lessons
type RawGrid = Vec<Vec<Option<Lesson>>>;

/// Dense grid of optional lessons, always exactly six columns wide
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawGrid", into = "RawGrid")]
pub struct Timetable {
    rows: Vec<Row>,
}

impl From<RawGrid> for Timetable {
    /// Ragged input is normalised: short rows are padded, extra columns dropped.
    fn from(raw: RawGrid) -> Self {
        let rows = raw
            .into_iter()
            .map(|cells| {
                let mut row: Row = Default::default();
                for (slot, cell) in row.iter_mut().zip(cells) {
                    *slot = cell;
                }
                row
            })
            .collect();
        Self { rows }
    }
}

impl From<Timetable> for RawGrid {
    fn from(timetable: Timetable) -> Self {
        timetable.rows.into_iter().map(Vec::from).collect()
    }
}

impl Timetable {
    /// Empty grid with no rows
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Empty grid with `rows` rows
    #[must_use]
    pub fn with_rows(rows: usize) -> Self {
        Self {
            rows: std::iter::repeat_with(Row::default).take(rows).collect(),
        }
    }

    /// Number of stored rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether no cell holds a lesson
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(Option::is_none)
    }

    /// Lesson at a cell; out-of-range cells are empty
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<&Lesson> {
        self.rows.get(row)?.get(column)?.as_ref()
    }

    /// Put a lesson in a cell, growing the grid with empty rows as needed
    ///
    /// Returns the lesson previously in the cell.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ColumnOutOfRange`] for columns past Saturday.
    pub fn set(
        &mut self,
        row: usize,
        column: usize,
        lesson: Lesson,
    ) -> Result<Option<Lesson>, ValidationError> {
        if column >= SCHOOL_DAY_COUNT {
            return Err(ValidationError::ColumnOutOfRange { column });
        }
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Row::default);
        }
        Ok(self.rows[row][column].replace(lesson))
    }

    /// Empty a cell and return what it held. The grid never shrinks.
    pub fn clear(&mut self, row: usize, column: usize) -> Option<Lesson> {
        self.rows.get_mut(row)?.get_mut(column)?.take()
    }

    /// Row index of the lesson with `lesson_id` in `column`
    #[must_use]
    pub fn find_row(&self, column: usize, lesson_id: Uuid) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.get(column).and_then(Option::as_ref).is_some_and(|l| l.id == lesson_id))
    }

    /// Cells of one column in row order, `None` for empty cells
    pub fn column(&self, column: usize) -> impl Iterator<Item = (usize, Option<&Lesson>)> {
        self.rows
            .iter()
            .enumerate()
            .map(move |(row, cells)| (row, cells.get(column).and_then(Option::as_ref)))
    }

    /// Every filled cell as `(row, column, lesson)`
    pub fn lessons(&self) -> impl Iterator<Item = (usize, usize, &Lesson)> {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(column, cell)| cell.as_ref().map(|l| (row, column, l)))
        })
    }
}

/// State of one cell in a [`TimetableView`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a> {
    /// Beyond the weekday's period limit; not shown or editable
    Disabled,
    /// Within the limit, no lesson
    Empty,
    /// Within the limit, holding a lesson
    Filled(&'a Lesson),
}

impl<'a> Slot<'a> {
    /// Whether the slot can be edited
    #[must_use]
    pub const fn is_editable(self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Lesson held by the slot, if any
    #[must_use]
    pub const fn lesson(self) -> Option<&'a Lesson> {
        match self {
            Self::Filled(lesson) => Some(lesson),
            Self::Disabled | Self::Empty => None,
        }
    }
}

/// Display grid sized to the largest weekday limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableView<'a> {
    rows: Vec<[Slot<'a>; SCHOOL_DAY_COUNT]>,
}

impl<'a> TimetableView<'a> {
    /// Number of rows (the largest weekday limit)
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Slot at a cell; anything outside the view is disabled
    #[must_use]
    pub fn slot(&self, row: usize, column: usize) -> Slot<'a> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .copied()
            .unwrap_or(Slot::Disabled)
    }

    /// Rows in order
    #[must_use]
    pub fn rows(&self) -> &[[Slot<'a>; SCHOOL_DAY_COUNT]] {
        &self.rows
    }
}

/// Lay the stored grid out under the weekday limits
///
/// The view has `limits.max_periods()` rows. A cell at or beyond its column's
/// limit is [`Slot::Disabled`] regardless of stored content; cells beyond the
/// stored grid read as [`Slot::Empty`].
#[must_use]
pub fn apply_weekday_limits<'a>(timetable: &'a Timetable, limits: &WeekdayLimits) -> TimetableView<'a> {
    let column_limits = limits.as_columns();
    let rows = (0..limits.max_periods())
        .map(|row| {
            std::array::from_fn(|column| {
                if row >= column_limits[column] {
                    Slot::Disabled
                } else {
                    timetable.get(row, column).map_or(Slot::Empty, Slot::Filled)
                }
            })
        })
        .collect();
    TimetableView { rows }
}

/// Where else a subject meets: weekday → 1-based period numbers in row order
///
/// `exclude_column` (usually the column of the lesson being viewed) is skipped.
#[must_use]
pub fn cross_reference(
    timetable: &Timetable,
    subject: &str,
    exclude_column: usize,
) -> BTreeMap<Weekday, Vec<usize>> {
    let mut result: BTreeMap<Weekday, Vec<usize>> = BTreeMap::new();
    for (column, day) in (0..SCHOOL_DAY_COUNT).filter_map(|c| Weekday::from_column(c).map(|d| (c, d))) {
        if column == exclude_column {
            continue;
        }
        for (row, lesson) in timetable.column(column) {
            if lesson.is_some_and(|l| l.subject == subject) {
                result.entry(day).or_default().push(row + 1);
            }
        }
    }
    result
}

/// Period during which a lesson is held
///
/// Finds the lesson's row within `column` and joins it to the period list.
/// A row beyond the period list yields `None`.
#[must_use]
pub fn lesson_period<'p>(
    timetable: &Timetable,
    periods: &'p [ClassPeriod],
    column: usize,
    lesson_id: Uuid,
) -> Option<&'p ClassPeriod> {
    let row = timetable.find_row(column, lesson_id)?;
    let period = period_for_row(periods, row);
    if period.is_none() {
        debug!(
            "Timetable row {} has no matching period ({} periods configured)",
            row + 1,
            periods.len()
        );
    }
    period
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_out_of_bounds_is_empty() {
        let mut timetable = Timetable::new();
        timetable.set(0, 0, Lesson::new("Math", "Sato")).unwrap();
        assert!(timetable.get(0, 0).is_some());
        assert!(timetable.get(0, 6).is_none());
        assert!(timetable.get(10, 0).is_none());
    }

    #[test]
    fn test_set_grows_rows() {
        let mut timetable = Timetable::new();
        assert!(timetable.set(3, 2, Lesson::new("Art", "Ito")).unwrap().is_none());
        assert_eq!(timetable.row_count(), 4);
        assert!(timetable.get(2, 2).is_none());

        let previous = timetable.set(3, 2, Lesson::new("Music", "Ito")).unwrap();
        assert_eq!(previous.unwrap().subject, "Art");
    }

    #[test]
    fn test_set_rejects_bad_column() {
        let mut timetable = Timetable::new();
        assert_eq!(
            timetable.set(0, 6, Lesson::new("PE", "Kato")),
            Err(ValidationError::ColumnOutOfRange { column: 6 })
        );
        assert_eq!(timetable.row_count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut timetable = Timetable::new();
        timetable.set(1, 1, Lesson::new("History", "Mori")).unwrap();
        assert_eq!(timetable.clear(1, 1).unwrap().subject, "History");
        assert!(timetable.clear(1, 1).is_none());
        assert!(timetable.clear(9, 9).is_none());
        assert_eq!(timetable.row_count(), 2);
        assert!(timetable.is_empty());
    }

    #[test]
    fn test_ragged_input_is_normalised() {
        let math = Lesson::new("Math", "Sato");
        let raw: RawGrid = vec![
            vec![Some(math.clone())],
            vec![None, None, None, None, None, None, Some(Lesson::new("X", "Y"))],
        ];
        let timetable = Timetable::from(raw);
        assert_eq!(timetable.row_count(), 2);
        assert_eq!(timetable.get(0, 0), Some(&math));
        assert!(timetable.get(1, 5).is_none());

        let back: RawGrid = timetable.into();
        assert!(back.iter().all(|row| row.len() == SCHOOL_DAY_COUNT));
    }

    #[test]
    fn test_find_row_and_lessons() {
        let mut timetable = Timetable::new();
        let science = Lesson::new("Science", "Abe");
        let id = science.id;
        timetable.set(2, 4, science).unwrap();
        assert_eq!(timetable.find_row(4, id), Some(2));
        assert_eq!(timetable.find_row(3, id), None);
        assert_eq!(timetable.lessons().count(), 1);
    }

    #[test]
    fn test_view_disables_rows_beyond_limit() {
        let mut timetable = Timetable::with_rows(6);
        timetable.set(4, 5, Lesson::new("Club", "Ono")).unwrap();
        timetable.set(3, 5, Lesson::new("English", "Ono")).unwrap();

        let view = apply_weekday_limits(&timetable, &WeekdayLimits::default());
        assert_eq!(view.row_count(), 6);
        // Saturday is limited to four periods
        assert_eq!(view.slot(4, 5), Slot::Disabled);
        assert_eq!(view.slot(3, 5).lesson().unwrap().subject, "English");
        assert_eq!(view.slot(5, 0), Slot::Empty);
        assert!(!view.slot(4, 5).is_editable());
    }

    #[test]
    fn test_view_beyond_stored_grid_is_empty() {
        let timetable = Timetable::new();
        let mut limits = WeekdayLimits::default();
        limits.set(Weekday::Monday, 8);
        let view = apply_weekday_limits(&timetable, &limits);
        assert_eq!(view.row_count(), 8);
        assert_eq!(view.slot(7, 0), Slot::Empty);
        assert_eq!(view.slot(7, 1), Slot::Disabled);
        assert_eq!(view.slot(8, 0), Slot::Disabled);
    }

    #[test]
    fn test_cross_reference_skips_excluded_column() {
        let mut timetable = Timetable::new();
        timetable.set(2, 0, Lesson::new("Math", "Sato")).unwrap();
        timetable.set(4, 3, Lesson::new("Math", "Sato")).unwrap();
        timetable.set(0, 3, Lesson::new("English", "Ono")).unwrap();

        let others = cross_reference(&timetable, "Math", 0);
        assert_eq!(others.len(), 1);
        assert_eq!(others.get(&Weekday::Thursday), Some(&vec![5]));
    }

    #[test]
    fn test_cross_reference_row_order() {
        let mut timetable = Timetable::new();
        timetable.set(5, 2, Lesson::new("Math", "Sato")).unwrap();
        timetable.set(0, 2, Lesson::new("Math", "Sato")).unwrap();
        let others = cross_reference(&timetable, "Math", 0);
        assert_eq!(others.get(&Weekday::Wednesday), Some(&vec![1, 6]));
    }

    #[test]
    fn test_lesson_period_join() {
        let periods = crate::core::models::default_periods();
        let mut timetable = Timetable::new();
        let early = Lesson::new("Math", "Sato");
        let late = Lesson::new("Club", "Ono");
        let (early_id, late_id) = (early.id, late.id);
        timetable.set(1, 0, early).unwrap();
        timetable.set(7, 0, late).unwrap();

        assert_eq!(
            lesson_period(&timetable, &periods, 0, early_id).map(ClassPeriod::time_range),
            Some("9:30-10:20".to_string())
        );
        assert!(lesson_period(&timetable, &periods, 0, late_id).is_none());
        assert!(lesson_period(&timetable, &periods, 1, early_id).is_none());
    }
}
