//! JSON encoding of stored collections
//!
//! Decoding is tolerant: empty or malformed input yields `None` rather than an
//! error, and callers fall back to the collection's empty default.

use crate::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a collection to its stored form
///
/// # Errors
///
/// Returns the serializer error; the entity types here never produce one.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(value)
}

/// Decode a stored blob. Empty or malformed input is `None`.
#[must_use]
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Option<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Discarding malformed stored data: {e}");
            None
        }
    }
}

/// Decode a possibly absent blob, substituting the empty default
#[must_use]
pub fn decode_or_default<T: DeserializeOwned + Default>(bytes: Option<&[u8]>) -> T {
    bytes.and_then(decode).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{default_periods, ClassPeriod, Lesson};
    use crate::core::timetable::Timetable;

    #[test]
    fn test_periods_round_trip() {
        let periods = default_periods();
        let bytes = encode(&periods).unwrap();
        assert_eq!(decode::<Vec<ClassPeriod>>(&bytes), Some(periods));
    }

    #[test]
    fn test_empty_and_malformed_are_absent() {
        assert_eq!(decode::<Vec<ClassPeriod>>(b""), None);
        assert_eq!(decode::<Vec<ClassPeriod>>(b"  \n"), None);
        assert_eq!(decode::<Vec<ClassPeriod>>(b"{not json"), None);
        assert_eq!(decode::<Vec<ClassPeriod>>(br#"{"periods": 3}"#), None);
    }

    #[test]
    fn test_decode_or_default() {
        let none: Vec<ClassPeriod> = decode_or_default(None);
        assert!(none.is_empty());
        let garbage: Timetable = decode_or_default(Some(b"garbage".as_slice()));
        assert!(garbage.is_empty());
    }

    #[test]
    fn test_grid_nulls_and_ragged_rows() {
        let lesson = Lesson::new("Math", "Sato");
        let json = format!(
            r#"[[{}, null], [null, null, null, null, null, null, null]]"#,
            serde_json::to_string(&lesson).unwrap()
        );
        let grid: Timetable = decode(json.as_bytes()).unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.get(0, 0), Some(&lesson));
        assert_eq!(grid.get(0, 5), None);

        let reencoded: serde_json::Value = serde_json::from_slice(&encode(&grid).unwrap()).unwrap();
        assert_eq!(reencoded[0].as_array().map(Vec::len), Some(6));
        assert_eq!(reencoded[1].as_array().map(Vec::len), Some(6));
    }
}
