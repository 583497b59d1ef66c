//! Adult filter: selects records whose age exceeds [`ADULT_AGE_THRESHOLD`].
//!
//! The filter is a pure, synchronous function. Observability is provided
//! through a caller-supplied progress callback invoked once per examined
//! record, in input order, so the service layer can turn each step into a
//! [`super::RecordEvent`] without the filter knowing about the bus.

use super::{RecordCollection, UserRecord};

/// Records with an age strictly greater than this are adults.
pub const ADULT_AGE_THRESHOLD: u64 = 18;

/// One step of the filter: the record just examined and its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterProgress<'a> {
    /// Position of the record in the input collection.
    pub index: usize,
    /// The record being examined.
    pub record: &'a UserRecord,
    /// Whether the record passed the filter.
    pub adult: bool,
}

/// Returns `true` if `record` is an adult.
#[must_use]
pub const fn is_adult(record: &UserRecord) -> bool {
    record.age() > ADULT_AGE_THRESHOLD
}

/// Returns a new collection with exactly the adult records of
/// `records`, preserving relative order.
#[must_use]
pub fn filter_adults(records: &RecordCollection) -> RecordCollection {
    filter_adults_with(records, |_| {})
}

/// Like [`filter_adults`], calling `on_progress` once per examined record.
pub fn filter_adults_with<F>(records: &RecordCollection, mut on_progress: F) -> RecordCollection
where
    F: FnMut(FilterProgress<'_>),
{
    records
        .iter()
        .enumerate()
        .filter(|&(index, record)| {
            let adult = is_adult(record);
            on_progress(FilterProgress {
                index,
                record,
                adult,
            });
            adult
        })
        .map(|(_, record)| record.clone())
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn record(name: &str, age: u64) -> UserRecord {
        let Ok(record) = UserRecord::new(name, age) else {
            panic!("valid record");
        };
        record
    }

    fn seed() -> RecordCollection {
        RecordCollection::from(vec![
            record("Ana", 22),
            record("Carlos", 17),
            record("Beatriz", 30),
        ])
    }

    #[test]
    fn selects_adults_from_seed() {
        let adults = filter_adults(&seed());
        assert_eq!(
            adults,
            RecordCollection::from(vec![record("Ana", 22), record("Beatriz", 30)])
        );
    }

    #[test]
    fn threshold_boundaries() {
        let input = RecordCollection::from(vec![
            record("eighteen", 18),
            record("nineteen", 19),
            record("zero", 0),
        ]);
        let adults = filter_adults(&input);
        assert_eq!(adults, RecordCollection::from(vec![record("nineteen", 19)]));
    }

    #[test]
    fn input_is_left_unchanged() {
        let input = seed();
        let before = input.clone();
        let _ = filter_adults(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn result_is_an_ordered_subsequence() {
        let input = RecordCollection::from(vec![
            record("a", 40),
            record("b", 3),
            record("c", 19),
            record("d", 18),
            record("e", 65),
            record("a", 40),
        ]);
        let adults = filter_adults(&input);

        let mut cursor = input.iter();
        for adult in &adults {
            assert!(is_adult(adult));
            assert!(cursor.any(|r| r == adult), "order must be preserved");
        }
        let expected = input.iter().filter(|r| is_adult(r)).count();
        assert_eq!(adults.len(), expected);
    }

    #[test]
    fn progress_reports_every_record_in_order() {
        let input = seed();
        let mut seen = Vec::new();
        let _ = filter_adults_with(&input, |step| {
            seen.push((step.index, step.record.name().to_string(), step.adult));
        });
        assert_eq!(
            seen,
            vec![
                (0, "Ana".to_string(), true),
                (1, "Carlos".to_string(), false),
                (2, "Beatriz".to_string(), true),
            ]
        );
    }

    #[test]
    fn empty_input_yields_empty_output_without_progress() {
        let mut calls = 0;
        let adults = filter_adults_with(&RecordCollection::new(), |_| calls += 1);
        assert!(adults.is_empty());
        assert_eq!(calls, 0);
    }
}
