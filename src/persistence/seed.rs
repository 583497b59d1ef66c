//! Default records written when the backing file does not exist yet.

use crate::domain::{RecordCollection, UserRecord};

/// Seed data as `(name, age)` pairs, in file order.
pub const SEED_RECORDS: [(&str, u64); 3] = [("Ana", 22), ("Carlos", 17), ("Beatriz", 30)];

/// Builds the seed collection.
#[must_use]
pub fn seed_collection() -> RecordCollection {
    SEED_RECORDS
        .iter()
        .filter_map(|&(name, age)| UserRecord::new(name, age).ok())
        .collect()
}
