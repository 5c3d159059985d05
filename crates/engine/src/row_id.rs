//! Stable row identity.
//!
//! A `RowId` is assigned when a row is created and never reassigned. It is the
//! only handle that survives insert/delete/sort/filter.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, process-unique row identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(Uuid);

impl RowId {
    /// Mint a fresh id. Never returns an id handed out before.
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough for logs
        let simple = self.0.simple().to_string();
        write!(f, "row_{}", &simple[..8])
    }
}
