//! Shared application state handed to every handler.

use bookpos_core::RfidConflictPolicy;
use bookpos_db::Database;

/// Per-request state: the database handle (cheap to clone, pool inside) and
/// the configured policies.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub rfid_policy: RfidConflictPolicy,
}

impl AppState {
    pub fn new(db: Database, rfid_policy: RfidConflictPolicy) -> Self {
        AppState { db, rfid_policy }
    }
}
