//! Staff directory lookups. This service never writes to `users`; the table
//! is maintained by the school's account system.

use sqlx::SqlitePool;

use crate::error::DbResult;
use bookpos_core::StaffMember;

/// Positions excluded from the staff listing endpoint.
const NON_STAFF_POSITIONS: [&str; 3] = ["Student", "Gatepass", "Intern"];

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Resolves a scanned RFID tag to a staff member, if any.
    pub async fn get_by_rfid(&self, rfid: i64) -> DbResult<Option<StaffMember>> {
        let user = sqlx::query_as::<_, StaffMember>(
            r#"
            SELECT id, fname, lname, email, position, isactive, rfid
            FROM users
            WHERE rfid = ?1
            "#,
        )
        .bind(rfid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Lists active staff, excluding student/gatepass/intern accounts.
    pub async fn list_staff(&self) -> DbResult<Vec<StaffMember>> {
        let users = sqlx::query_as::<_, StaffMember>(
            r#"
            SELECT id, fname, lname, email, position, isactive, rfid
            FROM users
            WHERE isactive = 1 AND position NOT IN (?1, ?2, ?3)
            ORDER BY lname, fname
            "#,
        )
        .bind(NON_STAFF_POSITIONS[0])
        .bind(NON_STAFF_POSITIONS[1])
        .bind(NON_STAFF_POSITIONS[2])
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
