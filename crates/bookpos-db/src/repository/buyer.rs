//! # Buyer Repository
//!
//! Buyer identity resolution across two alternate keys: display name and
//! RFID tag.
//!
//! ## Resolution Policy
//! ```text
//! resolve(name, rfid?)
//!   │
//!   ├─ rfid given ──► lookup by rfid
//!   │     ├─ hit ──────────────────────► return unchanged
//!   │     └─ miss ──► lookup by name
//!   │           ├─ hit, rfid NULL ─────► attach rfid, return
//!   │           ├─ hit, other rfid ────► RfidConflictPolicy decides
//!   │           └─ miss ──────────────► create (name + rfid)
//!   │
//!   └─ no rfid ──► lookup by name
//!         ├─ hit ──────────────────────► return
//!         └─ miss ─────────────────────► create (name only)
//! ```
//!
//! Creation races are settled by the UNIQUE constraints on `buyer_name` and
//! `rfid`: a violation means another writer won, so we re-read and return the
//! winning row instead of surfacing a conflict. Each call performs at most
//! one create or one update, never a delete.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use bookpos_core::validation::validate_buyer_name;
use bookpos_core::{Buyer, RfidConflictPolicy};

/// Repository for buyer identity operations.
#[derive(Debug, Clone)]
pub struct BuyerRepository {
    pool: SqlitePool,
}

impl BuyerRepository {
    /// Creates a new BuyerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BuyerRepository { pool }
    }

    /// Resolves a buyer for the given name and optional RFID, creating or
    /// linking as needed. Idempotent: the same (name, rfid) always resolves
    /// to the same buyer identity.
    pub async fn resolve(
        &self,
        name: &str,
        rfid: Option<i64>,
        policy: RfidConflictPolicy,
    ) -> DbResult<Buyer> {
        let name = validate_buyer_name(name)?;

        let Some(tag) = rfid else {
            return self.resolve_by_name(&name).await;
        };

        if let Some(buyer) = self.get_by_rfid(tag).await? {
            // The tag is already canonical for this buyer.
            return Ok(buyer);
        }

        match self.get_by_name(&name).await? {
            Some(buyer) if buyer.rfid.is_none() => {
                debug!(buyer_id = buyer.buyer_id, rfid = tag, "linking RFID to buyer");
                self.attach_rfid(buyer.buyer_id, tag).await
            }
            Some(buyer) => match policy {
                RfidConflictPolicy::Reject => Err(DbError::RfidConflict {
                    buyer_name: buyer.buyer_name,
                }),
                RfidConflictPolicy::Overwrite => {
                    debug!(buyer_id = buyer.buyer_id, rfid = tag, "overwriting buyer RFID");
                    self.attach_rfid(buyer.buyer_id, tag).await
                }
            },
            None => match self.create(&name, Some(tag)).await {
                Ok(buyer) => Ok(buyer),
                Err(e) if e.is_unique_violation() => self.re_read(&name, Some(tag)).await,
                Err(e) => Err(e),
            },
        }
    }

    async fn resolve_by_name(&self, name: &str) -> DbResult<Buyer> {
        if let Some(buyer) = self.get_by_name(name).await? {
            return Ok(buyer);
        }

        match self.create(name, None).await {
            Ok(buyer) => Ok(buyer),
            Err(e) if e.is_unique_violation() => self.re_read(name, None).await,
            Err(e) => Err(e),
        }
    }

    /// Re-read after losing a creation race: the winning row exists by
    /// definition, keyed by whichever alternate key collided.
    async fn re_read(&self, name: &str, rfid: Option<i64>) -> DbResult<Buyer> {
        if let Some(tag) = rfid {
            if let Some(buyer) = self.get_by_rfid(tag).await? {
                return Ok(buyer);
            }
        }
        self.get_by_name(name)
            .await?
            .ok_or_else(|| DbError::not_found("Buyer", name))
    }

    /// Gets a buyer by RFID tag.
    pub async fn get_by_rfid(&self, rfid: i64) -> DbResult<Option<Buyer>> {
        let buyer = sqlx::query_as::<_, Buyer>(
            "SELECT buyer_id, buyer_name, rfid FROM buyers WHERE rfid = ?1",
        )
        .bind(rfid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(buyer)
    }

    /// Gets a buyer by display name.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Buyer>> {
        let buyer = sqlx::query_as::<_, Buyer>(
            "SELECT buyer_id, buyer_name, rfid FROM buyers WHERE buyer_name = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(buyer)
    }

    /// Lists buyers that have no RFID linked yet (the dashboard dropdown for
    /// manual buyer selection).
    pub async fn without_rfid(&self) -> DbResult<Vec<Buyer>> {
        let buyers = sqlx::query_as::<_, Buyer>(
            "SELECT buyer_id, buyer_name, rfid FROM buyers WHERE rfid IS NULL ORDER BY buyer_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(buyers)
    }

    /// Inserts a new buyer. Fails with a unique violation when the name or
    /// RFID already exists; `resolve` handles that by re-reading.
    async fn create(&self, name: &str, rfid: Option<i64>) -> DbResult<Buyer> {
        debug!(name = %name, rfid = ?rfid, "creating buyer");

        let result = sqlx::query("INSERT INTO buyers (buyer_name, rfid) VALUES (?1, ?2)")
            .bind(name)
            .bind(rfid)
            .execute(&self.pool)
            .await?;

        Ok(Buyer {
            buyer_id: result.last_insert_rowid(),
            buyer_name: name.to_string(),
            rfid,
        })
    }

    /// Attaches an RFID to an existing buyer. If another buyer claimed the
    /// tag concurrently, returns that buyer instead (the tag's uniqueness
    /// wins over this update).
    async fn attach_rfid(&self, buyer_id: i64, rfid: i64) -> DbResult<Buyer> {
        let updated = sqlx::query("UPDATE buyers SET rfid = ?2 WHERE buyer_id = ?1")
            .bind(buyer_id)
            .bind(rfid)
            .execute(&self.pool)
            .await;

        match updated {
            Ok(result) if result.rows_affected() == 0 => {
                Err(DbError::not_found("Buyer", buyer_id))
            }
            Ok(_) => self
                .get_by_rfid(rfid)
                .await?
                .ok_or_else(|| DbError::not_found("Buyer", buyer_id)),
            Err(e) => {
                let db_err: DbError = e.into();
                if db_err.is_unique_violation() {
                    self.get_by_rfid(rfid)
                        .await?
                        .ok_or_else(|| DbError::not_found("Buyer", buyer_id))
                } else {
                    Err(db_err)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_resolve_creates_then_finds() {
        let db = test_db().await;
        let buyers = db.buyers();

        let first = buyers.resolve("Ana", None, Default::default()).await.unwrap();
        assert!(first.rfid.is_none());

        // Idempotent: same (name, rfid) resolves to the same identity.
        let second = buyers.resolve("Ana", None, Default::default()).await.unwrap();
        assert_eq!(first.buyer_id, second.buyer_id);
    }

    #[tokio::test]
    async fn test_resolve_rejects_empty_name() {
        let db = test_db().await;

        let err = db
            .buyers()
            .resolve("   ", None, Default::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        // Validation short-circuits before any write.
        assert!(db.buyers().get_by_name("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_links_rfid_to_nameless_tag_buyer() {
        let db = test_db().await;
        let buyers = db.buyers();

        let created = buyers.resolve("Ana", None, Default::default()).await.unwrap();
        assert!(created.rfid.is_none());

        // Same name shows up with a tag: the tag gets linked.
        let linked = buyers
            .resolve("Ana", Some(4211), Default::default())
            .await
            .unwrap();
        assert_eq!(linked.buyer_id, created.buyer_id);
        assert_eq!(linked.rfid, Some(4211));

        // From now on the tag alone resolves to the same buyer.
        let by_tag = buyers
            .resolve("Ana", Some(4211), Default::default())
            .await
            .unwrap();
        assert_eq!(by_tag.buyer_id, created.buyer_id);
    }

    #[tokio::test]
    async fn test_resolve_rfid_hit_ignores_name() {
        let db = test_db().await;
        let buyers = db.buyers();

        let ana = buyers
            .resolve("Ana", Some(4211), Default::default())
            .await
            .unwrap();

        // A known tag wins even when presented with a different name.
        let same = buyers
            .resolve("Anna L", Some(4211), Default::default())
            .await
            .unwrap();
        assert_eq!(same.buyer_id, ana.buyer_id);
        assert_eq!(same.buyer_name, "Ana");
    }

    #[tokio::test]
    async fn test_rfid_conflict_reject() {
        let db = test_db().await;
        let buyers = db.buyers();

        buyers
            .resolve("Ana", Some(4211), Default::default())
            .await
            .unwrap();

        // Ana already carries tag 4211; presenting a fresh tag for her name
        // is the unresolved edge case. Default policy rejects.
        let err = buyers
            .resolve("Ana", Some(9999), RfidConflictPolicy::Reject)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::RfidConflict { .. }));

        // The stored tag is untouched.
        let ana = buyers.get_by_name("Ana").await.unwrap().unwrap();
        assert_eq!(ana.rfid, Some(4211));
    }

    #[tokio::test]
    async fn test_rfid_conflict_overwrite() {
        let db = test_db().await;
        let buyers = db.buyers();

        let ana = buyers
            .resolve("Ana", Some(4211), Default::default())
            .await
            .unwrap();

        let updated = buyers
            .resolve("Ana", Some(9999), RfidConflictPolicy::Overwrite)
            .await
            .unwrap();
        assert_eq!(updated.buyer_id, ana.buyer_id);
        assert_eq!(updated.rfid, Some(9999));
    }

    #[tokio::test]
    async fn test_creation_race_resolved_by_re_read() {
        let db = test_db().await;
        let buyers = db.buyers();

        // Simulate losing the race: the row appears between our lookup and
        // our insert.
        let winner = buyers.create("Ana", Some(4211)).await.unwrap();
        let err = buyers.create("Ana", Some(4211)).await.unwrap_err();
        assert!(err.is_unique_violation());

        let resolved = buyers.re_read("Ana", Some(4211)).await.unwrap();
        assert_eq!(resolved.buyer_id, winner.buyer_id);
    }

    #[tokio::test]
    async fn test_rfid_uniqueness_invariant() {
        let db = test_db().await;
        let buyers = db.buyers();

        buyers
            .resolve("Ana", Some(4211), Default::default())
            .await
            .unwrap();
        // A different name presenting the same new tag resolves to the
        // existing holder rather than creating a second row.
        buyers
            .resolve("Ben", Some(4211), Default::default())
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM buyers WHERE rfid = 4211")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_without_rfid() {
        let db = test_db().await;
        let buyers = db.buyers();

        buyers.resolve("Ana Lopez", None, Default::default()).await.unwrap();
        buyers
            .resolve("Ben", Some(7), Default::default())
            .await
            .unwrap();

        let untagged = buyers.without_rfid().await.unwrap();
        assert_eq!(untagged.len(), 1);
        assert_eq!(untagged[0].buyer_name, "Ana Lopez");
    }
}
