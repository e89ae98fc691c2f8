//! # Owner Repository
//!
//! Owners are opaque to the pokemon store: it only needs to look them up by
//! identity before linking. This repository also lets callers create them.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use pokereview_core::Owner;

/// Repository for owner database operations.
#[derive(Debug, Clone)]
pub struct OwnerRepository {
    pool: SqlitePool,
}

impl OwnerRepository {
    /// Creates a new OwnerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OwnerRepository { pool }
    }

    /// Inserts an owner and returns it with its assigned identity.
    pub async fn insert(&self, owner: &Owner) -> DbResult<Owner> {
        debug!(first_name = %owner.first_name, last_name = %owner.last_name, "Inserting owner");

        let result = sqlx::query("INSERT INTO owners (first_name, last_name, gym) VALUES (?1, ?2, ?3)")
            .bind(&owner.first_name)
            .bind(&owner.last_name)
            .bind(&owner.gym)
            .execute(&self.pool)
            .await?;

        Ok(Owner {
            id: result.last_insert_rowid(),
            ..owner.clone()
        })
    }

    /// Gets an owner by identity.
    ///
    /// ## Returns
    /// * `Ok(Some(Owner))` - Owner found
    /// * `Ok(None)` - Owner not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Owner>> {
        let owner = sqlx::query_as::<_, Owner>(
            "SELECT id, first_name, last_name, gym FROM owners WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner)
    }

    /// Counts owners (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM owners")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use pokereview_core::Owner;

    #[tokio::test]
    async fn test_insert_assigns_identity() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let brock = db.owners().insert(&Owner::new("Brock", "Harrison", "Pewter")).await.unwrap();

        assert!(brock.id > 0);
        assert_eq!(db.owners().get_by_id(brock.id).await.unwrap(), Some(brock));
        assert_eq!(db.owners().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_owner_is_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert_eq!(db.owners().get_by_id(17).await.unwrap(), None);
    }
}
