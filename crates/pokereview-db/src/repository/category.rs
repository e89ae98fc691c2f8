//! # Category Repository
//!
//! Database operations for categories.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use pokereview_core::Category;

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Inserts a category and returns it with its assigned identity.
    pub async fn insert(&self, category: &Category) -> DbResult<Category> {
        debug!(name = %category.name, "Inserting category");

        let result = sqlx::query("INSERT INTO categories (name) VALUES (?1)")
            .bind(&category.name)
            .execute(&self.pool)
            .await?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: category.name.clone(),
        })
    }

    /// Gets a category by identity, `None` if absent.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(category)
    }

    /// Counts categories (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use pokereview_core::Category;

    #[tokio::test]
    async fn test_insert_then_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let water = db.categories().insert(&Category::new("Water")).await.unwrap();
        let grass = db.categories().insert(&Category::new("Grass")).await.unwrap();

        assert!(grass.id > water.id);
        let found = db.categories().get_by_id(water.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Water");
        assert!(db.categories().get_by_id(grass.id + 1).await.unwrap().is_none());
    }
}
