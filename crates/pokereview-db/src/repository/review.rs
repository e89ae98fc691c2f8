//! # Review Repository
//!
//! Reviews belong to exactly one pokemon and are removed with it. The
//! pokemon's rating is derived from them by
//! [`PokemonStore::get_rating`](crate::PokemonStore::get_rating).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use pokereview_core::Review;

/// Repository for review database operations.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    /// Creates a new ReviewRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReviewRepository { pool }
    }

    /// Inserts a review and returns it with its assigned identity.
    ///
    /// ## Returns
    /// * `Ok(Review)` - Inserted review
    /// * `Err(DbError::ForeignKeyViolation)` - `pokemon_id` doesn't exist
    pub async fn insert(&self, review: &Review) -> DbResult<Review> {
        debug!(pokemon_id = review.pokemon_id, rating = review.rating, "Inserting review");

        let result = sqlx::query(
            r#"
            INSERT INTO reviews (title, text, rating, pokemon_id)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&review.title)
        .bind(&review.text)
        .bind(review.rating)
        .bind(review.pokemon_id)
        .execute(&self.pool)
        .await?;

        Ok(Review {
            id: result.last_insert_rowid(),
            ..review.clone()
        })
    }

    /// Gets a review by identity, `None` if absent.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Review>> {
        let review = sqlx::query_as::<_, Review>(
            "SELECT id, title, text, rating, pokemon_id FROM reviews WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    /// Lists every review of a pokemon, oldest first.
    pub async fn for_pokemon(&self, pokemon_id: i64) -> DbResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, title, text, rating, pokemon_id
            FROM reviews
            WHERE pokemon_id = ?1
            ORDER BY id
            "#,
        )
        .bind(pokemon_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// Counts reviews (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use pokereview_core::{Category, Owner, Pokemon, Review};

    #[tokio::test]
    async fn test_reviews_listed_per_pokemon() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = db.owners().insert(&Owner::new("Gary", "Oak", "Viridian")).await.unwrap();
        let category = db.categories().insert(&Category::new("Normal")).await.unwrap();

        let born = NaiveDate::from_ymd_opt(1998, 9, 1).unwrap();
        let mut eevee = Pokemon::new("Eevee", born);
        let mut snorlax = Pokemon::new("Snorlax", born);
        db.pokemon().create(owner.id, category.id, &mut eevee).await.unwrap();
        db.pokemon().create(owner.id, category.id, &mut snorlax).await.unwrap();

        let first = db.reviews().insert(&Review::new(eevee.id, "Cute", "Very", 5)).await.unwrap();
        db.reviews().insert(&Review::new(snorlax.id, "Sleepy", "Zzz", 2)).await.unwrap();
        db.reviews().insert(&Review::new(eevee.id, "Fine", "Ok", 3)).await.unwrap();

        let eevee_reviews = db.reviews().for_pokemon(eevee.id).await.unwrap();
        let ratings: Vec<i32> = eevee_reviews.iter().map(|r| r.rating).collect();

        assert_eq!(ratings, vec![5, 3]);
        assert_eq!(db.reviews().get_by_id(first.id).await.unwrap(), Some(first));
        assert_eq!(db.reviews().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_review_of_missing_pokemon_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .reviews()
            .insert(&Review::new(404, "Ghost", "Nobody here", 1))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
