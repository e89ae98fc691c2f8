//! # Change Set (Unit of Work)
//!
//! Pending inserts, updates, deletes and join-record maintenance, flushed to
//! SQLite in a single transaction by [`ChangeSet::commit`].
//!
//! ## Commit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ChangeSet::commit                               │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    InsertPokemon            → last_insert_rowid = 12                   │
//! │    LinkOwner(Inserted, 3)   → (12, 3) into pokemon_owners              │
//! │    LinkCategory(Inserted,1) → (12, 1) into pokemon_categories          │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  rows_affected = 3   → saved() == true                                 │
//! │                                                                         │
//! │  Any failing statement drops the transaction: nothing is written.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Associations are explicit records here rather than collection state on
//! the pokemon: linking adds one join row, clearing removes every join row
//! of that kind for the pokemon.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use pokereview_core::Pokemon;

/// Which pokemon a join record points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PokemonRef {
    /// A pokemon that is already stored.
    Existing(i64),
    /// The pokemon inserted earlier in the same change set.
    Inserted,
}

/// One pending modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    InsertPokemon { name: String, birth_date: NaiveDate },
    UpdatePokemon { id: i64, name: String, birth_date: NaiveDate },
    DeletePokemon { id: i64 },
    LinkOwner { pokemon: PokemonRef, owner_id: i64 },
    LinkCategory { pokemon: PokemonRef, category_id: i64 },
    ClearOwners { pokemon_id: i64 },
    ClearCategories { pokemon_id: i64 },
}

/// Result of flushing a change set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitOutcome {
    /// Rows touched across every statement in the transaction.
    pub rows_affected: u64,
    /// Identity assigned by an `InsertPokemon` change, if there was one.
    pub inserted_id: Option<i64>,
}

impl CommitOutcome {
    /// Whether the commit affected at least one row.
    #[inline]
    pub fn saved(&self) -> bool {
        self.rows_affected > 0
    }
}

/// Ordered list of pending changes.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        ChangeSet::default()
    }

    /// Registers a new pokemon for insertion. Its `id` is ignored.
    pub fn insert_pokemon(&mut self, pokemon: &Pokemon) -> &mut Self {
        self.changes.push(Change::InsertPokemon {
            name: pokemon.name.clone(),
            birth_date: pokemon.birth_date,
        });
        self
    }

    /// Registers the scalar fields of `pokemon` to be written to its row.
    pub fn update_pokemon(&mut self, pokemon: &Pokemon) -> &mut Self {
        self.changes.push(Change::UpdatePokemon {
            id: pokemon.id,
            name: pokemon.name.clone(),
            birth_date: pokemon.birth_date,
        });
        self
    }

    /// Registers a pokemon row for deletion. Join rows and reviews cascade.
    pub fn delete_pokemon(&mut self, id: i64) -> &mut Self {
        self.changes.push(Change::DeletePokemon { id });
        self
    }

    pub fn link_owner(&mut self, pokemon: PokemonRef, owner_id: i64) -> &mut Self {
        self.changes.push(Change::LinkOwner { pokemon, owner_id });
        self
    }

    pub fn link_category(&mut self, pokemon: PokemonRef, category_id: i64) -> &mut Self {
        self.changes.push(Change::LinkCategory {
            pokemon,
            category_id,
        });
        self
    }

    pub fn clear_owners(&mut self, pokemon_id: i64) -> &mut Self {
        self.changes.push(Change::ClearOwners { pokemon_id });
        self
    }

    pub fn clear_categories(&mut self, pokemon_id: i64) -> &mut Self {
        self.changes.push(Change::ClearCategories { pokemon_id });
        self
    }

    /// Clears every owner join of the pokemon and links exactly `owner_id`.
    pub fn replace_owners(&mut self, pokemon_id: i64, owner_id: i64) -> &mut Self {
        self.clear_owners(pokemon_id)
            .link_owner(PokemonRef::Existing(pokemon_id), owner_id)
    }

    /// Clears every category join of the pokemon and links exactly `category_id`.
    pub fn replace_categories(&mut self, pokemon_id: i64, category_id: i64) -> &mut Self {
        self.clear_categories(pokemon_id)
            .link_category(PokemonRef::Existing(pokemon_id), category_id)
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Applies every pending change, in order, inside one transaction.
    ///
    /// ## Returns
    /// * `Ok(CommitOutcome)` - Transaction committed
    /// * `Err(DbError)` - A statement failed; nothing was written
    pub async fn commit(self, pool: &SqlitePool) -> DbResult<CommitOutcome> {
        if self.is_empty() {
            return Ok(CommitOutcome::default());
        }

        debug!(changes = self.len(), "Committing change set");

        let mut tx = pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let mut outcome = CommitOutcome::default();
        for change in &self.changes {
            outcome.rows_affected += apply(&mut tx, change, &mut outcome.inserted_id).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(
            rows_affected = outcome.rows_affected,
            inserted_id = ?outcome.inserted_id,
            "Change set committed"
        );
        Ok(outcome)
    }
}

fn resolve(pokemon: PokemonRef, inserted_id: Option<i64>) -> DbResult<i64> {
    match pokemon {
        PokemonRef::Existing(id) => Ok(id),
        PokemonRef::Inserted => inserted_id.ok_or_else(|| {
            DbError::Internal("join references a pokemon not inserted by this change set".to_string())
        }),
    }
}

/// Executes one change and returns the number of rows it touched.
async fn apply(
    conn: &mut SqliteConnection,
    change: &Change,
    inserted_id: &mut Option<i64>,
) -> DbResult<u64> {
    let result = match change {
        Change::InsertPokemon { name, birth_date } => {
            let result = sqlx::query("INSERT INTO pokemon (name, birth_date) VALUES (?1, ?2)")
                .bind(name)
                .bind(birth_date)
                .execute(&mut *conn)
                .await?;
            *inserted_id = Some(result.last_insert_rowid());
            result
        }

        Change::UpdatePokemon {
            id,
            name,
            birth_date,
        } => {
            sqlx::query("UPDATE pokemon SET name = ?2, birth_date = ?3 WHERE id = ?1")
                .bind(id)
                .bind(name)
                .bind(birth_date)
                .execute(&mut *conn)
                .await?
        }

        Change::DeletePokemon { id } => {
            sqlx::query("DELETE FROM pokemon WHERE id = ?1")
                .bind(id)
                .execute(&mut *conn)
                .await?
        }

        Change::LinkOwner { pokemon, owner_id } => {
            let pokemon_id = resolve(*pokemon, *inserted_id)?;
            sqlx::query("INSERT INTO pokemon_owners (pokemon_id, owner_id) VALUES (?1, ?2)")
                .bind(pokemon_id)
                .bind(owner_id)
                .execute(&mut *conn)
                .await?
        }

        Change::LinkCategory {
            pokemon,
            category_id,
        } => {
            let pokemon_id = resolve(*pokemon, *inserted_id)?;
            sqlx::query(
                "INSERT INTO pokemon_categories (pokemon_id, category_id) VALUES (?1, ?2)",
            )
            .bind(pokemon_id)
            .bind(category_id)
            .execute(&mut *conn)
            .await?
        }

        Change::ClearOwners { pokemon_id } => {
            sqlx::query("DELETE FROM pokemon_owners WHERE pokemon_id = ?1")
                .bind(pokemon_id)
                .execute(&mut *conn)
                .await?
        }

        Change::ClearCategories { pokemon_id } => {
            sqlx::query("DELETE FROM pokemon_categories WHERE pokemon_id = ?1")
                .bind(pokemon_id)
                .execute(&mut *conn)
                .await?
        }
    };

    Ok(result.rows_affected())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use pokereview_core::{Category, Owner};

    fn charmander() -> Pokemon {
        Pokemon::new("Charmander", NaiveDate::from_ymd_opt(1996, 2, 27).unwrap())
    }

    async fn join_count(db: &Database, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_change_set_saves_nothing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let outcome = ChangeSet::new().commit(db.pool()).await.unwrap();

        assert_eq!(outcome, CommitOutcome::default());
        assert!(!outcome.saved());
    }

    #[tokio::test]
    async fn test_joins_resolve_to_inserted_pokemon() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = db.owners().insert(&Owner::new("Misty", "Waterflower", "Cerulean")).await.unwrap();
        let category = db.categories().insert(&Category::new("Fire")).await.unwrap();

        let mut changes = ChangeSet::new();
        changes
            .insert_pokemon(&charmander())
            .link_owner(PokemonRef::Inserted, owner.id)
            .link_category(PokemonRef::Inserted, category.id);
        assert_eq!(changes.len(), 3);

        let outcome = changes.commit(db.pool()).await.unwrap();
        let id = outcome.inserted_id.unwrap();

        assert_eq!(outcome.rows_affected, 3);
        let details = db.pokemon().get_details(id).await.unwrap().unwrap();
        assert_eq!(details.owner_ids(), vec![owner.id]);
        assert_eq!(details.category_ids(), vec![category.id]);
    }

    #[tokio::test]
    async fn test_failed_statement_rolls_back_whole_set() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut changes = ChangeSet::new();
        changes
            .insert_pokemon(&charmander())
            .link_owner(PokemonRef::Inserted, 999);

        let err = changes.commit(db.pool()).await.unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(db.pokemon().count().await.unwrap(), 0);
        assert_eq!(join_count(&db, "pokemon_owners").await, 0);
    }

    #[tokio::test]
    async fn test_inserted_ref_without_insert_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut changes = ChangeSet::new();
        changes.link_category(PokemonRef::Inserted, 1);

        let err = changes.commit(db.pool()).await.unwrap_err();
        assert!(matches!(err, DbError::Internal(_)));
    }

    #[test]
    fn test_replace_is_clear_then_link() {
        let mut changes = ChangeSet::new();
        changes.replace_owners(5, 8).replace_categories(5, 2);

        assert_eq!(
            changes.changes(),
            &[
                Change::ClearOwners { pokemon_id: 5 },
                Change::LinkOwner {
                    pokemon: PokemonRef::Existing(5),
                    owner_id: 8
                },
                Change::ClearCategories { pokemon_id: 5 },
                Change::LinkCategory {
                    pokemon: PokemonRef::Existing(5),
                    category_id: 2
                },
            ]
        );
    }
}
