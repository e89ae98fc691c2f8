//! # Pokemon Store
//!
//! All reads and writes of pokemon and their owner/category join records.
//!
//! ## Key Operations
//! - Create with one owner and one category association
//! - Update scalars, optionally replacing owner/category associations
//! - Delete, existence checks, point lookups, ordered listing
//! - Average rating over the pokemon's reviews
//!
//! ## Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    update(owner_id = 3, category_id = 0, p)             │
//! │                                                                         │
//! │  1. Load existing row by p.id (+ joins)   ── missing? → NotFound       │
//! │  2. Look up owner 3                       ── missing? → NotFound       │
//! │  3. ChangeSet:                                                         │
//! │       UpdatePokemon { name, birth_date }                               │
//! │       ClearOwners(p.id)                                                │
//! │       LinkOwner(p.id, 3)                                               │
//! │       (category 0 → associations left as they are)                     │
//! │  4. commit() → one transaction → rows_affected > 0                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups happen before the transaction opens. Nothing is cached between
//! calls; every operation re-reads what it needs.

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::category::CategoryRepository;
use crate::repository::changes::{ChangeSet, CommitOutcome, PokemonRef};
use crate::repository::owner::OwnerRepository;
use pokereview_core::{
    Category, Owner, Pokemon, PokemonCategory, PokemonDetails, PokemonOwner, RatingSummary,
    UNSET_ID,
};

/// Store for pokemon and their associations.
///
/// ## Usage
/// ```rust,ignore
/// let store = PokemonStore::new(pool);
///
/// let mut pikachu = Pokemon::new("Pikachu", born);
/// if store.create(ash.id, electric.id, &mut pikachu).await? {
///     assert!(store.exists(pikachu.id).await?);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PokemonStore {
    pool: SqlitePool,
}

impl PokemonStore {
    /// Creates a new PokemonStore over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        PokemonStore { pool }
    }

    /// Inserts a pokemon linked to one owner and one category.
    ///
    /// On success the assigned identity is written back into `pokemon.id`.
    ///
    /// ## Returns
    /// * `Ok(true)` - Pokemon and both join records were stored
    /// * `Err(DbError::NotFound)` - Owner or category doesn't exist; nothing stored
    pub async fn create(
        &self,
        owner_id: i64,
        category_id: i64,
        pokemon: &mut Pokemon,
    ) -> DbResult<bool> {
        debug!(owner_id, category_id, name = %pokemon.name, "Creating pokemon");

        let owner = self.require_owner(owner_id).await?;
        let category = self.require_category(category_id).await?;

        let mut changes = ChangeSet::new();
        changes
            .insert_pokemon(pokemon)
            .link_owner(PokemonRef::Inserted, owner.id)
            .link_category(PokemonRef::Inserted, category.id);

        let outcome = self.commit(changes).await?;
        if let Some(id) = outcome.inserted_id {
            pokemon.id = id;
        }

        Ok(outcome.saved())
    }

    /// Deletes a pokemon. Join records and reviews go with it.
    ///
    /// No existence check is made; callers check [`exists`](Self::exists)
    /// first. Deleting a missing row returns `Ok(false)`.
    pub async fn delete(&self, pokemon: &Pokemon) -> DbResult<bool> {
        debug!(id = pokemon.id, "Deleting pokemon");

        let mut changes = ChangeSet::new();
        changes.delete_pokemon(pokemon.id);

        Ok(self.commit(changes).await?.saved())
    }

    /// Gets a pokemon by identity.
    ///
    /// ## Returns
    /// * `Ok(Some(Pokemon))` - Pokemon found
    /// * `Ok(None)` - Pokemon not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Pokemon>> {
        let pokemon = sqlx::query_as::<_, Pokemon>(
            "SELECT id, name, birth_date FROM pokemon WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(pokemon)
    }

    /// Gets the first pokemon with the given name.
    ///
    /// Names are not unique; with duplicates, one of them is returned.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Pokemon>> {
        let pokemon = sqlx::query_as::<_, Pokemon>(
            "SELECT id, name, birth_date FROM pokemon WHERE name = ?1 LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(pokemon)
    }

    /// Gets a pokemon together with its owner and category join records.
    pub async fn get_details(&self, id: i64) -> DbResult<Option<PokemonDetails>> {
        let Some(pokemon) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let owners = sqlx::query_as::<_, PokemonOwner>(
            r#"
            SELECT pokemon_id, owner_id
            FROM pokemon_owners
            WHERE pokemon_id = ?1
            ORDER BY owner_id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let categories = sqlx::query_as::<_, PokemonCategory>(
            r#"
            SELECT pokemon_id, category_id
            FROM pokemon_categories
            WHERE pokemon_id = ?1
            ORDER BY category_id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(PokemonDetails {
            pokemon,
            owners,
            categories,
        }))
    }

    /// Average rating over every review of the pokemon.
    ///
    /// Zero when there are no reviews (including for unknown ids).
    pub async fn get_rating(&self, pokemon_id: i64) -> DbResult<Decimal> {
        let summary = sqlx::query_as::<_, RatingSummary>(
            r#"
            SELECT
                COALESCE(SUM(rating), 0) AS total,
                COUNT(*) AS count
            FROM reviews
            WHERE pokemon_id = ?1
            "#,
        )
        .bind(pokemon_id)
        .fetch_one(&self.pool)
        .await?;

        debug!(pokemon_id, total = summary.total, count = summary.count, "Computed rating");
        Ok(summary.mean())
    }

    /// Lists every pokemon, ascending by identity.
    pub async fn get_all(&self) -> DbResult<Vec<Pokemon>> {
        let pokemon = sqlx::query_as::<_, Pokemon>(
            "SELECT id, name, birth_date FROM pokemon ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(pokemon)
    }

    /// Whether a pokemon with this identity is stored.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pokemon WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(found != 0)
    }

    /// Updates the pokemon addressed by `pokemon.id`.
    ///
    /// `name` and `birth_date` are always written. An `owner_id` or
    /// `category_id` of [`UNSET_ID`] leaves those associations untouched;
    /// any other value replaces all of them with a single link.
    ///
    /// ## Returns
    /// * `Ok(true)` - Changes committed
    /// * `Err(DbError::NotFound)` - Pokemon, owner or category doesn't exist
    pub async fn update(
        &self,
        owner_id: i64,
        category_id: i64,
        pokemon: &Pokemon,
    ) -> DbResult<bool> {
        let existing = self
            .get_details(pokemon.id)
            .await?
            .ok_or_else(|| DbError::not_found("Pokemon", pokemon.id))?;

        debug!(
            id = existing.pokemon.id,
            owner_id,
            category_id,
            current_owners = existing.owners.len(),
            current_categories = existing.categories.len(),
            "Updating pokemon"
        );

        let id = existing.pokemon.id;
        let mut changes = ChangeSet::new();
        changes.update_pokemon(&Pokemon {
            id,
            name: pokemon.name.clone(),
            birth_date: pokemon.birth_date,
        });

        if owner_id != UNSET_ID {
            let owner = self.require_owner(owner_id).await?;
            changes.replace_owners(id, owner.id);
        }

        if category_id != UNSET_ID {
            let category = self.require_category(category_id).await?;
            changes.replace_categories(id, category.id);
        }

        Ok(self.commit(changes).await?.saved())
    }

    /// Counts pokemon (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pokemon")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Flushes a change set as one transaction.
    async fn commit(&self, changes: ChangeSet) -> DbResult<CommitOutcome> {
        changes.commit(&self.pool).await
    }

    async fn require_owner(&self, owner_id: i64) -> DbResult<Owner> {
        OwnerRepository::new(self.pool.clone())
            .get_by_id(owner_id)
            .await?
            .ok_or_else(|| DbError::not_found("Owner", owner_id))
    }

    async fn require_category(&self, category_id: i64) -> DbResult<Category> {
        CategoryRepository::new(self.pool.clone())
            .get_by_id(category_id)
            .await?
            .ok_or_else(|| DbError::not_found("Category", category_id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
