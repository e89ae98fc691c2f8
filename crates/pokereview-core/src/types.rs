//! # Domain Types
//!
//! Entities and join records of the review catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────┐  PokemonOwner   ┌─────────────┐  PokemonCategory      │
//! │  │   Owner     │◄───────────────►│   Pokemon   │◄──────────────┐       │
//! │  │  id         │   (join, M:N)   │  id         │   (join, M:N) │       │
//! │  │  first_name │                 │  name       │        ┌──────┴────┐  │
//! │  │  last_name  │                 │  birth_date │        │ Category  │  │
//! │  └─────────────┘                 └──────▲──────┘        │  id, name │  │
//! │                                         │ 1:N           └───────────┘  │
//! │                                  ┌──────┴──────┐                       │
//! │                                  │   Review    │                       │
//! │                                  │  rating     │                       │
//! │                                  └─────────────┘                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Identities are integer row ids assigned by the database. A record whose
//! `id` is [`UNSET_ID`](crate::UNSET_ID) has not been persisted yet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::UNSET_ID;

// =============================================================================
// Pokemon
// =============================================================================

/// A catalogued pokemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Pokemon {
    /// Row identity, `0` until inserted.
    pub id: i64,

    /// Display name. Not unique.
    pub name: String,

    #[ts(as = "String")]
    pub birth_date: NaiveDate,
}

impl Pokemon {
    /// Creates a pokemon record that has not been persisted yet.
    pub fn new(name: impl Into<String>, birth_date: NaiveDate) -> Self {
        Pokemon {
            id: UNSET_ID,
            name: name.into(),
            birth_date,
        }
    }

    /// Returns true once the database has assigned an identity.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id != UNSET_ID
    }
}

// =============================================================================
// Owner
// =============================================================================

/// A trainer who owns pokemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Owner {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gym: String,
}

impl Owner {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gym: impl Into<String>,
    ) -> Self {
        Owner {
            id: UNSET_ID,
            first_name: first_name.into(),
            last_name: last_name.into(),
            gym: gym.into(),
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A pokemon type/category (e.g. "Electric").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            id: UNSET_ID,
            name: name.into(),
        }
    }
}

// =============================================================================
// Review
// =============================================================================

/// A review of exactly one pokemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Review {
    pub id: i64,
    pub title: String,
    pub text: String,
    /// Score given by the reviewer, averaged into the pokemon's rating.
    pub rating: i32,
    pub pokemon_id: i64,
}

impl Review {
    pub fn new(
        pokemon_id: i64,
        title: impl Into<String>,
        text: impl Into<String>,
        rating: i32,
    ) -> Self {
        Review {
            id: UNSET_ID,
            title: title.into(),
            text: text.into(),
            rating,
            pokemon_id,
        }
    }
}

// =============================================================================
// Join Records
// =============================================================================

/// "This pokemon belongs to this owner."
///
/// Has no lifecycle of its own: created with the association and removed
/// when the association is cleared or the pokemon is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PokemonOwner {
    pub pokemon_id: i64,
    pub owner_id: i64,
}

/// "This pokemon belongs to this category."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PokemonCategory {
    pub pokemon_id: i64,
    pub category_id: i64,
}

/// A pokemon with its join records eagerly loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PokemonDetails {
    pub pokemon: Pokemon,
    pub owners: Vec<PokemonOwner>,
    pub categories: Vec<PokemonCategory>,
}

impl PokemonDetails {
    /// Owner ids this pokemon is associated with, in join order.
    pub fn owner_ids(&self) -> Vec<i64> {
        self.owners.iter().map(|link| link.owner_id).collect()
    }

    /// Category ids this pokemon is associated with, in join order.
    pub fn category_ids(&self) -> Vec<i64> {
        self.categories.iter().map(|link| link.category_id).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pikachu_birthday() -> NaiveDate {
        NaiveDate::from_ymd_opt(1996, 2, 27).unwrap()
    }

    #[test]
    fn test_new_pokemon_is_not_persisted() {
        let pokemon = Pokemon::new("Pikachu", pikachu_birthday());
        assert_eq!(pokemon.id, UNSET_ID);
        assert!(!pokemon.is_persisted());
    }

    #[test]
    fn test_pokemon_serializes_birth_date_as_iso_string() {
        let pokemon = Pokemon {
            id: 7,
            name: "Squirtle".to_string(),
            birth_date: pikachu_birthday(),
        };
        let json = serde_json::to_value(&pokemon).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["birth_date"], "1996-02-27");
    }

    #[test]
    fn test_details_exposes_associated_ids() {
        let details = PokemonDetails {
            pokemon: Pokemon {
                id: 1,
                ..Pokemon::new("Bulbasaur", pikachu_birthday())
            },
            owners: vec![
                PokemonOwner { pokemon_id: 1, owner_id: 4 },
                PokemonOwner { pokemon_id: 1, owner_id: 9 },
            ],
            categories: vec![PokemonCategory { pokemon_id: 1, category_id: 2 }],
        };

        assert_eq!(details.owner_ids(), vec![4, 9]);
        assert_eq!(details.category_ids(), vec![2]);
    }
}
