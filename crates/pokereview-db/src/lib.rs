//! # pokereview-db: Database Layer for the Pokemon Review Catalog
//!
//! SQLite-backed data access using sqlx. The centerpiece is
//! [`PokemonStore`], which owns every read and write of pokemon and their
//! owner/category join records.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       PokeReview Data Flow                              │
//! │                                                                         │
//! │  API handler (update_pokemon)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  pokereview-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ PokemonStore  │    │  (embedded)  │  │   │
//! │  │   │               │    │ OwnerRepo     │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CategoryRepo  │    │ 001_init.sql │  │   │
//! │  │   │               │    │ ReviewRepo    │    │              │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │ ChangeSet::commit            │   │
//! │  │                                ▼ (one transaction)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repositories and the unit-of-work change set
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pokereview_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/pokereview.db")).await?;
//!
//! let mut pikachu = Pokemon::new("Pikachu", birth_date);
//! db.pokemon().create(owner_id, category_id, &mut pikachu).await?;
//! let rating = db.pokemon().get_rating(pikachu.id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::category::CategoryRepository;
pub use repository::changes::{ChangeSet, CommitOutcome, PokemonRef};
pub use repository::owner::OwnerRepository;
pub use repository::pokemon::PokemonStore;
pub use repository::review::ReviewRepository;
