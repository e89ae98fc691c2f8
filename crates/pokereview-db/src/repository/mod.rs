//! # Repository Module
//!
//! Database repositories for the review catalog.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  API handler                                                           │
//! │       │  db.pokemon().update(owner_id, 0, &pokemon)                    │
//! │       ▼                                                                 │
//! │  PokemonStore ──lookups──► OwnerRepository / CategoryRepository        │
//! │       │                                                                 │
//! │       │  builds a ChangeSet                                            │
//! │       ▼                                                                 │
//! │  ChangeSet::commit ── one transaction ──► SQLite                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`PokemonStore`](pokemon::PokemonStore) - Pokemon CRUD, join records, rating
//! - [`OwnerRepository`](owner::OwnerRepository) - Owner insert/lookup
//! - [`CategoryRepository`](category::CategoryRepository) - Category insert/lookup
//! - [`ReviewRepository`](review::ReviewRepository) - Review insert/listing
//! - [`ChangeSet`](changes::ChangeSet) - Unit of work shared by the mutations

pub mod category;
pub mod changes;
pub mod owner;
pub mod pokemon;
pub mod review;
