//! # pokereview-core: Domain Types for the Pokemon Review Catalog
//!
//! Pure types shared by the database layer and whatever presentation layer
//! sits on top of it. Nothing in here touches a database or the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PokeReview Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            API / presentation layer (not in this repo)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pokereview-db                                │   │
//! │  │       PokemonStore, Owner/Category/Review repositories          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pokereview-core (THIS CRATE) ★                    │   │
//! │  │   types: Pokemon, Owner, Category, Review, join records         │   │
//! │  │   rating: RatingSummary (mean of review ratings)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities and join records
//! - [`rating`] - Average rating computation
//!
//! ## Example Usage
//!
//! ```rust
//! use pokereview_core::RatingSummary;
//! use rust_decimal::Decimal;
//!
//! let summary = RatingSummary::from_ratings([3, 5]);
//! assert_eq!(summary.mean(), Decimal::from(4));
//!
//! // No reviews is a rating of zero, not an error
//! assert_eq!(RatingSummary::default().mean(), Decimal::ZERO);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod rating;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use rating::RatingSummary;
pub use types::*;

/// Identity value meaning "not assigned yet" on new records, and
/// "leave this association unchanged" for owner/category ids on update.
pub const UNSET_ID: i64 = 0;
