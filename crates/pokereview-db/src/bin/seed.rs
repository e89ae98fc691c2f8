//! # Seed Data Generator
//!
//! Populates a database with owners, categories, pokemon and reviews for
//! development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 pokemon (default)
//! cargo run -p pokereview-db --bin seed
//!
//! # Generate custom amount into a specific file
//! cargo run -p pokereview-db --bin seed -- --count 150 --db ./data/pokereview.db
//!
//! # More logging
//! RUST_LOG=pokereview_db=debug cargo run -p pokereview-db --bin seed
//! ```

use chrono::NaiveDate;
use pokereview_core::{Category, Owner, Pokemon, Review};
use pokereview_db::{Database, DbConfig};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Owners as (first name, last name, gym)
const OWNERS: &[(&str, &str, &str)] = &[
    ("Ash", "Ketchum", "Pallet Town"),
    ("Misty", "Waterflower", "Cerulean Gym"),
    ("Brock", "Harrison", "Pewter Gym"),
    ("Gary", "Oak", "Viridian Gym"),
    ("Erika", "Tamao", "Celadon Gym"),
];

const CATEGORIES: &[&str] = &[
    "Electric", "Water", "Fire", "Grass", "Rock", "Psychic", "Normal", "Ghost",
];

const SPECIES: &[&str] = &[
    "Pikachu", "Squirtle", "Charmander", "Bulbasaur", "Geodude", "Abra", "Eevee", "Gastly",
    "Psyduck", "Vulpix", "Oddish", "Onix", "Jigglypuff", "Meowth", "Snorlax", "Magikarp",
];

const REVIEW_TEXTS: &[(&str, &str)] = &[
    ("Loved it", "Best pokemon I have ever trained."),
    ("Solid", "Reliable in most battles."),
    ("Meh", "Does the job, nothing special."),
    ("Tough", "Hard to train but worth it."),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut db_path = String::from("./pokereview_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("PokeReview Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of pokemon to generate (default: 50)");
                println!("  -d, --db <PATH>    Database file path (default: ./pokereview_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(db = %db_path, count, "Seeding database");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let existing = db.pokemon().count().await?;
    if existing > 0 {
        warn!(existing, "Database already has pokemon, skipping seed to avoid duplicates");
        return Ok(());
    }

    let mut owner_ids = Vec::with_capacity(OWNERS.len());
    for (first, last, gym) in OWNERS {
        owner_ids.push(db.owners().insert(&Owner::new(*first, *last, *gym)).await?.id);
    }

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        category_ids.push(db.categories().insert(&Category::new(*name)).await?.id);
    }

    let base_date = NaiveDate::from_ymd_opt(1996, 2, 27).ok_or("invalid base date")?;
    let start = std::time::Instant::now();
    let mut generated = 0;
    let mut reviews = 0;

    for seed in 0..count {
        let mut pokemon = generate_pokemon(base_date, seed);
        let owner_id = owner_ids[seed % owner_ids.len()];
        let category_id = category_ids[(seed * 3) % category_ids.len()];

        match db.pokemon().create(owner_id, category_id, &mut pokemon).await {
            Ok(true) => generated += 1,
            Ok(false) => {
                warn!(name = %pokemon.name, "Nothing saved");
                continue;
            }
            Err(e) => {
                warn!(name = %pokemon.name, error = %e, "Failed to insert pokemon");
                continue;
            }
        }

        // 0..=3 reviews per pokemon, ratings 1..=5
        for n in 0..(seed % 4) {
            let (title, text) = REVIEW_TEXTS[(seed + n) % REVIEW_TEXTS.len()];
            let rating = ((seed * 7 + n * 3) % 5 + 1) as i32;
            db.reviews()
                .insert(&Review::new(pokemon.id, title, text, rating))
                .await?;
            reviews += 1;
        }
    }

    info!(
        pokemon = generated,
        reviews,
        elapsed = ?start.elapsed(),
        "Seed complete"
    );

    if let Some(first) = db.pokemon().get_all().await?.first() {
        let rating = db.pokemon().get_rating(first.id).await?;
        info!(name = %first.name, %rating, "Sample rating");
    }

    Ok(())
}

/// Generates a single pokemon with a deterministic name and birth date.
fn generate_pokemon(base_date: NaiveDate, seed: usize) -> Pokemon {
    let species = SPECIES[seed % SPECIES.len()];
    let generation = seed / SPECIES.len();
    let name = if generation == 0 {
        species.to_string()
    } else {
        format!("{} #{}", species, generation + 1)
    };

    let birth_date = base_date + chrono::Duration::days((seed * 37) as i64);

    Pokemon::new(name, birth_date)
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: INFO, with debug for the pokereview crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pokereview=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}
