//! Demo-data seeder.
//!
//! Fills the store with a plausible catalog so the server is usable out
//! of the box: a handful of curated titles, a large generated tail, and a
//! mix of fixed and pseudo-random theater assignments. A real deployment
//! would load its catalog from configuration or an administrative
//! interface; until one exists, seeding happens at startup.

use std::collections::HashSet;

use marquee_store::{BookingStore, Result};

use marquee_core::TheaterId;

/// Curated movie titles always included in the seeded catalog.
const CURATED_TITLES: [&str; 10] = [
    "The Godfather",
    "A night at the opera",
    "Pulp Fiction",
    "Seven Samurai",
    "Terminator 2: Judgment Day",
    "AKIRA",
    "Bilal: A New Breed of Hero",
    "¡Bienvenido Mr. Marshall!",
    "Lucky Baskhar",
    "Fist of Fury",
];

/// Movies (in id order) that receive the fixed theater block.
const FIXED_ASSIGNMENT_MOVIES: usize = 10;

/// Size of the fixed theater block.
const FIXED_THEATER_BLOCK: usize = 10;

/// Sizing profile for the seeded catalog.
#[derive(Debug, Clone, Copy)]
pub struct SeedProfile {
    /// Number of generated movie titles on top of the curated ones.
    pub generated_movies: usize,
    /// Number of generated theaters.
    pub generated_theaters: usize,
}

impl Default for SeedProfile {
    fn default() -> Self {
        Self {
            generated_movies: 10_000,
            generated_theaters: 10_000,
        }
    }
}

impl SeedProfile {
    /// A small profile for tests and quick local runs.
    #[must_use]
    pub fn small() -> Self {
        Self {
            generated_movies: 20,
            generated_theaters: 16,
        }
    }
}

/// A tiny xorshift generator.
///
/// Randomness quality is irrelevant here; speed matters, since the
/// default profile draws one value per (movie, theater) pair. The fixed
/// seed keeps seeded catalogs reproducible across runs.
struct FastRand {
    state: u32,
}

impl FastRand {
    fn new() -> Self {
        Self { state: 0x1234_5678 }
    }

    /// Returns the next value, masked to 7 bits (0..128).
    fn next(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state & 0x7F
    }
}

/// Seeds the store with the demo catalog.
///
/// The first [`FIXED_ASSIGNMENT_MOVIES`] movies (by id) are assigned one
/// fixed block of theaters; every later movie gets a ~1/128 random subset
/// of all theaters.
///
/// # Errors
///
/// Returns an error if the store already contains any of the seeded
/// names; seed an empty store.
pub fn seed(store: &BookingStore, profile: &SeedProfile) -> Result<()> {
    let mut titles: HashSet<String> = CURATED_TITLES.iter().map(ToString::to_string).collect();
    titles.extend((0..profile.generated_movies).map(|idx| format!("Movie {idx}")));
    store.add_movies(titles)?;

    let theaters: HashSet<String> = (0..profile.generated_theaters)
        .map(|idx| format!("Theater {idx}"))
        .collect();
    store.add_theaters(theaters)?;

    let movie_ids = store.sorted_movie_ids()?;
    let theater_ids = store.sorted_theater_ids()?;
    let fixed_block: HashSet<TheaterId> = theater_ids
        .iter()
        .copied()
        .take(FIXED_THEATER_BLOCK)
        .collect();

    let mut rng = FastRand::new();
    for (position, &movie_id) in movie_ids.iter().enumerate() {
        if position < FIXED_ASSIGNMENT_MOVIES {
            store.assign_theaters_to_movie(movie_id, &fixed_block)?;
        } else {
            let random_block: HashSet<TheaterId> = theater_ids
                .iter()
                .copied()
                .filter(|_| rng.next() == 0)
                .collect();
            store.assign_theaters_to_movie(movie_id, &random_block)?;
        }
    }

    tracing::info!(
        movies = movie_ids.len(),
        theaters = theater_ids.len(),
        "Seeded demo catalog"
    );
    Ok(())
}
