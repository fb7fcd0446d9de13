//! The aggregate booking store: movies, theaters, rooms and their caches.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use marquee_core::{MovieId, SeatId, TheaterId, EOL};

use crate::error::{Result, StoreError};
use crate::name_table::NameTable;
use crate::room::{BookingResult, Room};

/// Converts a lock poison error to a store error.
fn poison_err<T>(_: PoisonError<T>) -> StoreError {
    StoreError::internal("store lock poisoned")
}

#[derive(Debug)]
struct StoreInner {
    movies: NameTable,
    theaters: NameTable,
    /// `movie → theater → room`. The inner map is ordered so the theater
    /// listing renders sorted by theater id.
    rooms: HashMap<MovieId, BTreeMap<TheaterId, Arc<Room>>>,
    /// Cached rendered theater listing per movie. An entry exists for
    /// every movie in `rooms`, including movies with no theaters.
    theaters_per_movie: HashMap<MovieId, Arc<str>>,
}

impl StoreInner {
    fn new() -> Self {
        Self {
            movies: NameTable::new("movie"),
            theaters: NameTable::new("theater"),
            rooms: HashMap::new(),
            theaters_per_movie: HashMap::new(),
        }
    }

    fn room(&self, movie_id: MovieId, theater_id: TheaterId) -> Result<&Arc<Room>> {
        self.rooms
            .get(&movie_id)
            .and_then(|rooms_for_movie| rooms_for_movie.get(&theater_id))
            .ok_or(StoreError::UnknownRoom {
                movie_id,
                theater_id,
            })
    }

    /// Rebuilds the cached theater listing for one movie.
    fn rebuild_theater_listing(&mut self, movie_id: MovieId) -> Result<()> {
        let rooms_for_movie = self
            .rooms
            .get(&movie_id)
            .ok_or(StoreError::UnknownMovie { movie_id })?;

        let mut listing = String::new();
        for theater_id in rooms_for_movie.keys() {
            let name = self.theaters.get_name(theater_id.value())?;
            let _ = write!(listing, "{theater_id},{name}{EOL}");
        }

        self.theaters_per_movie.insert(movie_id, Arc::from(listing));
        Ok(())
    }
}

/// The concurrent booking store.
///
/// One store instance aggregates the movie and theater name tables, the
/// `movie → theater → Room` map, and the per-movie theater-listing cache,
/// all guarded by a store-wide reader/writer lock.
///
/// ## Locking discipline
///
/// Listing reads, sorted-id snapshots **and bookings** take the read side
/// of the store lock, so none of them block each other; bookings against
/// the same room then serialise on that room's own write lock. Structural
/// mutations ([`add_movies`], [`add_theaters`],
/// [`assign_theaters_to_movie`], [`clear`]) take the write side and are
/// exclusive against everything, which makes them appear atomic to every
/// reader and booker.
///
/// Taking the store *write* lock for bookings would be correct but would
/// destroy the central parallelism property; [`book`] must stay on the
/// read side.
///
/// ## Atomicity
///
/// Every mutator validates its entire input against the current state
/// before changing anything, so a precondition failure leaves the store
/// byte-identical to before the call.
///
/// [`add_movies`]: BookingStore::add_movies
/// [`add_theaters`]: BookingStore::add_theaters
/// [`assign_theaters_to_movie`]: BookingStore::assign_theaters_to_movie
/// [`book`]: BookingStore::book
/// [`clear`]: BookingStore::clear
#[derive(Debug)]
pub struct BookingStore {
    inner: RwLock<StoreInner>,
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

static SHARED: OnceLock<Arc<BookingStore>> = OnceLock::new();

impl BookingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner::new()),
        }
    }

    /// Returns the process-wide shared store, creating it on first use.
    ///
    /// The shared store lives for the rest of the process. Tests that use
    /// it must reset it with [`clear`] rather than expecting a fresh
    /// instance, and must account for the id counters continuing to run.
    ///
    /// [`clear`]: BookingStore::clear
    pub fn shared() -> Arc<Self> {
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::new())))
    }

    /// Adds a batch of movies, returning the freshly allocated ids.
    ///
    /// Each new movie starts with an empty theater assignment and an
    /// empty cached theater listing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateName`] if any title already exists;
    /// the store is left unchanged (no ids consumed, no sub-maps created).
    pub fn add_movies(&self, titles: HashSet<String>) -> Result<Vec<MovieId>> {
        let mut inner = self.inner.write().map_err(poison_err)?;

        let inserted = inner.movies.add(titles)?;
        let movie_ids: Vec<MovieId> = inserted.into_iter().map(MovieId::new).collect();
        for &movie_id in &movie_ids {
            inner.rooms.insert(movie_id, BTreeMap::new());
            inner.rebuild_theater_listing(movie_id)?;
        }

        Ok(movie_ids)
    }

    /// Adds a batch of theaters, returning the freshly allocated ids.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateName`] if any name already exists;
    /// the store is left unchanged.
    pub fn add_theaters(&self, names: HashSet<String>) -> Result<Vec<TheaterId>> {
        let mut inner = self.inner.write().map_err(poison_err)?;

        let inserted = inner.theaters.add(names)?;
        Ok(inserted.into_iter().map(TheaterId::new).collect())
    }

    /// Assigns a set of theaters to a movie, materialising one
    /// fully-available room per theater.
    ///
    /// All preconditions are checked before any room is created, so a
    /// failure leaves the store unchanged.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnknownMovie`] if the movie does not exist
    /// - [`StoreError::UnknownTheater`] if any theater id does not exist
    /// - [`StoreError::AlreadyAssigned`] if any theater is already
    ///   assigned to this movie
    pub fn assign_theaters_to_movie(
        &self,
        movie_id: MovieId,
        theater_ids: &HashSet<TheaterId>,
    ) -> Result<()> {
        let mut inner = self.inner.write().map_err(poison_err)?;
        let inner = &mut *inner;

        if !inner.movies.has_id(movie_id.value()) {
            return Err(StoreError::UnknownMovie { movie_id });
        }
        let rooms_for_movie = inner
            .rooms
            .get_mut(&movie_id)
            .ok_or_else(|| StoreError::internal("room map missing for known movie"))?;

        for &theater_id in theater_ids {
            if !inner.theaters.has_id(theater_id.value()) {
                return Err(StoreError::UnknownTheater { theater_id });
            }
            if rooms_for_movie.contains_key(&theater_id) {
                return Err(StoreError::AlreadyAssigned {
                    movie_id,
                    theater_id,
                });
            }
        }

        for &theater_id in theater_ids {
            rooms_for_movie.insert(theater_id, Arc::new(Room::new()));
        }
        inner.rebuild_theater_listing(movie_id)?;

        Ok(())
    }

    /// Returns the cached movie listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn list_movies(&self) -> Result<Arc<str>> {
        let inner = self.inner.read().map_err(poison_err)?;
        Ok(inner.movies.rendered())
    }

    /// Returns the cached theater listing for a movie.
    ///
    /// A movie with no assigned theaters renders as the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownMovie`] if the movie does not exist.
    pub fn list_theaters_for_movie(&self, movie_id: MovieId) -> Result<Arc<str>> {
        let inner = self.inner.read().map_err(poison_err)?;
        inner
            .theaters_per_movie
            .get(&movie_id)
            .cloned()
            .ok_or(StoreError::UnknownMovie { movie_id })
    }

    /// Returns the cached availability listing for one room.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownRoom`] if the theater is not assigned
    /// to the movie.
    pub fn list_available_seats(
        &self,
        movie_id: MovieId,
        theater_id: TheaterId,
    ) -> Result<Arc<str>> {
        let inner = self.inner.read().map_err(poison_err)?;
        let room = inner.room(movie_id, theater_id)?;
        room.available_listing()
    }

    /// Books a set of seats in one room.
    ///
    /// This takes the **read** side of the store lock: bookings never
    /// block listing reads or bookings against other rooms, while still
    /// being excluded by structural mutations. The store read guard is
    /// held across the room's write lock, which keeps the room alive and
    /// serialises bookings against the same room.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownRoom`] if the theater is not assigned
    /// to the movie. Seat-level rejections are reported through
    /// [`BookingResult`], not as errors.
    pub fn book(
        &self,
        movie_id: MovieId,
        theater_id: TheaterId,
        seats: &HashSet<SeatId>,
    ) -> Result<BookingResult> {
        let inner = self.inner.read().map_err(poison_err)?;
        let room = inner.room(movie_id, theater_id)?;
        room.book(seats)
    }

    /// Returns every movie id in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn sorted_movie_ids(&self) -> Result<Vec<MovieId>> {
        let inner = self.inner.read().map_err(poison_err)?;
        Ok(inner
            .movies
            .sorted_ids()
            .into_iter()
            .map(MovieId::new)
            .collect())
    }

    /// Returns every theater id in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn sorted_theater_ids(&self) -> Result<Vec<TheaterId>> {
        let inner = self.inner.read().map_err(poison_err)?;
        Ok(inner
            .theaters
            .sorted_ids()
            .into_iter()
            .map(TheaterId::new)
            .collect())
    }

    /// Empties the store: both name tables, every room, every cache.
    ///
    /// The id counters keep running, so ids allocated after a clear do
    /// not collide with ids from before it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn clear(&self) -> Result<()> {
        let mut inner = self.inner.write().map_err(poison_err)?;

        inner.movies.clear();
        inner.theaters.clear();
        inner.rooms.clear();
        inner.theaters_per_movie.clear();

        Ok(())
    }
}
