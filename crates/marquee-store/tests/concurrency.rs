//! Concurrency tests for the booking store.
//!
//! The store is synchronous, so these tests drive it from plain threads:
//! bookings against distinct rooms in parallel, contended bookings against
//! one room, and structural writers racing readers.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use marquee_core::{MovieId, SeatId, TheaterId};
use marquee_store::{BookingResult, BookingStore};

fn names(prefix: &str, count: usize) -> HashSet<String> {
    (0..count).map(|idx| format!("{prefix} {idx}")).collect()
}

fn seats(indices: impl IntoIterator<Item = usize>) -> HashSet<SeatId> {
    indices.into_iter().map(SeatId::new).collect()
}

/// Builds a store with `movies × theaters` rooms, all seats available.
fn grid_store(movies: usize, theaters: usize) -> (Arc<BookingStore>, Vec<MovieId>, Vec<TheaterId>) {
    let store = Arc::new(BookingStore::new());
    let movie_ids = store.add_movies(names("Movie", movies)).unwrap();
    let theater_ids = store.add_theaters(names("Theater", theaters)).unwrap();
    let all_theaters: HashSet<TheaterId> = theater_ids.iter().copied().collect();
    for &movie_id in &movie_ids {
        store
            .assign_theaters_to_movie(movie_id, &all_theaters)
            .unwrap();
    }
    (store, movie_ids, theater_ids)
}

#[test]
fn distinct_rooms_book_in_parallel() {
    let (store, movie_ids, theater_ids) = grid_store(10, 10);

    // One thread per room, each booking a pattern derived from its index.
    thread::scope(|scope| {
        for (m_idx, &movie_id) in movie_ids.iter().enumerate() {
            for (t_idx, &theater_id) in theater_ids.iter().enumerate() {
                let store = Arc::clone(&store);
                scope.spawn(move || {
                    let wanted = seats((m_idx + t_idx) % 5..(m_idx + t_idx) % 5 + 3);
                    let result = store.book(movie_id, theater_id, &wanted).unwrap();
                    assert_eq!(result, BookingResult::Accepted);
                });
            }
        }
    });

    // Each room holds exactly its own booking.
    for (m_idx, &movie_id) in movie_ids.iter().enumerate() {
        for (t_idx, &theater_id) in theater_ids.iter().enumerate() {
            let start = (m_idx + t_idx) % 5;
            let booked: HashSet<usize> = (start..start + 3).collect();
            let listing = store.list_available_seats(movie_id, theater_id).unwrap();
            let available: HashSet<usize> = listing
                .trim_end()
                .split(',')
                .map(|s| s.parse().unwrap())
                .collect();
            for seat in 0..20 {
                assert_eq!(
                    available.contains(&seat),
                    !booked.contains(&seat),
                    "room ({movie_id},{theater_id}) seat {seat}"
                );
            }
        }
    }
}

#[test]
fn disjoint_bookings_on_one_room_all_land() {
    let (store, movie_ids, theater_ids) = grid_store(1, 1);
    let movie_id = movie_ids[0];
    let theater_id = theater_ids[0];

    // Four threads, five seats each, covering the whole room.
    thread::scope(|scope| {
        for chunk in 0..4 {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                let wanted = seats(chunk * 5..(chunk + 1) * 5);
                let result = store.book(movie_id, theater_id, &wanted).unwrap();
                assert_eq!(result, BookingResult::Accepted);
            });
        }
    });

    assert_eq!(
        &*store.list_available_seats(movie_id, theater_id).unwrap(),
        "\r\n"
    );
}

#[test]
fn contended_seat_has_exactly_one_winner() {
    let (store, movie_ids, theater_ids) = grid_store(1, 1);
    let movie_id = movie_ids[0];
    let theater_id = theater_ids[0];

    let results: Vec<BookingResult> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                scope.spawn(move || store.book(movie_id, theater_id, &seats(0..5)).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let accepted = results
        .iter()
        .filter(|r| matches!(r, BookingResult::Accepted))
        .count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, BookingResult::NotAvailable))
        .count();

    assert_eq!(accepted, 1);
    assert_eq!(rejected, 7);
    assert_eq!(
        &*store.list_available_seats(movie_id, theater_id).unwrap(),
        "5,6,7,8,9,10,11,12,13,14,15,16,17,18,19\r\n"
    );
}

#[test]
fn structural_writes_appear_atomic_to_readers() {
    let store = Arc::new(BookingStore::new());
    const BATCHES: usize = 50;
    const BATCH_SIZE: usize = 3;

    thread::scope(|scope| {
        let writer_store = Arc::clone(&store);
        scope.spawn(move || {
            for batch in 0..BATCHES {
                let titles: HashSet<String> = (0..BATCH_SIZE)
                    .map(|idx| format!("Batch {batch} movie {idx}"))
                    .collect();
                writer_store.add_movies(titles).unwrap();
            }
        });

        for _ in 0..4 {
            let reader_store = Arc::clone(&store);
            scope.spawn(move || {
                for _ in 0..200 {
                    let listing = reader_store.list_movies().unwrap();
                    let lines = listing.matches("\r\n").count();
                    // Batches land whole or not at all.
                    assert_eq!(lines % BATCH_SIZE, 0, "partial batch visible: {lines} lines");
                }
            });
        }
    });

    assert_eq!(
        store.list_movies().unwrap().matches("\r\n").count(),
        BATCHES * BATCH_SIZE
    );
}

#[test]
fn bookers_and_readers_interleave() {
    let (store, movie_ids, theater_ids) = grid_store(4, 4);

    thread::scope(|scope| {
        for &movie_id in &movie_ids {
            for &theater_id in &theater_ids {
                let store = Arc::clone(&store);
                scope.spawn(move || {
                    for seat in 0..20 {
                        let result = store
                            .book(movie_id, theater_id, &seats([seat]))
                            .unwrap();
                        assert_eq!(result, BookingResult::Accepted);
                    }
                });
            }
        }

        for &movie_id in &movie_ids {
            let store = Arc::clone(&store);
            let theater_id = theater_ids[0];
            scope.spawn(move || {
                for _ in 0..100 {
                    // Listings observed mid-flight are internally
                    // consistent snapshots; parsing must never fail.
                    let listing = store.list_available_seats(movie_id, theater_id).unwrap();
                    for token in listing.trim_end().split(',').filter(|t| !t.is_empty()) {
                        let seat: usize = token.parse().unwrap();
                        assert!(seat < 20);
                    }
                    let _ = store.list_theaters_for_movie(movie_id).unwrap();
                }
            });
        }
    });

    for &movie_id in &movie_ids {
        for &theater_id in &theater_ids {
            assert_eq!(
                &*store.list_available_seats(movie_id, theater_id).unwrap(),
                "\r\n"
            );
        }
    }
}
