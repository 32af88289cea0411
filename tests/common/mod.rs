#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use axum_test::TestServer;
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tempfile::TempDir;

use movie_catalog::{
    routes::{create_router, AppState},
    services::{Catalog, ReviewStore},
};

/// One row of the `movies` table, stored as loosely typed text like the real dataset
#[derive(Clone, Debug)]
pub struct MovieRow {
    pub id: i64,
    pub name: &'static str,
    pub genre: &'static str,
    pub directors: &'static str,
    pub stars: &'static str,
    pub release_date: Option<&'static str>,
    pub runtime: &'static str,
    pub rating: &'static str,
    pub votes: &'static str,
    pub budget: Option<&'static str>,
    pub revenue: Option<&'static str>,
}

#[allow(clippy::too_many_arguments)]
fn row(
    id: i64,
    name: &'static str,
    genre: &'static str,
    directors: &'static str,
    stars: &'static str,
    release_date: &'static str,
    runtime: &'static str,
    rating: &'static str,
    votes: &'static str,
    budget: &'static str,
    revenue: &'static str,
) -> MovieRow {
    MovieRow {
        id,
        name,
        genre,
        directors,
        stars,
        release_date: Some(release_date),
        runtime,
        rating,
        votes,
        budget: Some(budget),
        revenue: Some(revenue),
    }
}

/// The shared test catalog
///
/// Ratings are all distinct. Row 8 has an unparseable date, row 9 a zero
/// budget, row 13 predates the default year bound.
pub fn standard_movies() -> Vec<MovieRow> {
    vec![
        row(1, "The Dark Knight", "Action, Crime, Drama", "Christopher Nolan", "Christian Bale, Heath Ledger", "07/18/2008", "152 min", "9.0", "2600000", "185000000", "1005000000"),
        row(2, "Inception", "Action, Sci-Fi, Thriller", "Christopher Nolan", "Leonardo DiCaprio, Tom Hardy", "07/16/2010", "148 min", "8.8", "2300000", "160000000", "836000000"),
        row(3, "Heat", "Crime, Thriller", "Michael Mann", "Al Pacino, Robert De Niro", "12/15/1995", "170 min", "8.3", "650000", "60000000", "187000000"),
        row(4, "The Godfather", "Crime, Drama", "Francis Ford Coppola", "Marlon Brando, Al Pacino", "03/24/1972", "175 min", "9.2", "1900000", "6000000", "250000000"),
        row(5, "Memento", "Mystery, Thriller", "Christopher Nolan", "Guy Pearce", "05/25/2001", "113 min", "8.4", "1200000", "9000000", "40000000"),
        row(6, "Mad Max: Fury Road", "Action, Adventure", "George Miller", "Tom Hardy, Charlize Theron", "05/15/2015", "120 min", "8.1", "1000000", "150000000", "380000000"),
        row(7, "Primer", "Drama, Sci-Fi, Thriller", "Shane Carruth", "Shane Carruth", "10/08/2004", "77 min", "6.9", "110000", "7000", "841000"),
        row(8, "Unknown Date Film", "Drama", "Jane Doe", "John Roe", "19xx", "95 min", "7.0", "500", "0", "1000"),
        row(9, "Zero Budget Doc", "Documentary", "Jane Doe", "Narrator", "06/01/2003", "88 min", "7.5", "2000", "0", "50000"),
        row(10, "Speed", "Action, Thriller", "Jan de Bont", "Keanu Reeves, Sandra Bullock", "06/10/1994", "116 min", "7.2", "380000", "30000000", "350000000"),
        row(11, "Die Hard", "Action", "John McTiernan", "Bruce Willis, Alan Rickman", "07/15/1988", "132 min", "8.2", "900000", "28000000", "140000000"),
        row(12, "Psycho", "Thriller", "Alfred Hitchcock", "Anthony Perkins, Janet Leigh", "09/08/1960", "109 min", "8.5", "700000", "806947", "32000000"),
        row(13, "Old Silent", "Drama", "Someone", "Somebody", "02/02/1899", "60 min", "6.0", "100", "1000", "2000"),
    ]
}

pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    _reviews_dir: TempDir,
}

/// Single-connection in-memory pool; every extra connection would see its own empty database.
pub async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

pub async fn seed(pool: &SqlitePool, movies: &[MovieRow]) {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS movies (
            "ID" INTEGER PRIMARY KEY,
            "Movie Name" TEXT,
            "Genre" TEXT,
            "Directors" TEXT,
            "Stars" TEXT,
            "release_date" TEXT,
            "Runtime" TEXT,
            "Rating" REAL,
            "Votes" TEXT,
            "budget" TEXT,
            "revenue" TEXT,
            "Plot" TEXT
        )"#,
    )
    .execute(pool)
    .await
    .unwrap();

    for movie in movies {
        sqlx::query(
            r#"INSERT INTO movies ("ID", "Movie Name", "Genre", "Directors", "Stars",
                "release_date", "Runtime", "Rating", "Votes", "budget", "revenue")
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(movie.id)
        .bind(movie.name)
        .bind(movie.genre)
        .bind(movie.directors)
        .bind(movie.stars)
        .bind(movie.release_date)
        .bind(movie.runtime)
        .bind(movie.rating)
        .bind(movie.votes)
        .bind(movie.budget)
        .bind(movie.revenue)
        .execute(pool)
        .await
        .unwrap();
    }
}

pub async fn spawn_app_with(movies: &[MovieRow]) -> TestApp {
    let pool = memory_pool().await;
    seed(&pool, movies).await;

    let reviews_dir = tempfile::tempdir().unwrap();
    let state = AppState {
        catalog: Catalog::new(pool.clone(), Duration::from_secs(5)),
        reviews: ReviewStore::open(reviews_dir.path().join("reviews.json"))
            .await
            .unwrap(),
        trailers: None,
    };

    TestApp {
        server: TestServer::new(create_router(Arc::new(state))).unwrap(),
        pool,
        _reviews_dir: reviews_dir,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(&standard_movies()).await
}

/// IDs of a JSON movie array, in order
pub fn ids(movies: &[Value]) -> Vec<i64> {
    movies
        .iter()
        .map(|m| m["ID"].as_i64().expect("movie without numeric ID"))
        .collect()
}
