//! Movie catalog backend: library filtering, recommendation rows, reviews and
//! trailer lookup over a read-only SQLite movie dataset.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
