use std::{future::Future, time::Duration};

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieId},
    services::{
        library::{LibraryFilter, SELECT_MOVIES},
        normalize::{contains_pattern, LIKE_ESCAPE},
        recommendations::Recommendation,
    },
};

/// Most titles a name search returns
pub const SEARCH_LIMIT: i64 = 10;

/// Read-only access to the movie dataset
///
/// Every query runs under `query_timeout`; a store that does not answer in
/// time fails the request instead of holding it open.
#[derive(Clone)]
pub struct Catalog {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl Catalog {
    pub fn new(pool: SqlitePool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Filtered, sorted and paginated library listing
    #[instrument(skip(self), fields(sort = filter.sort.as_str()))]
    pub async fn library(&self, filter: &LibraryFilter) -> AppResult<Vec<Movie>> {
        let movies = self.fetch_all(filter.build()).await?;
        tracing::debug!(count = movies.len(), "Library query returned");
        Ok(movies)
    }

    /// Ranked recommendation row, never containing the `exclude` movie
    #[instrument(skip(self), fields(kind = recommendation.kind()))]
    pub async fn recommend(
        &self,
        recommendation: &Recommendation,
        exclude: Option<&str>,
    ) -> AppResult<Vec<Movie>> {
        self.fetch_all(recommendation.build(exclude)).await
    }

    /// Case-insensitive substring search on the title
    pub async fn search_by_name(&self, query: &str) -> AppResult<Vec<Movie>> {
        let mut builder = QueryBuilder::new(SELECT_MOVIES);
        builder
            .push(" AND \"Movie Name\" LIKE ")
            .push_bind(contains_pattern(query))
            .push(LIKE_ESCAPE)
            .push(" ORDER BY \"ID\" ASC LIMIT ")
            .push_bind(SEARCH_LIMIT);

        self.fetch_all(builder).await
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Movie>> {
        let mut builder = QueryBuilder::new(SELECT_MOVIES);
        builder
            .push(" AND CAST(\"ID\" AS TEXT) = ")
            .push_bind(id.to_string())
            .push(" LIMIT 1");

        let query = builder.build_query_as::<Movie>();
        self.with_timeout(query.fetch_optional(&self.pool)).await
    }

    /// Movies whose ID is in `ids`, in dataset order
    pub async fn find_many(&self, ids: &[MovieId]) -> AppResult<Vec<Movie>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::new(SELECT_MOVIES);
        builder.push(" AND CAST(\"ID\" AS TEXT) IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");
        builder.push(" ORDER BY \"ID\" ASC");

        self.fetch_all(builder).await
    }

    async fn fetch_all(&self, mut builder: QueryBuilder<'static, Sqlite>) -> AppResult<Vec<Movie>> {
        let query = builder.build_query_as::<Movie>();
        self.with_timeout(query.fetch_all(&self.pool)).await
    }

    async fn with_timeout<T, F>(&self, query: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(AppError::Timeout(self.query_timeout)),
        }
    }
}
