use sqlx::{QueryBuilder, Sqlite};

use crate::services::library::SELECT_MOVIES;
use crate::services::normalize::{
    contains_pattern, non_blank, nonzero_int, DERIVED_YEAR, LIKE_ESCAPE, POPULARITY, SMART_SCORE,
};

/// Most titles any recommendation row returns
pub const RECOMMENDATION_LIMIT: i64 = 20;

/// Years on either side of the seed year covered by the era row
pub const ERA_RADIUS: i64 = 5;

/// A "more like this" row for a seed movie
///
/// Each variant is built from the raw request value; an empty or invalid key
/// yields no recommendation at all rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// Same primary genre, ranked by smart score
    Genre(String),
    /// Shares a star, ranked by votes x rating
    Actor(String),
    /// Shares a director, ranked by votes x rating
    Director(String),
    /// Released within [`ERA_RADIUS`] years of the seed, ranked by votes x rating
    Era(i64),
}

impl Recommendation {
    /// Matches on the first comma-separated genre only
    ///
    /// A seed tagged "Action, Thriller" recommends Action titles. The library
    /// genre filter, by contrast, matches anywhere in the list.
    pub fn by_genre(raw: Option<&str>) -> Option<Self> {
        let first = raw?.split(',').next()?;
        non_blank(Some(first)).map(|g| Recommendation::Genre(g.to_string()))
    }

    pub fn by_actor(raw: Option<&str>) -> Option<Self> {
        non_blank(raw).map(|name| Recommendation::Actor(name.to_string()))
    }

    pub fn by_director(raw: Option<&str>) -> Option<Self> {
        non_blank(raw).map(|name| Recommendation::Director(name.to_string()))
    }

    pub fn by_era(raw: Option<&str>) -> Option<Self> {
        nonzero_int(raw).map(Recommendation::Era)
    }

    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Recommendation::Genre(_) => "genre",
            Recommendation::Actor(_) => "actor",
            Recommendation::Director(_) => "director",
            Recommendation::Era(_) => "era",
        }
    }

    /// Builds the ranked query, leaving out the seed movie when `exclude` is set
    pub fn build(&self, exclude: Option<&str>) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new(SELECT_MOVIES);

        let score = match self {
            Recommendation::Genre(genre) => {
                builder
                    .push(" AND \"Genre\" LIKE ")
                    .push_bind(contains_pattern(genre))
                    .push(LIKE_ESCAPE);
                SMART_SCORE
            }
            Recommendation::Actor(name) => {
                builder
                    .push(" AND \"Stars\" LIKE ")
                    .push_bind(contains_pattern(name))
                    .push(LIKE_ESCAPE);
                POPULARITY
            }
            Recommendation::Director(name) => {
                builder
                    .push(" AND \"Directors\" LIKE ")
                    .push_bind(contains_pattern(name))
                    .push(LIKE_ESCAPE);
                POPULARITY
            }
            Recommendation::Era(year) => {
                builder
                    .push(" AND ")
                    .push(DERIVED_YEAR)
                    .push(" BETWEEN ")
                    .push_bind(year.saturating_sub(ERA_RADIUS))
                    .push(" AND ")
                    .push_bind(year.saturating_add(ERA_RADIUS));
                POPULARITY
            }
        };

        if let Some(seed) = exclude.map(str::trim).filter(|s| !s.is_empty()) {
            builder
                .push(" AND CAST(\"ID\" AS TEXT) != ")
                .push_bind(seed.to_string());
        }

        builder
            .push(" ORDER BY ")
            .push(score)
            .push(" DESC, \"ID\" ASC LIMIT ")
            .push_bind(RECOMMENDATION_LIMIT);

        builder
    }
}
