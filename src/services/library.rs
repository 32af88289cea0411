use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite};

use crate::services::normalize::{
    contains_pattern, leading_int, non_blank, nonzero_int, DERIVED_YEAR, LIKE_ESCAPE,
    PROFITABILITY_RATIO, RATING, RUNTIME_MINUTES,
};

pub const DEFAULT_LIMIT: i64 = 50;
pub const DEFAULT_OFFSET: i64 = 0;
pub const DEFAULT_MIN_YEAR: i64 = 1900;

/// Base selection every catalog query starts from
pub(crate) const SELECT_MOVIES: &str = "SELECT * FROM movies WHERE 1=1";

/// Raw library query parameters, exactly as received
#[derive(Debug, Default, Deserialize)]
pub struct LibraryParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub sort: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub actor: Option<String>,
    pub director: Option<String>,
}

/// Orderings the library supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    RatingDesc,
    DateDesc,
    DurationDesc,
    SuccessDesc,
    SuccessAsc,
}

impl SortMode {
    /// Parses a sort parameter; unknown or missing values fall back to rating
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("date_desc") => SortMode::DateDesc,
            Some("duration_desc") => SortMode::DurationDesc,
            Some("success_desc") => SortMode::SuccessDesc,
            Some("success_asc") => SortMode::SuccessAsc,
            _ => SortMode::RatingDesc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::RatingDesc => "rating_desc",
            SortMode::DateDesc => "date_desc",
            SortMode::DurationDesc => "duration_desc",
            SortMode::SuccessDesc => "success_desc",
            SortMode::SuccessAsc => "success_asc",
        }
    }

    /// Sort key expression and direction
    ///
    /// Keys that can be NULL (year, profitability) always put NULL rows last,
    /// in both directions.
    fn ordering(&self) -> (&'static str, &'static str) {
        match self {
            SortMode::RatingDesc => (RATING, "DESC"),
            SortMode::DateDesc => (DERIVED_YEAR, "DESC NULLS LAST"),
            SortMode::DurationDesc => (RUNTIME_MINUTES, "DESC"),
            SortMode::SuccessDesc => (PROFITABILITY_RATIO, "DESC NULLS LAST"),
            SortMode::SuccessAsc => (PROFITABILITY_RATIO, "ASC NULLS LAST"),
        }
    }
}

/// Normalized library filter
///
/// Built from [`LibraryParams`] without ever failing: invalid input degrades
/// to the default for that parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryFilter {
    pub limit: i64,
    pub offset: i64,
    pub sort: SortMode,
    pub min_year: i64,
    pub genre: Option<String>,
    pub actor: Option<String>,
    pub director: Option<String>,
}

impl Default for LibraryFilter {
    fn default() -> Self {
        Self::from_params(&LibraryParams::default())
    }
}

impl LibraryFilter {
    pub fn from_params(params: &LibraryParams) -> Self {
        let limit = params
            .limit
            .as_deref()
            .and_then(leading_int)
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_LIMIT);
        let offset = params
            .offset
            .as_deref()
            .and_then(leading_int)
            .filter(|v| *v >= 0)
            .unwrap_or(DEFAULT_OFFSET);

        Self {
            limit,
            offset,
            sort: SortMode::parse(params.sort.as_deref()),
            min_year: nonzero_int(params.year.as_deref()).unwrap_or(DEFAULT_MIN_YEAR),
            genre: non_blank(params.genre.as_deref()).map(str::to_string),
            actor: non_blank(params.actor.as_deref()).map(str::to_string),
            director: non_blank(params.director.as_deref()).map(str::to_string),
        }
    }

    /// Builds the filtered, ordered and paginated query
    ///
    /// Predicates are joined with AND. The year bound is always present since
    /// its default is a harmless lower bound. `ID` breaks ties so consecutive
    /// pages never overlap.
    pub fn build(&self) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new(SELECT_MOVIES);

        builder
            .push(" AND ")
            .push(DERIVED_YEAR)
            .push(" >= ")
            .push_bind(self.min_year);

        let substring_filters = [
            ("\"Genre\"", &self.genre),
            ("\"Stars\"", &self.actor),
            ("\"Directors\"", &self.director),
        ];
        for (column, needle) in substring_filters {
            if let Some(needle) = needle {
                builder
                    .push(" AND ")
                    .push(column)
                    .push(" LIKE ")
                    .push_bind(contains_pattern(needle))
                    .push(LIKE_ESCAPE);
            }
        }

        let (key, direction) = self.sort.ordering();
        builder
            .push(" ORDER BY ")
            .push(key)
            .push(" ")
            .push(direction)
            .push(", \"ID\" ASC LIMIT ")
            .push_bind(self.limit)
            .push(" OFFSET ")
            .push_bind(self.offset);

        builder
    }
}
