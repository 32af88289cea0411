//! Derived values over the loosely typed movie columns.
//!
//! The dataset stores years, runtimes and money as free text, so every typed
//! value the catalog sorts or filters on is derived inside the SQL expression
//! at query time. Each expression is total: unparseable input yields a neutral
//! value (0) or NULL, never an error that would fail the whole query.
//!
//! Query parameters get the same lenient treatment on the Rust side.

/// Lenient numeric read of a stored column: thousands separators are dropped,
/// a leading numeric prefix is kept, anything else (including NULL) reads as 0.
macro_rules! numeric {
    ($column:literal) => {
        concat!("COALESCE(CAST(REPLACE(\"", $column, "\", ',', '') AS REAL), 0.0)")
    };
}

/// Release year: the last four characters of `release_date` when they are all
/// digits ("12/25/1999" -> 1999). NULL otherwise, which drops the row from any
/// year comparison and sorts it last.
pub const DERIVED_YEAR: &str = "(CASE WHEN SUBSTR(\"release_date\", -4) GLOB '[0-9][0-9][0-9][0-9]' \
     THEN CAST(SUBSTR(\"release_date\", -4) AS INTEGER) END)";

/// Runtime in minutes from "<n> min"; the leading integer wins, failure is 0.
pub const RUNTIME_MINUTES: &str = "COALESCE(CAST(\"Runtime\" AS INTEGER), 0)";

pub const RATING: &str = numeric!("Rating");

pub const VOTES: &str = numeric!("Votes");

/// `(revenue - budget) / budget`, NULL when the budget is zero or unknown
pub const PROFITABILITY_RATIO: &str = concat!(
    "((",
    numeric!("revenue"),
    " - ",
    numeric!("budget"),
    ") / NULLIF(",
    numeric!("budget"),
    ", 0))"
);

/// `((revenue / max(budget, 1)) * 0.4 + (votes / 100000) * 0.6) * rating`
///
/// The budget floor keeps zero-budget titles eligible instead of dividing by zero.
pub const SMART_SCORE: &str = concat!(
    "(((",
    numeric!("revenue"),
    " / MAX(",
    numeric!("budget"),
    ", 1.0)) * 0.4 + (",
    numeric!("Votes"),
    " / 100000.0) * 0.6) * ",
    numeric!("Rating"),
    ")"
);

/// Popularity times quality: `votes * rating`
pub const POPULARITY: &str = concat!("(", numeric!("Votes"), " * ", numeric!("Rating"), ")");

/// Parses the integer prefix of a query parameter
///
/// Leading whitespace and a sign are accepted and trailing text is ignored, so
/// "25abc" is 25. Returns `None` when no digits lead the value.
pub fn leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let value: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Parses an optional parameter, treating missing, unparseable and zero alike
pub fn nonzero_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(leading_int).filter(|v| *v != 0)
}

/// Trims a text parameter, `None` when nothing is left
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Builds a `LIKE` pattern matching `needle` anywhere, with wildcards escaped
///
/// Pair with [`LIKE_ESCAPE`] so `%` and `_` in user input match literally.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Escape clause matching [`contains_pattern`]
pub const LIKE_ESCAPE: &str = " ESCAPE '\\'";
