//! OpenSearch query string construction.

use crate::domain::models::ProductQuery;

/// Render a [`ProductQuery`] as a DHuS `q` parameter.
///
/// Clauses are joined with `AND`; a query without constraints matches
/// everything (`*`). The date range covers both calendar days fully.
pub fn format_query(query: &ProductQuery) -> String {
    let mut clauses = Vec::new();

    if let Some(dates) = &query.dates {
        clauses.push(format!(
            "beginPosition:[{}T00:00:00.000Z TO {}T23:59:59.999Z]",
            dates.start, dates.end
        ));
    }

    if let Some(platform) = &query.platform_name {
        clauses.push(format!("platformname:{}", quote_term(platform)));
    }

    if let Some(range) = &query.cloud_cover {
        clauses.push(format!(
            "cloudcoverpercentage:[{} TO {}]",
            range.min, range.max
        ));
    }

    if let Some(footprint) = &query.footprint {
        clauses.push(format!("footprint:\"Intersects({})\"", footprint.as_wkt()));
    }

    if clauses.is_empty() {
        "*".to_string()
    } else {
        clauses.join(" AND ")
    }
}

fn quote_term(term: &str) -> String {
    if term.chars().any(char::is_whitespace) {
        format!("\"{term}\"")
    } else {
        term.to_string()
    }
}
