//! Statement logging.
//!
//! Emits the SQL about to be executed on the `jobly.sql` tracing target. Long
//! statements are cut at [`MAX_SQL_LENGTH`] bytes. Without the `tracing` feature
//! this compiles to nothing.

/// Statements longer than this many bytes are truncated in log output.
pub const MAX_SQL_LENGTH: usize = 200;

/// Log a statement before it runs.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub(crate) fn statement(tag: &str, sql: &str, param_count: usize) {
    #[cfg(feature = "tracing")]
    {
        let sql = sql.trim();
        let shown = match truncate_sql_bytes(sql, MAX_SQL_LENGTH) {
            cut if cut.len() < sql.len() => format!("{cut}..."),
            _ => sql.to_string(),
        };
        tracing::debug!(target: "jobly.sql", tag, param_count, sql = %shown);
    }
}

/// Cut `sql` to at most `max_bytes`, backing off to a char boundary.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_sql_is_untouched() {
        assert_eq!(truncate_sql_bytes("SELECT 1", 200), "SELECT 1");
    }

    #[test]
    fn long_sql_is_cut() {
        let sql = "x".repeat(300);
        assert_eq!(truncate_sql_bytes(&sql, 200).len(), 200);
    }

    #[test]
    fn cut_respects_char_boundary() {
        // 'é' is two bytes; cutting at 3 would split the second one.
        assert_eq!(truncate_sql_bytes("éé", 3), "é");
    }
}
