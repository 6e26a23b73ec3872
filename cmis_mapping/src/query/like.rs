// src/query/like.rs
//! SQL LIKE patterns to backend wildcard patterns

const SQL_ANY: char = '%';
const SQL_ONE: char = '_';
const SQL_ESCAPE: char = '\\';

/// Convert `%`/`_` to `*`/`?`. A backslash makes the next character
/// literal; literal characters that are special to the backend are escaped.
pub fn like_to_wildcard(pattern: &str) -> String {
    let mut converted = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match c {
            SQL_ESCAPE => match chars.next() {
                Some(literal) => push_literal(&mut converted, literal),
                None => push_literal(&mut converted, SQL_ESCAPE),
            },
            SQL_ANY => converted.push('*'),
            SQL_ONE => converted.push('?'),
            other => push_literal(&mut converted, other),
        }
    }
    converted
}

fn push_literal(out: &mut String, c: char) {
    out.push_str(&super::fragment::escape(&c.to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcards_converted() {
        assert_eq!(like_to_wildcard("ab%"), "ab*");
        assert_eq!(like_to_wildcard("a_c"), "a?c");
        assert_eq!(like_to_wildcard("%report_2024%"), "*report?2024*");
    }

    #[test]
    fn test_escaped_wildcards_are_literal() {
        assert_eq!(like_to_wildcard("100\\%"), "100%");
        assert_eq!(like_to_wildcard("a\\_b"), "a_b");
        assert_eq!(like_to_wildcard("a\\\\b"), "a\\\\b");
        assert_eq!(like_to_wildcard("trailing\\"), "trailing\\\\");
    }

    #[test]
    fn test_backend_specials_escaped() {
        assert_eq!(like_to_wildcard("a*b?"), "a\\*b\\?");
        assert_eq!(like_to_wildcard("x:y"), "x\\:y");
    }
}
