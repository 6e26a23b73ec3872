// src/query/fragment.rs
//! Boolean query tree handed to the external query executor

use std::fmt;

/// Occurrence of a clause inside a boolean query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occur {
    Must,
    Should,
    MustNot,
}

impl Occur {
    fn marker(&self) -> &'static str {
        match self {
            Occur::Must => "+",
            Occur::Should => "",
            Occur::MustNot => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    pub occur: Occur,
    pub query: QueryFragment,
}

impl Clause {
    pub fn must(query: QueryFragment) -> Self {
        Self {
            occur: Occur::Must,
            query,
        }
    }

    pub fn should(query: QueryFragment) -> Self {
        Self {
            occur: Occur::Should,
            query,
        }
    }

    pub fn must_not(query: QueryFragment) -> Self {
        Self {
            occur: Occur::MustNot,
            query,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryFragment {
    MatchAll,
    MatchNone,
    Term {
        field: String,
        value: String,
    },
    Range {
        field: String,
        lower: String,
        upper: String,
        include_lower: bool,
        include_upper: bool,
    },
    /// `pattern` is already in backend wildcard syntax
    Wildcard {
        field: String,
        pattern: String,
    },
    IsNull {
        field: String,
    },
    IsNotNull {
        field: String,
    },
    Boolean(Vec<Clause>),
}

impl QueryFragment {
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn range(
        field: impl Into<String>,
        lower: impl Into<String>,
        upper: impl Into<String>,
        include_lower: bool,
        include_upper: bool,
    ) -> Self {
        Self::Range {
            field: field.into(),
            lower: lower.into(),
            upper: upper.into(),
            include_lower,
            include_upper,
        }
    }

    pub fn wildcard(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Wildcard {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    /// Everything except what `query` matches
    pub fn does_not_match(query: QueryFragment) -> Self {
        Self::Boolean(vec![
            Clause::must(QueryFragment::MatchAll),
            Clause::must_not(query),
        ])
    }

    /// Combine alternatives under set-membership rules: no alternative
    /// matches nothing (everything when negated), one is used as is, several
    /// are OR-ed (excluded one by one when negated)
    pub fn any_of(alternatives: Vec<QueryFragment>, not: bool) -> Self {
        match (alternatives.len(), not) {
            (0, false) => QueryFragment::MatchNone,
            (0, true) => QueryFragment::MatchAll,
            (1, false) => alternatives.into_iter().next().unwrap_or(QueryFragment::MatchNone),
            (_, false) => {
                QueryFragment::Boolean(alternatives.into_iter().map(Clause::should).collect())
            }
            (_, true) => {
                let mut clauses = vec![Clause::must(QueryFragment::MatchAll)];
                clauses.extend(alternatives.into_iter().map(Clause::must_not));
                QueryFragment::Boolean(clauses)
            }
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        match self {
            QueryFragment::Boolean(clauses) => clauses,
            _ => &[],
        }
    }
}

/// Escape characters that are special in the backend query syntax
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if SPECIAL_CHARACTERS.contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

const SPECIAL_CHARACTERS: &str = "+-&|!(){}[]^\"~*?:\\/ ";

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

impl fmt::Display for QueryFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryFragment::MatchAll => write!(f, "*:*"),
            QueryFragment::MatchNone => write!(f, "(-*:*)"),
            QueryFragment::Term { field, value } => write!(f, "{}:{}", escape(field), quote(value)),
            QueryFragment::Range {
                field,
                lower,
                upper,
                include_lower,
                include_upper,
            } => write!(
                f,
                "{}:{}{} TO {}{}",
                escape(field),
                if *include_lower { '[' } else { '{' },
                quote(lower),
                quote(upper),
                if *include_upper { ']' } else { '}' },
            ),
            QueryFragment::Wildcard { field, pattern } => write!(f, "{}:{}", escape(field), pattern),
            QueryFragment::IsNull { field } => write!(f, "ISNULL:{}", quote(field)),
            QueryFragment::IsNotNull { field } => write!(f, "ISNOTNULL:{}", quote(field)),
            QueryFragment::Boolean(clauses) => {
                write!(f, "(")?;
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}{}", clause.occur.marker(), clause.query)?;
                }
                write!(f, ")")
            }
        }
    }
}
