// src/query/context.rs
//! Settings shared by every predicate compilation

use cmis_model::config::{constants::query, MappingPreferences, RangeSentinels};
use cmis_model::PropertyType;
use std::collections::HashSet;

/// Range sentinels, sort locale and the set of indexed field variants
#[derive(Debug, Clone, PartialEq)]
pub struct QueryContext {
    range: RangeSentinels,
    sort_locale: String,
    indexed_fields: HashSet<String>,
}

impl QueryContext {
    pub fn new(range: RangeSentinels, sort_locale: impl Into<String>) -> Self {
        Self {
            range,
            sort_locale: sort_locale.into(),
            indexed_fields: HashSet::new(),
        }
    }

    pub fn from_preferences(preferences: &MappingPreferences) -> Self {
        Self::new(preferences.range.clone(), preferences.sort_locale.clone())
    }

    /// Declare a field variant (e.g. `@cm:name.en`) as present in the index
    pub fn with_indexed_field(mut self, field: impl Into<String>) -> Self {
        self.indexed_fields.insert(field.into());
        self
    }

    pub fn is_indexed(&self, field: &str) -> bool {
        self.indexed_fields.contains(field)
    }

    pub fn sort_locale(&self) -> &str {
        &self.sort_locale
    }

    pub fn range(&self) -> &RangeSentinels {
        &self.range
    }

    /// Lower open bound for a property type
    pub fn lower_sentinel(&self, property_type: PropertyType) -> &str {
        if property_type.is_numeric_or_date() {
            &self.range.numeric_min
        } else {
            &self.range.string_min
        }
    }

    /// Upper open bound for a property type
    pub fn upper_sentinel(&self, property_type: PropertyType) -> &str {
        if property_type.is_numeric_or_date() {
            &self.range.numeric_max
        } else {
            &self.range.string_max
        }
    }

    /// Sort variant of a text field: `<field>.no_locale` if indexed, else
    /// the indexed `<field>.<locale>` whose locale is the longest prefix of
    /// the sort locale, else the field itself
    pub fn text_sort_field(&self, field: &str) -> String {
        let unlocalised = format!("{}.{}", field, query::NO_LOCALE_SUFFIX);
        if self.is_indexed(&unlocalised) {
            return unlocalised;
        }

        let mut locale = self.sort_locale.as_str();
        while !locale.is_empty() {
            let candidate = format!("{}.{}", field, locale);
            if self.is_indexed(&candidate) {
                return candidate;
            }
            locale = match locale.rfind('_') {
                Some(idx) => &locale[..idx],
                None => "",
            };
        }
        field.to_string()
    }
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::from_preferences(&MappingPreferences::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(locale: &str) -> QueryContext {
        QueryContext::new(RangeSentinels::default(), locale)
    }

    #[test]
    fn test_sentinels_follow_property_type() {
        let ctx = context("en");
        assert_eq!(ctx.lower_sentinel(PropertyType::Integer), "MIN");
        assert_eq!(ctx.upper_sentinel(PropertyType::DateTime), "MAX");
        assert_eq!(ctx.lower_sentinel(PropertyType::String), "\u{0}");
        assert_eq!(ctx.upper_sentinel(PropertyType::Id), "\u{FFFF}");
    }

    #[test]
    fn test_sort_field_prefers_no_locale() {
        let ctx = context("en_GB")
            .with_indexed_field("@cm:name.no_locale")
            .with_indexed_field("@cm:name.en_GB");
        assert_eq!(ctx.text_sort_field("@cm:name"), "@cm:name.no_locale");
    }

    #[test]
    fn test_sort_field_longest_locale_prefix() {
        let ctx = context("en_GB_oxford")
            .with_indexed_field("@cm:name.en")
            .with_indexed_field("@cm:name.en_GB");
        assert_eq!(ctx.text_sort_field("@cm:name"), "@cm:name.en_GB");

        let ctx = context("fr_FR").with_indexed_field("@cm:name.en");
        assert_eq!(ctx.text_sort_field("@cm:name"), "@cm:name");
    }
}
