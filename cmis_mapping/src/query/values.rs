// src/query/values.rs
//! Canonical string forms of predicate operands

use crate::errors::{MappingError, MappingResult};
use chrono::{DateTime, SecondsFormat, Utc};
use cmis_model::logging::codes;
use cmis_model::{log_error, PropertyType, PropertyValue};

/// Render `value` as it is stored in the index for a property of
/// `property_type`. A variant the type cannot hold is an invalid argument.
pub fn canonical_string(
    property_id: &str,
    property_type: PropertyType,
    value: &PropertyValue,
) -> MappingResult<String> {
    let canonical = match (property_type, value) {
        (PropertyType::DateTime, PropertyValue::DateTime(dt)) => Some(format_datetime(dt)),
        (PropertyType::Integer, PropertyValue::Integer(i)) => Some(i.to_string()),
        (PropertyType::Decimal, PropertyValue::Decimal(d)) => Some(d.to_string()),
        (PropertyType::Decimal, PropertyValue::Integer(i)) => Some(i.to_string()),
        (PropertyType::Boolean, PropertyValue::Boolean(b)) => Some(b.to_string()),
        (PropertyType::Id, PropertyValue::NodeRef(node)) => Some(node.to_string()),
        (
            PropertyType::Id
            | PropertyType::String
            | PropertyType::Html
            | PropertyType::Uri,
            PropertyValue::String(s)
            | PropertyValue::Id(s)
            | PropertyValue::Uri(s)
            | PropertyValue::Html(s),
        ) => Some(s.clone()),
        _ => None,
    };

    canonical.ok_or_else(|| {
        log_error!(codes::predicate::INVALID_PREDICATE_VALUE, "Predicate value does not fit property type",
            "property" => property_id, "type" => property_type, "value" => value);
        MappingError::invalid_argument(format!(
            "value '{}' is not valid for {} property '{}'",
            value, property_type, property_id
        ))
    })
}

/// ISO-8601, millisecond precision, UTC
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse command-line text into a value of `property_type`
pub fn parse_value(property_type: PropertyType, text: &str) -> MappingResult<PropertyValue> {
    let invalid = || {
        MappingError::invalid_argument(format!("'{}' is not a valid {} value", text, property_type))
    };

    match property_type {
        PropertyType::Boolean => match text.to_ascii_lowercase().as_str() {
            "true" => Ok(PropertyValue::Boolean(true)),
            "false" => Ok(PropertyValue::Boolean(false)),
            _ => Err(invalid()),
        },
        PropertyType::Integer => text.parse().map(PropertyValue::Integer).map_err(|_| invalid()),
        PropertyType::Decimal => text.parse().map(PropertyValue::Decimal).map_err(|_| invalid()),
        PropertyType::DateTime => DateTime::parse_from_rfc3339(text)
            .map(|dt| PropertyValue::DateTime(dt.with_timezone(&Utc)))
            .map_err(|_| invalid()),
        PropertyType::Id => Ok(PropertyValue::Id(text.to_string())),
        PropertyType::Uri => Ok(PropertyValue::Uri(text.to_string())),
        PropertyType::Html => Ok(PropertyValue::Html(text.to_string())),
        PropertyType::String => Ok(PropertyValue::String(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    #[test]
    fn test_canonical_forms() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();
        assert_eq!(
            canonical_string("p", PropertyType::DateTime, &PropertyValue::DateTime(dt)).unwrap(),
            "2024-03-01T10:30:00.000Z"
        );
        assert_eq!(
            canonical_string("p", PropertyType::Integer, &PropertyValue::Integer(42)).unwrap(),
            "42"
        );
        assert_eq!(
            canonical_string("p", PropertyType::Decimal, &PropertyValue::Decimal(1.5)).unwrap(),
            "1.5"
        );
        assert_eq!(
            canonical_string("p", PropertyType::Boolean, &PropertyValue::Boolean(false)).unwrap(),
            "false"
        );
        assert_eq!(
            canonical_string("p", PropertyType::Id, &PropertyValue::string("abc")).unwrap(),
            "abc"
        );
    }

    #[test]
    fn test_mismatched_variant_rejected() {
        assert_matches!(
            canonical_string("cmis:name", PropertyType::String, &PropertyValue::Integer(1)),
            Err(MappingError::InvalidArgument { .. })
        );
        assert_matches!(
            canonical_string("p", PropertyType::Integer, &PropertyValue::string("1")),
            Err(MappingError::InvalidArgument { .. })
        );
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(
            parse_value(PropertyType::Integer, "12").unwrap(),
            PropertyValue::Integer(12)
        );
        assert_eq!(
            parse_value(PropertyType::Boolean, "TRUE").unwrap(),
            PropertyValue::Boolean(true)
        );
        assert_matches!(
            parse_value(PropertyType::DateTime, "yesterday"),
            Err(MappingError::InvalidArgument { .. })
        );
    }
}
