use crate::models::cmis_model;
use crate::qname::QName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of a CMIS object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scope {
    Object,
    Document,
    Folder,
    Relationship,
    Policy,
}

impl Scope {
    pub const ALL: [Scope; 5] = [
        Scope::Object,
        Scope::Document,
        Scope::Folder,
        Scope::Relationship,
        Scope::Policy,
    ];

    /// Discriminator prefixing external type ids; `Object` has none
    pub fn label(&self) -> Option<char> {
        match self {
            Scope::Object => None,
            Scope::Document => Some('D'),
            Scope::Folder => Some('F'),
            Scope::Relationship => Some('R'),
            Scope::Policy => Some('P'),
        }
    }

    pub fn from_label(label: char) -> Option<Self> {
        match label {
            'D' => Some(Scope::Document),
            'F' => Some(Scope::Folder),
            'R' => Some(Scope::Relationship),
            'P' => Some(Scope::Policy),
            _ => None,
        }
    }

    /// External id of the scope's base type
    pub fn base_type_id(&self) -> &'static str {
        match self {
            Scope::Object => "cmis:object",
            Scope::Document => "cmis:document",
            Scope::Folder => "cmis:folder",
            Scope::Relationship => "cmis:relationship",
            Scope::Policy => "cmis:policy",
        }
    }

    /// Qualified name of the scope's base type
    pub fn base_type_qname(&self) -> QName {
        match self {
            Scope::Object => cmis_model::OBJECT,
            Scope::Document => cmis_model::DOCUMENT,
            Scope::Folder => cmis_model::FOLDER,
            Scope::Relationship => cmis_model::RELATIONSHIP,
            Scope::Policy => cmis_model::POLICY,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Object => "object",
            Scope::Document => "document",
            Scope::Folder => "folder",
            Scope::Relationship => "relationship",
            Scope::Policy => "policy",
        }
    }

    /// Parse a scope name or base type id, ignoring case
    pub fn parse(value: &str) -> Option<Self> {
        let lowered = value.to_ascii_lowercase();
        let name = lowered.strip_prefix("cmis:").unwrap_or(&lowered);
        Scope::ALL.into_iter().find(|scope| scope.as_str() == name)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for scope in Scope::ALL {
            if let Some(label) = scope.label() {
                assert_eq!(Scope::from_label(label), Some(scope));
            }
        }
        assert_eq!(Scope::Object.label(), None);
        assert_eq!(Scope::from_label('X'), None);
        assert_eq!(Scope::from_label('d'), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Scope::parse("Document"), Some(Scope::Document));
        assert_eq!(Scope::parse("cmis:FOLDER"), Some(Scope::Folder));
        assert_eq!(Scope::parse("widget"), None);
    }
}
