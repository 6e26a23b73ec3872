use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Allowable actions, declared in CMIS schema order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    CanDeleteObject,
    CanUpdateProperties,
    CanGetFolderTree,
    CanGetProperties,
    CanGetObjectRelationships,
    CanGetObjectParents,
    CanGetFolderParent,
    CanGetDescendants,
    CanMoveObject,
    CanDeleteContentStream,
    CanCheckOut,
    CanCancelCheckOut,
    CanCheckIn,
    CanSetContentStream,
    CanGetAllVersions,
    CanAddObjectToFolder,
    CanRemoveObjectFromFolder,
    CanGetContentStream,
    CanApplyPolicy,
    CanGetAppliedPolicies,
    CanRemovePolicy,
    CanGetChildren,
    CanCreateDocument,
    CanCreateFolder,
    CanCreateRelationship,
    CanDeleteTree,
    CanGetRenditions,
    CanGetAcl,
    CanApplyAcl,
}

impl Action {
    pub const ALL: [Action; 29] = [
        Action::CanDeleteObject,
        Action::CanUpdateProperties,
        Action::CanGetFolderTree,
        Action::CanGetProperties,
        Action::CanGetObjectRelationships,
        Action::CanGetObjectParents,
        Action::CanGetFolderParent,
        Action::CanGetDescendants,
        Action::CanMoveObject,
        Action::CanDeleteContentStream,
        Action::CanCheckOut,
        Action::CanCancelCheckOut,
        Action::CanCheckIn,
        Action::CanSetContentStream,
        Action::CanGetAllVersions,
        Action::CanAddObjectToFolder,
        Action::CanRemoveObjectFromFolder,
        Action::CanGetContentStream,
        Action::CanApplyPolicy,
        Action::CanGetAppliedPolicies,
        Action::CanRemovePolicy,
        Action::CanGetChildren,
        Action::CanCreateDocument,
        Action::CanCreateFolder,
        Action::CanCreateRelationship,
        Action::CanDeleteTree,
        Action::CanGetRenditions,
        Action::CanGetAcl,
        Action::CanApplyAcl,
    ];

    /// Name used in the CMIS schema
    pub fn value(&self) -> &'static str {
        match self {
            Action::CanDeleteObject => "canDeleteObject",
            Action::CanUpdateProperties => "canUpdateProperties",
            Action::CanGetFolderTree => "canGetFolderTree",
            Action::CanGetProperties => "canGetProperties",
            Action::CanGetObjectRelationships => "canGetObjectRelationships",
            Action::CanGetObjectParents => "canGetObjectParents",
            Action::CanGetFolderParent => "canGetFolderParent",
            Action::CanGetDescendants => "canGetDescendants",
            Action::CanMoveObject => "canMoveObject",
            Action::CanDeleteContentStream => "canDeleteContentStream",
            Action::CanCheckOut => "canCheckOut",
            Action::CanCancelCheckOut => "canCancelCheckOut",
            Action::CanCheckIn => "canCheckIn",
            Action::CanSetContentStream => "canSetContentStream",
            Action::CanGetAllVersions => "canGetAllVersions",
            Action::CanAddObjectToFolder => "canAddObjectToFolder",
            Action::CanRemoveObjectFromFolder => "canRemoveObjectFromFolder",
            Action::CanGetContentStream => "canGetContentStream",
            Action::CanApplyPolicy => "canApplyPolicy",
            Action::CanGetAppliedPolicies => "canGetAppliedPolicies",
            Action::CanRemovePolicy => "canRemovePolicy",
            Action::CanGetChildren => "canGetChildren",
            Action::CanCreateDocument => "canCreateDocument",
            Action::CanCreateFolder => "canCreateFolder",
            Action::CanCreateRelationship => "canCreateRelationship",
            Action::CanDeleteTree => "canDeleteTree",
            Action::CanGetRenditions => "canGetRenditions",
            Action::CanGetAcl => "canGetACL",
            Action::CanApplyAcl => "canApplyACL",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.value().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown action '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_order_matches_declaration() {
        let mut sorted = Action::ALL;
        sorted.sort();
        assert_eq!(sorted, Action::ALL);
        assert_eq!(Action::ALL[0].value(), "canDeleteObject");
        assert_eq!(Action::ALL[28].value(), "canApplyACL");
    }

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!("canGetAcl".parse::<Action>(), Ok(Action::CanGetAcl));
        assert_eq!("CANCHECKOUT".parse::<Action>(), Ok(Action::CanCheckOut));
        assert!("canFly".parse::<Action>().is_err());
    }
}
