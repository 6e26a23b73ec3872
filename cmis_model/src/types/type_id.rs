use super::scope::Scope;
use crate::models::cmis_model;
use crate::qname::QName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// External identity of a CMIS type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeId {
    scope: Scope,
    qname: QName,
    id: String,
    query_name: String,
}

impl TypeId {
    pub fn new(
        scope: Scope,
        qname: QName,
        id: impl Into<String>,
        query_name: impl Into<String>,
    ) -> Self {
        Self {
            scope,
            qname,
            id: id.into(),
            query_name: query_name.into(),
        }
    }

    /// Base type of `scope` (`cmis:document`, ...)
    pub fn base(scope: Scope) -> Self {
        Self::new(
            scope,
            scope.base_type_qname(),
            scope.base_type_id(),
            scope.base_type_id(),
        )
    }

    /// Common parent of documents and folders
    pub fn filesystem_object() -> Self {
        Self::new(
            Scope::Object,
            cmis_model::FILESYSTEM_OBJECT,
            "cmis:filesystemobject",
            "cmis:filesystemobject",
        )
    }

    /// The fixed, pre-registered ids
    pub fn sentinels() -> [TypeId; 6] {
        [
            Self::base(Scope::Object),
            Self::filesystem_object(),
            Self::base(Scope::Document),
            Self::base(Scope::Folder),
            Self::base(Scope::Relationship),
            Self::base(Scope::Policy),
        ]
    }

    /// Sentinel with external id `id`, ignoring case
    pub fn sentinel(id: &str) -> Option<TypeId> {
        Self::sentinels()
            .into_iter()
            .find(|sentinel| sentinel.id.eq_ignore_ascii_case(id))
    }

    /// Sentinel whose qualified name is `qname`
    pub fn sentinel_for_qname(qname: &QName) -> Option<TypeId> {
        Self::sentinels()
            .into_iter()
            .find(|sentinel| &sentinel.qname == qname)
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn qname(&self) -> &QName {
        &self.qname
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn query_name(&self) -> &str {
        &self.query_name
    }

    pub fn is_sentinel(&self) -> bool {
        Self::sentinel_for_qname(&self.qname).is_some()
    }

    /// Base type of this type's scope
    pub fn root_type_id(&self) -> TypeId {
        Self::base(self.scope)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
