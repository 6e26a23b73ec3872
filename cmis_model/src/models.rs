// src/models.rs
//! Well-known namespaces and names of the content, system, dictionary and
//! CMIS models

use crate::qname::QName;

/// Namespaces registered by [`crate::NamespaceRegistry::with_standard_namespaces`]
pub const STANDARD_NAMESPACES: &[(&str, &str)] = &[
    (content_model::PREFIX, content_model::URI),
    (system_model::PREFIX, system_model::URI),
    (data_types::PREFIX, data_types::URI),
    (cmis_model::PREFIX, cmis_model::URI),
    (cmis_model::EXT_PREFIX, cmis_model::EXT_URI),
    (cmis_model::ALFRESCO_PREFIX, cmis_model::ALFRESCO_URI),
];

/// Content model (`cm:`)
pub mod content_model {
    use super::QName;

    pub const URI: &str = "http://www.alfresco.org/model/content/1.0";
    pub const PREFIX: &str = "cm";

    pub const TYPE_CMOBJECT: QName = QName::from_static(URI, "cmobject");
    pub const TYPE_CONTENT: QName = QName::from_static(URI, "content");
    pub const TYPE_FOLDER: QName = QName::from_static(URI, "folder");

    pub const ASPECT_VERSIONABLE: QName = QName::from_static(URI, "versionable");
    pub const ASPECT_AUDITABLE: QName = QName::from_static(URI, "auditable");
    pub const ASPECT_TITLED: QName = QName::from_static(URI, "titled");
    pub const ASPECT_WORKING_COPY: QName = QName::from_static(URI, "workingcopy");
    pub const ASPECT_CHECKED_OUT: QName = QName::from_static(URI, "checkedOut");
    pub const ASPECT_COPIED_FROM: QName = QName::from_static(URI, "copiedfrom");

    pub const PROP_NAME: QName = QName::from_static(URI, "name");
    pub const PROP_TITLE: QName = QName::from_static(URI, "title");
    pub const PROP_DESCRIPTION: QName = QName::from_static(URI, "description");
    pub const PROP_CREATOR: QName = QName::from_static(URI, "creator");
    pub const PROP_CREATED: QName = QName::from_static(URI, "created");
    pub const PROP_MODIFIER: QName = QName::from_static(URI, "modifier");
    pub const PROP_MODIFIED: QName = QName::from_static(URI, "modified");
    pub const PROP_CONTENT: QName = QName::from_static(URI, "content");
    pub const PROP_VERSION_LABEL: QName = QName::from_static(URI, "versionLabel");
    pub const PROP_WORKING_COPY_OWNER: QName = QName::from_static(URI, "workingCopyOwner");

    pub const ASSOC_CONTAINS: QName = QName::from_static(URI, "contains");
    pub const ASSOC_ORIGINAL: QName = QName::from_static(URI, "original");
    pub const ASSOC_WORKING_COPY_LINK: QName = QName::from_static(URI, "workingcopylink");
}

/// System model (`sys:`)
pub mod system_model {
    use super::QName;

    pub const URI: &str = "http://www.alfresco.org/model/system/1.0";
    pub const PREFIX: &str = "sys";

    pub const TYPE_BASE: QName = QName::from_static(URI, "base");
    pub const TYPE_STORE_ROOT: QName = QName::from_static(URI, "store_root");
    pub const ASPECT_REFERENCEABLE: QName = QName::from_static(URI, "referenceable");
    pub const ASSOC_CHILDREN: QName = QName::from_static(URI, "children");
}

/// Dictionary data types (`d:`)
pub mod data_types {
    use super::QName;

    pub const URI: &str = "http://www.alfresco.org/model/dictionary/1.0";
    pub const PREFIX: &str = "d";

    pub const ANY: QName = QName::from_static(URI, "any");
    pub const ASSOC_REF: QName = QName::from_static(URI, "assocref");
    pub const BOOLEAN: QName = QName::from_static(URI, "boolean");
    pub const CATEGORY: QName = QName::from_static(URI, "category");
    pub const CHILD_ASSOC_REF: QName = QName::from_static(URI, "childassocref");
    pub const CONTENT: QName = QName::from_static(URI, "content");
    pub const DATE: QName = QName::from_static(URI, "date");
    pub const DATETIME: QName = QName::from_static(URI, "datetime");
    pub const DOUBLE: QName = QName::from_static(URI, "double");
    pub const FLOAT: QName = QName::from_static(URI, "float");
    pub const INT: QName = QName::from_static(URI, "int");
    pub const LOCALE: QName = QName::from_static(URI, "locale");
    pub const LONG: QName = QName::from_static(URI, "long");
    pub const MLTEXT: QName = QName::from_static(URI, "mltext");
    pub const NODE_REF: QName = QName::from_static(URI, "noderef");
    pub const PATH: QName = QName::from_static(URI, "path");
    pub const PERIOD: QName = QName::from_static(URI, "period");
    pub const QNAME: QName = QName::from_static(URI, "qname");
    pub const TEXT: QName = QName::from_static(URI, "text");
}

/// CMIS model (`cmis:`), its extension (`cmisext:`) and repository
/// specific properties (`alfcmis:`)
pub mod cmis_model {
    use super::QName;

    pub const URI: &str = "http://www.alfresco.org/model/cmis/1.0/cs01";
    pub const PREFIX: &str = "cmis";
    pub const EXT_URI: &str = "http://www.alfresco.org/model/cmis/1.0/cs01ext";
    pub const EXT_PREFIX: &str = "cmisext";
    pub const ALFRESCO_URI: &str = "http://www.alfresco.org/model/cmis/1.0/alfcmis";
    pub const ALFRESCO_PREFIX: &str = "alfcmis";

    pub const DATATYPE_ID: QName = QName::from_static(URI, "id");
    pub const DATATYPE_URI: QName = QName::from_static(URI, "uri");
    pub const DATATYPE_XML: QName = QName::from_static(URI, "xml");
    pub const DATATYPE_HTML: QName = QName::from_static(URI, "html");

    pub const OBJECT: QName = QName::from_static(EXT_URI, "object");
    pub const FILESYSTEM_OBJECT: QName = QName::from_static(URI, "filesystemobject");
    pub const DOCUMENT: QName = QName::from_static(URI, "document");
    pub const FOLDER: QName = QName::from_static(URI, "folder");
    pub const RELATIONSHIP: QName = QName::from_static(URI, "relationship");
    pub const POLICY: QName = QName::from_static(URI, "policy");
    pub const ASPECTS: QName = QName::from_static(EXT_URI, "aspects");

    /// Basic permissions
    pub const CMIS_READ: &str = "cmis:read";
    pub const CMIS_WRITE: &str = "cmis:write";
    pub const CMIS_ALL: &str = "cmis:all";
}

/// External ids of the CMIS properties the mapping service knows about
pub mod property_ids {
    pub const OBJECT_ID: &str = "cmis:objectId";
    pub const NODE_REF: &str = "alfcmis:nodeRef";
    pub const OBJECT_TYPE_ID: &str = "cmis:objectTypeId";
    pub const BASE_TYPE_ID: &str = "cmis:baseTypeId";
    pub const CREATED_BY: &str = "cmis:createdBy";
    pub const CREATION_DATE: &str = "cmis:creationDate";
    pub const LAST_MODIFIED_BY: &str = "cmis:lastModifiedBy";
    pub const LAST_MODIFICATION_DATE: &str = "cmis:lastModificationDate";
    pub const CHANGE_TOKEN: &str = "cmis:changeToken";
    pub const NAME: &str = "cmis:name";
    pub const IS_IMMUTABLE: &str = "cmis:isImmutable";
    pub const IS_LATEST_VERSION: &str = "cmis:isLatestVersion";
    pub const IS_MAJOR_VERSION: &str = "cmis:isMajorVersion";
    pub const IS_LATEST_MAJOR_VERSION: &str = "cmis:isLatestMajorVersion";
    pub const VERSION_LABEL: &str = "cmis:versionLabel";
    pub const VERSION_SERIES_ID: &str = "cmis:versionSeriesId";
    pub const IS_VERSION_SERIES_CHECKED_OUT: &str = "cmis:isVersionSeriesCheckedOut";
    pub const VERSION_SERIES_CHECKED_OUT_BY: &str = "cmis:versionSeriesCheckedOutBy";
    pub const VERSION_SERIES_CHECKED_OUT_ID: &str = "cmis:versionSeriesCheckedOutId";
    pub const CHECKIN_COMMENT: &str = "cmis:checkinComment";
    pub const CONTENT_STREAM_LENGTH: &str = "cmis:contentStreamLength";
    pub const CONTENT_STREAM_MIME_TYPE: &str = "cmis:contentStreamMimeType";
    pub const CONTENT_STREAM_ID: &str = "cmis:contentStreamId";
    pub const CONTENT_STREAM_FILE_NAME: &str = "cmis:contentStreamFileName";
    pub const PARENT_ID: &str = "cmis:parentId";
    pub const PATH: &str = "cmis:path";
    pub const ALLOWED_CHILD_OBJECT_TYPE_IDS: &str = "cmis:allowedChildObjectTypeIds";
    pub const SOURCE_ID: &str = "cmis:sourceId";
    pub const TARGET_ID: &str = "cmis:targetId";
}
