// src/mapping/permissions.rs
//! Translation between repository permissions and CMIS basic permissions

use crate::repository::permissions::{ALL, READ, WRITE};
use cmis_model::models::cmis_model::{CMIS_ALL, CMIS_READ, CMIS_WRITE};
use serde::{Deserialize, Serialize};

/// How permissions are reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionFormat {
    /// Repository names plus their CMIS aliases
    RepositorySpecific,
    /// CMIS aliases only
    CmisBasic,
}

fn alias(permission: &str) -> Option<&'static str> {
    match permission {
        READ => Some(CMIS_READ),
        WRITE => Some(CMIS_WRITE),
        ALL => Some(CMIS_ALL),
        _ => None,
    }
}

fn push_full_control(reported: &mut Vec<(String, bool)>) {
    for alias in [CMIS_READ, CMIS_WRITE, CMIS_ALL] {
        reported.push((alias.to_string(), false));
    }
}

/// Permissions reported for `permission`, each flagged as direct or
/// inherited. `permissions` is what the permission implies; duplicates are
/// kept.
pub fn reported_permissions(
    permission: &str,
    permissions: &[String],
    has_full: bool,
    is_direct: bool,
    format: PermissionFormat,
) -> Vec<(String, bool)> {
    let mut reported = Vec::new();

    if has_full {
        push_full_control(&mut reported);
    }

    for implied in permissions {
        match implied.as_str() {
            READ => reported.push((CMIS_READ.to_string(), false)),
            WRITE => reported.push((CMIS_WRITE.to_string(), false)),
            ALL => push_full_control(&mut reported),
            _ => {}
        }
        if has_full {
            push_full_control(&mut reported);
        }
    }

    match (format, alias(permission)) {
        (PermissionFormat::RepositorySpecific, Some(alias)) => {
            reported.push((alias.to_string(), false));
            reported.push((permission.to_string(), is_direct));
        }
        (PermissionFormat::RepositorySpecific, None) => {
            reported.push((permission.to_string(), is_direct));
        }
        (PermissionFormat::CmisBasic, Some(alias)) => {
            reported.push((alias.to_string(), is_direct));
        }
        (PermissionFormat::CmisBasic, None) => {}
    }

    reported
}

/// Repository permission to store for a CMIS permission name
pub fn set_permission(permission: &str) -> String {
    match permission {
        CMIS_READ => READ.to_string(),
        CMIS_WRITE => WRITE.to_string(),
        CMIS_ALL => ALL.to_string(),
        other => other.to_string(),
    }
}
