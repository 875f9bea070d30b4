//! Reference lists used to populate filter controls.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which lookup list to fetch from `GET /lookups/{kind}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Inspectors,
    Sites,
    Methods,
    StatusTypes,
}

impl LookupKind {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Inspectors => "inspectors",
            Self::Sites => "sites",
            Self::Methods => "methods",
            Self::StatusTypes => "status-types",
        }
    }
}

/// An inspector record. Only `name` is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspector {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A site record. Only `site_code` is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub site_code: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Site {
    /// Label shown in the site dropdown.
    pub fn label(&self) -> String {
        format!("Site {}", self.site_code)
    }
}

/// All lookup lists, fetched together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupData {
    pub inspectors: Vec<Inspector>,
    pub sites: Vec<Site>,
    /// Methods are passed through unchanged; their shape is backend-defined.
    pub methods: Vec<Value>,
    pub status_types: Vec<Value>,
}

impl LookupData {
    pub fn inspector_names(&self) -> Vec<&str> {
        self.inspectors.iter().map(|i| i.name.as_str()).collect()
    }

    pub fn site_codes(&self) -> Vec<&str> {
        self.sites.iter().map(|s| s.site_code.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_keep_extra_fields() {
        let site: Site = serde_json::from_value(serde_json::json!({
            "site_code": "2901",
            "site_name": "North"
        }))
        .unwrap();
        assert_eq!(site.label(), "Site 2901");
        assert_eq!(site.extra.get("site_name"), Some(&Value::from("North")));

        assert!(serde_json::from_value::<Inspector>(serde_json::json!({ "id": 1 })).is_err());
    }

    #[test]
    fn test_lookup_paths() {
        assert_eq!(LookupKind::StatusTypes.path(), "status-types");
        assert_eq!(LookupKind::Inspectors.path(), "inspectors");
    }
}
