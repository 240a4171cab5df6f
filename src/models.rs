use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The subset of a `package.json` manifest that license resolution looks at.
///
/// Every field is optional and deserialization is lenient: license fields that
/// fit none of the known shapes end up as `Malformed`, and a non-string `name`
/// or `version` reads as `None`, instead of failing the whole descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageDescriptor {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: Option<String>,
    #[serde(default)]
    pub license: Option<LicenseField>,
    #[serde(default)]
    pub licenses: Option<LicensesField>,
}

impl PackageDescriptor {
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Shape of the single `license` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LicenseField {
    /// `"license": "MIT"`
    Identifier(String),
    /// `"license": { "type": "MIT", "url": "..." }`
    Typed(TypedLicense),
    Malformed(Value),
}

/// An object-form license entry. Extra fields such as `url` are carried but
/// never consulted.
#[derive(Debug, Clone, Deserialize)]
pub struct TypedLicense {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Shape of the `licenses` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LicensesField {
    List(Vec<LicenseField>),
    Malformed(Value),
}

/// Which precedence rule produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionRule {
    Override,
    Fallback,
    Single,
    Preferred,
    TieBreak,
}

impl std::fmt::Display for ResolutionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionRule::Override => write!(f, "override"),
            ResolutionRule::Fallback => write!(f, "fallback"),
            ResolutionRule::Single => write!(f, "manifest"),
            ResolutionRule::Preferred => write!(f, "preferred"),
            ResolutionRule::TieBreak => write!(f, "tie-break"),
        }
    }
}

/// Outcome of a single resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub license: Option<String>,
    pub rule: ResolutionRule,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditedPackage {
    pub name: String,
    pub version: String,
    pub license: Option<String>,
    pub rule: ResolutionRule,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Error,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Pass => write!(f, "pass"),
            Verdict::Warn => write!(f, "warn"),
            Verdict::Error => write!(f, "error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_string_field() {
        let d = PackageDescriptor::from_json_str(r#"{"name":"foo","license":"ISC"}"#).unwrap();
        assert!(matches!(d.license, Some(LicenseField::Identifier(ref s)) if s == "ISC"));
        assert!(d.licenses.is_none());
    }

    #[test]
    fn test_license_object_field() {
        let d = PackageDescriptor::from_json_str(
            r#"{"name":"foo","license":{"type":"ISC","url":"https://example.com"}}"#,
        )
        .unwrap();
        match d.license {
            Some(LicenseField::Typed(t)) => assert_eq!(t.kind.as_deref(), Some("ISC")),
            other => panic!("unexpected shape: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_fields_do_not_fail() {
        let d = PackageDescriptor::from_json_str(
            r#"{"name":"foo","license":42,"licenses":{"type":"MIT"}}"#,
        )
        .unwrap();
        assert!(matches!(d.license, Some(LicenseField::Malformed(_))));
        assert!(matches!(d.licenses, Some(LicensesField::Malformed(_))));
    }

    #[test]
    fn test_non_string_type_is_malformed() {
        let d = PackageDescriptor::from_json_str(r#"{"license":{"type":5}}"#).unwrap();
        assert!(matches!(d.license, Some(LicenseField::Malformed(_))));
    }

    #[test]
    fn test_array_license_is_malformed() {
        let d = PackageDescriptor::from_json_str(r#"{"license":["MIT"]}"#).unwrap();
        assert!(matches!(d.license, Some(LicenseField::Malformed(_))));
    }

    #[test]
    fn test_non_string_version_keeps_license() {
        let d = PackageDescriptor::from_json_str(
            r#"{"name":"weird","version":1,"license":"MIT"}"#,
        )
        .unwrap();
        assert_eq!(d.version, None);
        assert_eq!(d.name.as_deref(), Some("weird"));
        assert!(matches!(d.license, Some(LicenseField::Identifier(ref s)) if s == "MIT"));
    }

    #[test]
    fn test_non_string_name_reads_as_none() {
        let d = PackageDescriptor::from_json_str(
            r#"{"name":{"first":"x"},"version":null,"license":"ISC"}"#,
        )
        .unwrap();
        assert_eq!(d.name, None);
        assert_eq!(d.version, None);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let d = PackageDescriptor::from_json_str(
            r#"{"name":"foo","version":"1.0.0","dependencies":{"bar":"^1"}}"#,
        )
        .unwrap();
        assert_eq!(d.version.as_deref(), Some("1.0.0"));
        assert!(d.license.is_none());
    }
}
