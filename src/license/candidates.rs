use crate::models::{LicenseField, LicensesField, PackageDescriptor};

/// Distinct license-type strings extracted from a descriptor, in first-seen order.
///
/// `license` contributes before `licenses`. Malformed entries, entries without a
/// `type`, and empty strings are not candidates. Other strings are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    items: Vec<String>,
}

impl CandidateSet {
    pub fn from_descriptor(descriptor: &PackageDescriptor) -> Self {
        let mut set = Self::default();

        match &descriptor.license {
            Some(LicenseField::Identifier(id)) => set.push(id),
            Some(LicenseField::Typed(typed)) => {
                if let Some(kind) = &typed.kind {
                    set.push(kind);
                }
            }
            Some(LicenseField::Malformed(_)) | None => {}
        }

        if let Some(LicensesField::List(entries)) = &descriptor.licenses {
            for entry in entries {
                // Only object entries carry a `type`.
                if let LicenseField::Typed(typed) = entry {
                    if let Some(kind) = &typed.kind {
                        set.push(kind);
                    }
                }
            }
        }

        set
    }

    fn push(&mut self, candidate: &str) {
        if candidate.is_empty() {
            return;
        }
        if !self.items.iter().any(|c| c == candidate) {
            self.items.push(candidate.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|c| c == id)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(json: &str) -> Vec<String> {
        let d = PackageDescriptor::from_json_str(json).unwrap();
        CandidateSet::from_descriptor(&d).into_vec()
    }

    #[test]
    fn test_no_license_fields() {
        assert!(candidates(r#"{"name":"foo","version":"1.0.0"}"#).is_empty());
    }

    #[test]
    fn test_license_string() {
        assert_eq!(candidates(r#"{"license":"ISC"}"#), vec!["ISC"]);
    }

    #[test]
    fn test_license_object() {
        assert_eq!(
            candidates(r#"{"license":{"type":"ISC","url":"https://example.com"}}"#),
            vec!["ISC"]
        );
    }

    #[test]
    fn test_licenses_array_keeps_order() {
        assert_eq!(
            candidates(r#"{"licenses":[{"type":"MIT","url":"b"},{"type":"BSD-3-Clause","url":"a"}]}"#),
            vec!["MIT", "BSD-3-Clause"]
        );
    }

    #[test]
    fn test_license_before_licenses_and_dedup() {
        assert_eq!(
            candidates(
                r#"{"license":"Apache-2.0","licenses":[{"type":"MIT"},{"type":"Apache-2.0"},{"type":"MIT"}]}"#
            ),
            vec!["Apache-2.0", "MIT"]
        );
    }

    #[test]
    fn test_malformed_entries_skipped() {
        assert_eq!(
            candidates(
                r#"{"licenses":[{"url":"x"},"GPL-2.0",{"type":7},null,{"type":""},{"type":"MIT"}]}"#
            ),
            vec!["MIT"]
        );
    }

    #[test]
    fn test_empty_license_string_is_not_a_candidate() {
        assert!(candidates(r#"{"license":""}"#).is_empty());
    }

    #[test]
    fn test_whitespace_license_string_kept_verbatim() {
        assert_eq!(candidates(r#"{"license":"   "}"#), vec!["   "]);
    }

    #[test]
    fn test_licenses_object_instead_of_array() {
        assert!(candidates(r#"{"licenses":{"type":"MIT"}}"#).is_empty());
    }
}
