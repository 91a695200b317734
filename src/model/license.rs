//! License payload resolution shared by the SPDX and `CycloneDX` parsers.
//!
//! License information arrives in structurally different shapes depending on
//! the dialect: a nested object with an `id`, `name`, or `expression`, a bare
//! `expression` field, a list of such entries, an evidence-sourced list, or an
//! RDF resource URI. The resolver applies an ordered chain of extractors and
//! returns the first value that matches.

use super::{LICENSE_NOT_FOUND, LICENSE_UNKNOWN};
use serde_json::Value;

/// Resolves dialect-specific license payloads to a single canonical string.
pub struct LicenseResolver;

impl LicenseResolver {
    /// Resolve the license of a `CycloneDX` component object.
    ///
    /// Prefers the first entry of the `licenses` field; falls back to
    /// `evidence.licenses` only when no direct `licenses` entry is present.
    /// Returns `"NOT FOUND"` when neither field carries an entry and
    /// `"UNKNOWN"` when an entry is present but yields no usable value.
    #[must_use]
    pub fn resolve_component(component: &Value) -> String {
        let direct = component
            .get("licenses")
            .and_then(Value::as_array)
            .filter(|entries| !entries.is_empty());

        let evidence = || {
            component
                .pointer("/evidence/licenses")
                .and_then(Value::as_array)
                .filter(|entries| !entries.is_empty())
        };

        match direct.or_else(evidence) {
            Some(entries) => match Self::resolve_list(entries) {
                Some(license) if !license.is_empty() => license,
                _ => LICENSE_UNKNOWN.to_string(),
            },
            None => LICENSE_NOT_FOUND.to_string(),
        }
    }

    /// Resolve a list of license entries by applying the entry rules to the
    /// first element.
    #[must_use]
    pub fn resolve_list(entries: &[Value]) -> Option<String> {
        entries.first().and_then(Self::resolve_entry)
    }

    /// Resolve a single license entry.
    ///
    /// Checks, in order: `license.id`, `license.name`, `license.expression`,
    /// then a top-level `expression` field.
    #[must_use]
    pub fn resolve_entry(entry: &Value) -> Option<String> {
        const FIELDS: [&str; 4] = [
            "/license/id",
            "/license/name",
            "/license/expression",
            "/expression",
        ];

        FIELDS
            .iter()
            .find_map(|path| entry.pointer(path))
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Resolve an SPDX RDF `rdf:resource` license reference.
    ///
    /// The raw value still carries the quote characters captured from the
    /// attribute. A `http://spdx.org/licenses/<ID>` URI resolves to `<ID>`
    /// with the trailing quote stripped; a URI with a `#` fragment (e.g. the
    /// terms vocabulary `http://spdx.org/rdf/terms#noassertion`) resolves to
    /// the fragment, stripped of the trailing quote and upper-cased.
    #[must_use]
    pub fn resolve_rdf_resource(raw: &str) -> String {
        if raw.starts_with("\"http://spdx.org/licenses/") {
            let id = raw.rsplit('/').next().unwrap_or(raw);
            return id.strip_suffix('"').unwrap_or(id).to_string();
        }
        if let Some(idx) = raw.rfind('#') {
            let fragment = &raw[idx + 1..];
            return fragment
                .strip_suffix('"')
                .unwrap_or(fragment)
                .to_uppercase();
        }
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_entry_license_id() {
        let entry = json!({"license": {"id": "Apache-2.0"}});
        assert_eq!(
            LicenseResolver::resolve_entry(&entry),
            Some("Apache-2.0".to_string())
        );
    }

    #[test]
    fn test_resolve_entry_license_name_when_no_id() {
        let entry = json!({"license": {"name": "Custom License"}});
        assert_eq!(
            LicenseResolver::resolve_entry(&entry),
            Some("Custom License".to_string())
        );
    }

    #[test]
    fn test_resolve_entry_prefers_id_over_name() {
        let entry = json!({"license": {"id": "MIT", "name": "MIT License"}});
        assert_eq!(
            LicenseResolver::resolve_entry(&entry),
            Some("MIT".to_string())
        );
    }

    #[test]
    fn test_resolve_entry_nested_expression() {
        let entry = json!({"license": {"expression": "MIT OR Apache-2.0"}});
        assert_eq!(
            LicenseResolver::resolve_entry(&entry),
            Some("MIT OR Apache-2.0".to_string())
        );
    }

    #[test]
    fn test_resolve_entry_top_level_expression() {
        let entry = json!({"expression": "GPL-2.0-only WITH Classpath-exception-2.0"});
        assert_eq!(
            LicenseResolver::resolve_entry(&entry),
            Some("GPL-2.0-only WITH Classpath-exception-2.0".to_string())
        );
    }

    #[test]
    fn test_resolve_entry_unresolvable() {
        assert_eq!(LicenseResolver::resolve_entry(&json!({})), None);
        assert_eq!(
            LicenseResolver::resolve_entry(&json!({"license": {}})),
            None
        );
    }

    #[test]
    fn test_resolve_list_uses_first_entry() {
        let entries = [
            json!({"license": {"id": "MIT"}}),
            json!({"license": {"id": "Apache-2.0"}}),
        ];
        assert_eq!(
            LicenseResolver::resolve_list(&entries),
            Some("MIT".to_string())
        );
    }

    #[test]
    fn test_resolve_component_direct_licenses() {
        let component = json!({
            "name": "baz",
            "licenses": [{"license": {"id": "Apache-2.0"}}]
        });
        assert_eq!(
            LicenseResolver::resolve_component(&component),
            "Apache-2.0"
        );
    }

    #[test]
    fn test_resolve_component_evidence_fallback() {
        let component = json!({
            "name": "baz",
            "evidence": {"licenses": [{"license": {"id": "BSD-3-Clause"}}]}
        });
        assert_eq!(
            LicenseResolver::resolve_component(&component),
            "BSD-3-Clause"
        );
    }

    #[test]
    fn test_resolve_component_direct_shadows_evidence() {
        let component = json!({
            "licenses": [{"license": {"id": "MIT"}}],
            "evidence": {"licenses": [{"license": {"id": "GPL-3.0-only"}}]}
        });
        assert_eq!(LicenseResolver::resolve_component(&component), "MIT");
    }

    #[test]
    fn test_resolve_component_no_license_field() {
        let component = json!({"name": "bar", "version": "2.0"});
        assert_eq!(LicenseResolver::resolve_component(&component), "NOT FOUND");
    }

    #[test]
    fn test_resolve_component_empty_list_falls_through() {
        let component = json!({"licenses": []});
        assert_eq!(LicenseResolver::resolve_component(&component), "NOT FOUND");
    }

    #[test]
    fn test_resolve_component_present_but_unresolvable() {
        let component = json!({"licenses": [{"license": {}}]});
        assert_eq!(LicenseResolver::resolve_component(&component), "UNKNOWN");

        let component = json!({"licenses": [{"license": {"id": ""}}]});
        assert_eq!(LicenseResolver::resolve_component(&component), "UNKNOWN");
    }

    #[test]
    fn test_resolve_rdf_resource_license_url() {
        assert_eq!(
            LicenseResolver::resolve_rdf_resource("\"http://spdx.org/licenses/MIT\""),
            "MIT"
        );
        assert_eq!(
            LicenseResolver::resolve_rdf_resource("\"http://spdx.org/licenses/GPL-2.0-only\""),
            "GPL-2.0-only"
        );
    }

    #[test]
    fn test_resolve_rdf_resource_terms_fragment_uppercased() {
        assert_eq!(
            LicenseResolver::resolve_rdf_resource("\"http://spdx.org/rdf/terms#noassertion\""),
            "NOASSERTION"
        );
        assert_eq!(
            LicenseResolver::resolve_rdf_resource("\"http://spdx.org/rdf/terms#none\""),
            "NONE"
        );
    }

    #[test]
    fn test_resolve_rdf_resource_passthrough() {
        assert_eq!(LicenseResolver::resolve_rdf_resource("MIT"), "MIT");
    }
}
