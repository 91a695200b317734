//! `CycloneDX` SBOM parser.
//!
//! Supports the JSON (`.json`) and XML (`.xml`) serializations. Only
//! components declared as `library`, `application` or `operating-system`
//! are included; all other component types are ignored.

use crate::error::{ParseError, Result};
use crate::model::{
    LicenseResolver, Package, PackageSet, LICENSE_NOT_FOUND, LICENSE_UNKNOWN, UNKNOWN_VERSION,
};
use crate::parsers::read_file;
use crate::parsers::spdx::local_name;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::Value;
use std::path::Path;

/// Component types included in the canonical set
const INCLUDED_TYPES: [&str; 3] = ["library", "application", "operating-system"];

/// Parser for the `CycloneDX` SBOM standard
#[derive(Debug, Default)]
pub struct CycloneDxParser;

impl CycloneDxParser {
    /// Create a new `CycloneDX` parser
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse a `CycloneDX` file, extracting package name, version and
    /// license.
    ///
    /// Dispatches on the filename suffix; a file with an unrecognized
    /// suffix parses to an empty set.
    pub fn parse(&self, path: &Path) -> Result<PackageSet> {
        let file_name = path.to_string_lossy();

        if file_name.ends_with(".json") {
            Self::parse_json(&read_file(path)?)
        } else if file_name.ends_with(".xml") {
            Self::parse_xml(&read_file(path)?)
        } else {
            Ok(PackageSet::new())
        }
    }

    /// Parse `CycloneDX` JSON content.
    ///
    /// A missing `components` container is zero entries, not an error.
    fn parse_json(content: &str) -> Result<PackageSet> {
        let doc: Value = serde_json::from_str(content)?;

        let mut packages = PackageSet::new();
        let Some(components) = doc.get("components").and_then(Value::as_array) else {
            return Ok(packages);
        };
        for component in components {
            if let Some((name, package)) = Self::extract_component(component) {
                packages.insert(name, package);
            }
        }
        Ok(packages)
    }

    /// Extract one component; `None` skips filtered types and nameless
    /// components
    fn extract_component(component: &Value) -> Option<(String, Package)> {
        let component_type = component.get("type").and_then(Value::as_str)?;
        if !INCLUDED_TYPES.contains(&component_type) {
            return None;
        }
        let name = component.get("name").and_then(Value::as_str)?.to_string();
        let version = component
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_VERSION);
        let license = LicenseResolver::resolve_component(component);
        Some((name, Package::new(version, license)))
    }

    /// Parse `CycloneDX` XML content.
    ///
    /// Elements are matched on their local name regardless of the namespace
    /// prefix declared on the root. The component `type` attribute gates
    /// inclusion; the license is read only from a `licenses/expression`
    /// child element.
    fn parse_xml(content: &str) -> Result<PackageSet> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut packages = PackageSet::new();
        let mut in_components = false;
        let mut component: Option<XmlComponent> = None;
        let mut element_stack: Vec<String> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let local = local_name(e.name());
                    if component.is_some() {
                        element_stack.push(local);
                    } else if local == "components" {
                        in_components = true;
                    } else if local == "component" && in_components {
                        component = Some(XmlComponent::from_start(e));
                        element_stack.clear();
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(component) = component.as_mut() {
                        let text = e.unescape().unwrap_or_default().to_string();
                        match element_stack.last().map(String::as_str) {
                            Some("name") if element_stack.len() == 1 => {
                                component.name = Some(text);
                            }
                            Some("version") if element_stack.len() == 1 => {
                                component.version = Some(text);
                            }
                            Some("expression")
                                if element_stack.as_slice() == ["licenses", "expression"] =>
                            {
                                component.expression = Some(text);
                            }
                            _ => {}
                        }
                    }
                }
                Ok(Event::End(ref e)) => {
                    let local = local_name(e.name());
                    if local == "component" && element_stack.is_empty() {
                        if let Some(component) = component.take() {
                            component.commit(&mut packages);
                        }
                    } else if component.is_some() {
                        element_stack.pop();
                    } else if local == "components" {
                        in_components = false;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ParseError::Xml(format!(
                        "at position {}: {e:?}",
                        reader.buffer_position()
                    )))
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(packages)
    }
}

/// One `component` element being assembled from `CycloneDX` XML
#[derive(Debug, Default)]
struct XmlComponent {
    component_type: Option<String>,
    name: Option<String>,
    version: Option<String>,
    expression: Option<String>,
}

impl XmlComponent {
    /// Read the `type` attribute off the component start tag
    fn from_start(start: &BytesStart<'_>) -> Self {
        let component_type = start
            .attributes()
            .filter_map(std::result::Result::ok)
            .find(|attr| local_name(attr.key) == "type")
            .map(|attr| String::from_utf8_lossy(&attr.value).to_string());
        Self {
            component_type,
            ..Self::default()
        }
    }

    /// Commit this component, applying the type filter and defaulting rules;
    /// components without a name are skipped.
    fn commit(self, packages: &mut PackageSet) {
        let included = self
            .component_type
            .as_deref()
            .is_some_and(|t| INCLUDED_TYPES.contains(&t));
        if !included {
            return;
        }
        let Some(name) = self.name.filter(|n| !n.is_empty()) else {
            return;
        };
        let version = match self.version {
            Some(v) if !v.is_empty() => v,
            _ => UNKNOWN_VERSION.to_string(),
        };
        let license = match self.expression {
            Some(l) if !l.is_empty() => l,
            Some(_) => LICENSE_UNKNOWN.to_string(),
            None => LICENSE_NOT_FOUND.to_string(),
        };
        packages.insert(name, Package::new(version, license));
    }
}
