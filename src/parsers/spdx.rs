//! SPDX SBOM parser.
//!
//! Supports five SPDX serializations, dispatched purely on the filename
//! suffix: tag-value (`.spdx`), JSON (`.spdx.json` / `.json`), RDF line text
//! (`.spdx.rdf`), XML (`.spdx.xml`), and YAML (`.spdx.yaml` / `.spdx.yml`).
//! An unrecognized suffix yields an empty [`PackageSet`] rather than an
//! error, which the format detector uses as a fallback signal.

use crate::error::{ParseError, Result};
use crate::model::{
    LicenseResolver, Package, PackageSet, LICENSE_NOT_FOUND, LICENSE_UNKNOWN, UNKNOWN_VERSION,
};
use crate::parsers::read_file;
use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;
use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;

static RDF_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("<spdx:name>(.+?)</spdx:name>").expect("static regex"));
static RDF_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("<spdx:versionInfo>(.+?)</spdx:versionInfo>").expect("static regex")
});
static RDF_LICENSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("<spdx:licenseConcluded rdf:resource=(.+?)/>").expect("static regex")
});

/// Package-host URL prefix recognized when re-deriving a package name from a
/// `PackageHomePage` tag. Kept verbatim for output compatibility.
const PACKAGE_HOST_PREFIX: &str = "pkg.go.dev/";

/// Parser for the SPDX SBOM standard
#[derive(Debug, Default)]
pub struct SpdxParser;

impl SpdxParser {
    /// Create a new SPDX parser
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse an SPDX file, extracting package name, version and license.
    ///
    /// The serialization dialect is chosen from the filename suffix; a file
    /// with an unrecognized suffix parses to an empty set.
    pub fn parse(&self, path: &Path) -> Result<PackageSet> {
        let file_name = path.to_string_lossy();

        if file_name.ends_with(".spdx") {
            Ok(Self::parse_tag_value(&read_file(path)?))
        } else if file_name.ends_with(".spdx.json") || file_name.ends_with(".json") {
            Self::parse_json(&read_file(path)?)
        } else if file_name.ends_with(".spdx.rdf") {
            Ok(Self::parse_rdf(&read_file(path)?))
        } else if file_name.ends_with(".spdx.xml") {
            Self::parse_xml(&read_file(path)?)
        } else if file_name.ends_with(".spdx.yaml") || file_name.ends_with(".spdx.yml") {
            Self::parse_yaml(&read_file(path)?)
        } else {
            Ok(PackageSet::new())
        }
    }

    /// Parse SPDX tag-value content.
    ///
    /// Line oriented: each line splits on the first colon into tag and value.
    /// A record commits once name, version and license have all been seen,
    /// first write wins.
    fn parse_tag_value(content: &str) -> PackageSet {
        let mut packages = PackageSet::new();
        let mut name = String::new();
        // A name without a path separator may be a bare version-like
        // identifier; such names are re-derived from the package homepage.
        let mut bare_name = false;
        let mut version: Option<String> = None;
        let mut license: Option<String> = None;

        for line in content.lines() {
            let Some((tag, rest)) = line.split_once(':') else {
                continue;
            };

            match tag {
                "PackageName" => {
                    name = first_field(rest).to_string();
                    bare_name = !name.contains('/');
                    version = None;
                    license = None;
                }
                "PackageVersion" => {
                    version = Some(rest.trim().to_string());
                }
                "PackageLicenseConcluded" => {
                    license = Some(first_field(rest).to_string());
                }
                "PackageHomePage" => {
                    let mut fields = rest.splitn(3, ':');
                    let mut home = fields.next().unwrap_or("").trim().to_string();
                    if let Some(second) = fields.next() {
                        home.push_str(second.trim());
                    }
                    if bare_name {
                        let mut parts = home.split(PACKAGE_HOST_PREFIX);
                        // Rename only on an unambiguous single occurrence
                        if let (Some(_), Some(tail), None) =
                            (parts.next(), parts.next(), parts.next())
                        {
                            name = tail.to_string();
                        }
                    }
                }
                _ => {}
            }

            if !name.is_empty() {
                if let (Some(v), Some(l)) = (&version, &license) {
                    packages.insert(name.clone(), Package::new(v.clone(), l.clone()));
                }
            }
        }

        packages
    }

    /// Parse SPDX JSON content
    fn parse_json(content: &str) -> Result<PackageSet> {
        let doc: Value = serde_json::from_str(content)?;
        Ok(Self::extract_packages(&doc))
    }

    /// Parse SPDX YAML content; same shape and defaulting rules as JSON
    fn parse_yaml(content: &str) -> Result<PackageSet> {
        let doc: Value = serde_yaml::from_str(content)?;
        Ok(Self::extract_packages(&doc))
    }

    /// Extract the canonical set from a document-shaped value.
    ///
    /// A missing `packages` container is zero entries, not an error.
    fn extract_packages(doc: &Value) -> PackageSet {
        let mut packages = PackageSet::new();
        let Some(entries) = doc.get("packages").and_then(Value::as_array) else {
            return packages;
        };
        for entry in entries {
            if let Some((name, package)) = Self::extract_entry(entry) {
                packages.insert(name, package);
            }
        }
        packages
    }

    /// Extract one package entry; `None` skips entries without a name
    fn extract_entry(entry: &Value) -> Option<(String, Package)> {
        let name = entry.get("name").and_then(Value::as_str)?.to_string();
        let version = entry
            .get("versionInfo")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_VERSION);
        let license = entry
            .get("licenseConcluded")
            .and_then(Value::as_str)
            .unwrap_or(LICENSE_NOT_FOUND);
        Some((name, Package::new(version, license)))
    }

    /// Parse SPDX RDF line text.
    ///
    /// Walks the document line by line matching the `<spdx:name>`,
    /// `<spdx:versionInfo>` and `<spdx:licenseConcluded>` literal tags. RDF
    /// may emit version and license in either order, so whichever arrives
    /// first is buffered and the record commits as soon as both are known.
    fn parse_rdf(content: &str) -> PackageSet {
        let mut packages = PackageSet::new();
        let mut state = RdfState::default();

        for line in content.lines() {
            let line = line.trim();

            if line.starts_with("<spdx:name>") {
                if let Some(caps) = RDF_NAME.captures(line) {
                    state.start(caps[1].to_string());
                }
            } else if line.starts_with("<spdx:versionInfo>") {
                if let Some(caps) = RDF_VERSION.captures(line) {
                    state.version = Some(caps[1].to_string());
                    state.commit(&mut packages);
                }
            } else if line.starts_with("<spdx:licenseConcluded") {
                // License tags are assumed to fit on a single line
                state.license = Some(match RDF_LICENSE.captures(line) {
                    Some(caps) => LicenseResolver::resolve_rdf_resource(&caps[1]),
                    None => LICENSE_NOT_FOUND.to_string(),
                });
                state.commit(&mut packages);
            }
        }

        packages
    }

    /// Parse SPDX XML content.
    ///
    /// Elements are matched on their local name regardless of the namespace
    /// prefix declared on the root, mirroring the read-root-namespace,
    /// query-by-local-name lookup the format calls for. Iterates `packages`
    /// elements; entries without a `name` child are skipped.
    fn parse_xml(content: &str) -> Result<PackageSet> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut packages = PackageSet::new();
        let mut entry: Option<XmlEntry> = None;
        let mut current_field: Option<String> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let local = local_name(e.name());
                    if local == "packages" {
                        entry = Some(XmlEntry::default());
                    } else if entry.is_some() {
                        current_field = Some(local);
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if let (Some(entry), Some(field)) = (entry.as_mut(), current_field.as_deref()) {
                        let text = e.unescape().unwrap_or_default().to_string();
                        match field {
                            "name" => entry.name = Some(text),
                            "versionInfo" => entry.version = Some(text),
                            "licenseConcluded" => entry.license = Some(text),
                            _ => {}
                        }
                    }
                }
                Ok(Event::End(ref e)) => {
                    let local = local_name(e.name());
                    if local == "packages" {
                        if let Some(entry) = entry.take() {
                            entry.commit(&mut packages);
                        }
                    } else {
                        current_field = None;
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

/// Cross-line state for the RDF line reducer
#[derive(Debug, Default)]
struct RdfState {
    name: String,
    version: Option<String>,
    license: Option<String>,
}

impl RdfState {
    /// Begin a new package record, discarding any buffers left over from an
    /// incomplete predecessor.
    fn start(&mut self, name: String) {
        self.name = name;
        self.version = None;
        self.license = None;
    }

    /// Commit the buffered record once name, version and license are all
    /// known, then reset the consumed fields so the next commit waits for a
    /// full triple.
    fn commit(&mut self, packages: &mut PackageSet) {
        if self.name.is_empty() {
            return;
        }
        if let (Some(version), Some(license)) = (&self.version, &self.license) {
            packages.insert(
                self.name.clone(),
                Package::new(version.clone(), license.clone()),
            );
            self.version = None;
            self.license = None;
        }
    }
}

/// One `packages` element being assembled from SPDX XML
#[derive(Debug, Default)]
struct XmlEntry {
    name: Option<String>,
    version: Option<String>,
    license: Option<String>,
}

impl XmlEntry {
    /// Commit this entry, applying the defaulting rules; entries without a
    /// name are skipped.
    fn commit(self, packages: &mut PackageSet) {
        let Some(name) = self.name.filter(|n| !n.is_empty()) else {
            return;
        };
        let version = match self.version {
            Some(v) if !v.is_empty() => v,
            _ => UNKNOWN_VERSION.to_string(),
        };
        let license = match self.license {
            Some(l) if !l.is_empty() => l,
            Some(_) => LICENSE_UNKNOWN.to_string(),
            None => LICENSE_NOT_FOUND.to_string(),
        };
        packages.insert(name, Package::new(version, license));
    }
}

/// Take the first colon-separated field of a tag value, trimmed
fn first_field(rest: &str) -> &str {
    rest.split(':').next().unwrap_or("").trim()
}

/// Local part of a qualified XML name, with the namespace prefix dropped
pub(crate) fn local_name(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.local_name().as_ref()).to_string()
}
