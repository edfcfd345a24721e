//! Reader for legacy project files and package lists.
//!
//! Parses the XML project schema into [`ProjectMetadata`] and a
//! packages document into [`PackageEntry`] records, in one streaming
//! pass each.

use crate::{ConvertError, Result};
use cx_common::{FileSystem, PackageEntry, ProjectMetadata};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Reader};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// XML namespace of the legacy project schema.
pub const MSBUILD_NS: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

/// Reader for legacy project and package-list files.
pub struct ProjectReader<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> ProjectReader<F> {
    /// Create a reader over the given filesystem.
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Parse a legacy project file into its metadata record.
    ///
    /// Every field is optional except `ProjectGuid`; a missing or
    /// malformed guid fails the whole read, with no partial result.
    pub fn read_project(&self, path: &Path) -> Result<ProjectMetadata> {
        let text = self.read_to_string(path)?;
        let metadata = parse_project(&text, path)?;

        info!(
            path = %path.display(),
            guid = %metadata.guid,
            project_references = metadata.project_references.len(),
            framework_references = metadata.framework_references.len(),
            "Project file read"
        );

        Ok(metadata)
    }

    /// Parse a package list into its entries, in document order.
    ///
    /// Package lists are optional: a nonexistent path yields an empty
    /// list, not an error.
    pub fn read_package_list(&self, path: &Path) -> Result<Vec<PackageEntry>> {
        if !self.fs.exists(path) {
            debug!(path = %path.display(), "No package list, treating as empty");
            return Ok(Vec::new());
        }

        let text = self.read_to_string(path)?;
        let packages = parse_package_list(&text)?;

        info!(
            path = %path.display(),
            packages = packages.len(),
            "Package list read"
        );

        Ok(packages)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let mut stream = self.fs.open_read(path)?;
        let mut text = String::new();
        stream.read_to_string(&mut text)?;
        Ok(text)
    }
}

/// Scalar elements captured first-occurrence-wins.
enum Scalar {
    TargetFramework,
    RootNamespace,
    OutputType,
    Guid,
    TypeGuids,
}

/// An open `<Reference>` element whose children are still being scanned
/// for a `HintPath` (a hint path means the reference resolves to a
/// restored package file, not a framework assembly).
struct PendingReference {
    include: String,
    hinted: bool,
    depth: usize,
}

fn parse_project(xml: &str, path: &Path) -> Result<ProjectMetadata> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut target_framework_version: Option<String> = None;
    let mut root_namespace: Option<String> = None;
    let mut output_type: Option<String> = None;
    let mut guid_text: Option<String> = None;
    let mut type_guids_text: Option<String> = None;
    let mut project_references = Vec::new();
    let mut framework_references = Vec::new();
    let mut embedded_resources = Vec::new();

    let mut capturing: Option<Scalar> = None;
    let mut text_buf = String::new();
    let mut pending_reference: Option<PendingReference> = None;

    loop {
        match reader.read_resolved_event()? {
            (ns, Event::Start(e)) => {
                let in_schema = is_msbuild(&ns);
                let name = e.local_name();
                let local = name.as_ref();

                if let Some(reference) = pending_reference.as_mut() {
                    reference.depth += 1;
                    if in_schema && local == b"HintPath" {
                        reference.hinted = true;
                    }
                    continue;
                }

                match local {
                    b"TargetFrameworkVersion"
                        if in_schema && target_framework_version.is_none() =>
                    {
                        capturing = Some(Scalar::TargetFramework);
                        text_buf.clear();
                    }
                    b"RootNamespace" if in_schema && root_namespace.is_none() => {
                        capturing = Some(Scalar::RootNamespace);
                        text_buf.clear();
                    }
                    b"OutputType" if in_schema && output_type.is_none() => {
                        capturing = Some(Scalar::OutputType);
                        text_buf.clear();
                    }
                    b"ProjectGuid" if in_schema && guid_text.is_none() => {
                        capturing = Some(Scalar::Guid);
                        text_buf.clear();
                    }
                    // ProjectTypeGuids is matched by local name alone; some
                    // legacy emitters leave it outside the schema namespace.
                    b"ProjectTypeGuids" if type_guids_text.is_none() => {
                        capturing = Some(Scalar::TypeGuids);
                        text_buf.clear();
                    }
                    b"ProjectReference" if in_schema => {
                        let include = require_include(&e, "ProjectReference")?;
                        project_references.push(project_name(&include));
                    }
                    b"EmbeddedResource" if in_schema => {
                        let include = require_include(&e, "EmbeddedResource")?;
                        embedded_resources.push(include.replace(' ', "%20"));
                    }
                    b"Reference" if in_schema => {
                        pending_reference = Some(PendingReference {
                            include: require_include(&e, "Reference")?,
                            hinted: false,
                            depth: 1,
                        });
                    }
                    _ => {}
                }
            }
            (ns, Event::Empty(e)) => {
                let in_schema = is_msbuild(&ns);
                let name = e.local_name();
                let local = name.as_ref();

                if let Some(reference) = pending_reference.as_mut() {
                    if in_schema && local == b"HintPath" {
                        reference.hinted = true;
                    }
                    continue;
                }

                match local {
                    b"TargetFrameworkVersion"
                        if in_schema && target_framework_version.is_none() =>
                    {
                        target_framework_version = Some(String::new());
                    }
                    b"RootNamespace" if in_schema && root_namespace.is_none() => {
                        root_namespace = Some(String::new());
                    }
                    b"OutputType" if in_schema && output_type.is_none() => {
                        output_type = Some(String::new());
                    }
                    b"ProjectGuid" if in_schema && guid_text.is_none() => {
                        guid_text = Some(String::new());
                    }
                    b"ProjectTypeGuids" if type_guids_text.is_none() => {
                        type_guids_text = Some(String::new());
                    }
                    b"ProjectReference" if in_schema => {
                        let include = require_include(&e, "ProjectReference")?;
                        project_references.push(project_name(&include));
                    }
                    b"EmbeddedResource" if in_schema => {
                        let include = require_include(&e, "EmbeddedResource")?;
                        embedded_resources.push(include.replace(' ', "%20"));
                    }
                    b"Reference" if in_schema => {
                        // Self-closing, so no HintPath child is possible.
                        let include = require_include(&e, "Reference")?;
                        if include != "System" {
                            framework_references.push(include);
                        }
                    }
                    _ => {}
                }
            }
            (_, Event::Text(t)) => {
                if capturing.is_some() {
                    text_buf.push_str(&t.unescape()?);
                }
            }
            (_, Event::End(_)) => match pending_reference.take() {
                Some(mut reference) => {
                    reference.depth -= 1;
                    if reference.depth == 0 {
                        if !reference.hinted && reference.include != "System" {
                            framework_references.push(reference.include);
                        }
                    } else {
                        pending_reference = Some(reference);
                    }
                }
                None => {
                    if let Some(field) = capturing.take() {
                        let value = std::mem::take(&mut text_buf);
                        match field {
                            Scalar::TargetFramework => target_framework_version = Some(value),
                            Scalar::RootNamespace => root_namespace = Some(value),
                            Scalar::OutputType => output_type = Some(value),
                            Scalar::Guid => guid_text = Some(value),
                            Scalar::TypeGuids => type_guids_text = Some(value),
                        }
                    }
                }
            },
            (_, Event::Eof) => break,
            _ => {}
        }
    }

    let guid_text = guid_text.ok_or_else(|| ConvertError::MissingProjectGuid {
        path: path.to_path_buf(),
    })?;
    let guid = parse_guid(&guid_text)?;

    let project_type_guids = match type_guids_text {
        Some(text) => text
            .split(';')
            .map(parse_guid)
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    Ok(ProjectMetadata {
        target_framework_version,
        root_namespace,
        guid,
        project_type_guids,
        project_references,
        framework_references,
        embedded_resources,
        output_type,
    })
}

fn parse_package_list(xml: &str) -> Result<Vec<PackageEntry>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut packages = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"package" => {
                let mut id = None;
                let mut version = None;
                for attr in e.attributes() {
                    let attr = attr?;
                    match attr.key.as_ref() {
                        b"id" => id = Some(attr.unescape_value()?.into_owned()),
                        b"version" => version = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                packages.push(PackageEntry::new(
                    id.ok_or_else(|| missing_attribute("package", "id"))?,
                    version.ok_or_else(|| missing_attribute("package", "version"))?,
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(packages)
}

fn is_msbuild(ns: &ResolveResult<'_>) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(n)) if *n == MSBUILD_NS.as_bytes())
}

/// Referenced project name: the final directory segment of the include
/// path. Legacy include paths use `\`, so both separators are handled.
/// A bare file name has no directory and yields an empty name, matching
/// the legacy converter.
fn project_name(include: &str) -> String {
    let normalized = include.replace('\\', "/");
    let mut segments = normalized.rsplit('/');
    segments.next();
    segments.next().unwrap_or("").to_string()
}

fn require_include(e: &BytesStart<'_>, element: &str) -> Result<String> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"Include" {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Err(missing_attribute(element, "Include"))
}

fn missing_attribute(element: &str, attribute: &str) -> ConvertError {
    ConvertError::MissingAttribute {
        element: element.to_string(),
        attribute: attribute.to_string(),
    }
}

/// Parse a guid, accepting the braced uppercase form legacy project
/// files use alongside plain hyphenated text.
fn parse_guid(value: &str) -> Result<Uuid> {
    let trimmed = value
        .trim()
        .trim_start_matches('{')
        .trim_end_matches('}');
    Uuid::parse_str(trimmed).map_err(|source| ConvertError::InvalidGuid {
        value: value.to_string(),
        source,
    })
}
