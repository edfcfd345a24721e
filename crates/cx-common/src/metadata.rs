//! Project metadata and package-list value records.
//!
//! Both records are immutable plain data: the reader constructs them
//! once per conversion and the writer consumes them. Sequence fields
//! are never absent, only empty.

use uuid::Uuid;

/// Everything the conversion needs from a legacy project file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectMetadata {
    /// Raw `TargetFrameworkVersion` value, e.g. `"v4.5.1"`.
    pub target_framework_version: Option<String>,

    /// Raw `RootNamespace` value.
    pub root_namespace: Option<String>,

    /// `ProjectGuid` — the one field the source must carry.
    pub guid: Uuid,

    /// `ProjectTypeGuids`, split on `;`. Empty when the element is absent.
    pub project_type_guids: Vec<Uuid>,

    /// Names of referenced sibling projects (final directory segment of
    /// each `ProjectReference` include path).
    pub project_references: Vec<String>,

    /// Framework assembly references: `Reference` includes with no
    /// `HintPath` child, minus the literal `"System"`.
    pub framework_references: Vec<String>,

    /// `EmbeddedResource` include paths with spaces encoded as `%20`.
    pub embedded_resources: Vec<String>,

    /// Raw `OutputType` value, e.g. `"Exe"` or `"Library"`.
    pub output_type: Option<String>,
}

impl ProjectMetadata {
    /// Whether the converted project builds an entry point.
    ///
    /// True iff `OutputType` is `"Exe"`, compared case-insensitively.
    /// An absent `OutputType` counts as no entry point.
    pub fn emits_entry_point(&self) -> bool {
        self.output_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("Exe"))
    }
}

/// One pinned dependency from a package list file.
///
/// Entries keep document order and are not de-duplicated; a later
/// duplicate id wins when the list is merged into the dependencies map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// Package name.
    pub id: String,
    /// Pinned version specifier.
    pub version: String,
}

impl PackageEntry {
    /// Create a new package entry.
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
        }
    }
}
