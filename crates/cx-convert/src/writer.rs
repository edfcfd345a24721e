//! Writer for xproj project files and `project.json` manifests.
//!
//! Renders a [`ProjectMetadata`] record into the fixed xproj wrapper
//! and, together with a package list, into the JSON dependency
//! manifest. Both operations are single-shot total functions of their
//! inputs, aside from fresh guid generation when not replacing the
//! original project file.

use crate::{ConvertError, Result};
use cx_common::{FileSystem, PackageEntry, ProjectMetadata};
use serde_json::{json, Map, Value};
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// Manifest file name within the target directory.
pub const MANIFEST_FILE_NAME: &str = "project.json";

/// Writer for converted project artifacts.
pub struct ProjectWriter<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> ProjectWriter<F> {
    /// Create a writer over the given filesystem.
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Render the xproj wrapper for `metadata` at `path`, overwriting
    /// any existing file.
    ///
    /// When `replace_existing` the original project identity is kept;
    /// otherwise a fresh guid is generated so the converted file never
    /// collides with one still in use.
    pub fn write_project(
        &self,
        path: &Path,
        metadata: &ProjectMetadata,
        replace_existing: bool,
    ) -> Result<()> {
        let project_guid = if replace_existing {
            metadata.guid
        } else {
            Uuid::new_v4()
        };
        let root_namespace = metadata.root_namespace.as_deref().unwrap_or("");

        let contents = format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="14.0" DefaultTargets="Build" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <VisualStudioVersion Condition="'$(VisualStudioVersion)' == ''">14.0</VisualStudioVersion>
    <VSToolsPath Condition="'$(VSToolsPath)' == ''">$(MSBuildExtensionsPath32)\Microsoft\VisualStudio\v$(VisualStudioVersion)</VSToolsPath>
  </PropertyGroup>
  <Import Project="$(VSToolsPath)\DotNet\Microsoft.DotNet.Props" Condition="'$(VSToolsPath)' != ''" />
  <PropertyGroup Label="Globals">
    <ProjectGuid>{project_guid}</ProjectGuid>
    <RootNamespace>{root_namespace}</RootNamespace>
    <BaseIntermediateOutputPath Condition="'$(BaseIntermediateOutputPath)'=='' ">.\obj</BaseIntermediateOutputPath>
    <OutputPath Condition="'$(OutputPath)'=='' ">.\bin\</OutputPath>
  </PropertyGroup>
  <PropertyGroup>
    <SchemaVersion>2.0</SchemaVersion>
  </PropertyGroup>
  <Import Project="$(VSToolsPath)\DotNet\Microsoft.DotNet.targets" Condition="'$(VSToolsPath)' != ''" />
</Project>"#
        );

        self.fs.write_all_text(path, &contents)?;

        info!(
            path = %path.display(),
            guid = %project_guid,
            replace_existing,
            "Project file written"
        );

        Ok(())
    }

    /// Render the dependency manifest for `metadata` and `packages`
    /// into `<directory>/project.json`.
    ///
    /// Packages are merged first, then project references; a project
    /// reference that collides with a package id overwrites it with
    /// `"*"`. Fails with [`ConvertError::MissingTargetFramework`] when
    /// the metadata carries no framework version to derive the
    /// framework moniker from.
    pub fn write_project_json(
        &self,
        directory: &Path,
        metadata: &ProjectMetadata,
        packages: &[PackageEntry],
    ) -> Result<()> {
        let moniker = framework_moniker(metadata.target_framework_version.as_deref())?;

        let mut dependencies = Map::new();
        for package in packages {
            dependencies.insert(package.id.clone(), Value::String(package.version.clone()));
        }
        for reference in &metadata.project_references {
            dependencies.insert(reference.clone(), Value::String("*".to_string()));
        }
        debug!(dependencies = dependencies.len(), "Dependencies merged");

        let mut framework = Map::new();
        if !metadata.framework_references.is_empty() {
            let mut assemblies = Map::new();
            for reference in &metadata.framework_references {
                assemblies.insert(reference.clone(), Value::String("*".to_string()));
            }
            framework.insert("frameworkAssemblies".to_string(), Value::Object(assemblies));
        }

        let mut frameworks = Map::new();
        frameworks.insert(moniker, Value::Object(framework));

        let mut doc = Map::new();
        doc.insert("version".to_string(), json!("0.0.0-*"));
        doc.insert("dependencies".to_string(), Value::Object(dependencies));
        doc.insert("frameworks".to_string(), Value::Object(frameworks));
        if metadata.emits_entry_point() {
            doc.insert("buildOptions".to_string(), json!({ "emitEntryPoint": true }));
        }

        let manifest = serde_json::to_string_pretty(&Value::Object(doc))?;
        let target = directory.join(MANIFEST_FILE_NAME);
        self.fs.write_all_text(&target, &manifest)?;

        info!(path = %target.display(), "Manifest written");

        Ok(())
    }
}

/// Derive the short framework moniker from a raw framework version:
/// drop every `v` and `.`, prefix with `net` (`"v4.5.1"` -> `"net451"`).
///
/// An absent or empty version has no usable moniker and is an error.
pub fn framework_moniker(target_framework_version: Option<&str>) -> Result<String> {
    let version = target_framework_version
        .filter(|v| !v.is_empty())
        .ok_or(ConvertError::MissingTargetFramework)?;
    let digits: String = version.chars().filter(|c| *c != 'v' && *c != '.').collect();
    Ok(format!("net{digits}"))
}
