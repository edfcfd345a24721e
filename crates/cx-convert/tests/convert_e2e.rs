//! End-to-end conversion tests for cx-convert.
//!
//! These drive the full pipeline on disk: a legacy project file plus a
//! package list go in, an xproj wrapper plus a project.json manifest
//! come out, and the manifest is checked field by field.

use cx_common::DiskFileSystem;
use cx_convert::{ProjectReader, ProjectWriter};
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;
use uuid::Uuid;

const CSPROJ: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="14.0" DefaultTargets="Build" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <ProjectGuid>{0D6E2C4A-91B7-4E8F-A3D5-6C1B09F2E784}</ProjectGuid>
    <OutputType>Exe</OutputType>
    <RootNamespace>Converter.Demo</RootNamespace>
    <TargetFrameworkVersion>v4.5.1</TargetFrameworkVersion>
  </PropertyGroup>
  <ItemGroup>
    <Reference Include="System" />
    <Reference Include="System.Xml.Linq" />
    <Reference Include="Newtonsoft.Json, Version=9.0.0.0, Culture=neutral">
      <HintPath>..\packages\Newtonsoft.Json.9.0.1\lib\net45\Newtonsoft.Json.dll</HintPath>
      <Private>True</Private>
    </Reference>
  </ItemGroup>
  <ItemGroup>
    <ProjectReference Include="..\Converter.Core\Converter.Core.csproj" />
    <ProjectReference Include="..\Converter.Shared\Converter.Shared.csproj" />
  </ItemGroup>
</Project>
"#;

const PACKAGES_CONFIG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<packages>
  <package id="Newtonsoft.Json" version="9.0.1" />
  <package id="Converter.Core" version="2.1.0" />
</packages>
"#;

fn convert(dir: &Path, replace_existing: bool) -> (String, Value) {
    let reader = ProjectReader::new(DiskFileSystem);
    let metadata = reader.read_project(&dir.join("Demo.csproj")).unwrap();
    let packages = reader
        .read_package_list(&dir.join("packages.config"))
        .unwrap();

    let writer = ProjectWriter::new(DiskFileSystem);
    writer
        .write_project(&dir.join("Demo.xproj"), &metadata, replace_existing)
        .unwrap();
    writer.write_project_json(dir, &metadata, &packages).unwrap();

    let xproj = std::fs::read_to_string(dir.join("Demo.xproj")).unwrap();
    let manifest = std::fs::read_to_string(dir.join("project.json")).unwrap();
    (xproj, serde_json::from_str(&manifest).unwrap())
}

fn seed(dir: &Path) {
    std::fs::write(dir.join("Demo.csproj"), CSPROJ).unwrap();
    std::fs::write(dir.join("packages.config"), PACKAGES_CONFIG).unwrap();
}

#[test]
fn test_full_conversion_replacing_existing() {
    let temp_dir = TempDir::new().unwrap();
    seed(temp_dir.path());

    let (xproj, manifest) = convert(temp_dir.path(), true);

    // Original identity is re-embedded.
    let original = Uuid::parse_str("0d6e2c4a-91b7-4e8f-a3d5-6c1b09f2e784").unwrap();
    assert!(xproj.contains(&format!("<ProjectGuid>{original}</ProjectGuid>")));
    assert!(xproj.contains("<RootNamespace>Converter.Demo</RootNamespace>"));

    assert_eq!(manifest["version"], "0.0.0-*");

    // Package kept, project references merged last: Converter.Core was
    // pinned at 2.1.0 in the package list but is also a project
    // reference, so it ends up as "*".
    let dependencies = manifest["dependencies"].as_object().unwrap();
    assert_eq!(dependencies["Newtonsoft.Json"], "9.0.1");
    assert_eq!(dependencies["Converter.Core"], "*");
    assert_eq!(dependencies["Converter.Shared"], "*");
    assert_eq!(dependencies.len(), 3);

    let frameworks = manifest["frameworks"].as_object().unwrap();
    assert_eq!(frameworks.len(), 1);
    let assemblies = frameworks["net451"]["frameworkAssemblies"].as_object().unwrap();
    assert_eq!(assemblies.len(), 1);
    assert_eq!(assemblies["System.Xml.Linq"], "*");

    // Exe output emits an entry point.
    assert_eq!(manifest["buildOptions"]["emitEntryPoint"], true);
}

#[test]
fn test_full_conversion_fresh_identity() {
    let temp_dir = TempDir::new().unwrap();
    seed(temp_dir.path());

    let (xproj, _) = convert(temp_dir.path(), false);

    let original = Uuid::parse_str("0d6e2c4a-91b7-4e8f-a3d5-6c1b09f2e784").unwrap();
    assert!(!xproj.contains(&original.to_string()));

    // Whatever guid was generated, it is well-formed.
    let start = xproj.find("<ProjectGuid>").unwrap() + "<ProjectGuid>".len();
    let end = xproj.find("</ProjectGuid>").unwrap();
    assert!(Uuid::parse_str(&xproj[start..end]).is_ok());
}

#[test]
fn test_conversion_without_package_list() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("Demo.csproj"), CSPROJ).unwrap();

    let (_, manifest) = convert(temp_dir.path(), true);

    // No package list: only project references survive the merge.
    let dependencies = manifest["dependencies"].as_object().unwrap();
    assert_eq!(dependencies.len(), 2);
    assert_eq!(dependencies["Converter.Core"], "*");
    assert_eq!(dependencies["Converter.Shared"], "*");
}

#[test]
fn test_library_conversion_omits_build_options() {
    let temp_dir = TempDir::new().unwrap();
    let csproj = CSPROJ.replace("<OutputType>Exe</OutputType>", "<OutputType>Library</OutputType>");
    std::fs::write(temp_dir.path().join("Demo.csproj"), csproj).unwrap();

    let (_, manifest) = convert(temp_dir.path(), true);

    assert!(manifest.as_object().unwrap().get("buildOptions").is_none());
}
