//! csproj to xproj + project.json conversion engine.
//!
//! Converts a legacy MSBuild project description (an XML project file
//! plus an optional XML package list) into the newer xproj wrapper and
//! a `project.json` dependency manifest.
//!
//! The pipeline is a single deterministic pass: [`ProjectReader`]
//! parses the two source documents into plain-data records, and
//! [`ProjectWriter`] renders those records into the two output
//! documents. The only non-determinism in the whole system is the fresh
//! project guid generated when a conversion does not replace the
//! original file.
//!
//! # Example
//!
//! ```no_run
//! use cx_common::DiskFileSystem;
//! use cx_convert::{ProjectReader, ProjectWriter};
//! use std::path::Path;
//!
//! let reader = ProjectReader::new(DiskFileSystem);
//! let metadata = reader.read_project(Path::new("Sample/Sample.csproj")).unwrap();
//! let packages = reader.read_package_list(Path::new("Sample/packages.config")).unwrap();
//!
//! let writer = ProjectWriter::new(DiskFileSystem);
//! writer.write_project(Path::new("Sample/Sample.xproj"), &metadata, false).unwrap();
//! writer.write_project_json(Path::new("Sample"), &metadata, &packages).unwrap();
//! ```

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{ConvertError, Result};
pub use reader::{ProjectReader, MSBUILD_NS};
pub use writer::ProjectWriter;
