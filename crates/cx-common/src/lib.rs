//! Shared types for csproj2x.
//!
//! This crate provides the plain-data records exchanged between the
//! reader and writer halves of the conversion engine, plus the
//! filesystem capability the engine performs all I/O through:
//! - [`ProjectMetadata`]: everything extracted from a legacy project file
//! - [`PackageEntry`]: one pinned dependency from a package list
//! - [`FileSystem`] / [`DiskFileSystem`]: the three file operations the
//!   engine needs, behind a trait so tests can run in temp directories

pub mod fs;
pub mod metadata;

pub use fs::{DiskFileSystem, FileSystem};
pub use metadata::{PackageEntry, ProjectMetadata};
