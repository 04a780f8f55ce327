//! Typed front end for Apple's `hdiutil` disk image utility.
//!
//! hdiutil manipulates disk images: files that emulate disks, which macOS
//! attaches as devices the way it would external drives. This crate
//! composes hdiutil command lines from strongly-typed options, runs the
//! tool synchronously, and extracts the device node identifiers it
//! reports, so callers never hand-assemble flag strings. None of the
//! disk-image formats are implemented here; every real operation happens
//! inside hdiutil itself, and nothing works where the tool is absent.
//!
//! Verbs map to methods on [`Hdiutil`], or to the module-level functions
//! that run against the conventional `/usr/bin/hdiutil` path. Options are
//! per-verb capabilities: a type usable with several verbs implements each
//! verb's option trait, so handing an option to a verb that cannot take it
//! is a compile error rather than a tool error. Within one invocation,
//! options are emitted in exactly the order the caller passed them.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use hdiutil_core::attach::{MountPoint, Verify};
//! use hdiutil_core::create::ImageType;
//! use hdiutil_core::{FileSystem, SizeSpec};
//!
//! // A 20 MB HFS+ sparse bundle.
//! hdiutil_core::create(
//!     "test",
//!     &SizeSpec::Megabytes(20),
//!     &[&FileSystem::HfsPlus, &ImageType::SparseBundle],
//! ).unwrap();
//!
//! let node = hdiutil_core::attach(
//!     "test.sparsebundle",
//!     &[&Verify(false), &MountPoint("./test".to_string())],
//! ).unwrap();
//!
//! if !node.is_empty() {
//!     println!("{} ({}, device {})", node, node.raw_device_node(), node.device_number());
//!     hdiutil_core::detach(node.as_str(), &[]).unwrap();
//! }
//! ```
//!
//! Execution is stateless: each call builds one argument vector, spawns
//! one child process, and blocks until it exits. Failures carry the tool's
//! stderr; side effects of a failed call (a half-written image, an
//! attached device) are not rolled back.

pub mod attach;
pub mod command;
pub mod convert;
pub mod create;
pub mod detach;
pub mod device;
pub mod error;
mod flag;
pub mod makehybrid;
pub mod options;
pub mod verify;

// --- Re-exports (public API) ---

pub use attach::attach;
pub use command::{BINARY_ENV_VAR, DEFAULT_BINARY, Hdiutil, Verb};
pub use convert::{ImageFormat, convert};
pub use create::{FileSystem, SizeSpec, create};
pub use detach::detach;
pub use device::DeviceNode;
pub use error::{Error, Result};
pub use makehybrid::makehybrid;
pub use options::Encryption;
pub use verify::verify;
