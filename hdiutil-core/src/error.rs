// hdiutil-core/src/error.rs
//
// Error types for command composition and execution.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::command::Verb;

/// Errors produced while composing or executing an hdiutil command.
///
/// Option encoding itself is total and never appears here. A parse miss
/// during result extraction is not an error either; it degrades to an empty
/// device node (see [`crate::DeviceNode::scan`]).
#[derive(Error, Debug)]
pub enum Error {
    /// A required positional argument was empty. Arguments are checked for
    /// presence only; nothing validates that a path exists or points at a
    /// disk image.
    #[error("missing required {0}")]
    MissingRequired(&'static str),

    /// The external binary could not be started at all (missing, not
    /// executable, wrong architecture, ...).
    #[error("failed to launch {}: {source}", .binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The external process ran but exited non-zero. Captured stderr text
    /// is attached verbatim; the operation may have had partial side
    /// effects that are not undone here.
    #[error("hdiutil {verb} failed ({status}): {stderr}")]
    CommandFailed {
        verb: Verb,
        status: ExitStatus,
        stderr: String,
    },

    /// A display name could not be mapped back onto an enumeration member.
    /// Only reachable through the `FromStr` impls used by front ends.
    #[error("unrecognized {kind} name: {value:?}")]
    UnknownName { kind: &'static str, value: String },
}

/// Result type for hdiutil-core operations.
pub type Result<T> = std::result::Result<T, Error>;
