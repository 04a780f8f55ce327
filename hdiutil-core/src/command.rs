// hdiutil-core/src/command.rs
//
// The executor: the verb vocabulary, the `Hdiutil` handle holding the
// external binary path, and synchronous execution of an assembled argument
// vector.

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::{Error, Result};

/// Conventional filesystem location of the hdiutil binary.
pub const DEFAULT_BINARY: &str = "/usr/bin/hdiutil";

/// Environment variable consulted by [`Hdiutil::from_env`] to override the
/// binary path, e.g. to point the library at a stand-in tool.
pub const BINARY_ENV_VAR: &str = "HDIUTIL_PATH";

/// The disk-image operation requested from the external tool.
///
/// The verb is the first argument-vector token and decides which options
/// the command accepts and which positional arguments it requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Create,
    Attach,
    Detach,
    Convert,
    Verify,
    Makehybrid,
}

impl Verb {
    /// Command token as hdiutil spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Create => "create",
            Verb::Attach => "attach",
            Verb::Detach => "detach",
            Verb::Convert => "convert",
            Verb::Verify => "verify",
            Verb::Makehybrid => "makehybrid",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle on the external hdiutil binary.
///
/// The binary path is per-handle state rather than a process-wide constant
/// so tests and unusual installs can point the library elsewhere. Each verb
/// has a corresponding method; every method assembles one argument vector,
/// spawns one child process, and blocks until it terminates. No state is
/// kept between invocations, so one handle can be shared freely across
/// threads.
#[derive(Debug, Clone)]
pub struct Hdiutil {
    binary: PathBuf,
}

impl Default for Hdiutil {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_BINARY),
        }
    }
}

impl Hdiutil {
    /// Handle on the conventional binary path, `/usr/bin/hdiutil`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle on an explicit binary path.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Handle on `$HDIUTIL_PATH` if set and non-empty, the conventional
    /// path otherwise.
    pub fn from_env() -> Self {
        Self::from_env_value(env::var_os(BINARY_ENV_VAR))
    }

    fn from_env_value(value: Option<OsString>) -> Self {
        match value {
            Some(path) if !path.is_empty() => Self::with_binary(PathBuf::from(path)),
            _ => Self::default(),
        }
    }

    /// Path of the binary this handle invokes.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Runs the binary with the given argument vector (verb token
    /// included), waiting for termination and capturing both output
    /// streams.
    ///
    /// Success is exactly a zero exit status. A non-zero status surfaces as
    /// [`Error::CommandFailed`] with the captured stderr attached; whatever
    /// side effects the child had by then are left in place.
    pub(crate) fn run(&self, verb: Verb, argv: &[String]) -> Result<Output> {
        log::debug!("running: {} {}", self.binary.display(), argv.join(" "));

        let output = Command::new(&self.binary)
            .args(argv)
            .output()
            .map_err(|source| Error::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            log::debug!("hdiutil {verb} exited with {}", output.status);
            return Err(Error::CommandFailed {
                verb,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(output)
    }
}
