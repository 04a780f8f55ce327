// hdiutil-core/src/verify.rs
//
// The `verify` verb.

use crate::command::{Hdiutil, Verb};
use crate::error::{Error, Result};
use crate::flag::bool_no_flag;

/// Capability for options `hdiutil verify` accepts.
pub trait VerifyOption {
    /// Argument tokens this option contributes to a verify command.
    fn verify_args(&self) -> Vec<String>;
}

/// Whether the verification result is remembered so later attaches can
/// skip the checksum pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cache(pub bool);

impl VerifyOption for Cache {
    fn verify_args(&self) -> Vec<String> {
        bool_no_flag("cache", self.0)
    }
}

pub(crate) fn verify_argv(image: &str, options: &[&dyn VerifyOption]) -> Result<Vec<String>> {
    if image.is_empty() {
        return Err(Error::MissingRequired("image path"));
    }

    let mut argv = vec![Verb::Verify.as_str().to_string(), image.to_string()];
    for option in options {
        argv.extend(option.verify_args());
    }
    Ok(argv)
}

impl Hdiutil {
    /// Recomputes the image checksum and compares it against the stored
    /// one. Only works on checksummed image formats; a mismatch is a
    /// non-zero exit from the tool.
    pub fn verify(&self, image: &str, options: &[&dyn VerifyOption]) -> Result<()> {
        let argv = verify_argv(image, options)?;
        self.run(Verb::Verify, &argv)?;
        log::debug!("verified {image}");
        Ok(())
    }
}

/// [`Hdiutil::verify`] against the conventional binary path.
pub fn verify(image: &str, options: &[&dyn VerifyOption]) -> Result<()> {
    Hdiutil::default().verify(image, options)
}
