// hdiutil-core/src/detach.rs
//
// The `detach` verb.

use crate::command::{Hdiutil, Verb};
use crate::error::{Error, Result};
use crate::flag::bool_flag;

/// Capability for options `hdiutil detach` accepts.
pub trait DetachOption {
    /// Argument tokens this option contributes to a detach command.
    fn detach_args(&self) -> Vec<String>;
}

/// Ignore open files on mounted volumes and detach anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Force(pub bool);

impl DetachOption for Force {
    fn detach_args(&self) -> Vec<String> {
        bool_flag("force", self.0)
    }
}

pub(crate) fn detach_argv(device: &str, options: &[&dyn DetachOption]) -> Result<Vec<String>> {
    if device.is_empty() {
        return Err(Error::MissingRequired("device node"));
    }

    let mut argv = vec![Verb::Detach.as_str().to_string(), device.to_string()];
    for option in options {
        argv.extend(option.detach_args());
    }
    Ok(argv)
}

impl Hdiutil {
    /// Detaches a device, unmounting any volumes on it and terminating the
    /// helper process where one is involved.
    ///
    /// Takes the block device path as reported by attach, e.g.
    /// `/dev/disk5`; a [`crate::DeviceNode`] goes through
    /// [`as_str`](crate::DeviceNode::as_str).
    pub fn detach(&self, device: &str, options: &[&dyn DetachOption]) -> Result<()> {
        let argv = detach_argv(device, options)?;
        self.run(Verb::Detach, &argv)?;
        log::debug!("detached {device}");
        Ok(())
    }
}

/// [`Hdiutil::detach`] against the conventional binary path.
pub fn detach(device: &str, options: &[&dyn DetachOption]) -> Result<()> {
    Hdiutil::default().detach(device, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Quiet;

    #[test]
    fn argv_is_verb_then_device_then_options() {
        let argv = detach_argv("/dev/disk5", &[&Force(true)]).unwrap();
        assert_eq!(argv, ["detach", "/dev/disk5", "-force"]);
    }

    #[test]
    fn bare_detach_has_no_option_tokens() {
        let argv = detach_argv("/dev/disk5", &[]).unwrap();
        assert_eq!(argv, ["detach", "/dev/disk5"]);
    }

    #[test]
    fn empty_device_node_is_rejected() {
        let err = detach_argv("", &[&Force(true)]).unwrap_err();
        assert!(matches!(err, Error::MissingRequired("device node")));
    }

    #[test]
    fn shared_options_encode_under_detach() {
        let argv = detach_argv("/dev/disk5", &[&Quiet(true), &Force(false)]).unwrap();
        assert_eq!(argv, ["detach", "/dev/disk5", "-quiet"]);
    }
}
