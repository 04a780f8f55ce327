// hdiutil-core/src/attach.rs
//
// The `attach` verb: its option set and the operation itself. Attach is the
// one verb with structured output; captured stdout is scanned for the
// device node the OS assigned.

use crate::command::{Hdiutil, Verb};
use crate::device::DeviceNode;
use crate::error::{Error, Result};
use crate::flag::{bool_flag, bool_no_flag, key_value_flag, string_flag};

/// Capability for options `hdiutil attach` accepts.
///
/// A type usable with several verbs implements each verb's capability
/// trait, encoding itself once per verb. The trait bound on
/// [`Hdiutil::attach`] is what keeps, say, a convert-only option out of an
/// attach invocation at compile time.
pub trait AttachOption {
    /// Argument tokens this option contributes to an attach command.
    fn attach_args(&self) -> Vec<String>;
}

// --- Attach-only options ---

/// Forced read/write posture for the attached device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RwMode {
    /// Force the device read-only regardless of the image.
    Readonly,
    /// Attach read/write even where the DiskImages framework would have
    /// chosen read-only, e.g. to modify the HFS+ side of a hybrid image.
    ReadWrite,
}

impl AttachOption for RwMode {
    fn attach_args(&self) -> Vec<String> {
        match self {
            RwMode::Readonly => bool_flag("readonly", true),
            RwMode::ReadWrite => bool_flag("readwrite", true),
        }
    }
}

/// Whether to attach in-kernel rather than through the default
/// helper-process path. The in-kernel path fails outright for image types
/// only the helper supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel(pub bool);

impl AttachOption for Kernel {
    fn attach_args(&self) -> Vec<String> {
        bool_no_flag("kernel", self.0)
    }
}

/// Mark the device non-removable. Root only, and only a reboot cleanly
/// undoes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotRemovable(pub bool);

impl AttachOption for NotRemovable {
    fn attach_args(&self) -> Vec<String> {
        bool_flag("notremovable", self.0)
    }
}

/// How hard attach tries to mount filesystems found in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mount {
    /// Attach fails unless the filesystems mount.
    Required,
    /// Mount what mounts, attach regardless.
    Optional,
    /// Attach the device without mounting anything.
    Suppressed,
}

impl Mount {
    fn as_str(self) -> &'static str {
        match self {
            Mount::Required => "required",
            Mount::Optional => "optional",
            Mount::Suppressed => "suppressed",
        }
    }
}

impl AttachOption for Mount {
    fn attach_args(&self) -> Vec<String> {
        string_flag("mount", self.as_str())
    }
}

/// Shorthand for [`Mount::Suppressed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoMount(pub bool);

impl AttachOption for NoMount {
    fn attach_args(&self) -> Vec<String> {
        bool_flag("nomount", self.0)
    }
}

/// Mount volumes under subdirectories of this path instead of /Volumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountRoot(pub String);

impl AttachOption for MountRoot {
    fn attach_args(&self) -> Vec<String> {
        string_flag("mountroot", &self.0)
    }
}

/// Like [`MountRoot`] with mkdtemp-style randomized mount directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountRandom(pub String);

impl AttachOption for MountRandom {
    fn attach_args(&self) -> Vec<String> {
        string_flag("mountrandom", &self.0)
    }
}

/// Mount the volume at this exact path instead of under /Volumes. Only
/// meaningful for single-volume images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint(pub String);

impl AttachOption for MountPoint {
    fn attach_args(&self) -> Vec<String> {
        string_flag("mountpoint", &self.0)
    }
}

/// Keep the mounted volumes out of Finder and other browsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoBrowse(pub bool);

impl AttachOption for NoBrowse {
    fn attach_args(&self) -> Vec<String> {
        bool_flag("nobrowse", self.0)
    }
}

/// Whether ownership information on the mounted filesystems is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owners {
    On,
    Off,
}

impl AttachOption for Owners {
    fn attach_args(&self) -> Vec<String> {
        string_flag(
            "owners",
            match self {
                Owners::On => "on",
                Owners::Off => "off",
            },
        )
    }
}

/// Key/value property set on the device in the IOKit registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveKey {
    pub key: String,
    pub value: String,
}

impl AttachOption for DriveKey {
    fn attach_args(&self) -> Vec<String> {
        key_value_flag("drivekey", &self.key, &self.value)
    }
}

/// Subsection of the image to attach, in 0-based 512-byte sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Everything from this sector offset on.
    Offset(u64),
    /// An inclusive first-to-last sector range.
    Range(u64, u64),
    /// A start sector and a sector count.
    StartCount(u64, u64),
}

impl AttachOption for Section {
    fn attach_args(&self) -> Vec<String> {
        let subspec = match self {
            Section::Offset(offset) => offset.to_string(),
            Section::Range(first, last) => format!("{first}-{last}"),
            Section::StartCount(start, count) => format!("{start},{count}"),
        };
        string_flag("section", &subspec)
    }
}

/// Whether the image checksum is verified before attaching. Checksummed
/// images are verified by default; the negative form skips that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verify(pub bool);

impl AttachOption for Verify {
    fn attach_args(&self) -> Vec<String> {
        bool_no_flag("verify", self.0)
    }
}

/// Whether CRC32-style checksum failures abort the attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoreBadChecksums(pub bool);

impl AttachOption for IgnoreBadChecksums {
    fn attach_args(&self) -> Vec<String> {
        bool_no_flag("ignorebadchecksums", self.0)
    }
}

/// Whether IDME actions run when attaching an IDME image. Off by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Idme(pub bool);

impl AttachOption for Idme {
    fn attach_args(&self) -> Vec<String> {
        bool_no_flag("idme", self.0)
    }
}

/// Whether IDME results are revealed in the Finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdmeReveal(pub bool);

impl AttachOption for IdmeReveal {
    fn attach_args(&self) -> Vec<String> {
        bool_no_flag("idmereveal", self.0)
    }
}

/// Whether IDME images are put in the trash after processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdmeTrash(pub bool);

impl AttachOption for IdmeTrash {
    fn attach_args(&self) -> Vec<String> {
        bool_no_flag("idmetrash", self.0)
    }
}

/// Whether volumes auto-open in the Finder after attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoOpen(pub bool);

impl AttachOption for AutoOpen {
    fn attach_args(&self) -> Vec<String> {
        bool_no_flag("autoopen", self.0)
    }
}

/// Whether read-only volumes auto-open in the Finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoOpenRo(pub bool);

impl AttachOption for AutoOpenRo {
    fn attach_args(&self) -> Vec<String> {
        bool_no_flag("autoopenro", self.0)
    }
}

/// Whether read/write volumes auto-open in the Finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoOpenRw(pub bool);

impl AttachOption for AutoOpenRw {
    fn attach_args(&self) -> Vec<String> {
        bool_no_flag("autoopenrw", self.0)
    }
}

/// Whether fsck runs unconditionally before mounting. By default only
/// quarantined images that have not yet passed are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoFsck(pub bool);

impl AttachOption for AutoFsck {
    fn attach_args(&self) -> Vec<String> {
        bool_no_flag("autofsck", self.0)
    }
}

// --- The operation ---

pub(crate) fn attach_argv(image: &str, options: &[&dyn AttachOption]) -> Result<Vec<String>> {
    if image.is_empty() {
        return Err(Error::MissingRequired("image path"));
    }

    let mut argv = vec![Verb::Attach.as_str().to_string(), image.to_string()];
    for option in options {
        argv.extend(option.attach_args());
    }
    Ok(argv)
}

impl Hdiutil {
    /// Attaches a disk image and reports the device node the OS assigned.
    ///
    /// Options are emitted after the image path in the order given. The
    /// returned node may be empty when the tool printed no device line
    /// (see [`DeviceNode::scan`]); on failure the image may still have been
    /// partially attached, and cleanup is the caller's.
    pub fn attach(&self, image: &str, options: &[&dyn AttachOption]) -> Result<DeviceNode> {
        let argv = attach_argv(image, options)?;
        let output = self.run(Verb::Attach, &argv)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        log::trace!("attach output: {stdout}");

        let node = DeviceNode::scan(&stdout);
        if !node.is_empty() {
            log::debug!("attached {image} at {node}");
        }
        Ok(node)
    }
}

/// [`Hdiutil::attach`] against the conventional binary path.
pub fn attach(image: &str, options: &[&dyn AttachOption]) -> Result<DeviceNode> {
    Hdiutil::default().attach(image, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Encryption, Shadow, Stdinpass};

    #[test]
    fn argv_is_verb_then_image_then_options() {
        let argv = attach_argv(
            "test.sparsebundle",
            &[
                &Verify(false),
                &AutoFsck(false),
                &MountPoint("./test".to_string()),
            ],
        )
        .unwrap();
        assert_eq!(
            argv,
            [
                "attach",
                "test.sparsebundle",
                "-noverify",
                "-noautofsck",
                "-mountpoint",
                "./test"
            ]
        );
    }

    #[test]
    fn options_keep_caller_order() {
        let first = attach_argv("img.dmg", &[&NoBrowse(true), &Verify(false)]).unwrap();
        let second = attach_argv("img.dmg", &[&Verify(false), &NoBrowse(true)]).unwrap();
        assert_eq!(first, ["attach", "img.dmg", "-nobrowse", "-noverify"]);
        assert_eq!(second, ["attach", "img.dmg", "-noverify", "-nobrowse"]);
    }

    #[test]
    fn empty_image_path_is_rejected() {
        let err = attach_argv("", &[]).unwrap_err();
        assert!(matches!(err, Error::MissingRequired("image path")));
    }

    #[test]
    fn unset_plain_booleans_vanish() {
        let argv = attach_argv("img.dmg", &[&NoBrowse(false), &NoMount(false)]).unwrap();
        assert_eq!(argv, ["attach", "img.dmg"]);
    }

    #[test]
    fn rw_mode_picks_one_flag() {
        assert_eq!(RwMode::Readonly.attach_args(), ["-readonly"]);
        assert_eq!(RwMode::ReadWrite.attach_args(), ["-readwrite"]);
    }

    #[test]
    fn mount_modes_render_their_names() {
        assert_eq!(Mount::Required.attach_args(), ["-mount", "required"]);
        assert_eq!(Mount::Optional.attach_args(), ["-mount", "optional"]);
        assert_eq!(Mount::Suppressed.attach_args(), ["-mount", "suppressed"]);
    }

    #[test]
    fn owners_render_on_off() {
        assert_eq!(Owners::On.attach_args(), ["-owners", "on"]);
        assert_eq!(Owners::Off.attach_args(), ["-owners", "off"]);
    }

    #[test]
    fn section_subspecs_render_all_three_shapes() {
        assert_eq!(Section::Offset(8).attach_args(), ["-section", "8"]);
        assert_eq!(Section::Range(16, 31).attach_args(), ["-section", "16-31"]);
        assert_eq!(Section::StartCount(16, 16).attach_args(), ["-section", "16,16"]);
    }

    #[test]
    fn drive_key_joins_key_and_value() {
        let key = DriveKey {
            key: "system-image".to_string(),
            value: "true".to_string(),
        };
        assert_eq!(key.attach_args(), ["-drivekey", "system-image=true"]);
    }

    #[test]
    fn shared_options_encode_under_attach() {
        let argv = attach_argv(
            "secret.dmg",
            &[
                &Encryption::Aes256,
                &Stdinpass(true),
                &Shadow("/tmp/secret.shadow".to_string()),
            ],
        )
        .unwrap();
        assert_eq!(
            argv,
            [
                "attach",
                "secret.dmg",
                "-encryption",
                "AES-256",
                "-stdinpass",
                "-shadow",
                "/tmp/secret.shadow"
            ]
        );
    }
}
