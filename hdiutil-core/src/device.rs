// hdiutil-core/src/device.rs
//
// Result extraction: the device node reported by `attach` and the values
// derived from it.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static DEVICE_NODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/dev/disk\d+").unwrap());

/// A block device node as printed by hdiutil, e.g. `/dev/disk4`.
///
/// Produced by `attach`, consumed by `detach` and by anything else
/// addressing an already-attached image. The node is an opaque handle into
/// the OS disk-arbitration layer; whether it still refers to an attached
/// device is owned by the OS, not by this library. A node may be empty when
/// attach output carried no recognizable device path (e.g. under `-quiet`);
/// check [`DeviceNode::is_empty`] before use.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceNode(String);

impl DeviceNode {
    /// Wraps an existing device path string.
    pub fn new(node: impl Into<String>) -> Self {
        Self(node.into())
    }

    /// Scans tool output for the first `/dev/disk<N>` substring.
    ///
    /// The whole-disk line is printed before any slice lines, so the first
    /// match is the device for the image as a whole. No match yields the
    /// empty node, not an error.
    pub fn scan(output: &str) -> Self {
        match DEVICE_NODE.find(output) {
            Some(found) => Self(found.as_str().to_string()),
            None => {
                log::warn!("no device node in attach output");
                Self(String::new())
            }
        }
    }

    /// The device path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no device path was extracted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The matching raw (character) device path, `/dev/disk3` becoming
    /// `/dev/rdisk3`.
    ///
    /// This is a pure string rewrite of the first `disk` segment; nothing
    /// checks that the raw node exists. Only apply it to a block node, a
    /// raw path fed back in would gain a second `r`.
    pub fn raw_device_node(&self) -> String {
        self.0.replacen("disk", "rdisk", 1)
    }

    /// The trailing device number, e.g. `5` for `/dev/disk5`.
    ///
    /// Anything that does not parse as `/dev/disk<N>` yields 0, which is
    /// indistinguishable from a genuine device 0. Callers who need the
    /// distinction should keep the node itself around.
    pub fn device_number(&self) -> u32 {
        let digits = self.0.strip_prefix("/dev/disk").unwrap_or(&self.0);
        digits.parse().unwrap_or(0)
    }
}

impl fmt::Display for DeviceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DeviceNode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
