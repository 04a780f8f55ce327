// hdiutil-core/src/options.rs
//
// Options shared by several verbs. Each type encodes once and exposes that
// encoding under every verb capability it is valid for; a type missing
// from a verb's capability list simply does not implement that verb's
// trait, and the misuse never compiles.

use std::fmt;

use crate::attach::AttachOption;
use crate::convert::ConvertOption;
use crate::create::CreateOption;
use crate::detach::DetachOption;
use crate::flag::{bool_flag, key_value_flag, string_flag, string_list_flag};
use crate::makehybrid::MakehybridOption;
use crate::verify::VerifyOption;

/// Cipher strength for encrypted images.
///
/// Both run AES in CBC mode over 512-byte blocks; 256-bit keys trade speed
/// for margin. When an encrypted image is attached or verified, the same
/// option names the cipher to expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encryption {
    Aes128,
    Aes256,
}

impl Encryption {
    /// Canonical name as hdiutil spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            Encryption::Aes128 => "AES-128",
            Encryption::Aes256 => "AES-256",
        }
    }

    fn args(self) -> Vec<String> {
        string_flag("encryption", self.as_str())
    }
}

impl fmt::Display for Encryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AttachOption for Encryption {
    fn attach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl CreateOption for Encryption {
    fn create_args(&self) -> Vec<String> {
        self.args()
    }
}

impl VerifyOption for Encryption {
    fn verify_args(&self) -> Vec<String> {
        self.args()
    }
}

impl ConvertOption for Encryption {
    fn convert_args(&self) -> Vec<String> {
        self.args()
    }
}

impl MakehybridOption for Encryption {
    fn makehybrid_args(&self) -> Vec<String> {
        self.args()
    }
}

/// Read a null-terminated passphrase from standard input instead of
/// prompting. Unlike a passphrase argument, nothing secret lands in the
/// process table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stdinpass(pub bool);

impl Stdinpass {
    fn args(self) -> Vec<String> {
        bool_flag("stdinpass", self.0)
    }
}

impl AttachOption for Stdinpass {
    fn attach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl VerifyOption for Stdinpass {
    fn verify_args(&self) -> Vec<String> {
        self.args()
    }
}

impl ConvertOption for Stdinpass {
    fn convert_args(&self) -> Vec<String> {
        self.args()
    }
}

impl MakehybridOption for Stdinpass {
    fn makehybrid_args(&self) -> Vec<String> {
        self.args()
    }
}

/// Force the passphrase prompt even when certificate protection would
/// otherwise satisfy the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Agentpass(pub bool);

impl Agentpass {
    fn args(self) -> Vec<String> {
        bool_flag("agentpass", self.0)
    }
}

impl AttachOption for Agentpass {
    fn attach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl VerifyOption for Agentpass {
    fn verify_args(&self) -> Vec<String> {
        self.args()
    }
}

impl ConvertOption for Agentpass {
    fn convert_args(&self) -> Vec<String> {
        self.args()
    }
}

impl MakehybridOption for Agentpass {
    fn makehybrid_args(&self) -> Vec<String> {
        self.args()
    }
}

/// Keychain file holding the secret that matches the certificate an
/// encrypted image was created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recover(pub String);

impl AttachOption for Recover {
    fn attach_args(&self) -> Vec<String> {
        string_flag("recover", &self.0)
    }
}

/// Secondary access certificate (DER-encoded) for the image being created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate(pub String);

impl ConvertOption for Certificate {
    fn convert_args(&self) -> Vec<String> {
        string_flag("certificate", &self.0)
    }
}

/// Public keys, as hexadecimal hashes, protecting the image being created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pubkey(pub Vec<String>);

impl Pubkey {
    fn args(&self) -> Vec<String> {
        string_list_flag("pubkey", &self.0)
    }
}

impl CreateOption for Pubkey {
    fn create_args(&self) -> Vec<String> {
        self.args()
    }
}

impl ConvertOption for Pubkey {
    fn convert_args(&self) -> Vec<String> {
        self.args()
    }
}

/// Certificate authority certificate for http(s)-backed images, either a
/// PEM file or a directory of certificates prepared with c_rehash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cacert(pub String);

impl Cacert {
    fn args(&self) -> Vec<String> {
        string_flag("cacert", &self.0)
    }
}

impl AttachOption for Cacert {
    fn attach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl ConvertOption for Cacert {
    fn convert_args(&self) -> Vec<String> {
        self.args()
    }
}

impl MakehybridOption for Cacert {
    fn makehybrid_args(&self) -> Vec<String> {
        self.args()
    }
}

/// Ignore SSL host validation failures when reaching an http(s)-backed
/// image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insecurehttp(pub bool);

impl Insecurehttp {
    fn args(self) -> Vec<String> {
        bool_flag("insecurehttp", self.0)
    }
}

impl AttachOption for Insecurehttp {
    fn attach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl ConvertOption for Insecurehttp {
    fn convert_args(&self) -> Vec<String> {
        self.args()
    }
}

impl MakehybridOption for Insecurehttp {
    fn makehybrid_args(&self) -> Vec<String> {
        self.args()
    }
}

/// Shadow file receiving all writes while the base image stays untouched;
/// on read, blocks present in the shadow win. The tool creates the file
/// when missing and defaults the path to `<image>.shadow`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shadow(pub String);

impl Shadow {
    fn args(&self) -> Vec<String> {
        string_flag("shadow", &self.0)
    }
}

impl AttachOption for Shadow {
    fn attach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl ConvertOption for Shadow {
    fn convert_args(&self) -> Vec<String> {
        self.args()
    }
}

impl MakehybridOption for Shadow {
    fn makehybrid_args(&self) -> Vec<String> {
        self.args()
    }
}

/// Key/value property for the disk image recognition system, applied to
/// the source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrcImageKey {
    pub key: String,
    pub value: String,
}

impl SrcImageKey {
    fn args(&self) -> Vec<String> {
        key_value_flag("srcimagekey", &self.key, &self.value)
    }
}

impl AttachOption for SrcImageKey {
    fn attach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl CreateOption for SrcImageKey {
    fn create_args(&self) -> Vec<String> {
        self.args()
    }
}

impl ConvertOption for SrcImageKey {
    fn convert_args(&self) -> Vec<String> {
        self.args()
    }
}

impl MakehybridOption for SrcImageKey {
    fn makehybrid_args(&self) -> Vec<String> {
        self.args()
    }
}

/// Key/value property applied to the image being created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TgtImageKey {
    pub key: String,
    pub value: String,
}

impl TgtImageKey {
    fn args(&self) -> Vec<String> {
        key_value_flag("tgtimagekey", &self.key, &self.value)
    }
}

impl AttachOption for TgtImageKey {
    fn attach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl CreateOption for TgtImageKey {
    fn create_args(&self) -> Vec<String> {
        self.args()
    }
}

impl ConvertOption for TgtImageKey {
    fn convert_args(&self) -> Vec<String> {
        self.args()
    }
}

/// Key/value property for the recognition system where only one image is
/// in play; the tool treats it as the source or target key as appropriate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageKey {
    pub key: String,
    pub value: String,
}

impl ImageKey {
    fn args(&self) -> Vec<String> {
        key_value_flag("imagekey", &self.key, &self.value)
    }
}

impl AttachOption for ImageKey {
    fn attach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl CreateOption for ImageKey {
    fn create_args(&self) -> Vec<String> {
        self.args()
    }
}

/// Ask for plist-formatted result output instead of human-readable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plist(pub bool);

impl Plist {
    fn args(self) -> Vec<String> {
        bool_flag("plist", self.0)
    }
}

impl AttachOption for Plist {
    fn attach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl VerifyOption for Plist {
    fn verify_args(&self) -> Vec<String> {
        self.args()
    }
}

impl ConvertOption for Plist {
    fn convert_args(&self) -> Vec<String> {
        self.args()
    }
}

/// Machine-parseable progress output (PERCENTAGE lines, -1 for
/// indeterminate), meant for programs driving the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Puppetstrings(pub bool);

impl Puppetstrings {
    fn args(self) -> Vec<String> {
        bool_flag("puppetstrings", self.0)
    }
}

impl AttachOption for Puppetstrings {
    fn attach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl VerifyOption for Puppetstrings {
    fn verify_args(&self) -> Vec<String> {
        self.args()
    }
}

impl ConvertOption for Puppetstrings {
    fn convert_args(&self) -> Vec<String> {
        self.args()
    }
}

impl MakehybridOption for Puppetstrings {
    fn makehybrid_args(&self) -> Vec<String> {
        self.args()
    }
}

/// Extra progress output and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verbose(pub bool);

impl Verbose {
    fn args(self) -> Vec<String> {
        bool_flag("verbose", self.0)
    }
}

impl AttachOption for Verbose {
    fn attach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl DetachOption for Verbose {
    fn detach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl CreateOption for Verbose {
    fn create_args(&self) -> Vec<String> {
        self.args()
    }
}

impl ConvertOption for Verbose {
    fn convert_args(&self) -> Vec<String> {
        self.args()
    }
}

impl MakehybridOption for Verbose {
    fn makehybrid_args(&self) -> Vec<String> {
        self.args()
    }
}

/// Close the output streams, leaving the exit status as the only result.
/// Under attach this also suppresses the device-node lines, so the scanned
/// node comes back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quiet(pub bool);

impl Quiet {
    fn args(self) -> Vec<String> {
        bool_flag("quiet", self.0)
    }
}

impl AttachOption for Quiet {
    fn attach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl DetachOption for Quiet {
    fn detach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl CreateOption for Quiet {
    fn create_args(&self) -> Vec<String> {
        self.args()
    }
}

impl MakehybridOption for Quiet {
    fn makehybrid_args(&self) -> Vec<String> {
        self.args()
    }
}

/// Very verbose output, including internal framework progress. Implies
/// `-verbose` on current systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debug(pub bool);

impl Debug {
    fn args(self) -> Vec<String> {
        bool_flag("debug", self.0)
    }
}

impl AttachOption for Debug {
    fn attach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl DetachOption for Debug {
    fn detach_args(&self) -> Vec<String> {
        self.args()
    }
}

impl CreateOption for Debug {
    fn create_args(&self) -> Vec<String> {
        self.args()
    }
}

impl ConvertOption for Debug {
    fn convert_args(&self) -> Vec<String> {
        self.args()
    }
}

impl MakehybridOption for Debug {
    fn makehybrid_args(&self) -> Vec<String> {
        self.args()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encryption_names_match_the_tool() {
        assert_eq!(Encryption::Aes128.to_string(), "AES-128");
        assert_eq!(Encryption::Aes256.to_string(), "AES-256");
    }

    #[test]
    fn encryption_encodes_the_same_under_every_verb() {
        let expected = ["-encryption", "AES-128"];
        assert_eq!(Encryption::Aes128.attach_args(), expected);
        assert_eq!(Encryption::Aes128.create_args(), expected);
        assert_eq!(Encryption::Aes128.verify_args(), expected);
        assert_eq!(Encryption::Aes128.convert_args(), expected);
        assert_eq!(Encryption::Aes128.makehybrid_args(), expected);
    }

    #[test]
    fn image_key_family_joins_key_and_value() {
        let src = SrcImageKey {
            key: "zlib-level".to_string(),
            value: "9".to_string(),
        };
        let tgt = TgtImageKey {
            key: "block-size".to_string(),
            value: "4096".to_string(),
        };
        let plain = ImageKey {
            key: "encrypted-encoding-version".to_string(),
            value: "2".to_string(),
        };
        assert_eq!(src.attach_args(), ["-srcimagekey", "zlib-level=9"]);
        assert_eq!(tgt.create_args(), ["-tgtimagekey", "block-size=4096"]);
        assert_eq!(plain.create_args(), ["-imagekey", "encrypted-encoding-version=2"]);
    }

    #[test]
    fn pubkey_hashes_spread_into_tokens() {
        let keys = Pubkey(vec!["0123".to_string(), "89ab".to_string()]);
        assert_eq!(keys.create_args(), ["-pubkey", "0123", "89ab"]);
        assert_eq!(keys.convert_args(), ["-pubkey", "0123", "89ab"]);
    }

    #[test]
    fn unset_output_controls_vanish() {
        assert!(Verbose(false).attach_args().is_empty());
        assert!(Quiet(false).detach_args().is_empty());
        assert!(Debug(false).create_args().is_empty());
        assert!(Plist(false).verify_args().is_empty());
    }

    #[test]
    fn set_output_controls_emit_their_flag() {
        assert_eq!(Verbose(true).detach_args(), ["-verbose"]);
        assert_eq!(Quiet(true).create_args(), ["-quiet"]);
        assert_eq!(Debug(true).makehybrid_args(), ["-debug"]);
        assert_eq!(Puppetstrings(true).verify_args(), ["-puppetstrings"]);
    }

    #[test]
    fn protection_options_encode_their_payloads() {
        assert_eq!(
            Recover("/Users/me/recover.keychain".to_string()).attach_args(),
            ["-recover", "/Users/me/recover.keychain"]
        );
        assert_eq!(
            Certificate("/tmp/corp.der".to_string()).convert_args(),
            ["-certificate", "/tmp/corp.der"]
        );
        assert_eq!(
            Cacert("/etc/ssl/ca.pem".to_string()).makehybrid_args(),
            ["-cacert", "/etc/ssl/ca.pem"]
        );
        assert_eq!(Insecurehttp(true).attach_args(), ["-insecurehttp"]);
        assert_eq!(
            Shadow("/tmp/work.shadow".to_string()).convert_args(),
            ["-shadow", "/tmp/work.shadow"]
        );
    }
}
