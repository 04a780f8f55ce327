// hdiutil-core/src/makehybrid.rs
//
// The `makehybrid` verb: building a single image that carries several
// filesystems (HFS+, ISO9660, Joliet, UDF) over shared data.

use crate::command::{Hdiutil, Verb};
use crate::error::{Error, Result};
use crate::flag::{bool_flag, int_flag, string_flag};

/// Capability for options `hdiutil makehybrid` accepts.
pub trait MakehybridOption {
    /// Argument tokens this option contributes to a makehybrid command.
    fn makehybrid_args(&self) -> Vec<String>;
}

// --- Filesystem selection ---

/// Generate an HFS+ filesystem in the hybrid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hfs(pub bool);

impl MakehybridOption for Hfs {
    fn makehybrid_args(&self) -> Vec<String> {
        bool_flag("hfs", self.0)
    }
}

/// Generate an ISO9660 level-2 filesystem in the hybrid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iso(pub bool);

impl MakehybridOption for Iso {
    fn makehybrid_args(&self) -> Vec<String> {
        bool_flag("iso", self.0)
    }
}

/// Generate Joliet extensions to ISO9660.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joliet(pub bool);

impl MakehybridOption for Joliet {
    fn makehybrid_args(&self) -> Vec<String> {
        bool_flag("joliet", self.0)
    }
}

/// Generate a UDF filesystem in the hybrid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Udf(pub bool);

impl MakehybridOption for Udf {
    fn makehybrid_args(&self) -> Vec<String> {
        bool_flag("udf", self.0)
    }
}

/// Leave only the UDF structures over the shared data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnlyUdf(pub bool);

impl MakehybridOption for OnlyUdf {
    fn makehybrid_args(&self) -> Vec<String> {
        bool_flag("only-udf", self.0)
    }
}

/// Leave only the ISO9660 structures over the shared data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnlyIso(pub bool);

impl MakehybridOption for OnlyIso {
    fn makehybrid_args(&self) -> Vec<String> {
        bool_flag("only-iso", self.0)
    }
}

/// Leave only the Joliet structures over the shared data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnlyJoliet(pub bool);

impl MakehybridOption for OnlyJoliet {
    fn makehybrid_args(&self) -> Vec<String> {
        bool_flag("only-joliet", self.0)
    }
}

// --- HFS+ details ---

/// Directory blessed as the MacOS system folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HfsBlessedDirectory(pub String);

impl MakehybridOption for HfsBlessedDirectory {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("hfs-blessed-directory", &self.0)
    }
}

/// Folder opened by the Finder when the volume mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HfsOpenfolder(pub String);

impl MakehybridOption for HfsOpenfolder {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("hfs-openfolder", &self.0)
    }
}

/// Size in bytes reserved for an HFS+ startup file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HfsStartupfileSize(pub u64);

impl MakehybridOption for HfsStartupfileSize {
    fn makehybrid_args(&self) -> Vec<String> {
        int_flag("hfs-startupfile-size", self.0)
    }
}

// --- ISO9660 and Joliet details ---

/// Abstract file for the ISO9660/Joliet filesystem, relative to the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractFile(pub String);

impl MakehybridOption for AbstractFile {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("abstract-file", &self.0)
    }
}

/// Bibliography file, relative to the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibliographyFile(pub String);

impl MakehybridOption for BibliographyFile {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("bibliography-file", &self.0)
    }
}

/// Copyright file, relative to the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyrightFile(pub String);

impl MakehybridOption for CopyrightFile {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("copyright-file", &self.0)
    }
}

/// Application field of the ISO9660/Joliet volume header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application(pub String);

impl MakehybridOption for Application {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("application", &self.0)
    }
}

/// Preparer field of the volume header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preparer(pub String);

impl MakehybridOption for Preparer {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("preparer", &self.0)
    }
}

/// Publisher field of the volume header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publisher(pub String);

impl MakehybridOption for Publisher {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("publisher", &self.0)
    }
}

/// System identifier field of the volume header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemId(pub String);

impl MakehybridOption for SystemId {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("system-id", &self.0)
    }
}

/// Keep Mac-specific files (resource forks and the like) visible on the
/// non-HFS filesystems instead of hiding them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepMacSpecific(pub bool);

impl MakehybridOption for KeepMacSpecific {
    fn makehybrid_args(&self) -> Vec<String> {
        bool_flag("keep-mac-specific", self.0)
    }
}

// --- El Torito boot ---

/// Boot image for El Torito booting, relative to the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EltoritoBoot(pub String);

impl MakehybridOption for EltoritoBoot {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("eltorito-boot", &self.0)
    }
}

/// Boot the El Torito image in hard-disk emulation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardDiskBoot(pub bool);

impl MakehybridOption for HardDiskBoot {
    fn makehybrid_args(&self) -> Vec<String> {
        bool_flag("hard-disk-boot", self.0)
    }
}

/// Boot the El Torito image in no-emulation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoEmulBoot(pub bool);

impl MakehybridOption for NoEmulBoot {
    fn makehybrid_args(&self) -> Vec<String> {
        bool_flag("no-emul-boot", self.0)
    }
}

/// Mark the El Torito image non-bootable; the BIOS still allocates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoBoot(pub bool);

impl MakehybridOption for NoBoot {
    fn makehybrid_args(&self) -> Vec<String> {
        bool_flag("no-boot", self.0)
    }
}

/// Load segment address for a no-emulation boot image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootLoadSeg(pub u64);

impl MakehybridOption for BootLoadSeg {
    fn makehybrid_args(&self) -> Vec<String> {
        int_flag("boot-load-seg", self.0)
    }
}

/// Number of virtual sectors to load in no-emulation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootLoadSize(pub u64);

impl MakehybridOption for BootLoadSize {
    fn makehybrid_args(&self) -> Vec<String> {
        int_flag("boot-load-size", self.0)
    }
}

/// El Torito platform ID of the boot image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EltoritoPlatform(pub u32);

impl MakehybridOption for EltoritoPlatform {
    fn makehybrid_args(&self) -> Vec<String> {
        int_flag("eltorito-platform", u64::from(self.0))
    }
}

/// El Torito specification level the boot record claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EltoritoSpecification(pub String);

impl MakehybridOption for EltoritoSpecification {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("eltorito-specification", &self.0)
    }
}

// --- UDF details ---

/// UDF version to generate, e.g. `1.02` or `1.50`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdfVersion(pub String);

impl MakehybridOption for UdfVersion {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("udf-version", &self.0)
    }
}

// --- Volume names ---

/// Volume name for every generated filesystem without a specific override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultVolumeName(pub String);

impl MakehybridOption for DefaultVolumeName {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("default-volume-name", &self.0)
    }
}

/// Volume name for the HFS+ filesystem only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HfsVolumeName(pub String);

impl MakehybridOption for HfsVolumeName {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("hfs-volume-name", &self.0)
    }
}

/// Volume name for the ISO9660 filesystem only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoVolumeName(pub String);

impl MakehybridOption for IsoVolumeName {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("iso-volume-name", &self.0)
    }
}

/// Volume name for the Joliet filesystem only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JolietVolumeName(pub String);

impl MakehybridOption for JolietVolumeName {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("joliet-volume-name", &self.0)
    }
}

/// Volume name for the UDF filesystem only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdfVolumeName(pub String);

impl MakehybridOption for UdfVolumeName {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("udf-volume-name", &self.0)
    }
}

// --- Hiding ---

/// Glob of paths hidden on every generated filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HideAll(pub String);

impl MakehybridOption for HideAll {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("hide-all", &self.0)
    }
}

/// Glob of paths hidden on the HFS+ filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HideHfs(pub String);

impl MakehybridOption for HideHfs {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("hide-hfs", &self.0)
    }
}

/// Glob of paths hidden on the ISO9660 filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HideIso(pub String);

impl MakehybridOption for HideIso {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("hide-iso", &self.0)
    }
}

/// Glob of paths hidden on the Joliet filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HideJoliet(pub String);

impl MakehybridOption for HideJoliet {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("hide-joliet", &self.0)
    }
}

/// Glob of paths hidden on the UDF filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HideUdf(pub String);

impl MakehybridOption for HideUdf {
    fn makehybrid_args(&self) -> Vec<String> {
        string_flag("hide-udf", &self.0)
    }
}

// --- Miscellaneous ---

/// Print the size the hybrid would need instead of building it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintSize(pub bool);

impl MakehybridOption for PrintSize {
    fn makehybrid_args(&self) -> Vec<String> {
        bool_flag("print-size", self.0)
    }
}

/// Read further options as an XML plist from standard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plistin(pub bool);

impl MakehybridOption for Plistin {
    fn makehybrid_args(&self) -> Vec<String> {
        bool_flag("plistin", self.0)
    }
}

// --- The operation ---

pub(crate) fn makehybrid_argv(
    image: &str,
    source: &str,
    options: &[&dyn MakehybridOption],
) -> Result<Vec<String>> {
    if image.is_empty() {
        return Err(Error::MissingRequired("image path"));
    }
    if source.is_empty() {
        return Err(Error::MissingRequired("source path"));
    }

    let mut argv = vec![
        Verb::Makehybrid.as_str().to_string(),
        image.to_string(),
        source.to_string(),
    ];
    for option in options {
        argv.extend(option.makehybrid_args());
    }
    Ok(argv)
}

impl Hdiutil {
    /// Builds a hybrid image at `image` from `source` (a directory or an
    /// existing image). Which filesystems the hybrid carries is driven
    /// entirely by options; without any, the tool picks its defaults.
    pub fn makehybrid(
        &self,
        image: &str,
        source: &str,
        options: &[&dyn MakehybridOption],
    ) -> Result<()> {
        let argv = makehybrid_argv(image, source, options)?;
        self.run(Verb::Makehybrid, &argv)?;
        log::debug!("built hybrid {image} from {source}");
        Ok(())
    }
}

/// [`Hdiutil::makehybrid`] against the conventional binary path.
pub fn makehybrid(image: &str, source: &str, options: &[&dyn MakehybridOption]) -> Result<()> {
    Hdiutil::default().makehybrid(image, source, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Puppetstrings;

    #[test]
    fn argv_is_verb_image_source_then_options() {
        let argv = makehybrid_argv(
            "install.iso",
            "/tmp/stage",
            &[&Iso(true), &Joliet(true), &DefaultVolumeName("Install".to_string())],
        )
        .unwrap();
        assert_eq!(
            argv,
            [
                "makehybrid",
                "install.iso",
                "/tmp/stage",
                "-iso",
                "-joliet",
                "-default-volume-name",
                "Install"
            ]
        );
    }

    #[test]
    fn missing_positionals_are_rejected() {
        let err = makehybrid_argv("", "/tmp/stage", &[]).unwrap_err();
        assert!(matches!(err, Error::MissingRequired("image path")));

        let err = makehybrid_argv("install.iso", "", &[]).unwrap_err();
        assert!(matches!(err, Error::MissingRequired("source path")));
    }

    #[test]
    fn boot_options_encode_their_payloads() {
        assert_eq!(
            EltoritoBoot("boot/cdboot".to_string()).makehybrid_args(),
            ["-eltorito-boot", "boot/cdboot"]
        );
        assert_eq!(BootLoadSeg(0x7c0).makehybrid_args(), ["-boot-load-seg", "1984"]);
        assert_eq!(BootLoadSize(4).makehybrid_args(), ["-boot-load-size", "4"]);
        assert_eq!(
            EltoritoPlatform(239).makehybrid_args(),
            ["-eltorito-platform", "239"]
        );
        assert_eq!(NoEmulBoot(true).makehybrid_args(), ["-no-emul-boot"]);
        assert!(HardDiskBoot(false).makehybrid_args().is_empty());
    }

    #[test]
    fn volume_names_and_hiding_encode() {
        assert_eq!(
            HfsVolumeName("MacSide".to_string()).makehybrid_args(),
            ["-hfs-volume-name", "MacSide"]
        );
        assert_eq!(
            HideAll("*/.DS_Store".to_string()).makehybrid_args(),
            ["-hide-all", "*/.DS_Store"]
        );
        assert_eq!(
            UdfVersion("1.50".to_string()).makehybrid_args(),
            ["-udf-version", "1.50"]
        );
    }

    #[test]
    fn shared_options_encode_under_makehybrid() {
        let argv = makehybrid_argv(
            "hybrid.dmg",
            "/tmp/stage",
            &[&Hfs(true), &Udf(true), &Puppetstrings(true)],
        )
        .unwrap();
        assert_eq!(
            argv,
            [
                "makehybrid",
                "hybrid.dmg",
                "/tmp/stage",
                "-hfs",
                "-udf",
                "-puppetstrings"
            ]
        );
    }

    #[test]
    fn print_size_encodes_alone() {
        let argv = makehybrid_argv("probe.iso", "/tmp/stage", &[&PrintSize(true)]).unwrap();
        assert_eq!(argv, ["makehybrid", "probe.iso", "/tmp/stage", "-print-size"]);
    }
}
