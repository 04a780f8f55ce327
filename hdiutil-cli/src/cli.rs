// hdiutil-cli/src/cli.rs
//
// Command-line argument structures, parsed with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hdiutil_core::create::ImageType;
use hdiutil_core::{FileSystem, ImageFormat};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Typed front end for Apple's hdiutil disk image utility",
    long_about = "Drives disk image operations (create, attach, detach, verify, convert, makehybrid) through the hdiutil-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path of the hdiutil binary to run
    #[arg(long, global = true, value_name = "PATH", env = "HDIUTIL_PATH")]
    pub hdiutil: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new disk image
    Create(CreateArgs),
    /// Attach a disk image as a device
    Attach(AttachArgs),
    /// Detach an attached device
    Detach(DetachArgs),
    /// Check the checksum of a disk image
    Verify(VerifyArgs),
    /// Convert a disk image to another format
    Convert(ConvertArgs),
    /// Build a multi-filesystem hybrid image
    Makehybrid(MakehybridArgs),
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Path of the image to create (extension added by the tool)
    pub image: String,

    /// Image size as a suffixed spec, e.g. 20m or 1g
    #[arg(long, value_name = "SPEC")]
    pub size: Option<String>,

    /// Image size in megabytes
    #[arg(long, value_name = "N", conflicts_with = "size")]
    pub megabytes: Option<u64>,

    /// Image size in 512-byte sectors
    #[arg(long, value_name = "N", conflicts_with_all = ["size", "megabytes"])]
    pub sectors: Option<u64>,

    /// Build the image from this folder's content, sized to fit
    #[arg(long, value_name = "DIR", conflicts_with_all = ["size", "megabytes", "sectors"])]
    pub srcfolder: Option<String>,

    /// Filesystem to write into the image (HFS+, APFS, FAT32, ...)
    #[arg(long, value_name = "FS")]
    pub fs: Option<FileSystem>,

    /// Container variety: UDIF, SPARSE or SPARSEBUNDLE
    #[arg(long = "type", value_name = "TYPE")]
    pub image_type: Option<ImageType>,

    /// Image format, e.g. UDZO or UDRW
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<ImageFormat>,

    /// Volume name of the new filesystem
    #[arg(long, value_name = "NAME")]
    pub volname: Option<String>,

    /// Overwrite an existing image instead of failing
    #[arg(long)]
    pub overwrite: bool,

    /// Attach the image once created
    #[arg(long)]
    pub attach: bool,
}

#[derive(Parser, Debug)]
pub struct AttachArgs {
    /// Path of the disk image to attach
    pub image: String,

    /// Force the device read-only
    #[arg(long)]
    pub readonly: bool,

    /// Attach read/write even where the image would default to read-only
    #[arg(long, conflicts_with = "readonly")]
    pub readwrite: bool,

    /// Mount the volume at this exact path
    #[arg(long, value_name = "PATH")]
    pub mountpoint: Option<String>,

    /// Mount volumes under this directory instead of /Volumes
    #[arg(long, value_name = "PATH", conflicts_with = "mountpoint")]
    pub mountroot: Option<String>,

    /// Keep the mounted volumes out of Finder
    #[arg(long)]
    pub nobrowse: bool,

    /// Attach the device without mounting any filesystems
    #[arg(long)]
    pub nomount: bool,

    /// Skip checksum verification before attaching
    #[arg(long)]
    pub noverify: bool,

    /// Skip the pre-mount fsck pass
    #[arg(long)]
    pub noautofsck: bool,

    /// Route all writes to this shadow file, leaving the image untouched
    #[arg(long, value_name = "PATH")]
    pub shadow: Option<String>,
}

#[derive(Parser, Debug)]
pub struct DetachArgs {
    /// Device node to detach, e.g. /dev/disk5
    pub device: String,

    /// Detach even with open files on the mounted volumes
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Path of the disk image to verify
    pub image: String,

    /// Do not remember the verification result for later attaches
    #[arg(long)]
    pub nocache: bool,
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Path of the disk image to convert
    pub image: String,

    /// Target image format, e.g. UDZO or UDSB
    #[arg(long, value_name = "FORMAT")]
    pub format: ImageFormat,

    /// Path of the image to write
    #[arg(short, long, value_name = "PATH")]
    pub output: String,

    /// Worker task count for compression formats that fan out
    #[arg(long, value_name = "N")]
    pub tasks: Option<u32>,
}

#[derive(Parser, Debug)]
pub struct MakehybridArgs {
    /// Path of the hybrid image to create
    pub image: String,

    /// Source directory or image
    pub source: String,

    /// Generate an HFS+ filesystem in the hybrid
    #[arg(long)]
    pub hfs: bool,

    /// Generate an ISO9660 filesystem in the hybrid
    #[arg(long)]
    pub iso: bool,

    /// Generate Joliet extensions to ISO9660
    #[arg(long)]
    pub joliet: bool,

    /// Generate a UDF filesystem in the hybrid
    #[arg(long)]
    pub udf: bool,

    /// Volume name for every generated filesystem
    #[arg(long, value_name = "NAME")]
    pub default_volume_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn parses_a_create_invocation() {
        let cli = Cli::try_parse_from([
            "hdiutil-cli",
            "create",
            "test",
            "--megabytes",
            "20",
            "--fs",
            "HFS+",
            "--type",
            "SPARSEBUNDLE",
        ])
        .unwrap();

        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.image, "test");
                assert_eq!(args.megabytes, Some(20));
                assert_eq!(args.fs, Some(FileSystem::HfsPlus));
                assert_eq!(args.image_type, Some(ImageType::SparseBundle));
                assert!(!args.overwrite);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn size_specifications_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "hdiutil-cli",
            "create",
            "test",
            "--megabytes",
            "20",
            "--sectors",
            "4096",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_an_attach_invocation_with_binary_override() {
        let cli = Cli::try_parse_from([
            "hdiutil-cli",
            "attach",
            "test.sparsebundle",
            "--noverify",
            "--mountpoint",
            "./test",
            "--hdiutil",
            "/tmp/fake-hdiutil",
        ])
        .unwrap();

        assert_eq!(cli.hdiutil.as_deref(), Some(Path::new("/tmp/fake-hdiutil")));
        match cli.command {
            Commands::Attach(args) => {
                assert_eq!(args.image, "test.sparsebundle");
                assert!(args.noverify);
                assert_eq!(args.mountpoint.as_deref(), Some("./test"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn convert_requires_format_and_output() {
        let result = Cli::try_parse_from(["hdiutil-cli", "convert", "in.dmg", "-o", "out.dmg"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "hdiutil-cli",
            "convert",
            "in.dmg",
            "--format",
            "UDZO",
            "-o",
            "out.dmg",
        ])
        .unwrap();
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.format, ImageFormat::Udzo);
                assert_eq!(args.output, "out.dmg");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_format_names_are_rejected_at_parse_time() {
        let result = Cli::try_parse_from([
            "hdiutil-cli",
            "convert",
            "in.dmg",
            "--format",
            "udzo",
            "-o",
            "out.dmg",
        ]);
        assert!(result.is_err());
    }
}
