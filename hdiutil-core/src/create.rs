// hdiutil-core/src/create.rs
//
// The `create` verb: size specifications, the filesystem and image-type
// vocabularies, and the options accepted when building a new image.

use std::fmt;
use std::str::FromStr;

use crate::command::{Hdiutil, Verb};
use crate::convert::ImageFormat;
use crate::error::{Error, Result};
use crate::flag::{bool_flag, bool_no_flag, int_flag, string_flag, string_list_flag};

/// Capability for options `hdiutil create` accepts.
pub trait CreateOption {
    /// Argument tokens this option contributes to a create command.
    fn create_args(&self) -> Vec<String>;
}

/// How big the new image is, or where its content comes from.
///
/// Create requires exactly one size specification; making it a dedicated
/// argument rather than an option keeps "no size at all" unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeSpec {
    /// mkfile(8)-style size spec such as `20m` or `1g` (b/k/m/g/t/p/e
    /// suffixes).
    Size(String),
    /// Size in 512-byte sectors.
    Sectors(u64),
    /// Size in megabytes.
    Megabytes(u64),
    /// Size to fit this folder's content, copied in file by file.
    Srcfolder(String),
    /// Synonym for [`SizeSpec::Srcfolder`] under the tool's `-srcdir`
    /// spelling.
    Srcdir(String),
    /// Image the blocks of an existing device. Filesystem layout options
    /// are ignored by the tool in this mode.
    Srcdevice(String),
}

impl SizeSpec {
    /// Argument tokens for this size specification.
    pub fn args(&self) -> Vec<String> {
        match self {
            SizeSpec::Size(spec) => string_flag("size", spec),
            SizeSpec::Sectors(count) => int_flag("sectors", *count),
            SizeSpec::Megabytes(count) => int_flag("megabytes", *count),
            SizeSpec::Srcfolder(path) => string_flag("srcfolder", path),
            SizeSpec::Srcdir(path) => string_flag("srcdir", path),
            SizeSpec::Srcdevice(device) => string_flag("srcdevice", device),
        }
    }
}

/// Filesystem written into the new image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSystem {
    /// HFS+.
    HfsPlus,
    /// Journaled HFS+ under the `HFS+J` spelling.
    HfsPlusJ,
    /// Journaled HFS+ under the `JHFS+` spelling.
    JhfsPlus,
    /// Case-sensitive HFS+.
    Hfsx,
    /// Journaled case-sensitive HFS+.
    JhfsPlusX,
    /// Apple File System.
    Apfs,
    /// MS-DOS FAT32.
    Fat32,
    /// Extended FAT.
    ExFat,
    /// Universal Disk Format.
    Udf,
}

impl FileSystem {
    /// Canonical name as hdiutil spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            FileSystem::HfsPlus => "HFS+",
            FileSystem::HfsPlusJ => "HFS+J",
            FileSystem::JhfsPlus => "JHFS+",
            FileSystem::Hfsx => "HFSX",
            FileSystem::JhfsPlusX => "JHFS+X",
            FileSystem::Apfs => "APFS",
            FileSystem::Fat32 => "FAT32",
            FileSystem::ExFat => "ExFAT",
            FileSystem::Udf => "UDF",
        }
    }
}

impl fmt::Display for FileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileSystem {
    type Err = Error;

    /// Parses a canonical filesystem name, exactly as [`FileSystem::as_str`]
    /// renders it.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "HFS+" => Ok(FileSystem::HfsPlus),
            "HFS+J" => Ok(FileSystem::HfsPlusJ),
            "JHFS+" => Ok(FileSystem::JhfsPlus),
            "HFSX" => Ok(FileSystem::Hfsx),
            "JHFS+X" => Ok(FileSystem::JhfsPlusX),
            "APFS" => Ok(FileSystem::Apfs),
            "FAT32" => Ok(FileSystem::Fat32),
            "ExFAT" => Ok(FileSystem::ExFat),
            "UDF" => Ok(FileSystem::Udf),
            other => Err(Error::UnknownName {
                kind: "filesystem",
                value: other.to_string(),
            }),
        }
    }
}

impl CreateOption for FileSystem {
    fn create_args(&self) -> Vec<String> {
        string_flag("fs", self.as_str())
    }
}

/// Container variety for the new image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    /// Flat, full-size UDIF image.
    Udif,
    /// Sparse image that grows with its content.
    Sparse,
    /// Sparse image backed by a directory bundle of band files.
    SparseBundle,
}

impl ImageType {
    /// Canonical name as hdiutil spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageType::Udif => "UDIF",
            ImageType::Sparse => "SPARSE",
            ImageType::SparseBundle => "SPARSEBUNDLE",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "UDIF" => Ok(ImageType::Udif),
            "SPARSE" => Ok(ImageType::Sparse),
            "SPARSEBUNDLE" => Ok(ImageType::SparseBundle),
            other => Err(Error::UnknownName {
                kind: "image type",
                value: other.to_string(),
            }),
        }
    }
}

impl CreateOption for ImageType {
    fn create_args(&self) -> Vec<String> {
        string_flag("type", self.as_str())
    }
}

impl CreateOption for ImageFormat {
    fn create_args(&self) -> Vec<String> {
        string_flag("format", self.as_str())
    }
}

// --- Create-only options ---

/// Data partition alignment in sectors. The tool default is 4K.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Align(pub u64);

impl CreateOption for Align {
    fn create_args(&self) -> Vec<String> {
        int_flag("align", self.0)
    }
}

/// Volume name of the new filesystem (tool default `untitled`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volname(pub String);

impl CreateOption for Volname {
    fn create_args(&self) -> Vec<String> {
        string_flag("volname", &self.0)
    }
}

/// Owning user id of the filesystem root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uid(pub u32);

impl CreateOption for Uid {
    fn create_args(&self) -> Vec<String> {
        int_flag("uid", u64::from(self.0))
    }
}

/// Owning group id of the filesystem root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gid(pub u32);

impl CreateOption for Gid {
    fn create_args(&self) -> Vec<String> {
        int_flag("gid", u64::from(self.0))
    }
}

/// Octal mode of the filesystem root, passed through as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode(pub String);

impl CreateOption for Mode {
    fn create_args(&self) -> Vec<String> {
        string_flag("mode", &self.0)
    }
}

/// Whether a sparse image may shrink again below its high-water mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autostretch(pub bool);

impl CreateOption for Autostretch {
    fn create_args(&self) -> Vec<String> {
        bool_no_flag("autostretch", self.0)
    }
}

/// Upper stretch limit for an HFS+ filesystem, in 512-byte sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stretch(pub u64);

impl CreateOption for Stretch {
    fn create_args(&self) -> Vec<String> {
        int_flag("stretch", self.0)
    }
}

/// Extra arguments handed to the newfs program for the chosen filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsArgs(pub Vec<String>);

impl CreateOption for FsArgs {
    fn create_args(&self) -> Vec<String> {
        string_list_flag("fsargs", &self.0)
    }
}

/// Partition layout, e.g. `GPTSPUD` or `NONE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout(pub String);

impl CreateOption for Layout {
    fn create_args(&self) -> Vec<String> {
        string_flag("layout", &self.0)
    }
}

/// MediaKit library the partition layout is drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library(pub String);

impl CreateOption for Library {
    fn create_args(&self) -> Vec<String> {
        string_flag("library", &self.0)
    }
}

/// Partition type for a single-partition image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionType(pub String);

impl CreateOption for PartitionType {
    fn create_args(&self) -> Vec<String> {
        string_flag("partitionType", &self.0)
    }
}

/// Overwrite an existing image file instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overwrite(pub bool);

impl CreateOption for Overwrite {
    fn create_args(&self) -> Vec<String> {
        bool_flag("ov", self.0)
    }
}

/// Attach the image as soon as it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachAfter(pub bool);

impl CreateOption for AttachAfter {
    fn create_args(&self) -> Vec<String> {
        bool_flag("attach", self.0)
    }
}

/// Segment size for a segmented image, in 512-byte sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSize(pub u64);

impl CreateOption for SegmentSize {
    fn create_args(&self) -> Vec<String> {
        int_flag("segmentSize", self.0)
    }
}

/// Whether source copying may cross device boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossdev(pub bool);

impl CreateOption for Crossdev {
    fn create_args(&self) -> Vec<String> {
        bool_no_flag("crossdev", self.0)
    }
}

/// Whether Finder junk (.Trashes, .DS_Store, ...) is skipped when copying
/// from a source folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scrub(pub bool);

impl CreateOption for Scrub {
    fn create_args(&self) -> Vec<String> {
        bool_no_flag("scrub", self.0)
    }
}

/// Whether mismatched source ownership is tolerated when copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anyowners(pub bool);

impl CreateOption for Anyowners {
    fn create_args(&self) -> Vec<String> {
        bool_no_flag("anyowners", self.0)
    }
}

/// Skip source files that cannot be read instead of failing the create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipUnreadable(pub bool);

impl CreateOption for SkipUnreadable {
    fn create_args(&self) -> Vec<String> {
        bool_flag("skipunreadable", self.0)
    }
}

/// Whether the image is built in a temporary location and moved into place
/// only when complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atomic(pub bool);

impl CreateOption for Atomic {
    fn create_args(&self) -> Vec<String> {
        bool_no_flag("atomic", self.0)
    }
}

/// Copy ownership from the named user when imaging a source folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyUid(pub String);

impl CreateOption for CopyUid {
    fn create_args(&self) -> Vec<String> {
        string_flag("copyuid", &self.0)
    }
}

// --- The operation ---

pub(crate) fn create_argv(
    image: &str,
    size: &SizeSpec,
    options: &[&dyn CreateOption],
) -> Result<Vec<String>> {
    if image.is_empty() {
        return Err(Error::MissingRequired("image path"));
    }

    let mut argv = vec![Verb::Create.as_str().to_string()];
    argv.extend(size.args());
    for option in options {
        argv.extend(option.create_args());
    }
    argv.push(image.to_string());
    Ok(argv)
}

impl Hdiutil {
    /// Creates a new image at `image` with the given size specification.
    ///
    /// The image path is the last argument-vector token, after the size and
    /// all options. The tool derives the on-disk name from the path and the
    /// image type (`.dmg`, `.sparseimage`, `.sparsebundle`); a failed
    /// create can leave a partial image behind, and removing it is the
    /// caller's compensating step.
    pub fn create(&self, image: &str, size: &SizeSpec, options: &[&dyn CreateOption]) -> Result<()> {
        let argv = create_argv(image, size, options)?;
        self.run(Verb::Create, &argv)?;
        log::debug!("created {image}");
        Ok(())
    }
}

/// [`Hdiutil::create`] against the conventional binary path.
pub fn create(image: &str, size: &SizeSpec, options: &[&dyn CreateOption]) -> Result<()> {
    Hdiutil::default().create(image, size, options)
}
