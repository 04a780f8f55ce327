// hdiutil-core/src/convert.rs
//
// The `convert` verb and the image-format vocabulary it revolves around.

use std::fmt;
use std::str::FromStr;

use crate::command::{Hdiutil, Verb};
use crate::error::{Error, Result};
use crate::flag::{bool_flag, int_flag, string_flag};

/// Capability for options `hdiutil convert` accepts.
pub trait ConvertOption {
    /// Argument tokens this option contributes to a convert command.
    fn convert_args(&self) -> Vec<String>;
}

/// On-disk image container format, as named by `-format`.
///
/// One variant per format the tool recognizes, current and obsolete alike;
/// converting an old image away from an obsolete format needs the obsolete
/// name too. Formats are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// UDIF read/write.
    Udrw,
    /// UDIF read-only.
    Udro,
    /// UDIF ADC-compressed.
    Udco,
    /// UDIF zlib-compressed.
    Udzo,
    /// UDIF lzfse-compressed.
    Ulfo,
    /// UDIF bzip2-compressed.
    Udbz,
    /// DVD/CD-R export image.
    Udto,
    /// Sparse image, grows with its content.
    Udsp,
    /// Sparse bundle image, grows with its content.
    Udsb,
    /// UDIF entire image with MD5 checksum.
    Ufbi,
    /// UDIF read-only (obsolete spelling `UDRo`).
    UdRo,
    /// UDIF compressed (obsolete spelling `UDCo`).
    UdCo,
    /// NDIF read/write.
    RdWr,
    /// NDIF read-only, Disk Copy 6.3.3 format.
    Rdxx,
    /// NDIF compressed.
    RoCo,
    /// NDIF compressed (obsolete).
    Rken,
    /// Disk Copy 4.2 (obsolete).
    Dc42,
}

impl ImageFormat {
    /// Canonical name as hdiutil spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Udrw => "UDRW",
            ImageFormat::Udro => "UDRO",
            ImageFormat::Udco => "UDCO",
            ImageFormat::Udzo => "UDZO",
            ImageFormat::Ulfo => "ULFO",
            ImageFormat::Udbz => "UDBZ",
            ImageFormat::Udto => "UDTO",
            ImageFormat::Udsp => "UDSP",
            ImageFormat::Udsb => "UDSB",
            ImageFormat::Ufbi => "UFBI",
            ImageFormat::UdRo => "UDRo",
            ImageFormat::UdCo => "UDCo",
            ImageFormat::RdWr => "RdWr",
            ImageFormat::Rdxx => "Rdxx",
            ImageFormat::RoCo => "ROCo",
            ImageFormat::Rken => "Rken",
            ImageFormat::Dc42 => "DC42",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = Error;

    /// Parses a canonical format name. Case matters: `UDRO` and `UDRo`
    /// name different formats.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "UDRW" => Ok(ImageFormat::Udrw),
            "UDRO" => Ok(ImageFormat::Udro),
            "UDCO" => Ok(ImageFormat::Udco),
            "UDZO" => Ok(ImageFormat::Udzo),
            "ULFO" => Ok(ImageFormat::Ulfo),
            "UDBZ" => Ok(ImageFormat::Udbz),
            "UDTO" => Ok(ImageFormat::Udto),
            "UDSP" => Ok(ImageFormat::Udsp),
            "UDSB" => Ok(ImageFormat::Udsb),
            "UFBI" => Ok(ImageFormat::Ufbi),
            "UDRo" => Ok(ImageFormat::UdRo),
            "UDCo" => Ok(ImageFormat::UdCo),
            "RdWr" => Ok(ImageFormat::RdWr),
            "Rdxx" => Ok(ImageFormat::Rdxx),
            "ROCo" => Ok(ImageFormat::RoCo),
            "Rken" => Ok(ImageFormat::Rken),
            "DC42" => Ok(ImageFormat::Dc42),
            other => Err(Error::UnknownName {
                kind: "image format",
                value: other.to_string(),
            }),
        }
    }
}

// --- Convert-only options ---

/// Data partition alignment in sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Align(pub u64);

impl ConvertOption for Align {
    fn convert_args(&self) -> Vec<String> {
        int_flag("align", self.0)
    }
}

/// Emit an old-style partition map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pmap(pub bool);

impl ConvertOption for Pmap {
    fn convert_args(&self) -> Vec<String> {
        bool_flag("pmap", self.0)
    }
}

/// Segment size for a segmented result, either a plain sector count or a
/// suffixed spec like `1g`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSize(pub String);

impl ConvertOption for SegmentSize {
    fn convert_args(&self) -> Vec<String> {
        string_flag("segmentSize", &self.0)
    }
}

/// Worker thread count for compression formats that fan out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tasks(pub u32);

impl ConvertOption for Tasks {
    fn convert_args(&self) -> Vec<String> {
        int_flag("tasks", u64::from(self.0))
    }
}

// --- The operation ---

pub(crate) fn convert_argv(
    image: &str,
    format: ImageFormat,
    outfile: &str,
    options: &[&dyn ConvertOption],
) -> Result<Vec<String>> {
    if image.is_empty() {
        return Err(Error::MissingRequired("image path"));
    }
    if outfile.is_empty() {
        return Err(Error::MissingRequired("output path"));
    }

    let mut argv = vec![Verb::Convert.as_str().to_string(), image.to_string()];
    argv.extend(string_flag("format", format.as_str()));
    argv.extend(string_flag("o", outfile));
    for option in options {
        argv.extend(option.convert_args());
    }
    Ok(argv)
}

impl Hdiutil {
    /// Converts `image` into a new image at `outfile` with the given
    /// format.
    ///
    /// Format and output path are required by the tool, so both are real
    /// arguments here rather than options. The tool appends the extension
    /// the target format calls for if the output path lacks it.
    pub fn convert(
        &self,
        image: &str,
        format: ImageFormat,
        outfile: &str,
        options: &[&dyn ConvertOption],
    ) -> Result<()> {
        let argv = convert_argv(image, format, outfile, options)?;
        self.run(Verb::Convert, &argv)?;
        log::debug!("converted {image} to {format} at {outfile}");
        Ok(())
    }
}

/// [`Hdiutil::convert`] against the conventional binary path.
pub fn convert(
    image: &str,
    format: ImageFormat,
    outfile: &str,
    options: &[&dyn ConvertOption],
) -> Result<()> {
    Hdiutil::default().convert(image, format, outfile, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Certificate, Plist, Verbose};

    #[test]
    fn argv_orders_image_format_output_then_options() {
        let argv = convert_argv(
            "master.sparseimage",
            ImageFormat::Udzo,
            "master.dmg",
            &[&Tasks(4), &Verbose(true)],
        )
        .unwrap();
        assert_eq!(
            argv,
            [
                "convert",
                "master.sparseimage",
                "-format",
                "UDZO",
                "-o",
                "master.dmg",
                "-tasks",
                "4",
                "-verbose"
            ]
        );
    }

    #[test]
    fn empty_paths_are_rejected() {
        let err = convert_argv("", ImageFormat::Udro, "out.dmg", &[]).unwrap_err();
        assert!(matches!(err, Error::MissingRequired("image path")));

        let err = convert_argv("in.dmg", ImageFormat::Udro, "", &[]).unwrap_err();
        assert!(matches!(err, Error::MissingRequired("output path")));
    }

    #[test]
    fn format_names_round_trip() {
        let all = [
            ImageFormat::Udrw,
            ImageFormat::Udro,
            ImageFormat::Udco,
            ImageFormat::Udzo,
            ImageFormat::Ulfo,
            ImageFormat::Udbz,
            ImageFormat::Udto,
            ImageFormat::Udsp,
            ImageFormat::Udsb,
            ImageFormat::Ufbi,
            ImageFormat::UdRo,
            ImageFormat::UdCo,
            ImageFormat::RdWr,
            ImageFormat::Rdxx,
            ImageFormat::RoCo,
            ImageFormat::Rken,
            ImageFormat::Dc42,
        ];
        for format in all {
            assert_eq!(format.as_str().parse::<ImageFormat>().unwrap(), format);
        }
    }

    #[test]
    fn obsolete_names_differ_from_current_ones_by_case() {
        assert_eq!("UDRO".parse::<ImageFormat>().unwrap(), ImageFormat::Udro);
        assert_eq!("UDRo".parse::<ImageFormat>().unwrap(), ImageFormat::UdRo);
        assert!("udro".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn convert_only_options_encode() {
        assert_eq!(Align(8).convert_args(), ["-align", "8"]);
        assert_eq!(Pmap(true).convert_args(), ["-pmap"]);
        assert!(Pmap(false).convert_args().is_empty());
        assert_eq!(
            SegmentSize("1g".to_string()).convert_args(),
            ["-segmentSize", "1g"]
        );
    }

    #[test]
    fn shared_options_encode_under_convert() {
        let argv = convert_argv(
            "plain.dmg",
            ImageFormat::Udzo,
            "sealed.dmg",
            &[
                &Certificate("/tmp/corp.der".to_string()),
                &Plist(true),
            ],
        )
        .unwrap();
        assert_eq!(
            argv,
            [
                "convert",
                "plain.dmg",
                "-format",
                "UDZO",
                "-o",
                "sealed.dmg",
                "-certificate",
                "/tmp/corp.der",
                "-plist"
            ]
        );
    }
}
