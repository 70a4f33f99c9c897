//! Font resolution for rendered submissions.
//!
//! A document uses exactly one font family. When the branding points at a loadable
//! font file it is embedded as `BrandFont`; otherwise the built-in PDF font
//! Helvetica is used. `genpdf` still needs metric files for built-in fonts, so the
//! standard family is backed by Liberation Sans (or Arial) files found in one of the
//! directories returned by [`standard_font_directories`]. Without such files the
//! bundled DejaVu Sans face is embedded instead, so the standard family always
//! loads.

use std::fmt;
use std::path::{Path, PathBuf};

use genpdf::fonts::{self, Builtin, FontData, FontFamily};
use log::{debug, warn};
use printpdf::BuiltinFont;

use crate::error::{Error, Result};
use crate::payload::Branding;

/// Name under which a custom branding font is registered.
pub const BRAND_FONT_NAME: &str = "BrandFont";

/// Name of the built-in fallback font.
pub const STANDARD_FONT_NAME: &str = "Helvetica";

/// Family whose files are metric compatible with Helvetica.
const METRICS_FAMILY_NAME: &str = "LiberationSans";

const METRICS_FILES: &[&str] = &[
    "LiberationSans-Regular.ttf",
    "LiberationSans-Bold.ttf",
    "LiberationSans-Italic.ttf",
    "LiberationSans-BoldItalic.ttf",
];

struct ArialFiles {
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

const ARIAL_FILES: ArialFiles = ArialFiles {
    regular: "arial.ttf",
    bold: "arialbd.ttf",
    italic: "ariali.ttf",
    bold_italic: "arialbi.ttf",
};

/// DejaVu Sans, shipped with the crate (see `assets/fonts/DejaVuSans-LICENSE.txt`).
const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

const SYSTEM_FONT_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/TTF",
    "/Library/Fonts",
    "C:\\Windows\\Fonts",
];

/// The font chosen for a document.
#[derive(Clone)]
pub enum FontSource {
    /// A successfully loaded branding font.
    Brand(FontData),
    /// The built-in Helvetica family.
    Standard,
}

impl FontSource {
    /// Identifier of the selected font.
    pub fn name(&self) -> &'static str {
        match self {
            FontSource::Brand(_) => BRAND_FONT_NAME,
            FontSource::Standard => STANDARD_FONT_NAME,
        }
    }

    /// Builds the `genpdf` family for this source.
    ///
    /// The brand font has a single face, which is reused for bold and italic text.
    pub fn into_family(self, fonts_dir: Option<&Path>) -> Result<FontFamily<FontData>> {
        match self {
            FontSource::Brand(data) => Ok(FontFamily {
                regular: data.clone(),
                bold: data.clone(),
                italic: data.clone(),
                bold_italic: data,
            }),
            FontSource::Standard => standard_font_family(fonts_dir),
        }
    }
}

impl fmt::Debug for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FontSource").field(&self.name()).finish()
    }
}

/// Picks the document font from the branding settings.
///
/// A missing path, a path that does not exist and a file that is not a usable font
/// all select the standard font. Nothing here fails.
pub fn select_font_source(branding: &Branding) -> FontSource {
    let Some(path) = branding.font_path.as_deref().filter(|path| !path.is_empty()) else {
        return FontSource::Standard;
    };

    let path = Path::new(path);
    if !path.exists() {
        debug!(
            "Branding font {} does not exist; using {}",
            path.display(),
            STANDARD_FONT_NAME
        );
        return FontSource::Standard;
    }

    match register_brand_font(path) {
        Ok(data) => FontSource::Brand(data),
        Err(err) => {
            warn!(
                "Branding font {} is unusable ({}); falling back to {}",
                path.display(),
                err,
                STANDARD_FONT_NAME
            );
            FontSource::Standard
        }
    }
}

/// Loads a font file for embedding under [`BRAND_FONT_NAME`].
pub fn register_brand_font(path: &Path) -> std::result::Result<FontData, genpdf::error::Error> {
    FontData::load(path, None)
}

/// Directories searched for the standard font metrics, in order.
pub fn standard_font_directories(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    let mut push = |candidate: PathBuf| {
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    };

    if let Some(dir) = explicit {
        push(dir.to_path_buf());
    }

    if let Ok(current_exe) = std::env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push(bin_dir.join("assets/fonts"));
        }
    }

    push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"));

    for dir in SYSTEM_FONT_DIRECTORIES {
        push(PathBuf::from(dir));
    }

    candidates
}

fn has_liberation_files(dir: &Path) -> bool {
    METRICS_FILES.iter().all(|name| dir.join(name).is_file())
}

fn has_arial_files(dir: &Path) -> bool {
    [
        ARIAL_FILES.regular,
        ARIAL_FILES.bold,
        ARIAL_FILES.italic,
        ARIAL_FILES.bold_italic,
    ]
    .iter()
    .all(|name| dir.join(name).is_file())
}

fn load_arial_face(dir: &Path, file: &str, builtin: BuiltinFont) -> Result<FontData> {
    let path = dir.join(file);
    FontData::load(&path, Some(builtin)).map_err(|err| {
        Error::Font(format!(
            "failed to load Arial metrics from {}: {}",
            path.display(),
            err
        ))
    })
}

fn load_arial_family(dir: &Path) -> Result<FontFamily<FontData>> {
    Ok(FontFamily {
        regular: load_arial_face(dir, ARIAL_FILES.regular, BuiltinFont::Helvetica)?,
        bold: load_arial_face(dir, ARIAL_FILES.bold, BuiltinFont::HelveticaBold)?,
        italic: load_arial_face(dir, ARIAL_FILES.italic, BuiltinFont::HelveticaOblique)?,
        bold_italic: load_arial_face(
            dir,
            ARIAL_FILES.bold_italic,
            BuiltinFont::HelveticaBoldOblique,
        )?,
    })
}

/// Loads the Helvetica family, using the first directory that carries metric files.
///
/// When no directory qualifies the bundled face is used for every style.
pub fn standard_font_family(explicit: Option<&Path>) -> Result<FontFamily<FontData>> {
    let mut attempts = Vec::new();

    for dir in standard_font_directories(explicit) {
        if !dir.is_dir() {
            attempts.push(format!("{} (directory missing)", dir.display()));
            continue;
        }

        if has_liberation_files(&dir) {
            match fonts::from_files(&dir, METRICS_FAMILY_NAME, Some(Builtin::Helvetica)) {
                Ok(family) => {
                    debug!("Loaded {} metrics from {}", STANDARD_FONT_NAME, dir.display());
                    return Ok(family);
                }
                Err(err) => attempts.push(format!("{} ({})", dir.display(), err)),
            }
        } else if has_arial_files(&dir) {
            match load_arial_family(&dir) {
                Ok(family) => {
                    debug!(
                        "Loaded {} metrics from Arial files in {}",
                        STANDARD_FONT_NAME,
                        dir.display()
                    );
                    return Ok(family);
                }
                Err(err) => attempts.push(format!("{} ({})", dir.display(), err)),
            }
        } else {
            attempts.push(format!("{} (no metric files)", dir.display()));
        }
    }

    debug!(
        "{} metrics not found (checked {}); embedding the bundled font",
        STANDARD_FONT_NAME,
        attempts.join(", ")
    );
    bundled_font_family()
}

/// The family built from the font compiled into the crate.
pub fn bundled_font_family() -> Result<FontFamily<FontData>> {
    let data = FontData::new(BUNDLED_FONT.to_vec(), None)
        .map_err(|err| Error::Font(format!("bundled font is unusable: {}", err)))?;
    Ok(FontFamily {
        regular: data.clone(),
        bold: data.clone(),
        italic: data.clone(),
        bold_italic: data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn branding_with_font(path: &str) -> Branding {
        Branding {
            font_path: Some(path.to_owned()),
            ..Branding::default()
        }
    }

    #[test]
    fn no_branding_font_selects_standard() {
        let source = select_font_source(&Branding::default());
        assert_eq!(source.name(), STANDARD_FONT_NAME);
    }

    #[test]
    fn missing_font_file_selects_standard() {
        let source = select_font_source(&branding_with_font("/__kyc_pdf_missing__/brand.ttf"));
        assert_eq!(source.name(), STANDARD_FONT_NAME);
    }

    #[test]
    fn corrupt_font_file_selects_standard() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"definitely not a font").expect("write");
        let path = file.path().to_str().expect("utf-8 path").to_owned();

        assert!(register_brand_font(file.path()).is_err());
        let source = select_font_source(&branding_with_font(&path));
        assert!(matches!(source, FontSource::Standard));
    }

    #[test]
    fn explicit_directory_is_searched_first() {
        let dirs = standard_font_directories(Some(Path::new("/opt/fonts")));
        assert_eq!(dirs.first(), Some(&PathBuf::from("/opt/fonts")));
        assert!(dirs.len() > 1);
    }

    #[test]
    fn bundled_family_loads() {
        assert!(bundled_font_family().is_ok());
    }

    #[test]
    fn missing_metric_directory_still_yields_a_family() {
        let family = standard_font_family(Some(Path::new("/__kyc_pdf_missing_fonts__")));
        assert!(family.is_ok());
        assert!(FontSource::Standard
            .into_family(Some(Path::new("/__kyc_pdf_missing_fonts__")))
            .is_ok());
    }
}
