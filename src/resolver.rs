//! Font resolution with fallbacks.
//!
//! Resolution never fails: a font that can not be loaded is replaced by the
//! first system font that loads, and when none does, by the built-in bitmap
//! font. Each step down the chain is logged as a warning.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::{
    font::{FontFace, ResolvedFont},
    style::{FontSpec, Slant, Weight},
};

/// Picks a concrete font for a [`FontSpec`].
#[derive(Debug, Clone)]
pub struct FontResolver {
    system_fonts: Vec<PathBuf>,
}

impl FontResolver {
    /// Resolver with the platform's well-known fonts as fallbacks.
    pub fn new() -> Self {
        FontResolver {
            system_fonts: system_font_candidates(),
        }
    }

    /// Replace the system fallback list. An empty list goes straight from
    /// the requested font to the built-in bitmap font.
    pub fn with_system_fonts(self, system_fonts: Vec<PathBuf>) -> Self {
        FontResolver { system_fonts }
    }

    /// Resolve `spec` to a font at `spec.size()`.
    pub fn resolve(&self, spec: &FontSpec) -> ResolvedFont {
        self.resolve_face(spec).at_size(spec.size())
    }

    /// Resolve the face for `spec` without binding a size, so that auto-fit
    /// can derive one font per size step from a single lookup.
    pub fn resolve_face(&self, spec: &FontSpec) -> FontFace {
        let regular = match FontFace::open(spec.path()) {
            Ok(face) => face,
            Err(err) => {
                warn!("{}, falling back to default", err);
                return self.fallback_face();
            }
        };

        if !spec.is_styled() {
            info!("Using font {:?}", spec.path());
            return regular;
        }

        let found = styled_candidates(spec.path(), spec.weight(), spec.slant())
            .into_iter()
            .filter(|path| path.is_file())
            .find_map(|path| match FontFace::open(&path) {
                Ok(face) => Some((path, face)),
                Err(err) => {
                    warn!("{}", err);
                    None
                }
            });

        match found {
            Some((path, face)) => {
                info!("Using styled font {:?}", path);
                face
            }
            None => {
                warn!(
                    "No {:?}/{:?} variant found next to {:?}, using the regular face",
                    spec.weight(),
                    spec.slant(),
                    spec.path()
                );
                regular
            }
        }
    }

    fn fallback_face(&self) -> FontFace {
        for path in &self.system_fonts {
            match FontFace::open(path) {
                Ok(face) => {
                    info!("Using fallback font {:?}", path);
                    return face;
                }
                Err(err) => log::debug!("{}", err),
            }
        }
        warn!("No system font could be loaded, using the built-in bitmap font");
        FontFace::Builtin
    }
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Sibling files that may hold the requested style, in lookup order.
///
/// `fonts/Arial.ttf` with bold yields `fonts/Arial-Bold.ttf`,
/// `fonts/Arial Bold.ttf` and `fonts/ArialBold.ttf`.
pub fn styled_candidates(path: &Path, weight: Weight, slant: Slant) -> Vec<PathBuf> {
    let suffixes: &[&str] = match (weight, slant) {
        (Weight::Bold, Slant::Italic) => &["-BoldItalic", " Bold Italic", "BoldItalic"],
        (Weight::Bold, Slant::Normal) => &["-Bold", " Bold", "Bold"],
        (Weight::Normal, Slant::Italic) => &["-Italic", " Italic", "Italic"],
        (Weight::Normal, Slant::Normal) => &[],
    };

    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let stem = match path.file_stem() {
        Some(stem) => stem.to_string_lossy(),
        None => return Vec::new(),
    };
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy())
        .unwrap_or_else(|| "ttf".into());

    suffixes
        .iter()
        .map(|suffix| dir.join(format!("{}{}.{}", stem, suffix, ext)))
        .collect()
}

/// Well-known fonts to try when the requested one is unusable.
pub fn system_font_candidates() -> Vec<PathBuf> {
    let mut fonts = vec![PathBuf::from(crate::DEFAULT_FONT)];

    #[cfg(target_os = "linux")]
    fonts.extend(
        [
            "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
            "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
        ]
        .iter()
        .map(PathBuf::from),
    );

    #[cfg(target_os = "macos")]
    fonts.extend(
        [
            "/Library/Fonts/Arial.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
        ]
        .iter()
        .map(PathBuf::from),
    );

    #[cfg(target_os = "windows")]
    fonts.extend(
        [r"C:\Windows\Fonts\arial.ttf", r"C:\Windows\Fonts\segoeui.ttf"]
            .iter()
            .map(PathBuf::from),
    );

    fonts
}
