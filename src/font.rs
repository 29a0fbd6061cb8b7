//! Loaded fonts: measuring and drawing text.
//!
//! A [`FontFace`] is a parsed font file (or the built-in bitmap font) with no
//! size attached. [`FontFace::at_size`] produces a [`ResolvedFont`], an
//! immutable handle bound to one pixel size. Auto-fit asks for a new handle on
//! every size step instead of resizing one in place.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use image::{GrayImage, Luma};
use log::debug;

use crate::{builtin::BitmapFont, error::Error};

/// Ink bounding box of a piece of text, relative to the drawing origin.
///
/// `x1`/`y1` are exclusive. An empty extent (no ink at all) is all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extent {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Extent {
    pub fn width(&self) -> u32 {
        (self.x1 - self.x0).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y1 - self.y0).max(0) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Grow the box to cover `[x0, x1) x [y0, y1)`.
    pub(crate) fn include(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        if self.is_empty() {
            *self = Extent { x0, y0, x1, y1 };
        } else {
            self.x0 = self.x0.min(x0);
            self.y0 = self.y0.min(y0);
            self.x1 = self.x1.max(x1);
            self.y1 = self.y1.max(y1);
        }
    }
}

/// Measuring and drawing capability of a font at a fixed size.
pub trait Font {
    /// Pixel size the font was loaded at.
    fn size(&self) -> u32;

    /// Ink bounding box of `text` drawn at the origin.
    fn text_extent(&self, text: &str) -> Result<Extent, Error>;

    /// Draw `text` with its origin at `origin`. Pixels outside the canvas are
    /// clipped.
    fn draw(
        &self,
        canvas: &mut GrayImage,
        origin: (i32, i32),
        text: &str,
        color: Luma<u8>,
    ) -> Result<(), Error>;
}

/// Mix `color` into the canvas pixel at (x, y) with `coverage` out of 255.
pub(crate) fn blend(canvas: &mut GrayImage, x: i32, y: i32, coverage: u8, color: Luma<u8>) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    let a = coverage as u32;
    let value = (pixel.0[0] as u32 * (255 - a) + color.0[0] as u32 * a + 127) / 255;
    pixel.0[0] = value as u8;
}

/// A font without a size.
#[derive(Clone)]
pub enum FontFace {
    TrueType {
        face: Arc<fontdue::Font>,
        path: PathBuf,
    },
    Builtin,
}

impl FontFace {
    /// Read and parse a font file. Only the first face of a collection is used.
    pub fn open(path: &Path) -> Result<FontFace, Error> {
        let bytes = std::fs::read(path).map_err(|err| Error::font_load(path, err))?;
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|err| Error::font_load(path, err))?;
        debug!("Loaded font {:?} ({} glyphs)", path, font.glyph_count());
        Ok(FontFace::TrueType {
            face: Arc::new(font),
            path: path.to_path_buf(),
        })
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }

    /// File the face was loaded from, `None` for the built-in font.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::TrueType { path, .. } => Some(path),
            Self::Builtin => None,
        }
    }

    pub fn at_size(&self, size: u32) -> ResolvedFont {
        match self {
            Self::TrueType { face, .. } => ResolvedFont::TrueType(TrueTypeFont {
                face: face.clone(),
                size,
            }),
            Self::Builtin => ResolvedFont::Builtin(BitmapFont),
        }
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrueType { path, .. } => f.debug_tuple("TrueType").field(path).finish(),
            Self::Builtin => f.write_str("Builtin"),
        }
    }
}

/// A font bound to one pixel size.
#[derive(Debug, Clone)]
pub enum ResolvedFont {
    TrueType(TrueTypeFont),
    Builtin(BitmapFont),
}

impl ResolvedFont {
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }
}

impl Font for ResolvedFont {
    fn size(&self) -> u32 {
        match self {
            Self::TrueType(font) => font.size,
            Self::Builtin(_) => crate::builtin::CELL_HEIGHT,
        }
    }

    fn text_extent(&self, text: &str) -> Result<Extent, Error> {
        match self {
            Self::TrueType(font) => font.text_extent(text),
            Self::Builtin(font) => Ok(font.text_extent(text)),
        }
    }

    fn draw(
        &self,
        canvas: &mut GrayImage,
        origin: (i32, i32),
        text: &str,
        color: Luma<u8>,
    ) -> Result<(), Error> {
        match self {
            Self::TrueType(font) => font.draw(canvas, origin, text, color),
            Self::Builtin(font) => {
                font.draw(canvas, origin, text, color);
                Ok(())
            }
        }
    }
}

/// Glyph position on the integer pixel grid, relative to the text origin.
struct PlacedGlyph {
    ch: char,
    left: i32,
    top: i32,
    width: usize,
    height: usize,
}

#[derive(Clone)]
pub struct TrueTypeFont {
    face: Arc<fontdue::Font>,
    size: u32,
}

impl TrueTypeFont {
    fn px(&self) -> f32 {
        self.size as f32
    }

    fn ascent(&self) -> f32 {
        self.face
            .horizontal_line_metrics(self.px())
            .map(|m| m.ascent)
            .unwrap_or_else(|| self.px())
    }

    /// Single-line layout: advances plus pair kerning, baseline at the
    /// rounded ascent.
    fn layout(&self, text: &str) -> Result<Vec<PlacedGlyph>, Error> {
        let px = self.px();
        let baseline = self.ascent().round();
        let mut pen = 0.0f32;
        let mut prev: Option<char> = None;
        let mut glyphs = Vec::with_capacity(text.len());

        for ch in text.chars() {
            if let Some(p) = prev {
                pen += self.face.horizontal_kern(p, ch, px).unwrap_or(0.0);
            }
            let metrics = self.face.metrics(ch, px);
            if !pen.is_finite() || !metrics.advance_width.is_finite() {
                return Err(Error::measurement(text, format!("bad advance for {:?}", ch)));
            }
            glyphs.push(PlacedGlyph {
                ch,
                left: pen.round() as i32 + metrics.xmin,
                top: baseline as i32 - (metrics.ymin + metrics.height as i32),
                width: metrics.width,
                height: metrics.height,
            });
            pen += metrics.advance_width;
            prev = Some(ch);
        }
        Ok(glyphs)
    }

    pub fn text_extent(&self, text: &str) -> Result<Extent, Error> {
        let mut extent = Extent::default();
        for g in self.layout(text)? {
            extent.include(
                g.left,
                g.top,
                g.left + g.width as i32,
                g.top + g.height as i32,
            );
        }
        Ok(extent)
    }

    pub fn draw(
        &self,
        canvas: &mut GrayImage,
        origin: (i32, i32),
        text: &str,
        color: Luma<u8>,
    ) -> Result<(), Error> {
        for g in self.layout(text)? {
            if g.width == 0 || g.height == 0 {
                continue;
            }
            let (metrics, coverage) = self.face.rasterize(g.ch, self.px());
            if coverage.len() != metrics.width * metrics.height {
                return Err(Error::measurement(text, "glyph bitmap size mismatch"));
            }
            for (i, alpha) in coverage.iter().enumerate() {
                if *alpha == 0 {
                    continue;
                }
                let x = origin.0 + g.left + (i % metrics.width) as i32;
                let y = origin.1 + g.top + (i / metrics.width) as i32;
                blend(canvas, x, y, *alpha, color);
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for TrueTypeFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFont")
            .field("name", &self.face.name().unwrap_or("unnamed"))
            .field("size", &self.size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_union() {
        let mut extent = Extent::default();
        extent.include(3, 4, 3, 10);
        assert!(extent.is_empty());
        extent.include(3, 4, 8, 10);
        extent.include(-2, 6, 5, 12);
        assert_eq!(
            extent,
            Extent {
                x0: -2,
                y0: 4,
                x1: 8,
                y1: 12
            }
        );
        assert_eq!((extent.width(), extent.height()), (10, 8));
    }

    #[test]
    fn blend_clips_and_mixes() {
        let mut canvas = GrayImage::from_pixel(2, 2, Luma([255]));
        blend(&mut canvas, -1, 0, 255, Luma([0]));
        blend(&mut canvas, 2, 2, 255, Luma([0]));
        blend(&mut canvas, 0, 0, 255, Luma([0]));
        blend(&mut canvas, 1, 1, 128, Luma([0]));
        assert_eq!(canvas.get_pixel(0, 0).0[0], 0);
        assert_eq!(canvas.get_pixel(1, 0).0[0], 255);
        assert_eq!(canvas.get_pixel(1, 1).0[0], 127);
    }

    #[test]
    fn open_missing_file_fails() {
        let err = FontFace::open(Path::new("/nonexistent/NoSuchFont.ttf")).unwrap_err();
        assert!(matches!(err, Error::FontLoad { .. }));
    }

    #[test]
    fn builtin_face_has_no_path() {
        assert_eq!(FontFace::Builtin.path(), None);
    }

    #[test]
    fn builtin_face_ignores_size() {
        let font = FontFace::Builtin.at_size(40);
        assert!(font.is_builtin());
        assert_eq!(font.size(), crate::builtin::CELL_HEIGHT);
        assert_eq!(
            font.text_extent("Hi").unwrap(),
            FontFace::Builtin.at_size(9).text_extent("Hi").unwrap()
        );
    }
}
