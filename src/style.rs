use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slant {
    Normal,
    Italic,
}

/// Horizontal placement of each line inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    /// x offset of a line of `line_width` pixels inside a canvas of
    /// `canvas_width` pixels.
    pub fn offset(&self, canvas_width: u32, line_width: u32) -> u32 {
        let free = canvas_width.saturating_sub(line_width);
        match self {
            Self::Left => 0,
            Self::Center => free / 2,
            Self::Right => free,
        }
    }
}

impl Default for Align {
    fn default() -> Self {
        Self::Left
    }
}

impl FromStr for Align {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" | "centre" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(Error::InvalidConfig(format!("unknown alignment '{}'", s))),
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// Requested font: file, pixel size and style.
///
/// A `FontSpec` is never modified. Auto-fit derives a smaller one with
/// [`FontSpec::with_size`] on every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    path: PathBuf,
    size: u32,
    weight: Weight,
    slant: Slant,
}

impl FontSpec {
    pub fn new(path: impl Into<PathBuf>, size: u32) -> FontSpec {
        FontSpec {
            path: path.into(),
            size,
            weight: Weight::Normal,
            slant: Slant::Normal,
        }
    }

    pub fn bold(self, flag: bool) -> Self {
        FontSpec {
            weight: if flag { Weight::Bold } else { Weight::Normal },
            ..self
        }
    }

    pub fn italic(self, flag: bool) -> Self {
        FontSpec {
            slant: if flag { Slant::Italic } else { Slant::Normal },
            ..self
        }
    }

    pub fn with_size(&self, size: u32) -> Self {
        FontSpec {
            size,
            ..self.clone()
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn slant(&self) -> Slant {
        self.slant
    }

    pub fn is_styled(&self) -> bool {
        self.weight == Weight::Bold || self.slant == Slant::Italic
    }
}

/// Style directives for one render call.
///
/// # Example
///
/// ```
/// use thermal_label::{Align, TextStyle};
///
/// let style = TextStyle::new("arial.ttf", 20)
///     .bold(true)
///     .strikethrough(true)
///     .align(Align::Center);
/// assert_eq!(style.font().size(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    font: FontSpec,
    strikethrough: bool,
    align: Align,
}

impl TextStyle {
    /// Plain, left aligned text in the given font.
    pub fn new(font_path: impl Into<PathBuf>, size: u32) -> TextStyle {
        TextStyle {
            font: FontSpec::new(font_path, size),
            strikethrough: false,
            align: Align::Left,
        }
    }

    pub fn bold(self, flag: bool) -> Self {
        TextStyle {
            font: self.font.bold(flag),
            ..self
        }
    }

    pub fn italic(self, flag: bool) -> Self {
        TextStyle {
            font: self.font.italic(flag),
            ..self
        }
    }

    pub fn strikethrough(self, flag: bool) -> Self {
        TextStyle {
            strikethrough: flag,
            ..self
        }
    }

    pub fn align(self, align: Align) -> Self {
        TextStyle { align, ..self }
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn is_strikethrough(&self) -> bool {
        self.strikethrough
    }

    pub fn alignment(&self) -> Align {
        self.align
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle::new(crate::DEFAULT_FONT, crate::DEFAULT_FONT_SIZE)
    }
}

/// Input text split into lines, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    lines: Vec<String>,
}

impl TextBlock {
    pub fn parse(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        TextBlock { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }
}
