//! Thermal label rasterizer
//!
//! This crate turns text (or an existing image) into a raster exactly as wide
//! as the print head of a fixed-width thermal printer, ready to be binarized
//! and sent to the device.
//!
//! Text goes through font resolution, line measurement, shrink-to-fit layout,
//! composition and a final resample to the print width.
//!
//! # Example
//!
//! ```rust,no_run
//! use thermal_label::{binarize, to_matrix, Align, Binarization, Renderer, TextStyle, PRINT_WIDTH};
//!
//! let style = TextStyle::new("arial.ttf", 20).bold(true).align(Align::Center);
//! let raster = Renderer::new().render("Hello", &style, PRINT_WIDTH).unwrap();
//! let bw = binarize(&raster, Binarization::FloydSteinberg, PRINT_WIDTH).unwrap();
//! let rows = to_matrix(&bw);
//! assert_eq!(rows[0].len(), (PRINT_WIDTH / 8) as usize);
//! ```

mod builtin;
mod canvas;
mod error;
mod font;
mod layout;
mod metrics;
mod normalize;
mod renderer;
mod resolver;
mod style;
mod utils;

pub use crate::{
    builtin::BitmapFont,
    canvas::compose,
    error::Error,
    font::{Extent, Font, FontFace, ResolvedFont, TrueTypeFont},
    layout::{fit, LayoutPlan, LineLayout},
    metrics::{measure, LineMetrics},
    normalize::normalize,
    renderer::Renderer,
    resolver::{styled_candidates, system_font_candidates, FontResolver},
    style::{Align, FontSpec, Slant, TextBlock, TextStyle, Weight},
    utils::{binarize, read_image, to_matrix, Binarization},
};

/// Type alias for 1-bit bitmap data used by printers.
///
/// Each inner `Vec<u8>` represents a single row of pixels, with 8 pixels
/// packed into each byte, most significant bit leftmost. A set bit prints
/// a dot.
pub type Matrix = Vec<Vec<u8>>;

/// Width in pixels of the print head of the supported thermal printers.
///
/// 384 dots, 48 bytes per packed row.
pub const PRINT_WIDTH: u32 = 384;

/// Auto-fit never shrinks text below this pixel size.
pub const MIN_FONT_SIZE: u32 = 8;

pub const DEFAULT_FONT_SIZE: u32 = 20;

/// Font requested when the caller does not name one. Also the first system
/// fallback.
pub const DEFAULT_FONT: &str = "arial.ttf";
