//! Shrink-to-fit layout.
//!
//! The font size drops one pixel at a time, re-measuring every line after
//! each step, until the widest line fits the print width or the size reaches
//! [`crate::MIN_FONT_SIZE`]. Glyph widths do not scale linearly with size
//! because of hinting, so there is no shortcut through the loop.

use log::{debug, warn};

use crate::{
    error::Error,
    font::Font,
    metrics::{measure, LineMetrics},
    style::{Align, FontSpec, TextBlock},
    MIN_FONT_SIZE,
};

/// Position and size of one line on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineLayout {
    pub text: String,
    pub x_offset: u32,
    pub y_offset: u32,
    pub width: u32,
    pub height: u32,
    /// Ink box start relative to the font's drawing origin.
    pub bearing: (i32, i32),
}

impl LineLayout {
    /// Row a strikethrough rule is centered on.
    pub fn strike_y(&self) -> u32 {
        self.y_offset + self.height / 2
    }
}

/// Final geometry of a text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub font_size: u32,
    pub padding: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Widest measured line, which may exceed the target width when the
    /// size floor was hit.
    pub max_line_width: u32,
    /// Number of one-pixel shrink steps taken.
    pub shrink_steps: u32,
    /// The floor was reached and the text still overflows the target width.
    pub floor_reached: bool,
    pub lines: Vec<LineLayout>,
}

/// Shrink `spec` until `block` fits `target_width`, then place the lines.
///
/// `load` produces the font for one size step and is called once per step,
/// each time with a spec derived from the previous one by
/// [`FontSpec::with_size`].
pub fn fit<F, L>(
    block: &TextBlock,
    spec: &FontSpec,
    target_width: u32,
    align: Align,
    mut load: L,
) -> Result<(F, LayoutPlan), Error>
where
    F: Font,
    L: FnMut(&FontSpec) -> Result<F, Error>,
{
    let mut step = spec.clone();
    let mut font = load(&step)?;
    let mut metrics = measure(&font, block.lines())?;
    let mut max_width = widest(&metrics);
    let mut shrink_steps = 0;

    debug!("Auto-fit: size {} -> widest line {}px", step.size(), max_width);

    while max_width > target_width && step.size() > MIN_FONT_SIZE {
        step = step.with_size(step.size() - 1);
        shrink_steps += 1;
        font = load(&step)?;
        metrics = measure(&font, block.lines())?;
        max_width = widest(&metrics);
        debug!("Auto-fit: size {} -> widest line {}px", step.size(), max_width);
    }

    let size = step.size();
    let floor_reached = max_width > target_width;
    if floor_reached {
        warn!(
            "Text is {}px wide at the minimum font size {}, wider than {}px; it will be scaled down",
            max_width, size, target_width
        );
    }

    let plan = place(block, &metrics, size, target_width, align, shrink_steps, floor_reached);
    Ok((font, plan))
}

fn widest(metrics: &[LineMetrics]) -> u32 {
    metrics.iter().map(|m| m.width).max().unwrap_or(0)
}

fn place(
    block: &TextBlock,
    metrics: &[LineMetrics],
    font_size: u32,
    target_width: u32,
    align: Align,
    shrink_steps: u32,
    floor_reached: bool,
) -> LayoutPlan {
    let padding = font_size / 3;
    let max_line_width = widest(metrics);
    let canvas_width = target_width.max(max_line_width).max(1);
    let text_height: u32 = metrics.iter().map(|m| m.height).sum();
    let canvas_height = (text_height + padding * 2).max(1);

    let mut y = padding;
    let lines = block
        .lines()
        .iter()
        .zip(metrics)
        .map(|(text, m)| {
            let line = LineLayout {
                text: text.clone(),
                x_offset: align.offset(canvas_width, m.width),
                y_offset: y,
                width: m.width,
                height: m.height,
                bearing: (m.left, m.top),
            };
            y += m.height;
            line
        })
        .collect();

    debug!(
        "Layout: size {}, padding {}, canvas {}x{}",
        font_size, padding, canvas_width, canvas_height
    );

    LayoutPlan {
        font_size,
        padding,
        canvas_width,
        canvas_height,
        max_line_width,
        shrink_steps,
        floor_reached,
        lines,
    }
}
