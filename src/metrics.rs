use crate::{
    error::Error,
    font::{Extent, Font},
};

/// Ink size of one line.
///
/// `left`/`top` is where the ink box starts relative to the drawing origin;
/// the compositor subtracts it so the ink lands exactly on the line's slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineMetrics {
    pub width: u32,
    pub height: u32,
    pub left: i32,
    pub top: i32,
}

impl From<Extent> for LineMetrics {
    fn from(extent: Extent) -> Self {
        if extent.is_empty() {
            return LineMetrics::default();
        }
        LineMetrics {
            width: extent.width(),
            height: extent.height(),
            left: extent.x0,
            top: extent.y0,
        }
    }
}

/// Measure every line with `font`, in order.
pub fn measure<F: Font + ?Sized, S: AsRef<str>>(
    font: &F,
    lines: &[S],
) -> Result<Vec<LineMetrics>, Error> {
    lines
        .iter()
        .map(|line| font.text_extent(line.as_ref()).map(LineMetrics::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontFace;

    #[test]
    fn measures_each_line_in_order() {
        let font = FontFace::Builtin.at_size(20);
        let metrics = measure(&font, &["H", "", "HH"]).unwrap();
        assert_eq!(metrics.len(), 3);
        assert_eq!(
            metrics[0],
            LineMetrics {
                width: 7,
                height: 10,
                left: 0,
                top: 2
            }
        );
        assert_eq!(metrics[1], LineMetrics::default());
        assert_eq!(metrics[2].width, 15);
    }
}
