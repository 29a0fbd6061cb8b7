use image::{GrayImage, Luma};
use log::debug;

use crate::{error::Error, font::Font, layout::LayoutPlan};

pub const BACKGROUND: Luma<u8> = Luma([255]);
pub const FOREGROUND: Luma<u8> = Luma([0]);

/// Draw every line of `plan` onto a fresh canvas.
///
/// Each line's ink box is placed with its top-left corner at the line's
/// offsets. With `strikethrough`, a rule `max(1, font_size / 20)` pixels thick
/// crosses the middle of every non-empty line.
pub fn compose<F: Font + ?Sized>(
    plan: &LayoutPlan,
    font: &F,
    strikethrough: bool,
) -> Result<GrayImage, Error> {
    let mut canvas = GrayImage::from_pixel(plan.canvas_width, plan.canvas_height, BACKGROUND);
    let thickness = (plan.font_size / 20).max(1);

    for line in &plan.lines {
        let origin = (
            line.x_offset as i32 - line.bearing.0,
            line.y_offset as i32 - line.bearing.1,
        );
        font.draw(&mut canvas, origin, &line.text, FOREGROUND)?;

        if strikethrough && line.width > 0 {
            let top = line.strike_y().saturating_sub(thickness / 2);
            fill_rows(&mut canvas, line.x_offset, line.x_offset + line.width, top, thickness);
            debug!("Strikethrough at y={} for {:?}", line.strike_y(), line.text);
        }
    }

    Ok(canvas)
}

/// Paint `rows` full rows starting at `top`, spanning `[x0, x1)`.
fn fill_rows(canvas: &mut GrayImage, x0: u32, x1: u32, top: u32, rows: u32) {
    let x1 = x1.min(canvas.width());
    let y1 = (top + rows).min(canvas.height());
    for y in top..y1 {
        for x in x0..x1 {
            canvas.put_pixel(x, y, FOREGROUND);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        font::FontFace,
        layout::fit,
        style::{Align, FontSpec, TextBlock},
    };

    fn plan_for(text: &str, size: u32, width: u32, align: Align) -> (crate::ResolvedFont, LayoutPlan) {
        let spec = FontSpec::new("builtin", size);
        fit(&TextBlock::parse(text), &spec, width, align, |step| {
            Ok(FontFace::Builtin.at_size(step.size()))
        })
        .unwrap()
    }

    fn is_dark(canvas: &GrayImage, x: u32, y: u32) -> bool {
        canvas.get_pixel(x, y).0[0] < 128
    }

    #[test]
    fn canvas_matches_plan() {
        let (font, plan) = plan_for("Hello", 20, 100, Align::Left);
        let canvas = compose(&plan, &font, false).unwrap();
        assert_eq!(canvas.dimensions(), (plan.canvas_width, plan.canvas_height));
    }

    #[test]
    fn ink_lands_on_the_line_slot() {
        let (font, plan) = plan_for("H", 20, 30, Align::Right);
        let line = &plan.lines[0];
        assert_eq!(line.x_offset, 23);
        let canvas = compose(&plan, &font, false).unwrap();
        // top-left corner of the ink box of `H` is set
        assert!(is_dark(&canvas, line.x_offset, line.y_offset));
        assert!(!is_dark(&canvas, line.x_offset - 1, line.y_offset));
        assert!(!is_dark(&canvas, line.x_offset, line.y_offset - 1));
        let dark = canvas.pixels().filter(|p| p.0[0] < 128).count();
        assert_eq!(dark, 2 * 10 * 2 + 3);
    }

    #[test]
    fn strikethrough_crosses_each_line() {
        let (font, plan) = plan_for("HH\nH", 20, 40, Align::Left);
        let plain = compose(&plan, &font, false).unwrap();
        let struck = compose(&plan, &font, true).unwrap();
        for line in &plan.lines {
            let y = line.strike_y();
            assert!(y >= line.y_offset && y <= line.y_offset + line.height);
            for x in line.x_offset..line.x_offset + line.width {
                assert!(is_dark(&struck, x, y));
            }
            // the gap inside `H` is only filled by the rule
            assert!(!is_dark(&plain, line.x_offset + 3, line.y_offset + 1));
        }
        assert!(!is_dark(&struck, 20, plan.lines[1].strike_y()));
    }

    #[test]
    fn thick_rule_for_large_sizes() {
        let (font, plan) = plan_for("H", 60, 20, Align::Left);
        let struck = compose(&plan, &font, true).unwrap();
        let y = plan.lines[0].strike_y();
        // 60 / 20 = 3 rows centered on the strike row
        for row in y - 1..=y + 1 {
            assert!(is_dark(&struck, 3, row));
        }
        assert!(!is_dark(&struck, 3, y - 2));
        assert!(!is_dark(&struck, 3, y + 2));
    }

    #[test]
    fn empty_line_gets_no_rule() {
        let (font, plan) = plan_for("", 20, 20, Align::Left);
        let struck = compose(&plan, &font, true).unwrap();
        assert!(struck.pixels().all(|p| p.0[0] == 255));
    }
}
