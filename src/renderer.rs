use image::GrayImage;
use log::{debug, info};

use crate::{
    canvas::compose,
    error::Error,
    font::ResolvedFont,
    layout::{fit, LayoutPlan},
    normalize::normalize,
    resolver::FontResolver,
    style::{TextBlock, TextStyle},
};

/// Turns text into a raster exactly as wide as the print head.
///
/// A renderer holds no state between calls besides its resolver settings:
/// every call resolves its own font and owns its own canvas.
///
/// # Example
///
/// ```rust,no_run
/// use thermal_label::{Align, Renderer, TextStyle, PRINT_WIDTH};
///
/// let style = TextStyle::new("fonts/DejaVuSans.ttf", 24).align(Align::Center);
/// let raster = Renderer::new().render("Hello\nWorld", &style, PRINT_WIDTH).unwrap();
/// assert_eq!(raster.width(), PRINT_WIDTH);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    resolver: FontResolver,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            resolver: FontResolver::new(),
        }
    }

    pub fn with_resolver(resolver: FontResolver) -> Self {
        Renderer { resolver }
    }

    /// Resolve the font and run auto-fit, without drawing anything.
    pub fn layout(
        &self,
        text: &str,
        style: &TextStyle,
        target_width: u32,
    ) -> Result<(ResolvedFont, LayoutPlan), Error> {
        check(style, target_width)?;

        let spec = style.font();
        let face = self.resolver.resolve_face(spec);
        let block = TextBlock::parse(text);
        debug!("Laying out {} line(s) for width {}", block.len(), target_width);

        fit(&block, spec, target_width, style.alignment(), |step| {
            Ok(face.at_size(step.size()))
        })
    }

    /// Render `text` to a grayscale raster `target_width` pixels wide.
    pub fn render(
        &self,
        text: &str,
        style: &TextStyle,
        target_width: u32,
    ) -> Result<GrayImage, Error> {
        let (font, plan) = self.layout(text, style, target_width)?;
        let canvas = compose(&plan, &font, style.is_strikethrough())?;
        let raster = normalize(canvas, target_width)?;
        info!(
            "Rendered text at size {}: {}x{} pixels",
            plan.font_size,
            raster.width(),
            raster.height()
        );
        Ok(raster)
    }
}

/// Reject inputs that can never produce a raster, before any work is done.
fn check(style: &TextStyle, target_width: u32) -> Result<(), Error> {
    if target_width == 0 {
        return Err(Error::InvalidTargetWidth(target_width));
    }
    if style.font().size() == 0 {
        return Err(Error::InvalidFontSize(0));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_renderer() -> Renderer {
        Renderer::with_resolver(FontResolver::new().with_system_fonts(Vec::new()))
    }

    #[test]
    fn zero_font_size_is_rejected() {
        let style = TextStyle::new("missing.ttf", 0);
        assert!(matches!(
            builtin_renderer().render("x", &style, 100),
            Err(Error::InvalidFontSize(0))
        ));
    }

    #[test]
    fn layout_uses_requested_size_when_it_fits() {
        let style = TextStyle::new("missing.ttf", 20);
        let (font, plan) = builtin_renderer().layout("Hi", &style, 384).unwrap();
        assert!(font.is_builtin());
        assert_eq!(plan.font_size, 20);
        assert_eq!(plan.shrink_steps, 0);
    }
}
