//! SVG output encoder.
//!
//! Vector drawing surface exposing the primitives the heatmap needs:
//! rectangles (optionally carrying hover text and data attributes), lines,
//! and text with anchoring and rotation. Cell rectangles embed their tooltip
//! as an SVG `<title>` element, so the emitted file shows hover text in any
//! browser without scripting.

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR).
    #[default]
    Start,
    /// Center text at position.
    Middle,
    /// Align text end at position (right-aligned for LTR).
    End,
}

/// An SVG element.
///
/// Field names match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle, optionally with a hover `<title>` and `data-*` attributes.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        stroke: Option<Rgba>,
        stroke_width: f32,
        title: Option<String>,
        data_attrs: Vec<(String, String)>,
    },
    /// Line.
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Text, optionally rotated about its position.
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        rotate: Option<f32>,
    },
    /// Embedded raster image (base64 PNG data URI).
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        data: String,
    },
}

/// SVG encoder accumulating elements for a fixed-size canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgEncoder {
    width: u32,
    height: u32,
    background: Option<Rgba>,
    elements: Vec<SvgElement>,
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, background: Some(Rgba::WHITE), elements: Vec::new() }
    }

    /// Create from a framebuffer (embeds it as a raster image).
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn from_framebuffer(fb: &Framebuffer) -> Result<Self> {
        let mut encoder = Self::new(fb.width(), fb.height());
        encoder.background = None; // image provides the background

        let png_bytes = super::PngEncoder::to_bytes(fb)?;
        let data_uri = format!("data:image/png;base64,{}", STANDARD.encode(&png_bytes));

        encoder.elements.push(SvgElement::Image {
            x: 0.0,
            y: 0.0,
            width: fb.width() as f32,
            height: fb.height() as f32,
            data: data_uri,
        });

        Ok(encoder)
    }

    /// Set background color (`None` for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Add a plain filled rectangle.
    #[must_use]
    pub fn rect(mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke: None,
            stroke_width: 0.0,
            title: None,
            data_attrs: Vec::new(),
        });
        self
    }

    /// Add a filled rectangle carrying hover text and data attributes.
    #[must_use]
    pub fn rect_titled(
        mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        title: &str,
        data_attrs: &[(&str, String)],
    ) -> Self {
        self.elements.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke: None,
            stroke_width: 0.0,
            title: Some(title.to_string()),
            data_attrs: data_attrs.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect(),
        });
        self
    }

    /// Add a line.
    #[must_use]
    pub fn line(mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: Rgba, stroke_width: f32) -> Self {
        self.elements.push(SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width });
        self
    }

    /// Add anchored text.
    #[must_use]
    pub fn text(
        mut self,
        x: f32,
        y: f32,
        text: &str,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
    ) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor,
            rotate: None,
        });
        self
    }

    /// Add anchored text rotated about its position.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn text_rotated(
        mut self,
        x: f32,
        y: f32,
        text: &str,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        degrees: f32,
    ) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor,
            rotate: Some(degrees),
        });
        self
    }

    /// Number of accumulated elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Render to an SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, bg.to_css());
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write the rendered SVG to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Escape text for XML content and attribute values.
fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect { x, y, width, height, fill, stroke, stroke_width, title, data_attrs } => {
            let stroke_attr = stroke
                .map(|s| format!(r#" stroke="{}" stroke-width="{stroke_width}""#, s.to_css()))
                .unwrap_or_default();

            let mut data = String::new();
            for (key, value) in data_attrs {
                let _ = write!(data, r#" data-{key}="{}""#, xml_escape(value));
            }

            match title {
                Some(t) => format!(
                    r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"{stroke_attr}{data}><title>{}</title></rect>"#,
                    fill.to_css(),
                    xml_escape(t)
                ),
                None => format!(
                    r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"{stroke_attr}{data}/>"#,
                    fill.to_css()
                ),
            }
        }
        SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width } => {
            format!(
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                stroke.to_css()
            )
        }
        SvgElement::Text { x, y, text, font_size, fill, anchor, rotate } => {
            let anchor_name = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let transform = rotate
                .map(|deg| format!(r#" transform="rotate({deg},{x},{y})""#))
                .unwrap_or_default();
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{anchor_name}"{transform}>{}</text>"#,
                fill.to_css(),
                xml_escape(text)
            )
        }
        SvgElement::Image { x, y, width, height, data } => {
            format!(
                r#"<image x="{x}" y="{y}" width="{width}" height="{height}" xlink:href="{data}"/>"#
            )
        }
    }
}
