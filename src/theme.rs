//! Typography theme configuration.
//!
//! An explicit, immutable styling value for hosts that render transformed
//! documents: constructed once, passed to whatever renders output. There is
//! no ambient mutable state and nothing is injected at load time.

use crate::transform::IMAGE_LINK_CLASS;

/// Typography configuration for rendered documents.
///
/// The default theme uses a self-hosted serif stack (no remote font
/// loading) and carries the two override rules the image transform's output
/// relies on: link wrappers lose their box shadow, and images get a muted
/// duotone filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Base font size in pixels
    pub base_font_size: f64,

    /// Unitless base line height
    pub base_line_height: f64,

    /// Modular scale ratio between heading steps
    pub scale_ratio: f64,

    /// Header font stack, most specific first
    pub header_font_family: Vec<String>,

    /// Body font stack, most specific first
    pub body_font_family: Vec<String>,

    /// Remote font families to load; empty means self-hosted only
    pub google_fonts: Vec<String>,

    /// CSS filter applied to images, if any
    pub image_filter: Option<String>,
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertical rhythm: `units` of the base line height, in rem.
    pub fn rhythm(&self, units: f64) -> String {
        format!("{}rem", self.base_line_height * units)
    }

    /// Font size `steps` up the modular scale, in rem.
    pub fn scale(&self, steps: f64) -> String {
        let rem = (self.base_font_size / 16.0) * self.scale_ratio.powf(steps);
        format!("{rem}rem")
    }

    /// CSS `font-family` value for headers.
    pub fn header_font_stack(&self) -> String {
        font_stack(&self.header_font_family)
    }

    /// CSS `font-family` value for body text.
    pub fn body_font_stack(&self) -> String {
        font_stack(&self.body_font_family)
    }

    /// Override rules applied on top of the base theme.
    pub fn override_css(&self) -> String {
        let mut css = format!("a.{IMAGE_LINK_CLASS} {{ box-shadow: none; }}\n");
        if let Some(filter) = &self.image_filter {
            css.push_str(&format!("img {{ filter: {filter}; }}\n"));
        }
        css
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base_font_size: 16.0,
            base_line_height: 1.75,
            scale_ratio: 2.0,
            header_font_family: vec!["Georgia".to_string(), "serif".to_string()],
            body_font_family: vec!["Georgia".to_string(), "serif".to_string()],
            google_fonts: Vec::new(),
            image_filter: Some("sepia(1) hue-rotate(170deg)".to_string()),
        }
    }
}

/// Join a font stack, quoting families with spaces in their names.
fn font_stack(families: &[String]) -> String {
    families
        .iter()
        .map(|family| {
            if family.contains(' ') {
                format!("\"{family}\"")
            } else {
                family.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
