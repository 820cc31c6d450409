//! Transform options and the fixed output class names.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};
use crate::model::FluidImage;

/// Class applied to the generated `<img>` tag.
pub const IMAGE_CLASS: &str = "fluid-image";

/// Class applied to the sizing wrapper `<span>`.
pub const IMAGE_WRAPPER_CLASS: &str = "fluid-image-wrapper";

/// Class applied to the aspect-ratio placeholder `<span>`.
pub const IMAGE_BACKGROUND_CLASS: &str = "fluid-image-background";

/// Class applied to the link-to-original `<a>`.
pub const IMAGE_LINK_CLASS: &str = "fluid-image-link";

/// Class applied to the `<figure>` wrapper when a caption is present.
pub const FIGURE_CLASS: &str = "fluid-image-figure";

/// Class applied to the `<figcaption>`.
pub const FIGCAPTION_CLASS: &str = "fluid-image-figcaption";

/// Options for one transform invocation.
///
/// Merged from defaults, the host's path prefix, and caller overrides, and
/// immutable for the duration of the pass. Field names deserialize from the
/// camelCase keys host configuration uses.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformOptions {
    /// Maximum presentation width requested from the image service, in pixels
    pub max_width: u32,

    /// Target format the service should convert to (e.g. "jpg")
    pub to_format: String,

    /// Ask the service for grayscale output
    pub grayscale: bool,

    /// Extra style applied to the wrapper (or the figure, when captioned)
    pub wrapper_style: WrapperStyle,

    /// Placeholder background color passed to the service
    pub background_color: String,

    /// Wrap generated markup in a link to the original asset
    pub link_images_to_original: bool,

    /// Whether and from which sources to render a caption
    pub show_captions: ShowCaptions,

    /// Compile captions as markdown instead of escaping them
    pub markdown_captions: bool,

    /// Ask the service for WebP variants alongside the fallback format
    pub with_webp: bool,

    /// Ask the service for a traced-SVG placeholder
    #[serde(rename = "tracedSVG")]
    pub traced_svg: bool,

    /// Value of the `loading` attribute on generated `<img>` tags
    pub loading: Loading,

    /// Host site path prefix, forwarded to the image service
    pub path_prefix: String,
}

impl TransformOptions {
    /// Create options with the plugin defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse caller overrides from a JSON configuration object.
    ///
    /// Unspecified keys keep their defaults. The computed form of
    /// [`WrapperStyle`] cannot arrive through configuration; a string value
    /// deserializes as the static form.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Set the maximum presentation width.
    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }

    /// Set the target conversion format.
    pub fn with_to_format(mut self, format: impl Into<String>) -> Self {
        self.to_format = format.into();
        self
    }

    /// Enable or disable grayscale output.
    pub fn with_grayscale(mut self, grayscale: bool) -> Self {
        self.grayscale = grayscale;
        self
    }

    /// Set the wrapper style.
    pub fn with_wrapper_style(mut self, style: impl Into<WrapperStyle>) -> Self {
        self.wrapper_style = style.into();
        self
    }

    /// Set the placeholder background color.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    /// Enable or disable linking images to their originals.
    pub fn with_link_images_to_original(mut self, link: bool) -> Self {
        self.link_images_to_original = link;
        self
    }

    /// Set caption behavior.
    pub fn with_show_captions(mut self, show: ShowCaptions) -> Self {
        self.show_captions = show;
        self
    }

    /// Enable or disable markdown caption compilation.
    pub fn with_markdown_captions(mut self, markdown: bool) -> Self {
        self.markdown_captions = markdown;
        self
    }

    /// Request WebP variants from the service.
    pub fn with_webp(mut self, webp: bool) -> Self {
        self.with_webp = webp;
        self
    }

    /// Request a traced-SVG placeholder from the service.
    pub fn with_traced_svg(mut self, traced: bool) -> Self {
        self.traced_svg = traced;
        self
    }

    /// Set the `loading` attribute value.
    pub fn with_loading(mut self, loading: impl Into<Loading>) -> Self {
        self.loading = loading.into();
        self
    }

    /// Set the host site path prefix.
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            max_width: 590,
            to_format: "jpg".to_string(),
            grayscale: false,
            wrapper_style: WrapperStyle::default(),
            background_color: "white".to_string(),
            link_images_to_original: true,
            show_captions: ShowCaptions::Disabled,
            markdown_captions: false,
            with_webp: false,
            traced_svg: false,
            loading: Loading::Lazy,
            path_prefix: String::new(),
        }
    }
}

/// Style applied to the wrapper span (or the figure, when captioned).
///
/// Either a fixed string, or a computation over the service result for
/// per-image styling.
#[derive(Clone)]
pub enum WrapperStyle {
    /// A fixed style string
    Static(String),

    /// Computed from the service result for each image
    Computed(Arc<dyn Fn(&FluidImage) -> String + Send + Sync>),
}

impl WrapperStyle {
    /// Create a computed wrapper style.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&FluidImage) -> String + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// Resolve the style string for one image.
    pub fn resolve(&self, fluid: &FluidImage) -> String {
        match self {
            Self::Static(style) => style.clone(),
            Self::Computed(f) => f(fluid),
        }
    }
}

impl Default for WrapperStyle {
    fn default() -> Self {
        Self::Static(String::new())
    }
}

impl fmt::Debug for WrapperStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(style) => f.debug_tuple("Static").field(style).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for WrapperStyle {
    fn from(style: &str) -> Self {
        Self::Static(style.to_string())
    }
}

impl From<String> for WrapperStyle {
    fn from(style: String) -> Self {
        Self::Static(style)
    }
}

impl<'de> Deserialize<'de> for WrapperStyle {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::Static(String::deserialize(deserializer)?))
    }
}

/// A source a caption can be drawn from, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionSource {
    /// The resolved node's title
    Title,
    /// The alt text (override first, then the node's own)
    Alt,
}

impl FromStr for CaptionSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "title" => Ok(Self::Title),
            "alt" => Ok(Self::Alt),
            other => Err(Error::Config(format!(
                "showCaptions: unknown source \"{other}\""
            ))),
        }
    }
}

const DEFAULT_CAPTION_SOURCES: [CaptionSource; 2] = [CaptionSource::Title, CaptionSource::Alt];

/// Caption behavior.
///
/// Deserializes from a boolean (`true` means title-then-alt) or an ordered
/// list of `"title"`/`"alt"`, matching the host configuration shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShowCaptions {
    /// No captions
    #[default]
    Disabled,

    /// Captions from title, falling back to alt
    Enabled,

    /// Captions from an explicit ordered subset of sources
    Sources(Vec<CaptionSource>),
}

impl ShowCaptions {
    /// The caption sources to try in order, or `None` when disabled.
    pub fn sources(&self) -> Option<&[CaptionSource]> {
        match self {
            Self::Disabled => None,
            Self::Enabled => Some(&DEFAULT_CAPTION_SOURCES),
            Self::Sources(sources) => Some(sources),
        }
    }
}

impl<'de> Deserialize<'de> for ShowCaptions {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ShowCaptionsVisitor;

        impl<'de> serde::de::Visitor<'de> for ShowCaptionsVisitor {
            type Value = ShowCaptions;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean or a list of caption sources")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<ShowCaptions, E>
            where
                E: serde::de::Error,
            {
                Ok(if value {
                    ShowCaptions::Enabled
                } else {
                    ShowCaptions::Disabled
                })
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<ShowCaptions, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut sources = Vec::new();
                while let Some(name) = seq.next_element::<String>()? {
                    sources.push(name.parse().map_err(serde::de::Error::custom)?);
                }
                Ok(ShowCaptions::Sources(sources))
            }
        }

        deserializer.deserialize_any(ShowCaptionsVisitor)
    }
}

/// Value of the `loading` attribute on generated `<img>` tags.
///
/// Values outside the standard three are emitted verbatim with a warning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Loading {
    /// Defer loading until the image nears the viewport
    #[default]
    Lazy,

    /// Load immediately
    Eager,

    /// Let the browser decide
    Auto,

    /// A non-standard value, emitted as-is
    Other(String),
}

impl Loading {
    /// The attribute value to emit.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Lazy => "lazy",
            Self::Eager => "eager",
            Self::Auto => "auto",
            Self::Other(value) => value,
        }
    }

    /// Whether this is one of the standard attribute values.
    pub fn is_standard(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for Loading {
    fn from(value: &str) -> Self {
        match value {
            "lazy" => Self::Lazy,
            "eager" => Self::Eager,
            "auto" => Self::Auto,
            other => Self::Other(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Loading {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::from(String::deserialize(deserializer)?.as_str()))
    }
}
