//! Markup generation.
//!
//! Calls the image service once per resolved image and renders the fixed
//! fragment nesting, outer to inner: optional `<figure>` (when a caption is
//! produced), sized wrapper `<span>`, optional link to the original asset,
//! aspect-ratio placeholder `<span>` plus the `<img>` tag.

use regex::Regex;

use super::options::{
    CaptionSource, TransformOptions, FIGCAPTION_CLASS, FIGURE_CLASS, IMAGE_BACKGROUND_CLASS,
    IMAGE_CLASS, IMAGE_LINK_CLASS, IMAGE_WRAPPER_CLASS,
};
use super::resolve::ResolvedImage;
use super::TransformContext;
use crate::model::FluidImage;
use crate::service::CaptionCompiler;

/// Inline style pinning the image over its placeholder box.
const IMAGE_STYLE: &str =
    "width:100%;height:100%;margin:0;vertical-align:middle;position:absolute;top:0;left:0;";

/// Call the service and render the fragment for one image.
///
/// `None` skips the image: the service produced nothing, or failed (which
/// is logged and treated the same way).
pub async fn generate(
    resolved: &ResolvedImage,
    in_link: bool,
    ctx: &TransformContext<'_>,
    options: &TransformOptions,
) -> Option<String> {
    let fluid = match ctx.service.fluid(&resolved.file, options).await {
        Ok(Some(fluid)) => fluid,
        Ok(None) => return None,
        Err(err) => {
            log::warn!(
                "image service failed for {}: {}",
                resolved.file.absolute_path.display(),
                err
            );
            return None;
        }
    };
    Some(render_fragment(resolved, &fluid, in_link, ctx.compiler, options))
}

/// Render the HTML fragment for one image from the service result.
pub fn render_fragment(
    resolved: &ResolvedImage,
    fluid: &FluidImage,
    in_link: bool,
    compiler: Option<&dyn CaptionCompiler>,
    options: &TransformOptions,
) -> String {
    let derived;
    let alt_source = match resolved
        .alt_override
        .as_deref()
        .or(resolved.alt.as_deref())
    {
        Some(alt) => alt,
        None => {
            derived = default_alt(&resolved.url);
            &derived
        }
    };
    let alt = escape_html(alt_source);
    let title = match resolved.title.as_deref() {
        Some(title) => escape_html(title),
        None => alt.clone(),
    };

    if !options.loading.is_standard() {
        log::warn!(
            "\"{}\" is an invalid value for the loading option; use \"lazy\", \"eager\" or \"auto\"",
            options.loading.as_str()
        );
    }

    let image_tag = format!(
        "<img class=\"{IMAGE_CLASS}\" alt=\"{alt}\" title=\"{title}\" src=\"{src}\" style=\"{IMAGE_STYLE}\" loading=\"{loading}\" />",
        src = fluid.src,
        loading = options.loading.as_str(),
    );

    let ratio = placeholder_ratio(fluid.aspect_ratio);
    let mut markup = format!(
        "<span class=\"{IMAGE_BACKGROUND_CLASS}\" style=\"padding-bottom: {ratio}; position: relative; bottom: 0; left: 0; display: block;\"></span>{image_tag}"
    );

    // Linking to the original is optional, and never nested inside an
    // existing link.
    if !in_link && options.link_images_to_original {
        markup = format!(
            "<a class=\"{IMAGE_LINK_CLASS}\" href=\"{href}\" style=\"display: block\" target=\"_blank\" rel=\"noopener\">{markup}</a>",
            href = fluid.original_img,
        );
    }

    let wrapper_style = options.wrapper_style.resolve(fluid);
    let caption = image_caption(resolved, options, compiler);

    // With a caption the wrapper style moves out to the figure.
    let extra_style = if caption.is_none() && !wrapper_style.is_empty() {
        format!("{} ", wrapper_style.trim())
    } else {
        String::new()
    };
    markup = format!(
        "<span class=\"{IMAGE_WRAPPER_CLASS}\" style=\"position: relative; display: block; margin-left: auto; margin-right: auto; {extra_style}max-width: {width}px;\">{markup}</span>",
        width = fluid.presentation_width,
    );

    if let Some(caption) = caption {
        markup = format!(
            "<figure class=\"{FIGURE_CLASS}\" style=\"{wrapper_style}\">{markup}<figcaption class=\"{FIGCAPTION_CLASS}\">{caption}</figcaption></figure>"
        );
    }

    markup
}

/// Compute the caption, if captions are enabled and a source yields one.
fn image_caption(
    resolved: &ResolvedImage,
    options: &TransformOptions,
    compiler: Option<&dyn CaptionCompiler>,
) -> Option<String> {
    let sources = options.show_captions.sources()?;

    let mut caption = "";
    for source in sources {
        match source {
            CaptionSource::Title => {
                if let Some(title) = resolved.title.as_deref() {
                    caption = title;
                    break;
                }
            }
            CaptionSource::Alt => {
                if let Some(alt) = resolved
                    .alt_override
                    .as_deref()
                    .or(resolved.alt.as_deref())
                {
                    caption = alt;
                    break;
                }
            }
        }
    }

    if caption.is_empty() {
        return None;
    }
    match compiler {
        Some(compiler) if options.markdown_captions => Some(compiler.compile(caption)),
        _ => Some(escape_html(caption)),
    }
}

/// Padding percentage reserving layout space before the image loads.
pub(crate) fn placeholder_ratio(aspect_ratio: f64) -> String {
    format!("{}%", (1.0 / aspect_ratio) * 100.0)
}

/// Derive alt text from the file name: strip the extension, collapse
/// non-alphanumeric runs to single spaces.
fn default_alt(url: &str) -> String {
    let base = url.rsplit('/').next().unwrap_or("");
    let stem = match base.rfind('.') {
        Some(i) if i > 0 => &base[..i],
        _ => base,
    };
    Regex::new(r"[^A-Za-z0-9]+")
        .unwrap()
        .replace_all(stem, " ")
        .into_owned()
}

/// Escape `&`, `<`, `>`, `"`, and `'` for attribute and text positions.
pub(crate) fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
