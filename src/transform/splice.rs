//! Tree splicing for raw embedded markup.
//!
//! Markdown-syntax nodes are spliced directly by the orchestrator; this
//! module handles raw-HTML and embedded-markup nodes, which can contain any
//! number of `<img>` tags invisible to the markdown-level walker.

use scraper::{Html, Selector};

use super::discover::EmbeddedEntry;
use super::markup;
use super::options::TransformOptions;
use super::resolve::{self, ImageInfo};
use super::TransformContext;

/// Snapshot of one `<img>` tag inside an embedded fragment.
#[derive(Debug, Clone)]
struct EmbeddedTag {
    /// Serialized form of the tag, as it appears in the re-serialized container
    raw: String,
    src: Option<String>,
    alt: Option<String>,
    title: Option<String>,
}

/// Replace every eligible `<img>` inside one embedded node.
///
/// Returns the re-serialized container value on success. `None` leaves the
/// node byte-identical: no `<img>` tag at all, no replacement made, or the
/// all-or-nothing bail-out (a tag without `src`, or an eligible tag that
/// fails to resolve or generate — every replacement already made in the
/// node is discarded with it).
pub async fn splice_embedded(
    entry: &EmbeddedEntry,
    ctx: &TransformContext<'_>,
    options: &TransformOptions,
) -> Option<String> {
    if entry.value.is_empty() {
        return None;
    }

    // Snapshot the tags up front so nothing parser-owned lives across the
    // service call boundary.
    let (mut serialized, tags) = {
        let fragment = Html::parse_fragment(&entry.value);
        let selector = Selector::parse("img").unwrap();
        let tags: Vec<EmbeddedTag> = fragment
            .select(&selector)
            .map(|img| EmbeddedTag {
                raw: img.html(),
                src: img.value().attr("src").map(str::to_string),
                alt: img.value().attr("alt").map(str::to_string),
                title: img.value().attr("title").map(str::to_string),
            })
            .collect();
        (fragment.root_element().inner_html(), tags)
    };

    if tags.is_empty() {
        return None;
    }

    let mut replaced = false;
    for tag in tags {
        let src = tag.src?;

        let info = ImageInfo::parse(&src);
        if !resolve::is_eligible(&info) {
            // Hosted images, gifs and svgs stay as they are.
            continue;
        }

        let resolved = resolve::resolve_source(info, tag.alt, tag.title, None, ctx)?;
        let html = markup::generate(&resolved, entry.in_link, ctx, options).await?;
        serialized = serialized.replacen(&tag.raw, &html, 1);
        replaced = true;
    }

    replaced.then_some(serialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentFile, FileNode, FluidImage, NodeId, NodeKind, Tree};
    use crate::service::ImageService;
    use futures::executor::block_on;

    struct StubService;

    #[async_trait::async_trait]
    impl ImageService for StubService {
        async fn fluid(
            &self,
            file: &FileNode,
            _options: &TransformOptions,
        ) -> crate::Result<Option<FluidImage>> {
            let name = file.absolute_path.file_name().unwrap().to_string_lossy();
            Ok(Some(FluidImage {
                original_img: format!("/static/{name}"),
                src: format!("/static/590-{name}"),
                src_set: format!("/static/148-{name} 148w"),
                presentation_width: 590,
                aspect_ratio: 1.5,
            }))
        }
    }

    fn entry(value: &str) -> EmbeddedEntry {
        // The node id is irrelevant to splicing itself.
        let mut tree = Tree::new();
        let id: NodeId = tree.push(
            tree.root(),
            NodeKind::Html {
                value: value.to_string(),
            },
        );
        EmbeddedEntry {
            id,
            in_link: false,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_node_without_images_untouched() {
        let files = vec![FileNode::new("/content/post/cat.jpg")];
        let document = DocumentFile::new("/content/post");
        let service = StubService;
        let ctx = TransformContext {
            files: &files,
            document: Some(&document),
            service: &service,
            compiler: None,
        };
        let options = TransformOptions::default();

        let result = block_on(splice_embedded(
            &entry("<div><p>no images here</p></div>"),
            &ctx,
            &options,
        ));
        assert!(result.is_none());
    }

    #[test]
    fn test_node_with_only_ineligible_images_untouched() {
        let files = vec![FileNode::new("/content/post/cat.jpg")];
        let document = DocumentFile::new("/content/post");
        let service = StubService;
        let ctx = TransformContext {
            files: &files,
            document: Some(&document),
            service: &service,
            compiler: None,
        };
        let options = TransformOptions::default();

        let result = block_on(splice_embedded(
            &entry("<img src=\"https://example.com/cat.jpg\"><img src=\"./anim.gif\">"),
            &ctx,
            &options,
        ));
        assert!(result.is_none());
    }

    #[test]
    fn test_missing_src_drops_whole_node() {
        let files = vec![FileNode::new("/content/post/cat.jpg")];
        let document = DocumentFile::new("/content/post");
        let service = StubService;
        let ctx = TransformContext {
            files: &files,
            document: Some(&document),
            service: &service,
            compiler: None,
        };
        let options = TransformOptions::default();

        let result = block_on(splice_embedded(
            &entry("<img src=\"./cat.jpg\"><img alt=\"no source\">"),
            &ctx,
            &options,
        ));
        assert!(result.is_none());
    }

    #[test]
    fn test_eligible_image_replaced() {
        let files = vec![FileNode::new("/content/post/cat.jpg")];
        let document = DocumentFile::new("/content/post");
        let service = StubService;
        let ctx = TransformContext {
            files: &files,
            document: Some(&document),
            service: &service,
            compiler: None,
        };
        let options = TransformOptions::default();

        let result = block_on(splice_embedded(
            &entry("<div><img src=\"./cat.jpg\" alt=\"a cat\"></div>"),
            &ctx,
            &options,
        ))
        .unwrap();
        assert!(result.starts_with("<div>"));
        assert!(result.contains("fluid-image-wrapper"));
        assert!(result.contains("alt=\"a cat\""));
        assert!(!result.contains("<img src=\"./cat.jpg\""));
    }
}
