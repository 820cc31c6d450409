//! Integration tests for configuration handling.

use fluidmark::{CaptionSource, Loading, ShowCaptions, TransformOptions, WrapperStyle};

#[test]
fn defaults_match_documented_values() {
    let options = TransformOptions::default();
    assert_eq!(options.max_width, 590);
    assert_eq!(options.to_format, "jpg");
    assert!(!options.grayscale);
    assert_eq!(options.background_color, "white");
    assert!(options.link_images_to_original);
    assert_eq!(options.show_captions, ShowCaptions::Disabled);
    assert!(!options.markdown_captions);
    assert!(!options.with_webp);
    assert!(!options.traced_svg);
    assert_eq!(options.loading, Loading::Lazy);
    assert_eq!(options.path_prefix, "");
}

#[test]
fn json_overrides_merge_with_defaults() {
    let options = TransformOptions::from_json(
        r#"{"maxWidth": 960, "backgroundColor": "transparent", "withWebp": true}"#,
    )
    .unwrap();

    assert_eq!(options.max_width, 960);
    assert_eq!(options.background_color, "transparent");
    assert!(options.with_webp);
    // Everything else keeps its default.
    assert!(options.link_images_to_original);
    assert_eq!(options.loading, Loading::Lazy);
}

#[test]
fn show_captions_accepts_bool_and_list() {
    let enabled = TransformOptions::from_json(r#"{"showCaptions": true}"#).unwrap();
    assert_eq!(enabled.show_captions, ShowCaptions::Enabled);
    assert_eq!(
        enabled.show_captions.sources(),
        Some(&[CaptionSource::Title, CaptionSource::Alt][..])
    );

    let disabled = TransformOptions::from_json(r#"{"showCaptions": false}"#).unwrap();
    assert_eq!(disabled.show_captions, ShowCaptions::Disabled);
    assert_eq!(disabled.show_captions.sources(), None);

    let listed = TransformOptions::from_json(r#"{"showCaptions": ["alt"]}"#).unwrap();
    assert_eq!(
        listed.show_captions,
        ShowCaptions::Sources(vec![CaptionSource::Alt])
    );
}

#[test]
fn unknown_caption_source_is_a_config_error() {
    let err = TransformOptions::from_json(r#"{"showCaptions": ["subtitle"]}"#).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Invalid configuration"));
    assert!(message.contains("subtitle"));
}

#[test]
fn nonstandard_loading_value_is_preserved() {
    let options = TransformOptions::from_json(r#"{"loading": "whenever"}"#).unwrap();
    assert_eq!(options.loading, Loading::Other("whenever".to_string()));
    assert!(!options.loading.is_standard());
    assert_eq!(options.loading.as_str(), "whenever");
}

#[test]
fn wrapper_style_deserializes_static_form() {
    let options =
        TransformOptions::from_json(r#"{"wrapperStyle": "margin-bottom: 1rem;"}"#).unwrap();
    assert!(
        matches!(options.wrapper_style, WrapperStyle::Static(ref s) if s == "margin-bottom: 1rem;")
    );
}

#[test]
fn builder_and_json_produce_the_same_options() {
    let from_json = TransformOptions::from_json(
        r#"{"maxWidth": 700, "grayscale": true, "loading": "eager"}"#,
    )
    .unwrap();
    let from_builder = TransformOptions::new()
        .with_max_width(700)
        .with_grayscale(true)
        .with_loading("eager");

    assert_eq!(from_json.max_width, from_builder.max_width);
    assert_eq!(from_json.grayscale, from_builder.grayscale);
    assert_eq!(from_json.loading, from_builder.loading);
}
