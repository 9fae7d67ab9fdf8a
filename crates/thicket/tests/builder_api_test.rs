//! Integration tests for the MindMapBuilder API
//!
//! These tests verify that the public API works without Graphviz or
//! ImageMagick installed.

use thicket::{
    MindMapBuilder, ThicketError,
    config::{AppConfig, EngineConfig, OutputConfig},
    request::MindMapRequest,
    style::{Direction, StyleProfile},
    tree::TreeNode,
};

fn request() -> MindMapRequest {
    MindMapRequest::new(
        TreeNode::new("Rust")
            .with_child(TreeNode::new("Ownership").with_content("one owner per value"))
            .with_child(TreeNode::new("Traits")),
    )
}

#[test]
fn test_builder_api_exists() {
    // Just verify the API compiles and can be constructed
    let _builder = MindMapBuilder::default();
}

#[test]
fn test_compose_request() {
    let builder = MindMapBuilder::default();
    let graph = builder.compose(&request()).expect("Failed to compose");

    assert_eq!(graph.nodes().len(), 3);
    assert_eq!(graph.edges().len(), 2);
    assert_eq!(graph.nodes()[1].label(), "Ownership\none owner per\nvalue");
}

#[test]
fn test_render_dot() {
    let source = MindMapBuilder::default()
        .render_dot(&request())
        .expect("Failed to render DOT");

    assert!(source.starts_with("digraph mindmap"));
    assert!(source.contains("node_0 -> node_1"));
    assert!(source.contains("node_0 -> node_2"));
    assert!(source.contains(r#"comment="Mind Map - Rust""#));
}

#[test]
fn test_request_style_replaces_configured_profile() {
    let config = AppConfig::new(
        OutputConfig::default(),
        EngineConfig::default(),
        StyleProfile::default().with_direction(Direction::BT),
    );
    let builder = MindMapBuilder::new(config);

    let plain = request();
    assert_eq!(builder.profile_for(&plain).direction(), Direction::BT);

    let styled = request().with_style(StyleProfile::default().with_direction(Direction::LR));
    assert_eq!(builder.profile_for(&styled).direction(), Direction::LR);
    assert!(builder.render_dot(&styled).unwrap().contains(r#"rankdir="LR""#));
}

#[test]
fn test_compose_rejects_blank_title() {
    let request = MindMapRequest::new(TreeNode::new("Root").with_child(TreeNode::new("")));
    let result = MindMapBuilder::default().compose(&request);

    assert!(matches!(result, Err(ThicketError::Compose(_))));
}

#[test]
fn test_render_without_graphviz_writes_nothing() {
    let scratch = tempfile::tempdir().unwrap();
    let output = scratch.path().join("maps");
    let config = AppConfig::new(
        OutputConfig::new(&output, "mindmap"),
        EngineConfig::default().with_layout_binary("/nonexistent/thicket-test-dot"),
        StyleProfile::default(),
    );

    let result = MindMapBuilder::new(config).render(&request());

    match result {
        Err(ThicketError::DependencyMissing { tool, .. }) => {
            assert_eq!(tool, "thicket-test-dot");
        }
        other => panic!("Expected DependencyMissing, got {other:?}"),
    }
    assert!(!output.exists());
}
