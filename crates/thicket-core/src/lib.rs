//! Thicket Core Types and Definitions
//!
//! This crate provides the foundational types for Thicket mind maps. It
//! includes:
//!
//! - **Trees**: Owned topic trees and render requests ([`tree`], [`request`] modules)
//! - **Colors**: CSS color parsing with Graphviz-friendly output ([`color::Color`])
//! - **Styles**: Style profiles, depth tiers and per-node overrides ([`style`] module)
//! - **Labels**: Character-budget word wrapping for node labels ([`label`] module)
//! - **Identifiers**: Per-render node ids ([`identifier`] module)
//! - **Graphs**: The node/edge description handed to layout engines ([`graph`] module)

pub mod color;
pub mod graph;
pub mod identifier;
pub mod label;
pub mod request;
pub mod style;
pub mod tree;
