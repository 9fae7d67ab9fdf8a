//! Style profiles and depth-based style resolution.
//!
//! # Overview
//!
//! - [`StyleProfile`] - Per-diagram palette, font and layout choices.
//! - [`StyleTier`] - The three depth buckets: root, main and sub.
//! - [`NodeStyle`] - The concrete style of one node after resolution.
//! - [`StyleOverrides`] - Typed per-node overrides that win over resolved defaults.
//! - [`EdgeStyle`] - The fixed edge scheme derived from a profile.
//!
//! # Tiers
//!
//! | Depth | Tier | Fill | Font size | Width × Height | Pen width |
//! |-------|------|------|-----------|----------------|-----------|
//! | 0 | [`StyleTier::Root`] | `root_color` | 18 | 2.5 × 0.8 | 2.5 |
//! | 1 | [`StyleTier::Main`] | `main_color` | 16 | 2.2 × 0.7 | 2.0 |
//! | ≥ 2 | [`StyleTier::Sub`] | `sub_color` | 14 | 2.0 × 0.6 | 1.5 |
//!
//! Every depth from 2 downwards shares the sub tier; there is no fourth tier.
//!
//! # Example
//!
//! ```
//! use thicket_core::style::{StyleProfile, StyleTier};
//!
//! let profile = StyleProfile::default();
//! let root = profile.resolve(0, None);
//! let deep = profile.resolve(7, None);
//!
//! assert_eq!(StyleTier::from_depth(7), StyleTier::Sub);
//! assert!(root.font_size() > deep.font_size());
//! assert_eq!(deep, profile.resolve(2, None));
//! ```

use std::{fmt, str::FromStr};

use log::trace;
use serde::{Deserialize, Deserializer};

use crate::{color::Color, label::DEFAULT_WRAP_WIDTH};

// =============================================================================
// Layout enums
// =============================================================================

/// Declares a closed set of Graphviz attribute values.
///
/// Values parse case-insensitively, both through [`FromStr`] and when
/// deserializing, and print in Graphviz's canonical spelling.
macro_rules! graphviz_keyword {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($what:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
        #[serde(try_from = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every accepted value.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the Graphviz attribute value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        let valid: Vec<&str> = Self::ALL.iter().map(|value| value.as_str()).collect();
                        format!("invalid {} `{s}`, valid values: {}", $what, valid.join(", "))
                    })
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

graphviz_keyword! {
    /// Rank direction of the laid out graph.
    pub enum Direction ("direction") {
        /// Top to bottom (default)
        #[default]
        TB => "TB",
        /// Left to right
        LR => "LR",
        /// Right to left
        RL => "RL",
        /// Bottom to top
        BT => "BT",
    }
}

graphviz_keyword! {
    /// How edges are routed, mapped to the Graphviz `splines` attribute.
    pub enum LineStyle ("line style") {
        /// Curved edges (default)
        #[default]
        Curved => "curved",
        /// Smooth spline edges
        Spline => "spline",
        /// Same as `spline`
        True => "true",
        /// Axis-aligned edges
        Ortho => "ortho",
        /// Straight segments with bends
        Polyline => "polyline",
        /// Straight lines
        Line => "line",
        /// Same as `line`
        False => "false",
        /// Edges are not drawn
        None => "none",
        /// Splines that may overlap clusters
        Compound => "compound",
    }
}

graphviz_keyword! {
    /// Node outline shape: the full Graphviz shape set.
    pub enum NodeShape ("node shape") {
        #[default]
        Rect => "rect",
        Rectangle => "rectangle",
        Box => "box",
        Square => "square",
        Polygon => "polygon",
        Ellipse => "ellipse",
        Oval => "oval",
        Circle => "circle",
        Point => "point",
        Egg => "egg",
        Triangle => "triangle",
        Plaintext => "plaintext",
        Plain => "plain",
        Diamond => "diamond",
        Trapezium => "trapezium",
        Parallelogram => "parallelogram",
        House => "house",
        Pentagon => "pentagon",
        Hexagon => "hexagon",
        Septagon => "septagon",
        Octagon => "octagon",
        DoubleCircle => "doublecircle",
        DoubleOctagon => "doubleoctagon",
        TripleOctagon => "tripleoctagon",
        InvTriangle => "invtriangle",
        InvTrapezium => "invtrapezium",
        InvHouse => "invhouse",
        MDiamond => "Mdiamond",
        MSquare => "Msquare",
        MCircle => "Mcircle",
        Star => "star",
        None => "none",
        Underline => "underline",
        Cylinder => "cylinder",
        Note => "note",
        Tab => "tab",
        Folder => "folder",
        Box3d => "box3d",
        Component => "component",
        Promoter => "promoter",
        Cds => "cds",
        Terminator => "terminator",
        Utr => "utr",
        PrimerSite => "primersite",
        RestrictionSite => "restrictionsite",
        FivePOverhang => "fivepoverhang",
        ThreePOverhang => "threepoverhang",
        NOverhang => "noverhang",
        Assembly => "assembly",
        Signature => "signature",
        Insulator => "insulator",
        RiboSite => "ribosite",
        RnaStab => "rnastab",
        ProteaseSite => "proteasesite",
        ProteinStab => "proteinstab",
        RPromoter => "rpromoter",
        RArrow => "rarrow",
        LArrow => "larrow",
        LPromoter => "lpromoter",
        Record => "record",
        MRecord => "Mrecord",
    }
}

// =============================================================================
// Style profile
// =============================================================================

/// Per-diagram style configuration.
///
/// Every field is optional when deserializing; missing fields take the
/// defaults below.
///
/// | Field | Default |
/// |-------|---------|
/// | `root_color` | `#2E86C1` |
/// | `main_color` | `#3498DB` |
/// | `sub_color` | `#5DADE2` |
/// | `edge_color` | `#85C1E9` |
/// | `font_family` | `SimHei` |
/// | `direction` | `TB` |
/// | `node_shape` | `rect` |
/// | `line_style` | `curved` |
/// | `wrap_width` | `15` |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleProfile {
    root_color: Color,
    main_color: Color,
    sub_color: Color,
    edge_color: Color,
    font_family: String,
    direction: Direction,
    node_shape: NodeShape,
    line_style: LineStyle,
    wrap_width: usize,
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self {
            root_color: Color::new("#2E86C1").expect("valid default root color"),
            main_color: Color::new("#3498DB").expect("valid default main color"),
            sub_color: Color::new("#5DADE2").expect("valid default sub color"),
            edge_color: Color::new("#85C1E9").expect("valid default edge color"),
            font_family: String::from("SimHei"),
            direction: Direction::default(),
            node_shape: NodeShape::default(),
            line_style: LineStyle::default(),
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

impl StyleProfile {
    /// Returns the fill color used for nodes of the given tier.
    pub fn tier_color(&self, tier: StyleTier) -> Color {
        match tier {
            StyleTier::Root => self.root_color,
            StyleTier::Main => self.main_color,
            StyleTier::Sub => self.sub_color,
        }
    }

    /// Returns the color of every parent-to-child edge.
    pub fn edge_color(&self) -> Color {
        self.edge_color
    }

    /// Returns the font family shared by all labels.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Returns the rank direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the default node shape.
    pub fn node_shape(&self) -> NodeShape {
        self.node_shape
    }

    /// Returns the edge routing style.
    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    /// Returns the character budget per wrapped label line.
    pub fn wrap_width(&self) -> usize {
        self.wrap_width
    }

    /// Returns a copy of this profile with the fill color of `tier` replaced.
    pub fn with_tier_color(mut self, tier: StyleTier, color: Color) -> Self {
        match tier {
            StyleTier::Root => self.root_color = color,
            StyleTier::Main => self.main_color = color,
            StyleTier::Sub => self.sub_color = color,
        }
        self
    }

    /// Returns a copy of this profile with the edge color replaced.
    pub fn with_edge_color(mut self, color: Color) -> Self {
        self.edge_color = color;
        self
    }

    /// Returns a copy of this profile with the font family replaced.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Returns a copy of this profile with the rank direction replaced.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Returns a copy of this profile with the default node shape replaced.
    pub fn with_node_shape(mut self, shape: NodeShape) -> Self {
        self.node_shape = shape;
        self
    }

    /// Returns a copy of this profile with the edge routing style replaced.
    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }

    /// Returns a copy of this profile with the label wrap width replaced.
    pub fn with_wrap_width(mut self, wrap_width: usize) -> Self {
        self.wrap_width = wrap_width;
        self
    }

    /// Resolves the concrete style of a node at `depth`.
    ///
    /// The tier defaults come first; every field set in `overrides` then
    /// replaces the matching resolved value.
    ///
    /// # Arguments
    ///
    /// * `depth` - Distance from the root, where the root itself is `0`.
    /// * `overrides` - Optional per-node overrides.
    pub fn resolve(&self, depth: usize, overrides: Option<&StyleOverrides>) -> NodeStyle {
        let tier = StyleTier::from_depth(depth);
        let metrics = tier.metrics();
        let fill = self.tier_color(tier);

        let mut style = NodeStyle {
            tier,
            shape: self.node_shape,
            fill_style: String::from("filled,rounded"),
            fill_color: fill,
            border_color: fill,
            font_name: self.font_family.clone(),
            font_size: metrics.font_size,
            font_color: None,
            width: metrics.width,
            height: metrics.height,
            pen_width: metrics.pen_width,
        };

        if let Some(overrides) = overrides {
            trace!(depth, overrides:?; "Applying node style overrides");
            style.apply_overrides(overrides);
        }

        style
    }
}

// =============================================================================
// Tiers
// =============================================================================

/// The depth bucket a node's default style is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTier {
    Root,
    Main,
    Sub,
}

struct TierMetrics {
    font_size: f32,
    width: f32,
    height: f32,
    pen_width: f32,
}

impl StyleTier {
    /// Maps a depth to its tier. Depth 2 and everything below it is `Sub`.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 => Self::Root,
            1 => Self::Main,
            _ => Self::Sub,
        }
    }

    fn metrics(self) -> TierMetrics {
        match self {
            Self::Root => TierMetrics {
                font_size: 18.0,
                width: 2.5,
                height: 0.8,
                pen_width: 2.5,
            },
            Self::Main => TierMetrics {
                font_size: 16.0,
                width: 2.2,
                height: 0.7,
                pen_width: 2.0,
            },
            Self::Sub => TierMetrics {
                font_size: 14.0,
                width: 2.0,
                height: 0.6,
                pen_width: 1.5,
            },
        }
    }
}

// =============================================================================
// Per-node overrides
// =============================================================================

/// Per-node style overrides.
///
/// Field names follow the Graphviz node attribute names so existing payloads
/// keep working. Unknown names are rejected when deserializing, and numeric
/// fields accept either JSON numbers or numeric strings (`"14"`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleOverrides {
    #[serde(default)]
    pub shape: Option<NodeShape>,
    /// Graphviz `style` list, e.g. `"filled,dashed"`.
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub fillcolor: Option<Color>,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub fontname: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fontsize: Option<f32>,
    #[serde(default)]
    pub fontcolor: Option<Color>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub width: Option<f32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub height: Option<f32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub penwidth: Option<f32>,
}

impl StyleOverrides {
    /// Returns `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f32),
    Text(String),
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(value)) => Ok(Some(value)),
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse::<f32>()
            .map(Some)
            .map_err(|err| serde::de::Error::custom(format!("invalid number `{text}`: {err}"))),
    }
}

// =============================================================================
// Resolved styles
// =============================================================================

/// The concrete style of a single node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    tier: StyleTier,
    shape: NodeShape,
    fill_style: String,
    fill_color: Color,
    border_color: Color,
    font_name: String,
    font_size: f32,
    font_color: Option<Color>,
    width: f32,
    height: f32,
    pen_width: f32,
}

impl NodeStyle {
    /// Returns the tier the defaults were drawn from, even if overridden.
    pub fn tier(&self) -> StyleTier {
        self.tier
    }

    /// Returns the outline shape.
    pub fn shape(&self) -> NodeShape {
        self.shape
    }

    /// Returns the Graphviz `style` list, `filled,rounded` unless overridden.
    pub fn fill_style(&self) -> &str {
        &self.fill_style
    }

    /// Returns the fill color.
    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    /// Returns the outline color.
    pub fn border_color(&self) -> Color {
        self.border_color
    }

    /// Returns the label font.
    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    /// Returns the label font size in points.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the label color, if one was overridden.
    pub fn font_color(&self) -> Option<Color> {
        self.font_color
    }

    /// Minimum width in inches.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Minimum height in inches.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the outline width in points.
    pub fn pen_width(&self) -> f32 {
        self.pen_width
    }

    /// Replaces every field that `overrides` sets. Unset fields are untouched.
    pub fn apply_overrides(&mut self, overrides: &StyleOverrides) {
        if let Some(shape) = overrides.shape {
            self.shape = shape;
        }
        if let Some(style) = &overrides.style {
            self.fill_style = style.clone();
        }
        if let Some(fill) = overrides.fillcolor {
            self.fill_color = fill;
        }
        if let Some(border) = overrides.color {
            self.border_color = border;
        }
        if let Some(font) = &overrides.fontname {
            self.font_name = font.clone();
        }
        if let Some(size) = overrides.fontsize {
            self.font_size = size;
        }
        if let Some(font_color) = overrides.fontcolor {
            self.font_color = Some(font_color);
        }
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(pen_width) = overrides.penwidth {
            self.pen_width = pen_width;
        }
    }
}

/// Style shared by every parent-to-child edge of a diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStyle {
    color: Color,
    pen_width: f32,
    arrow_head: &'static str,
    arrow_size: f32,
}

impl EdgeStyle {
    /// Builds the edge scheme for `profile`: its edge color, a 2.0 pen and
    /// a normal arrow head at 0.8 scale.
    pub fn for_profile(profile: &StyleProfile) -> Self {
        Self {
            color: profile.edge_color(),
            pen_width: 2.0,
            arrow_head: "normal",
            arrow_size: 0.8,
        }
    }

    /// Returns the edge color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the edge width in points.
    pub fn pen_width(&self) -> f32 {
        self.pen_width
    }

    /// Returns the Graphviz `arrowhead` value.
    pub fn arrow_head(&self) -> &'static str {
        self.arrow_head
    }

    /// Returns the arrow head scale.
    pub fn arrow_size(&self) -> f32 {
        self.arrow_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_depth() {
        assert_eq!(StyleTier::from_depth(0), StyleTier::Root);
        assert_eq!(StyleTier::from_depth(1), StyleTier::Main);
        assert_eq!(StyleTier::from_depth(2), StyleTier::Sub);
        assert_eq!(StyleTier::from_depth(10), StyleTier::Sub);
    }

    #[test]
    fn test_root_tier_uses_root_color() {
        let profile = StyleProfile::default();
        let style = profile.resolve(0, None);

        assert_eq!(style.tier(), StyleTier::Root);
        assert_eq!(style.fill_color(), profile.tier_color(StyleTier::Root));
        assert_eq!(style.border_color(), style.fill_color());
        assert_eq!(style.fill_style(), "filled,rounded");
        assert_eq!(style.font_name(), "SimHei");
    }

    #[test]
    fn test_sizes_shrink_with_depth() {
        let profile = StyleProfile::default();
        let root = profile.resolve(0, None);
        let main = profile.resolve(1, None);
        let sub = profile.resolve(2, None);

        assert!(root.font_size() > main.font_size());
        assert!(main.font_size() > sub.font_size());
        assert!(root.width() > main.width() && main.width() > sub.width());
        assert!(root.height() > main.height() && main.height() > sub.height());
    }

    #[test]
    fn test_deep_nodes_share_sub_tier() {
        let profile = StyleProfile::default();
        let depth_two = profile.resolve(2, None);

        for depth in 3..=10 {
            assert_eq!(profile.resolve(depth, None), depth_two);
        }
    }

    #[test]
    fn test_overrides_replace_key_by_key() {
        let profile = StyleProfile::default();
        let overrides = StyleOverrides {
            fillcolor: Some(Color::new("orange").unwrap()),
            fontsize: Some(22.0),
            ..StyleOverrides::default()
        };

        let base = profile.resolve(1, None);
        let style = profile.resolve(1, Some(&overrides));

        assert_eq!(style.fill_color(), Color::new("orange").unwrap());
        assert_eq!(style.font_size(), 22.0);
        // Untouched fields keep their tier defaults
        assert_eq!(style.border_color(), base.border_color());
        assert_eq!(style.width(), base.width());
        assert_eq!(style.shape(), base.shape());
        assert_eq!(style.tier(), StyleTier::Main);
    }

    #[test]
    fn test_profile_deserialize_partial() {
        let profile: StyleProfile =
            serde_json::from_str(r#"{"direction": "LR", "root_color": "red"}"#).unwrap();

        assert_eq!(profile.direction(), Direction::LR);
        assert_eq!(profile.tier_color(StyleTier::Root).to_hex(), "#ff0000");
        assert_eq!(profile.tier_color(StyleTier::Main).to_hex(), "#3498db");
        assert_eq!(profile.node_shape(), NodeShape::Rect);
        assert_eq!(profile.line_style(), LineStyle::Curved);
        assert_eq!(profile.wrap_width(), 15);
    }

    #[test]
    fn test_overrides_accept_numeric_strings() {
        let overrides: StyleOverrides =
            serde_json::from_str(r#"{"fontsize": "12", "penwidth": 3, "shape": "ellipse"}"#)
                .unwrap();

        assert_eq!(overrides.fontsize, Some(12.0));
        assert_eq!(overrides.penwidth, Some(3.0));
        assert_eq!(overrides.shape, Some(NodeShape::Ellipse));
        assert!(!overrides.is_empty());
    }

    #[test]
    fn test_overrides_reject_unknown_attribute() {
        let result = serde_json::from_str::<StyleOverrides>(r#"{"sparkle": "yes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_reject_bad_number() {
        let result = serde_json::from_str::<StyleOverrides>(r#"{"width": "wide"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("lr".parse::<Direction>(), Ok(Direction::LR));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_profile_accepts_graphviz_shapes() {
        for (name, shape) in [
            ("rectangle", NodeShape::Rectangle),
            ("box3d", NodeShape::Box3d),
            ("plain", NodeShape::Plain),
            ("none", NodeShape::None),
            ("Mrecord", NodeShape::MRecord),
            ("star", NodeShape::Star),
        ] {
            let json = format!(r#"{{"node_shape": "{name}"}}"#);
            let profile: StyleProfile = serde_json::from_str(&json).unwrap();
            assert_eq!(profile.node_shape(), shape);
            assert_eq!(shape.as_str(), name);
        }
    }

    #[test]
    fn test_profile_accepts_graphviz_splines() {
        for (name, line_style) in [
            ("true", LineStyle::True),
            ("false", LineStyle::False),
            ("none", LineStyle::None),
            ("compound", LineStyle::Compound),
        ] {
            let json = format!(r#"{{"line_style": "{name}"}}"#);
            let profile: StyleProfile = serde_json::from_str(&json).unwrap();
            assert_eq!(profile.line_style(), line_style);
            assert_eq!(line_style.to_string(), name);
        }
    }

    #[test]
    fn test_profile_direction_is_case_insensitive() {
        let profile: StyleProfile = serde_json::from_str(r#"{"direction": "lr"}"#).unwrap();
        assert_eq!(profile.direction(), Direction::LR);
        assert_eq!(profile.direction().as_str(), "LR");
    }

    #[test]
    fn test_unknown_shape_rejected() {
        let err = serde_json::from_str::<StyleProfile>(r#"{"node_shape": "blob"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid node shape `blob`"));

        let err = serde_json::from_str::<StyleOverrides>(r#"{"shape": "blob"}"#).unwrap_err();
        assert!(err.to_string().contains("blob"));
    }

    #[test]
    fn test_shape_names_are_unique() {
        let mut names: Vec<String> = NodeShape::ALL
            .iter()
            .map(|shape| shape.as_str().to_ascii_lowercase())
            .collect();
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn test_edge_style_for_profile() {
        let profile = StyleProfile::default().with_edge_color(Color::new("gray").unwrap());
        let edge = EdgeStyle::for_profile(&profile);

        assert_eq!(edge.color(), Color::new("gray").unwrap());
        assert_eq!(edge.pen_width(), 2.0);
        assert_eq!(edge.arrow_head(), "normal");
    }
}
