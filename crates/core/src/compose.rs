//! 样式合成
//!
//! 把间距、flex、尺寸、定位等属性展开成一份扁平的 [`StyleMap`]。
//! 不检查属性之间的冲突（例如同时给出 `flex` 和 `flexBasis`），
//! 由渲染层按 CSS 规则决定最终效果。

use crate::resolve::{to_px, Resolver, SizeValue};
use crate::types::StyleMap;
use serde::{Deserialize, Serialize};

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

/// 间距属性（padding / margin）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingProps {
    pub padding: Option<SizeValue>,
    pub padding_x: Option<SizeValue>,
    pub padding_y: Option<SizeValue>,
    pub padding_top: Option<SizeValue>,
    pub padding_right: Option<SizeValue>,
    pub padding_bottom: Option<SizeValue>,
    pub padding_left: Option<SizeValue>,

    pub margin: Option<SizeValue>,
    pub margin_x: Option<SizeValue>,
    pub margin_y: Option<SizeValue>,
    pub margin_top: Option<SizeValue>,
    pub margin_right: Option<SizeValue>,
    pub margin_bottom: Option<SizeValue>,
    pub margin_left: Option<SizeValue>,
}

/// flex 子项对齐方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Start,
    Center,
    End,
    Stretch,
    Baseline,
}

impl Alignment {
    pub fn as_css(&self) -> &'static str {
        match self {
            Alignment::Start => "flex-start",
            Alignment::Center => "center",
            Alignment::End => "flex-end",
            Alignment::Stretch => "stretch",
            Alignment::Baseline => "baseline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl Position {
    pub fn as_css(&self) -> &'static str {
        match self {
            Position::Static => "static",
            Position::Relative => "relative",
            Position::Absolute => "absolute",
            Position::Fixed => "fixed",
            Position::Sticky => "sticky",
        }
    }
}

/// flex、尺寸与定位属性
///
/// 尺寸与偏移量为数值时输出 `px`，字符串原样透传（`%`、`rem`、`vw` 等）。
/// `flex` / `flexGrow` / `flexShrink` / `zIndex` 不带单位。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutProps {
    pub width: Option<SizeValue>,
    pub height: Option<SizeValue>,
    pub min_width: Option<SizeValue>,
    pub max_width: Option<SizeValue>,
    pub min_height: Option<SizeValue>,
    pub max_height: Option<SizeValue>,

    pub flex: Option<SizeValue>,
    pub flex_grow: Option<f64>,
    pub flex_shrink: Option<f64>,
    pub flex_basis: Option<SizeValue>,
    pub align_self: Option<Alignment>,

    pub position: Option<Position>,
    pub top: Option<SizeValue>,
    pub right: Option<SizeValue>,
    pub bottom: Option<SizeValue>,
    pub left: Option<SizeValue>,
    pub z_index: Option<i32>,
}

/// 命名字重
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightName {
    Normal,
    Medium,
    Semibold,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeight {
    Named(WeightName),
    Numeric(u16),
}

impl FontWeight {
    pub fn value(&self) -> u16 {
        match self {
            FontWeight::Named(WeightName::Normal) => 400,
            FontWeight::Named(WeightName::Medium) => 500,
            FontWeight::Named(WeightName::Semibold) => 600,
            FontWeight::Named(WeightName::Bold) => 700,
            FontWeight::Numeric(n) => *n,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

/// 文本属性，`size` 缺省为 `text-base`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    #[serde(flatten)]
    pub spacing: SpacingProps,
    pub size: Option<SizeValue>,
    pub weight: Option<FontWeight>,
    pub line_height: Option<SizeValue>,
    pub align: Option<TextAlign>,
    pub color: Option<String>,
    pub font_family: Option<String>,
}

/// 某一类四边属性的全部输入，按 全部 → 轴 → 单边 的顺序应用
struct Edges<'a> {
    all: Option<&'a SizeValue>,
    x: Option<&'a SizeValue>,
    y: Option<&'a SizeValue>,
    top: Option<&'a SizeValue>,
    right: Option<&'a SizeValue>,
    bottom: Option<&'a SizeValue>,
    left: Option<&'a SizeValue>,
}

impl SpacingProps {
    fn padding_edges(&self) -> Edges<'_> {
        Edges {
            all: self.padding.as_ref(),
            x: self.padding_x.as_ref(),
            y: self.padding_y.as_ref(),
            top: self.padding_top.as_ref(),
            right: self.padding_right.as_ref(),
            bottom: self.padding_bottom.as_ref(),
            left: self.padding_left.as_ref(),
        }
    }

    fn margin_edges(&self) -> Edges<'_> {
        Edges {
            all: self.margin.as_ref(),
            x: self.margin_x.as_ref(),
            y: self.margin_y.as_ref(),
            top: self.margin_top.as_ref(),
            right: self.margin_right.as_ref(),
            bottom: self.margin_bottom.as_ref(),
            left: self.margin_left.as_ref(),
        }
    }
}

/// 数值 → px，字符串原样
fn length(value: &SizeValue) -> String {
    match value {
        SizeValue::Number(n) => to_px(*n),
        SizeValue::Token(s) => s.clone(),
    }
}

/// 数值不带单位，字符串原样
fn unitless(value: &SizeValue) -> String {
    match value {
        SizeValue::Number(n) => n.to_string(),
        SizeValue::Token(s) => s.clone(),
    }
}

impl Resolver {
    /// 合成间距与布局属性
    ///
    /// 对同一条边，单边属性总是覆盖轴简写，轴简写总是覆盖 `padding` / `margin`，
    /// 与输入中的声明顺序无关。
    pub fn compose(&self, spacing: &SpacingProps, layout: &LayoutProps) -> StyleMap {
        let mut styles = self.compose_spacing(spacing);

        let sizes = [
            ("width", &layout.width),
            ("height", &layout.height),
            ("min-width", &layout.min_width),
            ("max-width", &layout.max_width),
            ("min-height", &layout.min_height),
            ("max-height", &layout.max_height),
        ];
        for (property, value) in sizes {
            if let Some(value) = value {
                styles.insert(property, length(value));
            }
        }

        if let Some(flex) = &layout.flex {
            styles.insert("flex", unitless(flex));
        }
        if let Some(grow) = layout.flex_grow {
            styles.insert("flex-grow", grow.to_string());
        }
        if let Some(shrink) = layout.flex_shrink {
            styles.insert("flex-shrink", shrink.to_string());
        }
        if let Some(basis) = &layout.flex_basis {
            styles.insert("flex-basis", length(basis));
        }
        if let Some(align) = layout.align_self {
            styles.insert("align-self", align.as_css());
        }

        if let Some(position) = layout.position {
            styles.insert("position", position.as_css());
        }
        let offsets = [
            ("top", &layout.top),
            ("right", &layout.right),
            ("bottom", &layout.bottom),
            ("left", &layout.left),
        ];
        for (property, value) in offsets {
            if let Some(value) = value {
                styles.insert(property, length(value));
            }
        }
        if let Some(z_index) = layout.z_index {
            styles.insert("z-index", z_index.to_string());
        }

        styles
    }

    /// 合成文本属性
    pub fn compose_text(&self, text: &TextProps) -> StyleMap {
        let mut styles = self.compose_spacing(&text.spacing);

        let default_size = SizeValue::from("text-base");
        let size = text.size.as_ref().unwrap_or(&default_size);
        if let Some(font_size) = self.resolve_typography(Some(size)) {
            styles.insert("font-size", font_size);
        }
        if let Some(weight) = text.weight {
            styles.insert("font-weight", weight.value().to_string());
        }
        if let Some(color) = &text.color {
            styles.insert("color", color.as_str());
        }
        if let Some(align) = text.align {
            styles.insert("text-align", align.as_css());
        }
        if let Some(line_height) = &text.line_height {
            styles.insert("line-height", unitless(line_height));
        }
        if let Some(family) = &text.font_family {
            styles.insert("font-family", family.as_str());
        }

        styles
    }

    fn compose_spacing(&self, spacing: &SpacingProps) -> StyleMap {
        let mut styles = StyleMap::new();
        self.expand_edges(&mut styles, "padding", spacing.padding_edges());
        self.expand_edges(&mut styles, "margin", spacing.margin_edges());
        styles
    }

    fn expand_edges(&self, styles: &mut StyleMap, property: &str, edges: Edges<'_>) {
        let layers: [(Option<&SizeValue>, &[&str]); 7] = [
            (edges.all, &SIDES),
            (edges.x, &["left", "right"]),
            (edges.y, &["top", "bottom"]),
            (edges.top, &["top"]),
            (edges.right, &["right"]),
            (edges.bottom, &["bottom"]),
            (edges.left, &["left"]),
        ];

        for (value, sides) in layers {
            if let Some(resolved) = self.resolve_spacing(value) {
                for side in sides {
                    styles.insert(format!("{}-{}", property, side), resolved.as_str());
                }
            }
        }
    }
}
