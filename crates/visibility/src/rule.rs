use crate::bound::{HiddenZone, Visibility};
use serde::{Deserialize, Serialize};
use wren_core::Declaration;

/// 隐藏方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HideMode {
    /// `display: none`，不占位
    #[default]
    Display,
    /// `visibility: hidden`，保留占位
    Visibility,
}

impl HideMode {
    pub fn declaration(&self) -> Declaration {
        match self {
            HideMode::Display => Declaration::new("display", "none"),
            HideMode::Visibility => Declaration::new("visibility", "hidden"),
        }
    }
}

/// 作用于单个实例的条件隐藏规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedRule {
    scope: String,
    zones: Vec<HiddenZone>,
    mode: HideMode,
}

impl ScopedRule {
    pub fn new(scope: impl Into<String>, visibility: &Visibility, mode: HideMode) -> Self {
        Self {
            scope: scope.into(),
            zones: visibility.zones(),
            mode,
        }
    }

    /// 作用域类名（不含 `.`）
    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn zones(&self) -> &[HiddenZone] {
        &self.zones
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// 生成 CSS：每个隐藏区间一个 `@container` 块
    pub fn css(&self) -> String {
        let decl = self.mode.declaration();
        let mut css = String::new();

        for zone in &self.zones {
            match zone.condition() {
                Some(condition) => {
                    css.push_str(&format!("@container {} {{\n", condition));
                    css.push_str(&format!("  .{} {{\n", self.scope));
                    css.push_str(&format!("    {}: {};\n", decl.property, decl.value));
                    css.push_str("  }\n}\n");
                }
                None => {
                    css.push_str(&format!(".{} {{\n", self.scope));
                    css.push_str(&format!("  {}: {};\n", decl.property, decl.value));
                    css.push_str("}\n");
                }
            }
        }

        css
    }
}
