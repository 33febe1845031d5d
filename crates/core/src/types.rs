use crate::shorthand::collapse_shorthands;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// CSS 声明
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Declaration {
    /// CSS 属性名（如 "padding-top"）
    pub property: String,
    /// CSS 属性值（如 "1rem"）
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// 扁平样式表：属性名（kebab-case）→ 值
///
/// - 同名属性后者覆盖前者，位置保持首次插入处
/// - 输出顺序稳定（使用 IndexMap）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StyleMap(IndexMap<String, String>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(|v| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 叠加另一份样式，`other` 中的值优先
    pub fn merge(&mut self, other: StyleMap) {
        for (property, value) in other.0 {
            self.0.insert(property, value);
        }
    }

    /// 转换为声明列表，四边齐全的 padding / margin / inset 会合并为简写
    pub fn to_declarations(&self) -> Vec<Declaration> {
        let decls = self
            .0
            .iter()
            .map(|(property, value)| Declaration::new(property.as_str(), value.as_str()))
            .collect();
        collapse_shorthands(decls)
    }

    /// 生成单条 CSS 规则
    pub fn to_css(&self, selector: &str) -> String {
        let mut css = format!("{} {{\n", selector);
        for decl in self.to_declarations() {
            css.push_str(&format!("  {}: {};\n", decl.property, decl.value));
        }
        css.push_str("}\n");
        css
    }
}

impl FromIterator<Declaration> for StyleMap {
    fn from_iter<T: IntoIterator<Item = Declaration>>(iter: T) -> Self {
        let mut map = StyleMap::new();
        for decl in iter {
            map.insert(decl.property, decl.value);
        }
        map
    }
}
