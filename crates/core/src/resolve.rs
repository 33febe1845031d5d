use crate::registry::ScaleTable;
use crate::scale::{Namespace, BASE_FONT_SIZE};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 尺寸输入：裸数值（px）或字符串（token / 任意 CSS 尺寸）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeValue {
    Number(f64),
    Token(String),
}

impl From<f64> for SizeValue {
    fn from(value: f64) -> Self {
        SizeValue::Number(value)
    }
}

impl From<i32> for SizeValue {
    fn from(value: i32) -> Self {
        SizeValue::Number(value as f64)
    }
}

impl From<&str> for SizeValue {
    fn from(value: &str) -> Self {
        SizeValue::Token(value.to_string())
    }
}

impl From<String> for SizeValue {
    fn from(value: String) -> Self {
        SizeValue::Token(value)
    }
}

/// px 数值 → rem 字符串（`16` → `"1rem"`）
pub fn to_rem(px: f64) -> String {
    format!("{}rem", px / BASE_FONT_SIZE)
}

/// 数值 → px 字符串（`100` → `"100px"`）
pub fn to_px(value: f64) -> String {
    format!("{}px", value)
}

/// Token 解析器
///
/// 持有一份刻度表快照，解析顺序（先匹配先返回）：
/// 1. 缺省 → `None`
/// 2. 数值 → 除以 [`BASE_FONT_SIZE`] 后加 `rem`
/// 3. 流式 token → 预生成的 `clamp()` 表达式
/// 4. 固定 token → 字面量（仅间距）
/// 5. 其他字符串 → 原样透传，不做校验
#[derive(Debug, Clone)]
pub struct Resolver {
    table: Arc<ScaleTable>,
}

impl Resolver {
    pub fn new(table: Arc<ScaleTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ScaleTable {
        &self.table
    }

    /// 解析间距值，只查流式间距和固定间距两个命名空间
    pub fn resolve_spacing(&self, value: Option<&SizeValue>) -> Option<String> {
        match value? {
            SizeValue::Number(px) => Some(to_rem(*px)),
            SizeValue::Token(token) => Some(
                self.table
                    .fluid(Namespace::FluidSpacing, token)
                    .map(|entry| entry.css())
                    .or_else(|| self.table.fixed(token))
                    .map(str::to_string)
                    .unwrap_or_else(|| passthrough(token)),
            ),
        }
    }

    /// 解析字号，只查字号命名空间
    pub fn resolve_typography(&self, value: Option<&SizeValue>) -> Option<String> {
        match value? {
            SizeValue::Number(px) => Some(to_rem(*px)),
            SizeValue::Token(token) => Some(
                self.table
                    .fluid(Namespace::Typography, token)
                    .map(|entry| entry.css().to_string())
                    .unwrap_or_else(|| passthrough(token)),
            ),
        }
    }
}

fn passthrough(token: &str) -> String {
    log::trace!("passing through raw size `{}`", token);
    token.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ScaleRegistry;
    use crate::scale::ScaleUnit;
    use pretty_assertions::assert_eq;

    fn resolver() -> Resolver {
        ScaleRegistry::new(ScaleUnit::Viewport).unwrap().resolver()
    }

    fn spacing(resolver: &Resolver, value: impl Into<SizeValue>) -> Option<String> {
        resolver.resolve_spacing(Some(&value.into()))
    }

    #[test]
    fn test_resolve_spacing_absent() {
        assert_eq!(resolver().resolve_spacing(None), None);
    }

    #[test]
    fn test_resolve_spacing_number() {
        let r = resolver();
        assert_eq!(spacing(&r, 16), Some("1rem".to_string()));
        assert_eq!(spacing(&r, 24.0), Some("1.5rem".to_string()));
        assert_eq!(spacing(&r, 0), Some("0rem".to_string()));
    }

    #[test]
    fn test_resolve_spacing_fixed() {
        let r = resolver();
        assert_eq!(spacing(&r, "scale-4"), Some("1rem".to_string()));
        assert_eq!(spacing(&r, "scale-10"), Some("8rem".to_string()));
    }

    #[test]
    fn test_resolve_spacing_fluid_matches_table() {
        let r = resolver();
        let expected = r
            .table()
            .fluid(Namespace::FluidSpacing, "fluid-4")
            .unwrap()
            .css()
            .to_string();
        assert_eq!(spacing(&r, "fluid-4"), Some(expected));
    }

    #[test]
    fn test_resolve_spacing_passthrough() {
        let r = resolver();
        assert_eq!(spacing(&r, "37px"), Some("37px".to_string()));
        assert_eq!(spacing(&r, "fluid-99"), Some("fluid-99".to_string()));
        assert_eq!(spacing(&r, "calc(1rem + 2px)"), Some("calc(1rem + 2px)".to_string()));
    }

    #[test]
    fn test_spacing_does_not_resolve_typography() {
        let r = resolver();
        assert_eq!(spacing(&r, "text-xl"), Some("text-xl".to_string()));
    }

    #[test]
    fn test_resolve_typography() {
        let r = resolver();
        assert_eq!(r.resolve_typography(None), None);
        assert_eq!(
            r.resolve_typography(Some(&"text-xl".into())),
            Some("clamp(1.25rem, 1.2000rem + 0.2500vw, 1.5rem)".to_string())
        );
        assert_eq!(
            r.resolve_typography(Some(&20.into())),
            Some("1.25rem".to_string())
        );
    }

    #[test]
    fn test_typography_does_not_resolve_spacing() {
        let r = resolver();
        assert_eq!(
            r.resolve_typography(Some(&"fluid-4".into())),
            Some("fluid-4".to_string())
        );
        assert_eq!(
            r.resolve_typography(Some(&"scale-4".into())),
            Some("scale-4".to_string())
        );
    }

    #[test]
    fn test_size_value_deserialize() {
        let number: SizeValue = serde_json::from_str("16").unwrap();
        assert_eq!(number, SizeValue::Number(16.0));
        let token: SizeValue = serde_json::from_str(r#""fluid-4""#).unwrap();
        assert_eq!(token, SizeValue::Token("fluid-4".to_string()));
    }
}
