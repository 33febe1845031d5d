use crate::error::Result;
use crate::scale::{
    Namespace, ScaleRange, ScaleUnit, DEFAULT_MAX_CONTAINER, DEFAULT_MIN_CONTAINER,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 刻度配置层
///
/// JSON 格式示例：
/// ```json
/// {
///   "scales": {
///     "brand-hero": { "min": 3, "max": 8 },
///     "lead": { "min": 1.1, "max": 1.4, "kind": "typography" }
///   },
///   "scaleConfig": { "minViewport": 375, "maxViewport": 1440, "unit": "cqi" },
///   "allowOverride": false
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrenConfig {
    /// 自定义刻度，扩展（或在 `allow_override` 时覆盖）内置刻度
    #[serde(default)]
    pub scales: IndexMap<String, CustomScale>,
    #[serde(default)]
    pub scale_config: ScaleConfig,
    /// 是否允许重新定义内置 token
    #[serde(default)]
    pub allow_override: bool,
}

/// 全局刻度参数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleConfig {
    /// 自定义刻度取最小值的宽度（默认 320px）
    pub min_viewport: Option<f64>,
    /// 自定义刻度取最大值的宽度（默认 1920px）
    pub max_viewport: Option<f64>,
    /// 整张刻度表使用的单位，未设置时为 `vw`
    pub unit: Option<ScaleUnit>,
}

/// 单个自定义刻度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomScale {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub min_container: Option<f64>,
    #[serde(default)]
    pub max_container: Option<f64>,
    #[serde(default)]
    pub kind: ScaleKind,
}

/// 自定义刻度可以加入的命名空间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleKind {
    #[default]
    Spacing,
    Typography,
}

impl ScaleKind {
    pub fn namespace(&self) -> Namespace {
        match self {
            ScaleKind::Spacing => Namespace::FluidSpacing,
            ScaleKind::Typography => Namespace::Typography,
        }
    }
}

impl CustomScale {
    /// 合并全局参数得到完整区间；刻度自身的容器范围优先
    pub fn range(&self, config: &ScaleConfig) -> ScaleRange {
        let min_container = self
            .min_container
            .or(config.min_viewport)
            .unwrap_or(DEFAULT_MIN_CONTAINER);
        let max_container = self
            .max_container
            .or(config.max_viewport)
            .unwrap_or(DEFAULT_MAX_CONTAINER);

        ScaleRange::new(self.min, self.max).with_container(min_container, max_container)
    }
}

/// 从 JSON 字符串加载配置
pub fn load_config(json_str: &str) -> Result<WrenConfig> {
    Ok(serde_json::from_str(json_str)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WrenError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_config_full() {
        let json = r#"{
            "scales": {
                "brand-hero": { "min": 3, "max": 8 },
                "lead": { "min": 1.1, "max": 1.4, "kind": "typography" }
            },
            "scaleConfig": { "minViewport": 375, "maxViewport": 1440, "unit": "cqi" },
            "allowOverride": true
        }"#;

        let config = load_config(json).unwrap();

        assert_eq!(config.scales.len(), 2);
        assert!(config.allow_override);
        assert_eq!(config.scale_config.unit, Some(ScaleUnit::Container));
        assert_eq!(config.scales["brand-hero"].kind, ScaleKind::Spacing);
        assert_eq!(config.scales["lead"].kind, ScaleKind::Typography);

        // 保持声明顺序
        let names: Vec<&str> = config.scales.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["brand-hero", "lead"]);
    }

    #[test]
    fn test_load_config_empty() {
        let config = load_config("{}").unwrap();
        assert_eq!(config, WrenConfig::default());
    }

    #[test]
    fn test_load_config_invalid() {
        let result = load_config("invalid json");
        assert!(matches!(result, Err(WrenError::Config(_))));
    }

    #[test]
    fn test_custom_scale_range_inherits_viewport() {
        let scale = CustomScale {
            min: 1.0,
            max: 2.0,
            min_container: None,
            max_container: Some(1200.0),
            kind: ScaleKind::Spacing,
        };
        let config = ScaleConfig {
            min_viewport: Some(375.0),
            max_viewport: Some(1440.0),
            unit: None,
        };

        let range = scale.range(&config);
        assert_eq!(range.min_container, 375.0);
        assert_eq!(range.max_container, 1200.0);

        let range = scale.range(&ScaleConfig::default());
        assert_eq!(range.min_container, DEFAULT_MIN_CONTAINER);
    }
}
