//! 内置尺寸刻度表与基础类型
//!
//! 三个互不相交的命名空间：
//! - 流式间距 `fluid-1` .. `fluid-10`
//! - 固定间距 `scale-1` .. `scale-10`
//! - 字号 `text-xs` .. `text-5xl`

use crate::error::RangeError;
use phf::phf_ordered_map;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 数值 → rem 换算时使用的根字号（px）
pub const BASE_FONT_SIZE: f64 = 16.0;

/// 流式刻度开始生效的容器宽度（px）
pub const DEFAULT_MIN_CONTAINER: f64 = 320.0;

/// 流式刻度到达最大值的容器宽度（px）
pub const DEFAULT_MAX_CONTAINER: f64 = 1920.0;

/// 流式表达式的度量基准
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScaleUnit {
    /// 视口宽度 `vw`
    #[default]
    #[serde(rename = "vw")]
    Viewport,
    /// 容器内联尺寸 `cqi`，要求祖先声明 `container-type: inline-size`
    #[serde(rename = "cqi")]
    Container,
}

impl ScaleUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleUnit::Viewport => "vw",
            ScaleUnit::Container => "cqi",
        }
    }
}

impl fmt::Display for ScaleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 刻度所属的命名空间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Namespace {
    FluidSpacing,
    FixedSpacing,
    Typography,
}

/// 流式刻度区间
///
/// `min` / `max` 为 rem，`min_container` / `max_container` 为 px。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
    #[serde(default = "default_min_container")]
    pub min_container: f64,
    #[serde(default = "default_max_container")]
    pub max_container: f64,
}

fn default_min_container() -> f64 {
    DEFAULT_MIN_CONTAINER
}

fn default_max_container() -> f64 {
    DEFAULT_MAX_CONTAINER
}

impl ScaleRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_container: DEFAULT_MIN_CONTAINER,
            max_container: DEFAULT_MAX_CONTAINER,
        }
    }

    pub fn with_container(mut self, min_container: f64, max_container: f64) -> Self {
        self.min_container = min_container;
        self.max_container = max_container;
        self
    }

    /// 检查区间不变量：数值有限、`min <= max`、`min_container < max_container`
    pub fn validate(&self) -> Result<(), RangeError> {
        let values = [self.min, self.max, self.min_container, self.max_container];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(RangeError::NonFinite);
        }
        if self.max < self.min {
            return Err(RangeError::Inverted {
                min: self.min,
                max: self.max,
            });
        }
        if self.max_container <= self.min_container {
            return Err(RangeError::EmptyContainerRange {
                min_container: self.min_container,
                max_container: self.max_container,
            });
        }
        Ok(())
    }
}

/// 流式间距 `(min, max)`，单位 rem
pub static FLUID_SPACING: phf::OrderedMap<&'static str, (f64, f64)> = phf_ordered_map! {
    "fluid-1" => (0.25, 0.5),
    "fluid-2" => (0.5, 0.75),
    "fluid-3" => (0.75, 1.0),
    "fluid-4" => (1.0, 1.5),
    "fluid-5" => (1.5, 2.0),
    "fluid-6" => (2.0, 3.0),
    "fluid-7" => (3.0, 4.0),
    "fluid-8" => (4.0, 6.0),
    "fluid-9" => (6.0, 8.0),
    "fluid-10" => (8.0, 12.0),
};

/// 固定间距，4px 基础单位
pub static FIXED_SPACING: phf::OrderedMap<&'static str, &'static str> = phf_ordered_map! {
    "scale-1" => "0.25rem",
    "scale-2" => "0.5rem",
    "scale-3" => "0.75rem",
    "scale-4" => "1rem",
    "scale-5" => "1.5rem",
    "scale-6" => "2rem",
    "scale-7" => "3rem",
    "scale-8" => "4rem",
    "scale-9" => "6rem",
    "scale-10" => "8rem",
};

/// 流式字号 `(min, max)`，单位 rem
pub static TYPOGRAPHY: phf::OrderedMap<&'static str, (f64, f64)> = phf_ordered_map! {
    "text-xs" => (0.75, 0.875),
    "text-sm" => (0.875, 1.0),
    "text-base" => (1.0, 1.125),
    "text-lg" => (1.125, 1.25),
    "text-xl" => (1.25, 1.5),
    "text-2xl" => (1.5, 2.0),
    "text-3xl" => (2.0, 2.5),
    "text-4xl" => (2.5, 3.5),
    "text-5xl" => (3.5, 5.0),
};

/// 内置（保留）token 所在的命名空间
pub fn builtin_namespace(token: &str) -> Option<Namespace> {
    if FLUID_SPACING.contains_key(token) {
        Some(Namespace::FluidSpacing)
    } else if FIXED_SPACING.contains_key(token) {
        Some(Namespace::FixedSpacing)
    } else if TYPOGRAPHY.contains_key(token) {
        Some(Namespace::Typography)
    } else {
        None
    }
}
