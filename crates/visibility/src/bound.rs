//! Hidden / Show 运算与隐藏区间
//!
//! 边界约定：`Hidden(below = B)` 在宽度 `< B` 时隐藏，宽度恰为 `B` 时可见；
//! `Hidden(above = A)` 在宽度 `> A` 时隐藏，宽度恰为 `A` 时可见。

use serde::{Deserialize, Serialize};

/// 容器宽度阈值（px），缺省表示该侧不设限制（不是 0）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisibilityBound {
    pub below: Option<i32>,
    pub above: Option<i32>,
}

impl VisibilityBound {
    pub fn below(px: i32) -> Self {
        Self {
            below: Some(px),
            above: None,
        }
    }

    pub fn above(px: i32) -> Self {
        Self {
            below: None,
            above: Some(px),
        }
    }

    pub fn between(below: i32, above: i32) -> Self {
        Self {
            below: Some(below),
            above: Some(above),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.below.is_none() && self.above.is_none()
    }

    /// 从可能带小数的像素值构建
    ///
    /// `below` 向上取整、`above` 向下取整，整数宽度上的判定与原始小数阈值一致：
    /// `width < 767.5` 等价于 `width < 768`，`width > 1024.5` 等价于 `width > 1024`。
    /// 超出 `i32` 的值饱和到边界；任一侧为 NaN 时返回 `None`。
    pub fn from_px(below: Option<f64>, above: Option<f64>) -> Option<Self> {
        if below.is_some_and(f64::is_nan) || above.is_some_and(f64::is_nan) {
            return None;
        }
        Some(Self {
            below: below.map(|px| px.ceil() as i32),
            above: above.map(|px| px.floor() as i32),
        })
    }

    /// Show 的每一侧翻译为一条单边 Hidden 参数
    ///
    /// - `Show(below = B)` 在 `B` 及以上隐藏 → `Hidden(above = B - 1)`
    /// - `Show(above = A)` 在 `A` 及以下隐藏 → `Hidden(below = A + 1)`
    fn show_as_hidden(&self) -> Vec<VisibilityBound> {
        let mut hidden = Vec::with_capacity(2);
        if let Some(below) = self.below {
            hidden.push(VisibilityBound::above(below.saturating_sub(1)));
        }
        if let Some(above) = self.above {
            hidden.push(VisibilityBound::below(above.saturating_add(1)));
        }
        hidden
    }
}

/// 一段隐藏区间：`after < width < before`，缺省一侧不设限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HiddenZone {
    pub after: Option<i32>,
    pub before: Option<i32>,
}

impl HiddenZone {
    pub fn contains(&self, width: i32) -> bool {
        self.after.map_or(true, |after| width > after)
            && self.before.map_or(true, |before| width < before)
    }

    fn intersect(&self, other: &HiddenZone) -> HiddenZone {
        HiddenZone {
            after: max_bound(self.after, other.after),
            before: min_bound(self.before, other.before),
        }
    }

    /// 区间内是否至少有一个整数宽度
    fn is_inhabited(&self) -> bool {
        match (self.after, self.before) {
            (Some(after), Some(before)) => i64::from(before) - i64::from(after) > 1,
            _ => true,
        }
    }

    /// 对应的容器查询条件；两侧都不设限时为 `None`
    pub fn condition(&self) -> Option<String> {
        match (self.after, self.before) {
            (None, None) => None,
            (None, Some(before)) => Some(format!("(width < {}px)", before)),
            (Some(after), None) => Some(format!("(width > {}px)", after)),
            (Some(after), Some(before)) => Some(format!("({}px < width < {}px)", after, before)),
        }
    }
}

fn max_bound(a: Option<i32>, b: Option<i32>) -> Option<i32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

fn min_bound(a: Option<i32>, b: Option<i32>) -> Option<i32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// 原语 Hidden 与其派生的 Show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Hidden(VisibilityBound),
    Show(VisibilityBound),
}

impl Visibility {
    /// 计算隐藏区间（各区间取并集）
    pub fn zones(&self) -> Vec<HiddenZone> {
        match self {
            Visibility::Hidden(bound) => hidden_zones(bound),
            Visibility::Show(bound) => {
                // 两侧都给出时，两条 Hidden 的隐藏区间取交集
                bound
                    .show_as_hidden()
                    .iter()
                    .flat_map(hidden_zones)
                    .reduce(|a, b| a.intersect(&b))
                    .into_iter()
                    .filter(HiddenZone::is_inhabited)
                    .collect()
            }
        }
    }

    pub fn is_hidden(&self, width: i32) -> bool {
        self.zones().iter().any(|zone| zone.contains(width))
    }
}

fn hidden_zones(bound: &VisibilityBound) -> Vec<HiddenZone> {
    let mut zones = Vec::with_capacity(2);
    if let Some(below) = bound.below {
        zones.push(HiddenZone {
            after: None,
            before: Some(below),
        });
    }
    if let Some(above) = bound.above {
        zones.push(HiddenZone {
            after: Some(above),
            before: None,
        });
    }
    zones
}
