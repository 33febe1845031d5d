use crate::error::RangeError;
use crate::scale::{ScaleRange, ScaleUnit, BASE_FONT_SIZE};
use std::fmt;

/// 系数保留的小数位数对应的倍率
const PRECISION: f64 = 10_000.0;

/// 夹紧的线性流式表达式
///
/// 渲染为 `clamp(MIN, INTERCEPT + RATE·unit, MAX)`，其中 `rate` 为每 100 个
/// 单位（即整个容器 / 视口宽度）对应的 rem 增量。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidExpression {
    pub min: f64,
    pub max: f64,
    /// 截距（rem），已舍入到 4 位小数
    pub intercept: f64,
    /// 斜率 ×100（rem / 100unit），已舍入到 4 位小数
    pub rate: f64,
    pub unit: ScaleUnit,
}

/// 生成流式表达式
///
/// 将尺寸视为容器宽度的线性函数 `value(c) = slope * c + intercept`，
/// 容器宽度先按 [`BASE_FONT_SIZE`] 换算为 rem。
///
/// # 示例
///
/// ```
/// use wren_core::fluid::generate;
/// use wren_core::scale::{ScaleRange, ScaleUnit};
///
/// let expr = generate(&ScaleRange::new(1.0, 1.5), ScaleUnit::Viewport).unwrap();
/// assert_eq!(expr.to_string(), "clamp(1rem, 0.9000rem + 0.5000vw, 1.5rem)");
/// ```
pub fn generate(range: &ScaleRange, unit: ScaleUnit) -> Result<FluidExpression, RangeError> {
    range.validate()?;

    let min_container = range.min_container / BASE_FONT_SIZE;
    let max_container = range.max_container / BASE_FONT_SIZE;

    let slope = (range.max - range.min) / (max_container - min_container);
    let intercept = range.min - slope * min_container;

    Ok(FluidExpression {
        min: range.min,
        max: range.max,
        intercept: round_coefficient(intercept),
        rate: round_coefficient(slope * 100.0),
        unit,
    })
}

fn round_coefficient(value: f64) -> f64 {
    // + 0.0 把 -0.0 规整为 0.0，避免输出 "-0.0000"
    (value * PRECISION).round() / PRECISION + 0.0
}

impl FluidExpression {
    /// 计算容器（或视口）宽度为 `container_px` 时表达式的值（rem）
    pub fn evaluate(&self, container_px: f64) -> f64 {
        // 1 unit = 容器宽度的 1%
        let unit_rem = container_px / 100.0 / BASE_FONT_SIZE;
        let linear = self.intercept + self.rate * unit_rem;
        linear.clamp(self.min, self.max)
    }
}

impl fmt::Display for FluidExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "clamp({}rem, {:.4}rem + {:.4}{}, {}rem)",
            self.min, self.intercept, self.rate, self.unit, self.max
        )
    }
}
