use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use wasm_bindgen::prelude::*;

use wren_core::{
    load_config, LayoutProps, ScaleRegistry, ScaleUnit, SizeValue, SpacingProps, StyleMap,
    TextProps, WrenConfig,
};
use wren_visibility::{
    HideMode, NamingMode, StyleRegistry, Visibility, VisibilityBound, VisibilityHandle,
};

// ── JS 侧 serde 镜像类型 ──────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct JsVisibilityOptions {
    #[serde(default)]
    naming_mode: JsNamingMode,
    #[serde(default)]
    hide_mode: JsHideMode,
}

#[derive(Deserialize, Default, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
enum JsNamingMode {
    #[default]
    Readable,
    Hash,
}

#[derive(Deserialize, Default, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
enum JsHideMode {
    #[default]
    Display,
    Visibility,
}

/// `{ hidden: { below, above } }` 或 `{ show: { below, above } }`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
enum JsVisibility {
    Hidden(JsBound),
    Show(JsBound),
}

/// 阈值允许小数像素，见 [`VisibilityBound::from_px`]
#[derive(Deserialize, Default)]
struct JsBound {
    #[serde(default)]
    below: Option<f64>,
    #[serde(default)]
    above: Option<f64>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct JsComposeInput {
    #[serde(flatten)]
    spacing: SpacingProps,
    #[serde(flatten)]
    layout: LayoutProps,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsMountResult {
    id: u32,
    class_name: String,
    css: String,
}

// ── 类型转换 ──────────────────────────────────────────────────

impl From<JsNamingMode> for NamingMode {
    fn from(m: JsNamingMode) -> Self {
        match m {
            JsNamingMode::Readable => NamingMode::Readable,
            JsNamingMode::Hash => NamingMode::Hash,
        }
    }
}

impl From<JsHideMode> for HideMode {
    fn from(m: JsHideMode) -> Self {
        match m {
            JsHideMode::Display => HideMode::Display,
            JsHideMode::Visibility => HideMode::Visibility,
        }
    }
}

impl TryFrom<JsBound> for VisibilityBound {
    type Error = JsError;

    fn try_from(b: JsBound) -> Result<Self, JsError> {
        VisibilityBound::from_px(b.below, b.above)
            .ok_or_else(|| JsError::new("Invalid visibility: bound must not be NaN"))
    }
}

impl TryFrom<JsVisibility> for Visibility {
    type Error = JsError;

    fn try_from(v: JsVisibility) -> Result<Self, JsError> {
        Ok(match v {
            JsVisibility::Hidden(bound) => Visibility::Hidden(bound.try_into()?),
            JsVisibility::Show(bound) => Visibility::Show(bound.try_into()?),
        })
    }
}

fn parse_value<T>(value: JsValue, what: &str) -> Result<T, JsError>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsError::new(&format!("Invalid {}: {}", what, e)))
    }
}

fn parse_size(value: JsValue) -> Result<Option<SizeValue>, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| JsError::new(&format!("Invalid size value: {}", e)))
}

fn serialize_result<T: Serialize>(result: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    result
        .serialize(&serializer)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ── 运行时状态 ────────────────────────────────────────────────

struct Runtime {
    scales: ScaleRegistry,
    styles: StyleRegistry,
    // 以 JS 可直接表示的 u32 作为句柄键
    handles: HashMap<u32, VisibilityHandle>,
}

impl Runtime {
    fn new() -> Result<Self, JsError> {
        let scales = ScaleRegistry::new(ScaleUnit::default())
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self {
            scales,
            styles: StyleRegistry::new(),
            handles: HashMap::new(),
        })
    }
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

/// 在运行时上执行操作，首次调用时以内置刻度初始化
fn with_runtime<R>(f: impl FnOnce(&mut Runtime) -> Result<R, JsError>) -> Result<R, JsError> {
    RUNTIME.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(Runtime::new()?);
        }
        let runtime = slot
            .as_mut()
            .ok_or_else(|| JsError::new("runtime unavailable"))?;
        f(runtime)
    })
}

// ── WASM 导出函数 ─────────────────────────────────────────────

/// 初始化 panic hook（自动调用）
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 应用刻度配置，替换上一次的配置
///
/// 上一次配置独有的刻度会被移除，`rootCss()` 随之更新。
///
/// @param config - `{ scales, scaleConfig, allowOverride }`，结构同 `wren.config.json`
#[wasm_bindgen(js_name = "configure")]
pub fn configure(config: JsValue) -> Result<(), JsError> {
    let config: WrenConfig = parse_value(config, "config")?;
    with_runtime(|rt| {
        rt.scales
            .apply(&config)
            .map_err(|e| JsError::new(&e.to_string()))
    })
}

/// 从 JSON 字符串应用刻度配置
#[wasm_bindgen(js_name = "configureJson")]
pub fn configure_json(json: &str) -> Result<(), JsError> {
    let config = load_config(json).map_err(|e| JsError::new(&e.to_string()))?;
    with_runtime(|rt| {
        rt.scales
            .apply(&config)
            .map_err(|e| JsError::new(&e.to_string()))
    })
}

/// 清除全部自定义刻度，回到内置刻度表
#[wasm_bindgen(js_name = "resetScales")]
pub fn reset_scales() -> Result<(), JsError> {
    with_runtime(|rt| {
        rt.scales
            .reset()
            .map_err(|e| JsError::new(&e.to_string()))
    })
}

/// 解析间距值
///
/// @param value - 数字（px）或 token 字符串
/// @returns CSS 值；输入为空时返回 `undefined`
#[wasm_bindgen(js_name = "resolveSpacing")]
pub fn resolve_spacing(value: JsValue) -> Result<Option<String>, JsError> {
    let value = parse_size(value)?;
    with_runtime(|rt| Ok(rt.scales.resolver().resolve_spacing(value.as_ref())))
}

/// 解析字号
#[wasm_bindgen(js_name = "resolveTypography")]
pub fn resolve_typography(value: JsValue) -> Result<Option<String>, JsError> {
    let value = parse_size(value)?;
    with_runtime(|rt| Ok(rt.scales.resolver().resolve_typography(value.as_ref())))
}

/// 合成盒子样式
///
/// @param props - 间距与布局属性（camelCase）
/// @returns `{ [cssProperty]: value }`
#[wasm_bindgen(js_name = "composeStyles")]
pub fn compose_styles(props: JsValue) -> Result<JsValue, JsError> {
    let input: JsComposeInput = parse_value(props, "props")?;
    let styles = with_runtime(|rt| {
        Ok(rt.scales.resolver().compose(&input.spacing, &input.layout))
    })?;
    serialize_result(&styles)
}

/// 合成文本样式
#[wasm_bindgen(js_name = "composeText")]
pub fn compose_text(props: JsValue) -> Result<JsValue, JsError> {
    let text: TextProps = parse_value(props, "props")?;
    let styles: StyleMap = with_runtime(|rt| Ok(rt.scales.resolver().compose_text(&text)))?;
    serialize_result(&styles)
}

/// 合成样式并输出为 CSS 规则
#[wasm_bindgen(js_name = "composeCss")]
pub fn compose_css(selector: &str, props: JsValue) -> Result<String, JsError> {
    let input: JsComposeInput = parse_value(props, "props")?;
    with_runtime(|rt| {
        Ok(rt
            .scales
            .resolver()
            .compose(&input.spacing, &input.layout)
            .to_css(selector))
    })
}

/// 设置可见性规则的命名与隐藏方式；只影响之后挂载的实例
#[wasm_bindgen(js_name = "configureVisibility")]
pub fn configure_visibility(options: JsValue) -> Result<(), JsError> {
    let opts: JsVisibilityOptions = parse_value(options, "options")?;
    with_runtime(|rt| {
        // 新配置共享同一份规则集，已挂载实例不受影响
        rt.styles = rt
            .styles
            .clone()
            .with_naming(opts.naming_mode.into())
            .with_hide_mode(opts.hide_mode.into());
        Ok(())
    })
}

/// 挂载一个条件显示实例
///
/// @param visibility - `{ hidden: { below?, above? } }` 或 `{ show: { below?, above? } }`，
///   阈值可为小数像素：`below` 向上取整，`above` 向下取整
/// @returns `{ id, className, css }`
#[wasm_bindgen(js_name = "mountVisibility")]
pub fn mount_visibility(visibility: JsValue) -> Result<JsValue, JsError> {
    let visibility: JsVisibility = serde_wasm_bindgen::from_value(visibility)
        .map_err(|e| JsError::new(&format!("Invalid visibility: {}", e)))?;
    let visibility = Visibility::try_from(visibility)?;

    let result = with_runtime(|rt| {
        let handle = rt.styles.mount(visibility);
        let id = handle.id();
        let key = u32::try_from(id.get())
            .map_err(|_| JsError::new("visibility instance ids exhausted"))?;
        let css = rt
            .styles
            .rule(id)
            .map(|rule| rule.css())
            .unwrap_or_default();
        let result = JsMountResult {
            id: key,
            class_name: handle.class_name().to_string(),
            css,
        };
        rt.handles.insert(key, handle);
        Ok(result)
    })?;
    serialize_result(&result)
}

/// 卸载实例，返回是否确实移除了规则
#[wasm_bindgen(js_name = "unmountVisibility")]
pub fn unmount_visibility(id: u32) -> Result<bool, JsError> {
    with_runtime(|rt| match rt.handles.remove(&id) {
        Some(handle) => {
            rt.styles.unmount(handle);
            Ok(true)
        }
        None => Ok(false),
    })
}

/// 当前全部可见性规则
#[wasm_bindgen(js_name = "visibilityStylesheet")]
pub fn visibility_stylesheet() -> Result<String, JsError> {
    with_runtime(|rt| Ok(rt.styles.stylesheet()))
}

/// 自定义刻度的 `:root` 自定义属性块
#[wasm_bindgen(js_name = "rootCss")]
pub fn root_css() -> Result<String, JsError> {
    with_runtime(|rt| Ok(rt.scales.snapshot().root_css()))
}
