use proptest::prelude::*;
use wren_core::{
    generate, load_config, LayoutProps, ScaleRange, ScaleRegistry, ScaleUnit, SizeValue,
    SpacingProps,
};

#[test]
fn test_end_to_end_box_styles() {
    // 1. 从 JSON 加载配置
    let config = load_config(
        r#"{
            "scales": { "brand-gutter": { "min": 1, "max": 2 } },
            "scaleConfig": { "unit": "cqi" }
        }"#,
    )
    .expect("Failed to load config");

    // 2. 构建注册表并取得解析器
    let registry = ScaleRegistry::from_config(&config).expect("Failed to build registry");
    let resolver = registry.resolver();

    // 3. 合成样式
    let spacing: SpacingProps = serde_json::from_str(
        r#"{ "padding": "brand-gutter", "marginY": "scale-4", "marginX": "auto" }"#,
    )
    .unwrap();
    let layout: LayoutProps =
        serde_json::from_str(r#"{ "maxWidth": 960, "position": "relative" }"#).unwrap();

    let styles = resolver.compose(&spacing, &layout);
    let css = styles.to_css(".fl-box");

    println!("Generated CSS:\n{}", css);

    assert!(css.contains("padding: clamp(1rem, 0.8000rem + 1.0000cqi, 2rem);"));
    assert!(css.contains("margin: 1rem auto;"));
    assert!(css.contains("max-width: 960px;"));
    assert!(css.contains("position: relative;"));
}

#[test]
fn test_resolve_spacing_contract() {
    let resolver = ScaleRegistry::new(ScaleUnit::Viewport).unwrap().resolver();

    assert_eq!(resolver.resolve_spacing(None), None);
    assert_eq!(
        resolver.resolve_spacing(Some(&SizeValue::Number(16.0))),
        Some("1rem".to_string())
    );
    assert_eq!(
        resolver.resolve_spacing(Some(&"scale-4".into())),
        Some("1rem".to_string())
    );
    assert_eq!(
        resolver.resolve_spacing(Some(&"37px".into())),
        Some("37px".to_string())
    );

    let expected = generate(&ScaleRange::new(1.0, 1.5), ScaleUnit::Viewport)
        .unwrap()
        .to_string();
    assert_eq!(
        resolver.resolve_spacing(Some(&"fluid-4".into())),
        Some(expected)
    );
}

#[test]
fn test_snapshot_survives_reconfiguration() {
    let registry = ScaleRegistry::new(ScaleUnit::Viewport).unwrap();
    let resolver = registry.resolver();

    let config = load_config(r#"{ "scaleConfig": { "unit": "cqi" } }"#).unwrap();
    registry.apply(&config).unwrap();

    // 旧解析器仍然看到完整的旧表
    let old = resolver.resolve_spacing(Some(&"fluid-1".into())).unwrap();
    assert!(old.contains("vw"));

    let new = registry
        .resolver()
        .resolve_spacing(Some(&"fluid-1".into()))
        .unwrap();
    assert!(new.contains("cqi"));
}

#[test]
fn test_reconfiguration_drops_previous_scales() {
    let registry = ScaleRegistry::new(ScaleUnit::Viewport).unwrap();

    let first = load_config(r#"{ "scales": { "brand-a": { "min": 1, "max": 2 } } }"#).unwrap();
    registry.apply(&first).unwrap();
    assert_eq!(
        registry.resolver().resolve_spacing(Some(&"brand-a".into())),
        Some("clamp(1rem, 0.8000rem + 1.0000vw, 2rem)".to_string())
    );

    let second = load_config(r#"{ "scales": { "brand-b": { "min": 1, "max": 2 } } }"#).unwrap();
    registry.apply(&second).unwrap();

    let resolver = registry.resolver();
    // 上一次配置的 token 退回原样透传
    assert_eq!(
        resolver.resolve_spacing(Some(&"brand-a".into())),
        Some("brand-a".to_string())
    );
    assert_eq!(
        resolver.resolve_spacing(Some(&"brand-b".into())),
        Some("clamp(1rem, 0.8000rem + 1.0000vw, 2rem)".to_string())
    );

    let root = resolver.table().root_css();
    assert!(!root.contains("--brand-a"));
    assert!(root.contains("--brand-b"));

    registry.reset().unwrap();
    assert_eq!(registry.snapshot().root_css(), "");
}

#[test]
fn test_generation_error_surfaces_from_registry() {
    let config = load_config(
        r#"{ "scales": { "broken": { "min": 1, "max": 2, "minContainer": 900, "maxContainer": 300 } } }"#,
    )
    .unwrap();

    let err = ScaleRegistry::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("broken"));
    assert!(err.to_string().contains("maxContainer"));
}

fn range_strategy() -> impl Strategy<Value = ScaleRange> {
    // 刻度值取两位小数，与内置刻度的写法一致
    (0u32..1000, 0u32..1000, 0u32..1000, 1u32..3000).prop_map(|(min, span, min_c, width)| {
        let min = min as f64 / 100.0;
        let max = min + span as f64 / 100.0;
        let min_container = min_c as f64;
        ScaleRange::new(min, max).with_container(min_container, min_container + width as f64)
    })
}

proptest! {
    #[test]
    fn fluid_expression_hits_endpoints(range in range_strategy(), unit_is_container in any::<bool>()) {
        let unit = if unit_is_container { ScaleUnit::Container } else { ScaleUnit::Viewport };
        let expr = generate(&range, unit).unwrap();

        prop_assert!((expr.evaluate(range.min_container) - range.min).abs() < 1e-3);
        prop_assert!((expr.evaluate(range.max_container) - range.max).abs() < 1e-3);

        // 区间外被夹紧为精确端点
        prop_assert_eq!(expr.evaluate(range.max_container + 1000.0), range.max);
        prop_assert_eq!(expr.evaluate(range.min_container - 1000.0), range.min);
    }

    #[test]
    fn fluid_expression_is_monotonic(range in range_strategy()) {
        let expr = generate(&range, ScaleUnit::Container).unwrap();
        let step = (range.max_container - range.min_container) / 8.0;

        let mut previous = expr.evaluate(range.min_container);
        for i in 1..=8 {
            let current = expr.evaluate(range.min_container + step * i as f64);
            prop_assert!(current >= previous);
            previous = current;
        }
    }
}
