use crate::types::Declaration;
use std::collections::HashMap;

/// 四边简写组：简写名与 top / right / bottom / left 子属性
struct EdgeGroup {
    shorthand: &'static str,
    longhands: [&'static str; 4],
}

static EDGE_GROUPS: &[EdgeGroup] = &[
    EdgeGroup {
        shorthand: "padding",
        longhands: ["padding-top", "padding-right", "padding-bottom", "padding-left"],
    },
    EdgeGroup {
        shorthand: "margin",
        longhands: ["margin-top", "margin-right", "margin-bottom", "margin-left"],
    },
    EdgeGroup {
        shorthand: "inset",
        longhands: ["top", "right", "bottom", "left"],
    },
];

/// 将四边齐全的子属性合并为简写属性
///
/// 合并后的简写放在该组第一个出现的子属性位置，其余声明保持原顺序。
///
/// ```
/// use wren_core::shorthand::collapse_shorthands;
/// use wren_core::Declaration;
///
/// let decls = vec![
///     Declaration::new("padding-top", "2rem"),
///     Declaration::new("padding-right", "0.5rem"),
///     Declaration::new("padding-bottom", "0.5rem"),
///     Declaration::new("padding-left", "0.5rem"),
/// ];
/// let result = collapse_shorthands(decls);
/// assert_eq!(result, vec![Declaration::new("padding", "2rem 0.5rem 0.5rem")]);
/// ```
pub fn collapse_shorthands(decls: Vec<Declaration>) -> Vec<Declaration> {
    let values: HashMap<&str, &str> = decls
        .iter()
        .map(|d| (d.property.as_str(), d.value.as_str()))
        .collect();

    let collapsed: Vec<(&EdgeGroup, String)> = EDGE_GROUPS
        .iter()
        .filter_map(|group| {
            let edges: Option<Vec<&str>> = group
                .longhands
                .iter()
                .map(|lh| values.get(lh).copied())
                .collect();
            edges.map(|edges| (group, compress_edges(&edges)))
        })
        .collect();

    if collapsed.is_empty() {
        return decls;
    }

    let mut result = Vec::with_capacity(decls.len());
    let mut emitted: Vec<&str> = Vec::new();

    for decl in &decls {
        match collapsed
            .iter()
            .find(|(group, _)| group.longhands.contains(&decl.property.as_str()))
        {
            Some((group, value)) => {
                if !emitted.contains(&group.shorthand) {
                    result.push(Declaration::new(group.shorthand, value.as_str()));
                    emitted.push(group.shorthand);
                }
            }
            None => result.push(decl.clone()),
        }
    }

    result
}

/// TRBL 值压缩
///
/// - 全部相同:                 "V"
/// - top==bottom, left==right: "V1 V2"
/// - left==right:              "V1 V2 V3"
/// - 其他:                     "V1 V2 V3 V4"
fn compress_edges(values: &[&str]) -> String {
    let (top, right, bottom, left) = (values[0], values[1], values[2], values[3]);

    if top == right && right == bottom && bottom == left {
        top.to_string()
    } else if top == bottom && left == right {
        format!("{} {}", top, right)
    } else if left == right {
        format!("{} {} {}", top, right, bottom)
    } else {
        format!("{} {} {} {}", top, right, bottom, left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn edges(prefix: &str, values: [&str; 4]) -> Vec<Declaration> {
        ["top", "right", "bottom", "left"]
            .iter()
            .zip(values)
            .map(|(side, value)| Declaration::new(format!("{}-{}", prefix, side), value))
            .collect()
    }

    #[test]
    fn test_collapse_all_same() {
        let result = collapse_shorthands(edges("padding", ["1rem"; 4]));
        assert_eq!(result, vec![Declaration::new("padding", "1rem")]);
    }

    #[test]
    fn test_collapse_two_value() {
        let result = collapse_shorthands(edges("margin", ["0", "auto", "0", "auto"]));
        assert_eq!(result, vec![Declaration::new("margin", "0 auto")]);
    }

    #[test]
    fn test_collapse_four_value() {
        let result = collapse_shorthands(edges("padding", ["1px", "2px", "3px", "4px"]));
        assert_eq!(result, vec![Declaration::new("padding", "1px 2px 3px 4px")]);
    }

    #[test]
    fn test_partial_group_untouched() {
        let decls = vec![
            Declaration::new("padding-top", "1rem"),
            Declaration::new("padding-bottom", "1rem"),
        ];
        let result = collapse_shorthands(decls.clone());
        assert_eq!(result, decls);
    }

    #[test]
    fn test_inset() {
        let decls = vec![
            Declaration::new("position", "absolute"),
            Declaration::new("top", "0px"),
            Declaration::new("right", "0px"),
            Declaration::new("bottom", "0px"),
            Declaration::new("left", "0px"),
            Declaration::new("z-index", "2"),
        ];
        let result = collapse_shorthands(decls);
        assert_eq!(
            result,
            vec![
                Declaration::new("position", "absolute"),
                Declaration::new("inset", "0px"),
                Declaration::new("z-index", "2"),
            ]
        );
    }

    #[test]
    fn test_interleaved_order_preserved() {
        let mut decls = vec![Declaration::new("width", "100%")];
        decls.extend(edges("padding", ["1rem"; 4]));
        decls.push(Declaration::new("height", "auto"));

        let result = collapse_shorthands(decls);
        let props: Vec<&str> = result.iter().map(|d| d.property.as_str()).collect();
        assert_eq!(props, vec!["width", "padding", "height"]);
    }

    #[test]
    fn test_fluid_values() {
        let fluid = "clamp(1rem, 0.9000rem + 0.5000vw, 1.5rem)";
        let result = collapse_shorthands(edges("padding", [fluid; 4]));
        assert_eq!(result, vec![Declaration::new("padding", fluid)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(collapse_shorthands(vec![]).is_empty());
    }
}
