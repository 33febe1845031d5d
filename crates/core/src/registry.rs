use crate::config::{ScaleKind, WrenConfig};
use crate::error::{Result, WrenError};
use crate::fluid::{generate, FluidExpression};
use crate::resolve::Resolver;
use crate::scale::{
    builtin_namespace, Namespace, ScaleRange, ScaleUnit, FIXED_SPACING, FLUID_SPACING, TYPOGRAPHY,
};
use crate::types::Declaration;
use indexmap::{IndexMap, IndexSet};
use std::sync::{Arc, PoisonError, RwLock};

/// 是否允许覆盖内置 token
///
/// 只有流式间距（`fluid-*`）和字号（`text-*`）可以被覆盖。固定间距
/// `scale-*` 没有对应的 [`ScaleKind`]，重新定义总是返回
/// [`WrenError::NamespaceCollision`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverridePolicy {
    Deny,
    Allow,
}

impl From<bool> for OverridePolicy {
    fn from(allow: bool) -> Self {
        if allow {
            OverridePolicy::Allow
        } else {
            OverridePolicy::Deny
        }
    }
}

/// 已注册的流式刻度：原始区间 + 预生成的表达式
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleEntry {
    pub range: ScaleRange,
    pub expression: FluidExpression,
    css: String,
}

impl ScaleEntry {
    fn new(token: &str, range: ScaleRange, unit: ScaleUnit) -> Result<Self> {
        let expression =
            generate(&range, unit).map_err(|e| WrenError::invalid_scale(token, e))?;
        Ok(Self {
            range,
            css: expression.to_string(),
            expression,
        })
    }

    /// 渲染后的 CSS 表达式
    pub fn css(&self) -> &str {
        &self.css
    }
}

/// 刻度表快照
///
/// 一经构建不再修改；写入方总是构建新表后整体替换。
#[derive(Debug, Clone)]
pub struct ScaleTable {
    unit: ScaleUnit,
    fluid_spacing: IndexMap<String, ScaleEntry>,
    fixed_spacing: IndexMap<String, String>,
    typography: IndexMap<String, ScaleEntry>,
    /// 通过 `register` 加入的刻度，重新应用配置时保留
    registered: IndexMap<String, Registration>,
    /// 全部自定义 token（按注册顺序）
    custom: IndexSet<String>,
}

/// 单次 `register` 的参数
#[derive(Debug, Clone, Copy)]
struct Registration {
    kind: ScaleKind,
    range: ScaleRange,
    policy: OverridePolicy,
}

impl ScaleTable {
    /// 仅包含内置刻度的表
    pub fn builtin(unit: ScaleUnit) -> Result<Self> {
        let fluid_spacing = FLUID_SPACING
            .entries()
            .map(|(token, &(min, max))| {
                ScaleEntry::new(token, ScaleRange::new(min, max), unit)
                    .map(|entry| (token.to_string(), entry))
            })
            .collect::<Result<IndexMap<_, _>>>()?;

        let typography = TYPOGRAPHY
            .entries()
            .map(|(token, &(min, max))| {
                ScaleEntry::new(token, ScaleRange::new(min, max), unit)
                    .map(|entry| (token.to_string(), entry))
            })
            .collect::<Result<IndexMap<_, _>>>()?;

        let fixed_spacing = FIXED_SPACING
            .entries()
            .map(|(token, value)| (token.to_string(), value.to_string()))
            .collect();

        log::debug!(
            "built scale table: {} fluid, {} fixed, {} typography ({})",
            fluid_spacing.len(),
            FIXED_SPACING.len(),
            typography.len(),
            unit
        );

        Ok(Self {
            unit,
            fluid_spacing,
            fixed_spacing,
            typography,
            registered: IndexMap::new(),
            custom: IndexSet::new(),
        })
    }

    pub fn unit(&self) -> ScaleUnit {
        self.unit
    }

    /// 查询流式刻度（`FluidSpacing` 或 `Typography`）
    pub fn fluid(&self, namespace: Namespace, token: &str) -> Option<&ScaleEntry> {
        match namespace {
            Namespace::FluidSpacing => self.fluid_spacing.get(token),
            Namespace::Typography => self.typography.get(token),
            Namespace::FixedSpacing => None,
        }
    }

    /// 查询固定间距字面量
    pub fn fixed(&self, token: &str) -> Option<&str> {
        self.fixed_spacing.get(token).map(|v| v.as_str())
    }

    /// token 当前所在的命名空间
    pub fn namespace_of(&self, token: &str) -> Option<Namespace> {
        if self.fluid_spacing.contains_key(token) {
            Some(Namespace::FluidSpacing)
        } else if self.fixed_spacing.contains_key(token) {
            Some(Namespace::FixedSpacing)
        } else if self.typography.contains_key(token) {
            Some(Namespace::Typography)
        } else {
            None
        }
    }

    /// 是否为内置（保留）token
    pub fn is_reserved(token: &str) -> bool {
        builtin_namespace(token).is_some()
    }

    /// 某命名空间下的全部 token
    pub fn tokens(&self, namespace: Namespace) -> Vec<&str> {
        match namespace {
            Namespace::FluidSpacing => self.fluid_spacing.keys().map(|k| k.as_str()).collect(),
            Namespace::FixedSpacing => self.fixed_spacing.keys().map(|k| k.as_str()).collect(),
            Namespace::Typography => self.typography.keys().map(|k| k.as_str()).collect(),
        }
    }

    /// 自定义刻度对应的 CSS 自定义属性（`--{name}: {expr}`）
    pub fn custom_properties(&self) -> Vec<Declaration> {
        self.custom
            .iter()
            .filter_map(|name| {
                self.fluid_spacing
                    .get(name)
                    .or_else(|| self.typography.get(name))
                    .map(|entry| Declaration::new(format!("--{}", name), entry.css()))
            })
            .collect()
    }

    /// 生成挂在 `:root` 上的自定义属性块；没有自定义刻度时为空串
    pub fn root_css(&self) -> String {
        let props = self.custom_properties();
        if props.is_empty() {
            return String::new();
        }

        let mut css = String::from(":root {\n");
        for decl in props {
            css.push_str(&format!("  {}: {};\n", decl.property, decl.value));
        }
        css.push_str("}\n");
        css
    }

    /// 在副本上加入一个自定义刻度
    fn insert_custom(
        &mut self,
        token: &str,
        kind: ScaleKind,
        range: ScaleRange,
        policy: OverridePolicy,
    ) -> Result<()> {
        let namespace = kind.namespace();

        if let Some(existing) = self.namespace_of(token) {
            if existing != namespace {
                return Err(WrenError::NamespaceCollision {
                    token: token.to_string(),
                    existing,
                });
            }
        }

        if Self::is_reserved(token) {
            if policy == OverridePolicy::Deny {
                return Err(WrenError::ReservedToken(token.to_string()));
            }
            log::warn!("overriding reserved scale token `{}`", token);
        }

        let entry = ScaleEntry::new(token, range, self.unit)?;
        match namespace {
            Namespace::Typography => self.typography.insert(token.to_string(), entry),
            _ => self.fluid_spacing.insert(token.to_string(), entry),
        };
        self.custom.insert(token.to_string());
        Ok(())
    }

    /// 在副本上登记一个 `register` 刻度
    fn insert_registered(&mut self, token: &str, registration: Registration) -> Result<()> {
        self.insert_custom(
            token,
            registration.kind,
            registration.range,
            registration.policy,
        )?;
        self.registered.insert(token.to_string(), registration);
        Ok(())
    }

    /// 以配置替换上一次的配置层
    ///
    /// 新表从内置刻度重建：先放回 `register` 登记的刻度，再加入本次配置的刻度。
    /// 上一次配置独有的 token 不再存在。
    fn with_config(&self, config: &WrenConfig) -> Result<Self> {
        let mut next = Self::builtin(config.scale_config.unit.unwrap_or_default())?;
        for (token, registration) in &self.registered {
            next.insert_registered(token, *registration)?;
        }

        let policy = OverridePolicy::from(config.allow_override);
        for (token, scale) in &config.scales {
            next.insert_custom(token, scale.kind, scale.range(&config.scale_config), policy)?;
        }
        Ok(next)
    }
}

/// 进程级刻度注册表
///
/// 单写多读：读取方拿到的是完整快照（`Arc<ScaleTable>`），写入方在写锁内
/// 构建新表后整体替换引用，读取方不会观察到写了一半的 token。
#[derive(Debug)]
pub struct ScaleRegistry {
    current: RwLock<Arc<ScaleTable>>,
}

impl ScaleRegistry {
    /// 仅含内置刻度
    pub fn new(unit: ScaleUnit) -> Result<Self> {
        Ok(Self {
            current: RwLock::new(Arc::new(ScaleTable::builtin(unit)?)),
        })
    }

    /// 内置刻度 + 配置层
    pub fn from_config(config: &WrenConfig) -> Result<Self> {
        let registry = Self::new(config.scale_config.unit.unwrap_or_default())?;
        registry.apply(config)?;
        Ok(registry)
    }

    /// 当前快照
    pub fn snapshot(&self) -> Arc<ScaleTable> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 绑定当前快照的解析器
    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.snapshot())
    }

    /// 应用配置，替换上一次应用的配置
    ///
    /// 任一刻度非法时整体失败，当前表保持不变。`register` 登记的刻度保留。
    pub fn apply(&self, config: &WrenConfig) -> Result<()> {
        self.publish(|table| table.with_config(config))
    }

    /// 清除全部自定义刻度（配置层与 `register`），单位保持不变
    pub fn reset(&self) -> Result<()> {
        self.publish(|table| ScaleTable::builtin(table.unit))
    }

    /// 注册单个自定义刻度，叠加在当前表上
    pub fn register(
        &self,
        token: &str,
        kind: ScaleKind,
        range: ScaleRange,
        policy: OverridePolicy,
    ) -> Result<()> {
        self.publish(|table| {
            let mut next = table.clone();
            next.insert_registered(token, Registration { kind, range, policy })?;
            Ok(next)
        })
    }

    fn publish<F>(&self, build: F) -> Result<()>
    where
        F: FnOnce(&ScaleTable) -> Result<ScaleTable>,
    {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let next = build(&current)?;
        log::info!(
            "publishing scale table ({} custom scales, {})",
            next.custom.len(),
            next.unit
        );
        *current = Arc::new(next);
        Ok(())
    }
}
