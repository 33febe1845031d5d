use crate::bound::Visibility;
use crate::naming::{create_scope_naming, NamingMode};
use crate::rule::{HideMode, ScopedRule};
use indexmap::IndexMap;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// 进程内唯一的实例编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct InstanceId(u64);

impl InstanceId {
    fn next() -> Self {
        InstanceId(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        InstanceId(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type RuleSet = IndexMap<InstanceId, ScopedRule>;

/// 运行时注入的条件样式规则
///
/// 每次 `mount` 注册一条以实例编号为键的规则，返回的 [`VisibilityHandle`]
/// 被释放时（`unmount`、提前 drop、panic 展开）规则随之移除。
/// 单线程使用。
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    rules: Rc<RefCell<RuleSet>>,
    naming: NamingMode,
    hide_mode: HideMode,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置作用域命名策略（builder 模式）
    pub fn with_naming(mut self, naming: NamingMode) -> Self {
        self.naming = naming;
        self
    }

    /// 设置隐藏方式（builder 模式）
    pub fn with_hide_mode(mut self, hide_mode: HideMode) -> Self {
        self.hide_mode = hide_mode;
        self
    }

    /// 挂载一个实例，注册其作用域规则
    pub fn mount(&self, visibility: Visibility) -> VisibilityHandle {
        let id = InstanceId::next();
        let class_name = create_scope_naming(self.naming).scope_name(id, &visibility);
        let rule = ScopedRule::new(class_name.as_str(), &visibility, self.hide_mode);

        log::debug!(
            "mount visibility instance {} as .{} ({} zones)",
            id,
            class_name,
            rule.zones().len()
        );
        self.rules.borrow_mut().insert(id, rule);

        VisibilityHandle {
            id,
            class_name,
            rules: Rc::downgrade(&self.rules),
        }
    }

    /// 卸载实例；等价于 drop 句柄
    pub fn unmount(&self, handle: VisibilityHandle) {
        drop(handle);
    }

    /// 当前挂载的规则数量
    pub fn len(&self) -> usize {
        self.rules.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.borrow().is_empty()
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.rules.borrow().contains_key(&id)
    }

    pub fn rule(&self, id: InstanceId) -> Option<ScopedRule> {
        self.rules.borrow().get(&id).cloned()
    }

    /// 全部规则拼接成的样式表，按挂载顺序输出
    pub fn stylesheet(&self) -> String {
        self.rules
            .borrow()
            .values()
            .map(ScopedRule::css)
            .collect::<Vec<_>>()
            .join("")
    }
}

/// 已挂载实例的句柄，drop 时移除对应规则
#[derive(Debug)]
pub struct VisibilityHandle {
    id: InstanceId,
    class_name: String,
    rules: Weak<RefCell<RuleSet>>,
}

impl VisibilityHandle {
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// 需要加在实例根元素上的类名
    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}

impl Drop for VisibilityHandle {
    fn drop(&mut self) {
        // 注册表已被释放时无需清理
        if let Some(rules) = self.rules.upgrade() {
            rules.borrow_mut().shift_remove(&self.id);
            log::debug!("unmount visibility instance {}", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::VisibilityBound;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mount_and_unmount() {
        let registry = StyleRegistry::new();
        let handle = registry.mount(Visibility::Hidden(VisibilityBound::below(768)));

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(handle.id()));
        assert_eq!(handle.class_name(), format!("wren-vis-{}", handle.id()));
        assert!(registry
            .stylesheet()
            .contains(&format!(".{} {{", handle.class_name())));

        let id = handle.id();
        registry.unmount(handle);
        assert!(registry.is_empty());
        assert!(!registry.contains(id));
        assert_eq!(registry.stylesheet(), "");
    }

    #[test]
    fn test_ids_are_unique() {
        let registry = StyleRegistry::new();
        let a = registry.mount(Visibility::Hidden(VisibilityBound::below(480)));
        let b = registry.mount(Visibility::Hidden(VisibilityBound::below(480)));

        assert_ne!(a.id(), b.id());
        assert_ne!(a.class_name(), b.class_name());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_siblings_do_not_interfere() {
        let registry = StyleRegistry::new();
        let small = registry.mount(Visibility::Hidden(VisibilityBound::below(480)));
        let large = registry.mount(Visibility::Show(VisibilityBound::above(1024)));

        let small_rule = registry.rule(small.id()).unwrap();
        let large_rule = registry.rule(large.id()).unwrap();
        assert!(small_rule.css().contains("(width < 480px)"));
        assert!(!small_rule.css().contains(large.class_name()));
        assert!(large_rule.css().contains("(width < 1025px)"));

        drop(small);
        assert!(registry.rule(large.id()).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_drop_scope_releases_rule() {
        let registry = StyleRegistry::new();
        {
            let _handle = registry.mount(Visibility::Hidden(VisibilityBound::above(600)));
            assert_eq!(registry.len(), 1);
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_handle_outlives_registry() {
        let registry = StyleRegistry::new();
        let handle = registry.mount(Visibility::Hidden(VisibilityBound::below(768)));
        drop(registry);
        // 不应 panic
        drop(handle);
    }

    #[test]
    fn test_cloned_registry_shares_rules() {
        let registry = StyleRegistry::new();
        let shared = registry.clone();
        let handle = shared.mount(Visibility::Hidden(VisibilityBound::below(768)));
        assert!(registry.contains(handle.id()));
    }

    #[test]
    fn test_hash_naming_and_visibility_mode() {
        let registry = StyleRegistry::new()
            .with_naming(NamingMode::Hash)
            .with_hide_mode(HideMode::Visibility);
        let handle = registry.mount(Visibility::Hidden(VisibilityBound::below(768)));

        assert!(handle.class_name().starts_with("wren-v-"));
        assert!(registry.stylesheet().contains("visibility: hidden;"));
    }
}
