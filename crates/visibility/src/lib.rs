//! 容器宽度驱动的条件显示
//!
//! `Hidden` 是唯一的原语，`Show` 翻译为等价的 `Hidden` 区间。
//! 每个挂载的实例拥有独立的作用域规则，卸载时移除。

pub mod bound;
pub mod naming;
pub mod registry;
pub mod rule;

pub use bound::{HiddenZone, Visibility, VisibilityBound};
pub use naming::{create_scope_naming, NamingMode, ScopeNaming};
pub use registry::{InstanceId, StyleRegistry, VisibilityHandle};
pub use rule::{HideMode, ScopedRule};
