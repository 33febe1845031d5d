use crate::bound::Visibility;
use crate::registry::InstanceId;
use serde::{Deserialize, Serialize};

/// 作用域类名策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NamingMode {
    /// 调试友好（如 "wren-vis-12"）
    #[default]
    Readable,
    /// 基于实例与阈值的 hash
    Hash,
}

/// 作用域命名 trait
pub trait ScopeNaming {
    fn scope_name(&self, id: InstanceId, visibility: &Visibility) -> String;
}

/// Readable 命名：直接使用实例编号
pub struct ReadableScope;

impl ScopeNaming for ReadableScope {
    fn scope_name(&self, id: InstanceId, _visibility: &Visibility) -> String {
        format!("wren-vis-{}", id)
    }
}

/// Hash 命名：实例编号 + 阈值内容的 blake3 hash
pub struct HashScope;

impl ScopeNaming for HashScope {
    fn scope_name(&self, id: InstanceId, visibility: &Visibility) -> String {
        let input = format!("{}:{:?}", id, visibility);
        let hash = blake3::hash(input.as_bytes());

        // 取前 6 个字节的十六进制表示
        let hex = hash.to_hex();
        format!("wren-v-{}", &hex[..12])
    }
}

/// 根据 NamingMode 创建对应的策略
pub fn create_scope_naming(mode: NamingMode) -> Box<dyn ScopeNaming> {
    match mode {
        NamingMode::Readable => Box::new(ReadableScope),
        NamingMode::Hash => Box::new(HashScope),
    }
}
