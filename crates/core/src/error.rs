use crate::scale::Namespace;

/// 单个 `ScaleRange` 的结构性错误
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RangeError {
    #[error("scale range contains a non-finite value")]
    NonFinite,

    #[error("max ({max}) is less than min ({min})")]
    Inverted { min: f64, max: f64 },

    #[error("maxContainer ({max_container}) must be greater than minContainer ({min_container})")]
    EmptyContainerRange {
        min_container: f64,
        max_container: f64,
    },
}

/// 注册表 / 配置层错误
#[derive(Debug, thiserror::Error)]
pub enum WrenError {
    #[error("invalid scale `{token}`: {source}")]
    InvalidScale {
        token: String,
        #[source]
        source: RangeError,
    },

    #[error("token `{0}` is reserved; enable allowOverride to redefine it")]
    ReservedToken(String),

    #[error("token `{token}` is already registered as {existing:?}")]
    NamespaceCollision { token: String, existing: Namespace },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl WrenError {
    pub(crate) fn invalid_scale(token: impl Into<String>, source: RangeError) -> Self {
        WrenError::InvalidScale {
            token: token.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, WrenError>;
