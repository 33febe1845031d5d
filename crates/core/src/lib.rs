pub mod compose;
pub mod config;
pub mod error;
pub mod fluid;
pub mod registry;
pub mod resolve;
pub mod scale;
pub mod shorthand;
pub mod types;

// Re-export commonly used types
pub use compose::{LayoutProps, SpacingProps, TextProps};
pub use config::{load_config, CustomScale, ScaleConfig, ScaleKind, WrenConfig};
pub use error::{RangeError, Result, WrenError};
pub use fluid::{generate, FluidExpression};
pub use registry::{OverridePolicy, ScaleRegistry, ScaleTable};
pub use resolve::{Resolver, SizeValue};
pub use scale::{Namespace, ScaleRange, ScaleUnit, BASE_FONT_SIZE};
pub use types::{Declaration, StyleMap};
