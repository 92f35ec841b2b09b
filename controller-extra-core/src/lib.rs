// controller-extra-core: 控制器扩展的基础设施
//
// 提供注解驱动的控制器参数注入所需的公共部分：
// - 请求模型与属性表
// - 注解 trait 与控制器参数描述
// - 控制器事件和注解监听器链
// - 配置与日志

pub mod annotation;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod logging;
pub mod request;

// 重新导出常用类型
pub use annotation::Annotation;
pub use config::{
    ConfigValue, Environment, EnvironmentPropertySource, MapPropertySource, PropertySource,
    TomlPropertySource,
};
pub use controller::{ControllerMeta, MethodParameters, ParameterDescriptor};
pub use error::{ApplicationError, ApplicationResult, Result};
pub use event::{AnnotationEventListener, ControllerEvent, ListenerChain};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use request::{AttributeValue, Attributes, ParameterBag, Request};

// 导出 http，方便使用者构造请求
pub use http;

/// Prelude 模块，包含常用的 traits 和类型
pub mod prelude {
    pub use crate::annotation::Annotation;
    pub use crate::config::{ConfigValue, Environment, MapPropertySource, PropertySource};
    pub use crate::controller::{ControllerMeta, MethodParameters, ParameterDescriptor};
    pub use crate::error::Result;
    pub use crate::event::{AnnotationEventListener, ControllerEvent, ListenerChain};
    pub use crate::logging::{LogFormat, LogLevel, LoggingConfig};
    pub use crate::request::{Attributes, ParameterBag, Request};
    // Re-export anyhow for convenience
    pub use anyhow::{anyhow, Context};
}
