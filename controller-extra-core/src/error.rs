/// 统一的错误处理类型
///
/// 监听器链与应用层代码使用 anyhow::Result，
/// 各功能模块自身的错误使用 thiserror 定义的枚举，并通过 `?` 转换。
///
/// # 示例
///
/// ```rust,ignore
/// use anyhow::{Context, Result};
///
/// fn dispatch(chain: &ListenerChain, event: &mut ControllerEvent) -> Result<()> {
///     chain.on_controller(event)
///         .context("Failed to prepare controller arguments")
/// }
/// ```
pub use anyhow::Result;

/// 框架级错误
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInitFailed(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoadFailed(String),
}

pub type ApplicationResult<T> = std::result::Result<T, ApplicationError>;
