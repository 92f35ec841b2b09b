//! 控制器事件与注解监听器
//!
//! 控制器执行前触发 [`ControllerEvent`]，[`ListenerChain`] 把事件上的每个注解
//! 依次交给所有注册的监听器处理。

use crate::annotation::Annotation;
use crate::controller::{ControllerMeta, MethodParameters};
use crate::error::Result;
use crate::request::Request;
use anyhow::Context;
use parking_lot::RwLock;
use std::sync::Arc;

/// 控制器即将执行事件
#[derive(Debug)]
pub struct ControllerEvent {
    /// 目标控制器方法
    pub controller: ControllerMeta,
    /// 当前请求
    pub request: Request,
    /// 方法上的注解
    pub annotations: Vec<Arc<dyn Annotation>>,
    /// 方法参数
    pub parameters: MethodParameters,
}

impl ControllerEvent {
    pub fn new(controller: ControllerMeta, request: Request, parameters: MethodParameters) -> Self {
        Self {
            controller,
            request,
            annotations: Vec::new(),
            parameters,
        }
    }

    pub fn with_annotation(mut self, annotation: impl Annotation) -> Self {
        self.annotations.push(Arc::new(annotation));
        self
    }
}

/// 注解监听器 trait
///
/// 实现者只需关心单个注解的处理，遍历由 `on_controller` 完成
pub trait AnnotationEventListener: Send + Sync {
    /// 获取监听器名称（用于日志）
    fn listener_name(&self) -> &str {
        "AnonymousAnnotationListener"
    }

    /// 处理单个注解，不认识的注解类型应当直接返回 Ok
    fn evaluate_annotation(
        &self,
        controller: &ControllerMeta,
        request: &mut Request,
        annotation: &dyn Annotation,
        parameters: &MethodParameters,
    ) -> Result<()>;

    /// 按声明顺序处理事件上的全部注解，遇到错误立即中止
    fn on_controller(&self, event: &mut ControllerEvent) -> Result<()> {
        for annotation in &event.annotations {
            self.evaluate_annotation(
                &event.controller,
                &mut event.request,
                annotation.as_ref(),
                &event.parameters,
            )?;
        }
        Ok(())
    }
}

/// 监听器链
///
/// 同步执行，任一监听器失败都会中止整个请求处理
#[derive(Default)]
pub struct ListenerChain {
    listeners: RwLock<Vec<Arc<dyn AnnotationEventListener>>>,
}

impl ListenerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加监听器
    pub fn add_listener(&self, listener: Arc<dyn AnnotationEventListener>) {
        tracing::debug!("Added annotation listener: {}", listener.listener_name());
        self.listeners.write().push(listener);
    }

    /// 移除监听器
    pub fn remove_listener(&self, listener_name: &str) {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|l| l.listener_name() != listener_name);
        if listeners.len() != before {
            tracing::debug!("Removed annotation listener: {}", listener_name);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// 分发控制器事件
    pub fn on_controller(&self, event: &mut ControllerEvent) -> Result<()> {
        // 复制一份快照，避免监听器执行期间持有锁
        let listeners = self.listeners.read().clone();

        tracing::debug!(
            controller = %event.controller,
            annotations = event.annotations.len(),
            "Dispatching controller event to {} listeners",
            listeners.len()
        );

        for listener in listeners {
            listener.on_controller(event).with_context(|| {
                format!(
                    "Listener '{}' failed while preparing {}",
                    listener.listener_name(),
                    event.controller
                )
            })?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ListenerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerChain")
            .field("listener_count", &self.listener_count())
            .finish()
    }
}
