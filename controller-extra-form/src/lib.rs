//! # Controller Extra Form
//!
//! 在控制器执行前，根据方法上的 `Form` 注解构建表单对象并注入请求属性
//!
//! ## 注入规则
//!
//! - 参数类型为 `Arc<dyn FormType>`：注入表单类型本身
//! - 参数类型为 [`Form`]：注入表单，可选绑定请求数据
//! - 参数类型为 [`FormView`]：注入表单视图
//!
//! ```rust,ignore
//! let registry = Arc::new(DefaultFormRegistry::from_inventory());
//! let injector = FormInjector::new(registry, Arc::new(DefaultFormFactory));
//!
//! let chain = ListenerChain::new();
//! chain.add_listener(Arc::new(injector));
//! chain.on_controller(&mut event)?;
//! ```

pub mod annotation;
pub mod config;
pub mod error;
pub mod factory;
pub mod form;
pub mod form_type;
pub mod injector;
pub mod parameter;
pub mod registry;
pub mod view;

pub use annotation::FormAnnotation;
pub use config::FormInjectorConfig;
pub use error::{FormBuildError, InjectionError, InjectionResult, RegistryError};
pub use factory::{DefaultFormFactory, FormFactory};
pub use form::{FieldError, Form};
pub use form_type::{FieldDefinition, FormBuilder, FormType, FormTypeRef, GenericFormType};
pub use injector::{FormInjector, FormTypeConstructor};
pub use parameter::ParameterShape;
pub use registry::{DefaultFormRegistry, FormRegistry, FormTypeRegistration, ResolvedFormType};
pub use view::{FieldView, FormView};

// 导出 inventory，供 submit_form_type! 宏使用
pub use inventory;

pub mod prelude {
    //! 预导入模块

    pub use crate::annotation::FormAnnotation;
    pub use crate::config::FormInjectorConfig;
    pub use crate::error::InjectionError;
    pub use crate::factory::{DefaultFormFactory, FormFactory};
    pub use crate::form::Form;
    pub use crate::form_type::{FieldDefinition, FormBuilder, FormType, FormTypeRef};
    pub use crate::injector::FormInjector;
    pub use crate::registry::{DefaultFormRegistry, FormRegistry};
    pub use crate::submit_form_type;
    pub use crate::view::FormView;

    pub use controller_extra_core::prelude::*;
}
