//! 表单注入器
//!
//! 在控制器执行前，根据 [`FormAnnotation`] 构建表单类型、表单或表单视图，
//! 并写入请求属性，键为注解声明的参数名。

use crate::annotation::FormAnnotation;
use crate::config::FormInjectorConfig;
use crate::error::{InjectionError, InjectionResult};
use crate::factory::FormFactory;
use crate::form::Form;
use crate::form_type::{FormType, FormTypeRef};
use crate::parameter::ParameterShape;
use crate::registry::FormRegistry;
use controller_extra_core::{
    Annotation, AnnotationEventListener, AttributeValue, ControllerMeta, MethodParameters,
    Request,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// 表单类型构造函数
pub type FormTypeConstructor = Arc<dyn Fn() -> FormTypeRef + Send + Sync>;

/// 表单注入器
///
/// 表单类型按以下顺序解析：
/// 1. 注入器自身登记的构造函数，每次调用都新建实例，不查询注册表
/// 2. 表单注册表
pub struct FormInjector {
    registry: Arc<dyn FormRegistry>,
    factory: Arc<dyn FormFactory>,
    constructors: RwLock<HashMap<String, FormTypeConstructor>>,
    config: FormInjectorConfig,
}

impl FormInjector {
    pub fn new(registry: Arc<dyn FormRegistry>, factory: Arc<dyn FormFactory>) -> Self {
        Self::with_config(registry, factory, FormInjectorConfig::default())
    }

    pub fn with_config(
        registry: Arc<dyn FormRegistry>,
        factory: Arc<dyn FormFactory>,
        config: FormInjectorConfig,
    ) -> Self {
        Self {
            registry,
            factory,
            constructors: RwLock::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &FormInjectorConfig {
        &self.config
    }

    /// 登记表单类型构造函数
    pub fn register_type<F>(&self, identifier: impl Into<String>, constructor: F)
    where
        F: Fn() -> FormTypeRef + Send + Sync + 'static,
    {
        let identifier = identifier.into();
        tracing::debug!("Registered form type constructor: {}", identifier);
        self.constructors
            .write()
            .insert(identifier, Arc::new(constructor));
    }

    /// 以类型全名登记，例如 `my_app::forms::ContactType`
    pub fn register_type_of<T>(&self)
    where
        T: FormType + Default,
    {
        self.register_type(std::any::type_name::<T>(), || {
            Arc::new(T::default()) as FormTypeRef
        });
    }

    pub fn has_constructor(&self, identifier: &str) -> bool {
        self.constructors.read().contains_key(identifier)
    }

    /// 解析表单类型
    pub fn resolve_type(&self, identifier: &str) -> InjectionResult<FormTypeRef> {
        // 先取出构造函数再调用，避免持锁执行用户代码
        let constructor = self.constructors.read().get(identifier).cloned();
        if let Some(constructor) = constructor {
            tracing::trace!(identifier, "Form type built from constructor");
            return Ok(constructor());
        }

        self.registry
            .get_type(identifier)
            .map(|resolved| resolved.inner_type())
            .map_err(|source| InjectionError::UnknownFormType {
                identifier: identifier.to_string(),
                source,
            })
    }

    /// 处理单个注解
    ///
    /// 非表单注解直接忽略；失败时不会修改请求属性
    pub fn evaluate(
        &self,
        controller: &ControllerMeta,
        request: &mut Request,
        annotation: &dyn Annotation,
        parameters: &MethodParameters,
    ) -> InjectionResult<()> {
        let Some(annotation) = annotation.downcast_ref::<FormAnnotation>() else {
            return Ok(());
        };

        if !self.config.enabled {
            tracing::trace!(variable = %annotation.variable, "Form injection disabled");
            return Ok(());
        }

        let identifier = annotation
            .type_name()
            .unwrap_or(self.config.default_name.as_str());
        let form_type = self.resolve_type(identifier)?;

        let descriptor = parameters.get(&annotation.variable).ok_or_else(|| {
            InjectionError::MissingParameter {
                variable: annotation.variable.clone(),
                controller: controller.to_string(),
            }
        })?;

        let shape = match ParameterShape::resolve(descriptor) {
            Some(shape) => shape,
            None if self.config.strict_parameter_types => {
                return Err(InjectionError::UnsupportedParameterType {
                    variable: annotation.variable.clone(),
                    type_name: descriptor.type_name(),
                });
            }
            None => {
                tracing::warn!(
                    controller = %controller,
                    variable = %annotation.variable,
                    type_name = descriptor.type_name(),
                    "Parameter cannot receive a form, nothing injected"
                );
                return Ok(());
            }
        };

        let built: AttributeValue = match shape {
            ParameterShape::RawType => Arc::new(form_type),
            ParameterShape::BoundForm => Arc::new(self.build_form(request, annotation, &form_type)?),
            ParameterShape::RenderedView => {
                Arc::new(self.build_form(request, annotation, &form_type)?.create_view())
            }
        };

        tracing::debug!(
            controller = %controller,
            variable = %annotation.variable,
            identifier,
            shape = ?shape,
            "Injected form parameter"
        );

        request.attributes.set_raw(annotation.variable.clone(), built);
        Ok(())
    }

    fn build_form(
        &self,
        request: &Request,
        annotation: &FormAnnotation,
        form_type: &FormTypeRef,
    ) -> InjectionResult<Form> {
        // 属性不存在时按无初始数据处理
        let data = annotation
            .entity
            .as_deref()
            .and_then(|entity| request.attributes.get_raw(entity))
            .cloned();

        let mut form = self.factory.create(form_type.as_ref(), data)?;

        if annotation.handle_request {
            form.handle_request(request);
        }

        Ok(form)
    }
}

impl std::fmt::Debug for FormInjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let constructors = self.constructors.read();
        f.debug_struct("FormInjector")
            .field("constructors", &constructors.keys().collect::<Vec<_>>())
            .field("config", &self.config)
            .finish()
    }
}

impl AnnotationEventListener for FormInjector {
    fn listener_name(&self) -> &str {
        "FormInjector"
    }

    fn evaluate_annotation(
        &self,
        controller: &ControllerMeta,
        request: &mut Request,
        annotation: &dyn Annotation,
        parameters: &MethodParameters,
    ) -> anyhow::Result<()> {
        self.evaluate(controller, request, annotation, parameters)?;
        Ok(())
    }
}
