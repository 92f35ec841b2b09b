//! 表单类型注册表
//!
//! 标识符必须提前注册：显式调用 [`DefaultFormRegistry::register`]，
//! 或通过 [`submit_form_type!`](crate::submit_form_type) 在编译时提交。

use crate::error::RegistryError;
use crate::form_type::{FormTypeRef, GenericFormType};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// 注册表解析结果
#[derive(Clone)]
pub struct ResolvedFormType {
    identifier: String,
    inner: FormTypeRef,
}

impl ResolvedFormType {
    pub fn new(identifier: impl Into<String>, inner: FormTypeRef) -> Self {
        Self {
            identifier: identifier.into(),
            inner,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// 底层可构建的表单类型
    pub fn inner_type(&self) -> FormTypeRef {
        Arc::clone(&self.inner)
    }
}

impl std::fmt::Debug for ResolvedFormType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFormType")
            .field("identifier", &self.identifier)
            .field("name", &self.inner.name())
            .finish()
    }
}

/// 表单类型注册表 trait
pub trait FormRegistry: Send + Sync {
    /// 按标识符解析表单类型
    fn get_type(&self, identifier: &str) -> Result<ResolvedFormType, RegistryError>;

    /// 是否已注册
    fn has_type(&self, identifier: &str) -> bool;
}

/// 表单类型编译时注册信息
pub struct FormTypeRegistration {
    pub identifier: &'static str,
    pub create: fn() -> FormTypeRef,
}

inventory::collect!(FormTypeRegistration);

/// 在编译时提交表单类型
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct ContactType;
///
/// controller_extra_form::submit_form_type!("contact", ContactType);
/// ```
#[macro_export]
macro_rules! submit_form_type {
    ($identifier:expr, $form_type:ty) => {
        $crate::inventory::submit! {
            $crate::registry::FormTypeRegistration {
                identifier: $identifier,
                create: || ::std::sync::Arc::new(<$form_type>::default()),
            }
        }
    };
}

/// 默认注册表实现
///
/// 内置 `form` 通用类型
pub struct DefaultFormRegistry {
    types: RwLock<HashMap<String, FormTypeRef>>,
}

impl DefaultFormRegistry {
    pub fn new() -> Self {
        let registry = Self {
            types: RwLock::new(HashMap::new()),
        };
        registry.register(GenericFormType::IDENTIFIER, Arc::new(GenericFormType));
        registry
    }

    /// 创建注册表并加载所有编译时提交的表单类型
    pub fn from_inventory() -> Self {
        let registry = Self::new();

        for registration in inventory::iter::<FormTypeRegistration> {
            registry.register(registration.identifier, (registration.create)());
        }

        tracing::info!(
            "Form type discovery completed: {} types registered",
            registry.len()
        );
        registry
    }

    /// 注册表单类型，同名标识符会被覆盖
    pub fn register(&self, identifier: impl Into<String>, form_type: FormTypeRef) {
        let identifier = identifier.into();
        tracing::debug!("Registered form type: {}", identifier);
        self.types.write().insert(identifier, form_type);
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

impl Default for DefaultFormRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormRegistry for DefaultFormRegistry {
    fn get_type(&self, identifier: &str) -> Result<ResolvedFormType, RegistryError> {
        self.types
            .read()
            .get(identifier)
            .map(|inner| ResolvedFormType::new(identifier, Arc::clone(inner)))
            .ok_or_else(|| RegistryError::TypeNotFound(identifier.to_string()))
    }

    fn has_type(&self, identifier: &str) -> bool {
        self.types.read().contains_key(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form_type::{FieldDefinition, FormBuilder, FormType};

    #[derive(Default)]
    struct NewsletterType;

    impl FormType for NewsletterType {
        fn name(&self) -> &str {
            "newsletter"
        }

        fn build_form(&self, builder: &mut FormBuilder) {
            builder.add(FieldDefinition::required("email"));
        }
    }

    crate::submit_form_type!("newsletter", NewsletterType);

    #[test]
    fn test_builtin_form_type() {
        let registry = DefaultFormRegistry::new();
        assert!(registry.has_type("form"));

        let resolved = registry.get_type("form").unwrap();
        assert_eq!(resolved.identifier(), "form");
        assert_eq!(resolved.inner_type().name(), "form");
    }

    #[test]
    fn test_unknown_type() {
        let registry = DefaultFormRegistry::new();
        assert_eq!(
            registry.get_type("missing").unwrap_err(),
            RegistryError::TypeNotFound("missing".to_string())
        );
    }

    #[test]
    fn test_inner_type_is_shared() {
        let registry = DefaultFormRegistry::new();
        let form_type: FormTypeRef = Arc::new(NewsletterType);
        registry.register("signup", Arc::clone(&form_type));

        let first = registry.get_type("signup").unwrap().inner_type();
        let second = registry.get_type("signup").unwrap().inner_type();
        assert!(Arc::ptr_eq(&first, &form_type));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_inventory_registration() {
        let registry = DefaultFormRegistry::from_inventory();
        assert!(registry.has_type("newsletter"));
        assert!(registry.has_type("form"));
        assert_eq!(registry.get_type("newsletter").unwrap().inner_type().name(), "newsletter");
    }
}
