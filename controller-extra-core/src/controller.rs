//! 控制器元数据与参数描述

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// 目标控制器方法
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControllerMeta {
    /// 控制器类型名称
    pub controller: String,
    /// 方法名称
    pub method: String,
}

impl ControllerMeta {
    pub fn new(controller: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            method: method.into(),
        }
    }
}

impl fmt::Display for ControllerMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.controller, self.method)
    }
}

/// 方法参数描述：参数名和静态类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    name: String,
    type_id: TypeId,
    type_name: &'static str,
}

impl ParameterDescriptor {
    /// 描述一个类型为 `T` 的参数
    pub fn of<T: Any>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// 类型名称，仅用于日志和错误信息
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

/// 按名称索引的方法参数列表
#[derive(Debug, Clone, Default)]
pub struct MethodParameters {
    parameters: Vec<ParameterDescriptor>,
    index: HashMap<String, usize>,
}

impl MethodParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个类型为 `T` 的参数
    pub fn with<T: Any>(mut self, name: impl Into<String>) -> Self {
        self.push(ParameterDescriptor::of::<T>(name));
        self
    }

    /// 追加参数，同名参数会覆盖之前的索引
    pub fn push(&mut self, descriptor: ParameterDescriptor) {
        let position = self.parameters.len();
        self.index.insert(descriptor.name.clone(), position);
        self.parameters.push(descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.index.get(name).map(|&i| &self.parameters[i])
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// 按声明顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.iter()
    }
}

impl FromIterator<ParameterDescriptor> for MethodParameters {
    fn from_iter<I: IntoIterator<Item = ParameterDescriptor>>(iter: I) -> Self {
        let mut parameters = Self::new();
        for descriptor in iter {
            parameters.push(descriptor);
        }
        parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct User;

    #[test]
    fn test_parameters_are_indexed_by_name() {
        let parameters = MethodParameters::new()
            .with::<User>("user")
            .with::<String>("slug");

        assert_eq!(parameters.len(), 2);
        assert!(parameters.get("user").unwrap().is::<User>());
        assert!(parameters.get("slug").unwrap().is::<String>());
        assert!(parameters.get("missing").is_none());

        let names: Vec<_> = parameters.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["user", "slug"]);
    }

    #[test]
    fn test_descriptor_type_name() {
        let descriptor = ParameterDescriptor::of::<String>("title");
        assert!(descriptor.type_name().ends_with("String"));
        assert_eq!(descriptor.type_id(), TypeId::of::<String>());
    }

    #[test]
    fn test_controller_meta_display() {
        let meta = ControllerMeta::new("UserController", "edit");
        assert_eq!(meta.to_string(), "UserController::edit");
    }
}
