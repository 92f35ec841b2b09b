//! 表单类型
//!
//! 表单类型描述表单的名称、提交方法和字段，由工厂据此构建 [`Form`](crate::Form)。

use http::Method;
use std::sync::Arc;

/// 共享的表单类型引用，也是 "原始类型" 参数的注入类型
pub type FormTypeRef = Arc<dyn FormType>;

/// 表单类型 trait
pub trait FormType: Send + Sync + 'static {
    /// 表单名称
    ///
    /// 同时是提交数据中的键，空字符串表示直接读取全部提交参数
    fn name(&self) -> &str;

    /// 提交方法（默认 POST）
    fn method(&self) -> Method {
        Method::POST
    }

    /// 声明字段
    fn build_form(&self, builder: &mut FormBuilder);
}

/// 字段定义
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    pub required: bool,
}

impl FieldDefinition {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
        }
    }
}

/// 表单构建器
#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    fields: Vec<FieldDefinition>,
    allow_extra_fields: bool,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: FieldDefinition) -> &mut Self {
        self.fields.push(field);
        self
    }

    /// 允许提交未声明的字段
    pub fn allow_extra_fields(&mut self, allow: bool) -> &mut Self {
        self.allow_extra_fields = allow;
        self
    }

    pub(crate) fn into_parts(self) -> (Vec<FieldDefinition>, bool) {
        (self.fields, self.allow_extra_fields)
    }
}

/// 内置通用表单类型，标识符为 `form`
///
/// 不声明字段，接受任意提交数据
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericFormType;

impl GenericFormType {
    pub const IDENTIFIER: &'static str = "form";
}

impl FormType for GenericFormType {
    fn name(&self) -> &str {
        Self::IDENTIFIER
    }

    fn build_form(&self, builder: &mut FormBuilder) {
        builder.allow_extra_fields(true);
    }
}
