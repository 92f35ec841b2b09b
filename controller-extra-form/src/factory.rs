use crate::error::FormBuildError;
use crate::form::Form;
use crate::form_type::{FieldDefinition, FormBuilder, FormType};
use controller_extra_core::AttributeValue;
use std::collections::HashSet;

/// 表单工厂 trait
pub trait FormFactory: Send + Sync {
    /// 根据表单类型和初始数据构建表单
    fn create(
        &self,
        form_type: &dyn FormType,
        data: Option<AttributeValue>,
    ) -> Result<Form, FormBuildError>;
}

/// 默认表单工厂
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormFactory;

impl DefaultFormFactory {
    pub fn new() -> Self {
        Self
    }
}

impl FormFactory for DefaultFormFactory {
    fn create(
        &self,
        form_type: &dyn FormType,
        data: Option<AttributeValue>,
    ) -> Result<Form, FormBuildError> {
        let mut builder = FormBuilder::new();
        form_type.build_form(&mut builder);
        let (fields, allow_extra_fields) = builder.into_parts();

        if let Some(field) = first_duplicate(&fields) {
            return Err(FormBuildError::DuplicateField {
                form: form_type.name().to_string(),
                field: field.to_string(),
            });
        }

        tracing::trace!(
            form = form_type.name(),
            fields = fields.len(),
            has_data = data.is_some(),
            "Building form"
        );

        Ok(Form::new(
            form_type.name(),
            form_type.method(),
            fields,
            allow_extra_fields,
            data,
        ))
    }
}

fn first_duplicate(fields: &[FieldDefinition]) -> Option<&str> {
    let mut seen = HashSet::new();
    fields
        .iter()
        .map(|f| f.name.as_str())
        .find(|name| !seen.insert(*name))
}
