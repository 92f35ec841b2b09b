use controller_extra_core::Annotation;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// 表单注入注解
///
/// 声明把表单类型、表单或表单视图注入到名为 `variable` 的控制器参数。
/// 注解读取器可以直接从 JSON/TOML 反序列化：
///
/// ```rust,ignore
/// let annotation: FormAnnotation = serde_json::from_value(json!({
///     "name": "contact",
///     "variable": "form",
///     "entity": "user",
///     "handleRequest": true,
/// }))?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAnnotation {
    /// 表单类型标识符，为空时使用默认标识符
    #[serde(default)]
    pub name: Option<String>,

    /// 目标参数名
    pub variable: String,

    /// 作为初始数据的请求属性名
    #[serde(default)]
    pub entity: Option<String>,

    /// 是否把当前请求绑定到表单
    #[serde(default)]
    pub handle_request: bool,
}

impl FormAnnotation {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            name: None,
            variable: variable.into(),
            entity: None,
            handle_request: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_request_handling(mut self, handle_request: bool) -> Self {
        self.handle_request = handle_request;
        self
    }

    /// 非空的表单类型标识符
    pub fn type_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

impl Annotation for FormAnnotation {
    fn annotation_name(&self) -> &str {
        "Form"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_from_reader_output() {
        let annotation: FormAnnotation = serde_json::from_value(json!({
            "name": "contact",
            "variable": "form",
            "entity": "user",
            "handleRequest": true,
        }))
        .unwrap();

        assert_eq!(
            annotation,
            FormAnnotation::new("form")
                .with_name("contact")
                .with_entity("user")
                .with_request_handling(true)
        );
    }

    #[test]
    fn test_defaults() {
        let annotation: FormAnnotation =
            serde_json::from_value(json!({"variable": "form"})).unwrap();

        assert_eq!(annotation.name, None);
        assert_eq!(annotation.entity, None);
        assert!(!annotation.handle_request);
    }

    #[test]
    fn test_variable_is_required() {
        let result = serde_json::from_value::<FormAnnotation>(json!({"name": "contact"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_name_is_ignored() {
        assert_eq!(FormAnnotation::new("form").with_name("").type_name(), None);
        assert_eq!(
            FormAnnotation::new("form").with_name("contact").type_name(),
            Some("contact")
        );
    }
}
