//! 表单视图
//!
//! 面向模板渲染的只读投影，可直接序列化后交给模板引擎。

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub name: String,
    pub method: String,
    pub submitted: bool,
    pub valid: bool,
    /// 表单级错误
    pub errors: Vec<String>,
    pub children: Vec<FieldView>,
}

impl FormView {
    pub fn child(&self, name: &str) -> Option<&FieldView> {
        self.children.iter().find(|c| c.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub name: String,
    /// 提交时使用的完整名称，例如 `contact[email]`
    pub full_name: String,
    pub value: Value,
    pub required: bool,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_view_serializes_for_templates() {
        let view = FormView {
            name: "search".to_string(),
            method: "GET".to_string(),
            submitted: false,
            valid: false,
            errors: vec![],
            children: vec![FieldView {
                name: "q".to_string(),
                full_name: "search[q]".to_string(),
                value: Value::Null,
                required: false,
                errors: vec![],
            }],
        };

        let rendered = serde_json::to_value(&view).unwrap();
        assert_eq!(rendered["children"][0]["full_name"], json!("search[q]"));
        assert_eq!(rendered["method"], json!("GET"));
        assert!(view.child("missing").is_none());
    }
}
