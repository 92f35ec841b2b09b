//! 表单实例
//!
//! 由 [`FormFactory`](crate::FormFactory) 构建，持有初始数据、提交值和校验错误。

use crate::form_type::FieldDefinition;
use crate::view::{FieldView, FormView};
use controller_extra_core::{AttributeValue, Request};
use http::Method;
use serde::Serialize;
use serde_json::{Map, Value};
use std::any::Any;

pub(crate) const BLANK_MESSAGE: &str = "This value should not be blank.";
pub(crate) const EXTRA_FIELDS_MESSAGE: &str = "This form should not contain extra fields.";
pub(crate) const NOT_AN_OBJECT_MESSAGE: &str = "The submitted data must be an object.";

/// 校验错误，`field` 为空表示表单级错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Option<String>,
    pub message: String,
}

impl FieldError {
    fn form(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

/// 可绑定请求数据的表单
#[derive(Clone)]
pub struct Form {
    name: String,
    method: Method,
    fields: Vec<FieldDefinition>,
    allow_extra_fields: bool,
    data: Option<AttributeValue>,
    values: Map<String, Value>,
    submitted: bool,
    errors: Vec<FieldError>,
}

impl Form {
    pub(crate) fn new(
        name: impl Into<String>,
        method: Method,
        fields: Vec<FieldDefinition>,
        allow_extra_fields: bool,
        data: Option<AttributeValue>,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            fields,
            allow_extra_fields,
            data,
            values: Map::new(),
            submitted: false,
            errors: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// 初始数据
    pub fn data(&self) -> Option<&AttributeValue> {
        self.data.as_ref()
    }

    /// 按类型读取初始数据
    pub fn data_as<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.data.as_ref()?.downcast_ref::<T>()
    }

    /// 已提交的值
    pub fn submitted_values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// 字段当前值：优先取提交值，其次取 JSON 对象形式的初始数据
    pub fn value(&self, field: &str) -> Option<&Value> {
        if self.submitted {
            return self.values.get(field);
        }
        match self.data_as::<Value>() {
            Some(Value::Object(initial)) => initial.get(field),
            _ => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// 未提交的表单不视为有效
    pub fn is_valid(&self) -> bool {
        self.submitted && self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// 提交数据并校验
    ///
    /// 表单只能提交一次，重复提交会被忽略
    pub fn submit(&mut self, submitted: Map<String, Value>) {
        if self.submitted {
            tracing::warn!(form = %self.name, "Form was already submitted, ignoring new data");
            return;
        }
        self.submitted = true;

        for field in &self.fields {
            let blank = match submitted.get(&field.name) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            };
            if field.required && blank {
                self.errors.push(FieldError::field(&field.name, BLANK_MESSAGE));
            }
        }

        let mut has_extra = false;
        for (key, value) in submitted {
            let declared = self.fields.iter().any(|f| f.name == key);
            if declared || self.allow_extra_fields {
                self.values.insert(key, value);
            } else {
                has_extra = true;
            }
        }
        if has_extra {
            self.errors.push(FieldError::form(EXTRA_FIELDS_MESSAGE));
        }

        tracing::debug!(
            form = %self.name,
            errors = self.errors.len(),
            "Form submitted"
        );
    }

    /// 从请求中绑定提交数据
    ///
    /// - 请求方法与表单方法不一致时不提交
    /// - GET 表单读取 query，其余方法读取 body
    /// - 具名表单只读取 `params[name]`，缺失时不提交
    /// - 匿名 GET 表单在 query 为空时不提交
    /// - 已提交的表单不再处理
    pub fn handle_request(&mut self, request: &Request) {
        if self.submitted {
            tracing::warn!(form = %self.name, "Form was already submitted, ignoring request");
            return;
        }

        if request.method() != &self.method {
            tracing::debug!(
                form = %self.name,
                expected = %self.method,
                actual = %request.method(),
                "Request method does not match, form not submitted"
            );
            return;
        }

        let params = if self.method == Method::GET {
            request.query()
        } else {
            request.body()
        };

        if self.name.is_empty() {
            if self.method == Method::GET && params.is_empty() {
                return;
            }
            self.submit(params.all().clone());
            return;
        }

        match params.get(&self.name) {
            Some(Value::Object(values)) => self.submit(values.clone()),
            Some(_) => {
                self.submit(Map::new());
                self.errors.push(FieldError::form(NOT_AN_OBJECT_MESSAGE));
            }
            None => {}
        }
    }

    /// 创建渲染用视图
    pub fn create_view(&self) -> FormView {
        let mut children: Vec<FieldView> = self
            .fields
            .iter()
            .map(|field| self.field_view(&field.name, field.required))
            .collect();

        if self.allow_extra_fields {
            for key in self.values.keys() {
                if !self.fields.iter().any(|f| &f.name == key) {
                    children.push(self.field_view(key, false));
                }
            }
        }

        FormView {
            name: self.name.clone(),
            method: self.method.to_string(),
            submitted: self.submitted,
            valid: self.is_valid(),
            errors: self
                .errors
                .iter()
                .filter(|e| e.field.is_none())
                .map(|e| e.message.clone())
                .collect(),
            children,
        }
    }

    fn field_view(&self, field: &str, required: bool) -> FieldView {
        let full_name = if self.name.is_empty() {
            field.to_string()
        } else {
            format!("{}[{}]", self.name, field)
        };
        FieldView {
            name: field.to_string(),
            full_name,
            value: self.value(field).cloned().unwrap_or(Value::Null),
            required,
            errors: self
                .errors
                .iter()
                .filter(|e| e.field.as_deref() == Some(field))
                .map(|e| e.message.clone())
                .collect(),
        }
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("fields", &self.fields)
            .field("has_data", &self.data.is_some())
            .field("submitted", &self.submitted)
            .field("errors", &self.errors)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn contact_form() -> Form {
        Form::new(
            "contact",
            Method::POST,
            vec![
                FieldDefinition::required("email"),
                FieldDefinition::optional("message"),
            ],
            false,
            None,
        )
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_submit_valid_data() {
        let mut form = contact_form();
        form.submit(object(json!({"email": "a@b.c", "message": "hi"})));

        assert!(form.is_submitted());
        assert!(form.is_valid());
        assert_eq!(form.value("email"), Some(&json!("a@b.c")));
    }

    #[test]
    fn test_required_field_is_validated() {
        let mut form = contact_form();
        form.submit(object(json!({"email": "  "})));

        assert!(form.is_submitted());
        assert!(!form.is_valid());
        assert_eq!(form.errors(), &[FieldError::field("email", BLANK_MESSAGE)]);
    }

    #[test]
    fn test_extra_fields_are_rejected() {
        let mut form = contact_form();
        form.submit(object(json!({"email": "a@b.c", "admin": true})));

        assert!(!form.is_valid());
        assert!(form.submitted_values().get("admin").is_none());
        assert_eq!(form.errors(), &[FieldError::form(EXTRA_FIELDS_MESSAGE)]);
    }

    #[test]
    fn test_second_submit_is_ignored() {
        let mut form = contact_form();
        form.submit(object(json!({"email": "first@b.c"})));
        form.submit(object(json!({"email": "second@b.c"})));

        assert_eq!(form.value("email"), Some(&json!("first@b.c")));
    }

    #[test]
    fn test_handle_request_after_submit_keeps_form_valid() {
        let mut form = contact_form();
        form.handle_request(&Request::post("/contact").with_body(json!({
            "contact": {"email": "a@b.c"}
        })));
        assert!(form.is_valid());

        form.handle_request(&Request::post("/contact").with_body(json!({"contact": "oops"})));

        assert!(form.is_valid());
        assert!(form.errors().is_empty());
        assert_eq!(form.value("email"), Some(&json!("a@b.c")));
    }

    #[test]
    fn test_handle_request_reads_named_body_params() {
        let request = Request::post("/contact").with_body(json!({
            "contact": {"email": "a@b.c"}
        }));

        let mut form = contact_form();
        form.handle_request(&request);

        assert!(form.is_valid());
        assert_eq!(form.value("email"), Some(&json!("a@b.c")));
    }

    #[test]
    fn test_handle_request_skips_other_methods() {
        let request = Request::get("/contact").with_query(json!({
            "contact": {"email": "a@b.c"}
        }));

        let mut form = contact_form();
        form.handle_request(&request);

        assert!(!form.is_submitted());
    }

    #[test]
    fn test_handle_request_without_form_key() {
        let request = Request::post("/contact").with_body(json!({"other": {}}));

        let mut form = contact_form();
        form.handle_request(&request);

        assert!(!form.is_submitted());
    }

    #[test]
    fn test_handle_request_non_object_payload() {
        let request = Request::post("/contact").with_body(json!({"contact": "oops"}));

        let mut form = contact_form();
        form.handle_request(&request);

        assert!(form.is_submitted());
        assert!(form
            .errors()
            .contains(&FieldError::form(NOT_AN_OBJECT_MESSAGE)));
    }

    #[test]
    fn test_unnamed_get_form_uses_whole_query() {
        let mut form = Form::new(
            "",
            Method::GET,
            vec![FieldDefinition::optional("q")],
            false,
            None,
        );
        form.handle_request(&Request::get("/search"));
        assert!(!form.is_submitted());

        form.handle_request(&Request::get("/search").with_query(json!({"q": "rust"})));
        assert!(form.is_valid());
        assert_eq!(form.value("q"), Some(&json!("rust")));
    }

    #[test]
    fn test_initial_json_data_prefills_values() {
        let data: AttributeValue = Arc::new(json!({"email": "known@b.c"}));
        let form = Form::new(
            "contact",
            Method::POST,
            vec![FieldDefinition::required("email")],
            false,
            Some(data),
        );

        assert_eq!(form.value("email"), Some(&json!("known@b.c")));
        assert!(!form.is_valid());
    }

    #[test]
    fn test_view_reflects_errors_and_names() {
        let mut form = contact_form();
        form.submit(object(json!({"message": "hello"})));

        let view = form.create_view();
        assert_eq!(view.name, "contact");
        assert_eq!(view.method, "POST");
        assert!(view.submitted);
        assert!(!view.valid);

        let email = view.child("email").unwrap();
        assert_eq!(email.full_name, "contact[email]");
        assert_eq!(email.errors, vec![BLANK_MESSAGE.to_string()]);

        let message = view.child("message").unwrap();
        assert_eq!(message.value, json!("hello"));
        assert!(message.errors.is_empty());
    }
}
