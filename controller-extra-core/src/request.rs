//! 请求模型
//!
//! 控制器执行前由框架构造，注入器读取提交的数据并把构建好的对象写入 attributes。

use http::Method;
use serde_json::{Map, Value};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// 请求属性值，任意可跨线程共享的对象
pub type AttributeValue = Arc<dyn Any + Send + Sync>;

/// 请求属性表
///
/// 控制器参数按名称从这里取值
#[derive(Clone, Default)]
pub struct Attributes {
    values: HashMap<String, AttributeValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入属性，返回被覆盖的旧值
    pub fn set<T: Any + Send + Sync>(
        &mut self,
        key: impl Into<String>,
        value: T,
    ) -> Option<AttributeValue> {
        self.set_raw(key, Arc::new(value))
    }

    pub fn set_raw(&mut self, key: impl Into<String>, value: AttributeValue) -> Option<AttributeValue> {
        self.values.insert(key.into(), value)
    }

    pub fn get_raw(&self, key: &str) -> Option<&AttributeValue> {
        self.values.get(key)
    }

    /// 按类型读取属性，类型不匹配时返回 None
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
        self.values.get(key)?.downcast_ref::<T>()
    }

    pub fn get_arc<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.values.get(key)?.clone().downcast::<T>().ok()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("Attributes").field("keys", &keys).finish()
    }
}

/// 提交参数（query 或 body）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag {
    params: Map<String, Value>,
}

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 值构造，非对象值视为空
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(params) => Self { params },
            _ => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.params.insert(key.into(), value);
    }

    pub fn all(&self) -> &Map<String, Value> {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl From<Map<String, Value>> for ParameterBag {
    fn from(params: Map<String, Value>) -> Self {
        Self { params }
    }
}

/// 当前请求
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    query: ParameterBag,
    body: ParameterBag,
    /// 请求属性，控制器参数的来源
    pub attributes: Attributes,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: ParameterBag::new(),
            body: ParameterBag::new(),
            attributes: Attributes::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn with_query(mut self, query: Value) -> Self {
        self.query = ParameterBag::from_value(query);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = ParameterBag::from_value(body);
        self
    }

    pub fn with_attribute<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.attributes.set(key, value);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &ParameterBag {
        &self.query
    }

    pub fn body(&self) -> &ParameterBag {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct User {
        id: u32,
    }

    #[test]
    fn test_typed_attribute_access() {
        let mut attributes = Attributes::new();
        attributes.set("user", User { id: 7 });

        assert_eq!(attributes.get::<User>("user"), Some(&User { id: 7 }));
        assert!(attributes.get::<String>("user").is_none());
        assert!(attributes.get::<User>("missing").is_none());
    }

    #[test]
    fn test_set_returns_previous_value() {
        let mut attributes = Attributes::new();
        assert!(attributes.set("page", 1u32).is_none());

        let previous = attributes.set("page", 2u32).unwrap();
        assert_eq!(previous.downcast_ref::<u32>(), Some(&1));
        assert_eq!(attributes.get::<u32>("page"), Some(&2));
        assert_eq!(attributes.len(), 1);
    }

    #[test]
    fn test_get_arc_shares_value() {
        let mut attributes = Attributes::new();
        let shared = Arc::new(User { id: 1 });
        attributes.set_raw("user", shared.clone());

        let fetched = attributes.get_arc::<User>("user").unwrap();
        assert!(Arc::ptr_eq(&shared, &fetched));
    }

    #[test]
    fn test_parameter_bag_ignores_non_objects() {
        assert!(ParameterBag::from_value(json!([1, 2])).is_empty());

        let bag = ParameterBag::from_value(json!({"q": "rust"}));
        assert!(bag.has("q"));
        assert_eq!(bag.get("q"), Some(&json!("rust")));
    }

    #[test]
    fn test_request_builders() {
        let request = Request::post("/contact")
            .with_body(json!({"contact": {"email": "a@b.c"}}))
            .with_attribute("locale", "en".to_string());

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.path(), "/contact");
        assert!(request.query().is_empty());
        assert!(request.body().has("contact"));
        assert_eq!(request.attributes.get::<String>("locale").map(String::as_str), Some("en"));
    }
}
