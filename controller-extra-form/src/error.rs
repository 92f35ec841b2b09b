use thiserror::Error;

/// 表单注入错误
///
/// 除 `UnsupportedParameterType` 在宽松模式下可被忽略外，其余都会中止请求处理
#[derive(Debug, Error)]
pub enum InjectionError {
    #[error("Form type \"{identifier}\" is neither a registered constructor nor known to the form registry")]
    UnknownFormType {
        identifier: String,
        #[source]
        source: RegistryError,
    },

    #[error("Parameter \"{variable}\" is not declared by {controller}")]
    MissingParameter { variable: String, controller: String },

    #[error("Parameter \"{variable}\" has type {type_name}, expected a form type, Form or FormView")]
    UnsupportedParameterType {
        variable: String,
        type_name: &'static str,
    },

    #[error(transparent)]
    FormCreation(#[from] FormBuildError),
}

/// 表单类型注册表错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Could not load form type \"{0}\"")]
    TypeNotFound(String),
}

/// 表单构建错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormBuildError {
    #[error("Form \"{form}\" declares field \"{field}\" more than once")]
    DuplicateField { form: String, field: String },
}

pub type InjectionResult<T> = Result<T, InjectionError>;
