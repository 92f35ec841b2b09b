use controller_extra_core::Environment;

pub const DEFAULT_NAME_KEY: &str = "controller_extra.form.default_name";
pub const STRICT_PARAMETER_TYPES_KEY: &str = "controller_extra.form.strict_parameter_types";
pub const ENABLED_KEY: &str = "controller_extra.form.enabled";

/// 注解未指定名称时使用的表单类型标识符
pub const DEFAULT_FORM_NAME: &str = "form";

/// 表单注入配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInjectorConfig {
    /// 是否启用（默认：true），关闭后所有表单注解都被忽略
    pub enabled: bool,

    /// 默认表单类型标识符（默认：form）
    pub default_name: String,

    /// 参数类型无法接收表单时是否报错（默认：true）
    ///
    /// 为 false 时只记录警告，不注入任何值
    pub strict_parameter_types: bool,
}

impl Default for FormInjectorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_name: DEFAULT_FORM_NAME.to_string(),
            strict_parameter_types: true,
        }
    }
}

impl FormInjectorConfig {
    /// 从 Environment 读取，缺失的键使用默认值
    pub fn from_environment(env: &Environment) -> Self {
        let defaults = Self::default();
        Self {
            enabled: env.get_bool_or(ENABLED_KEY, defaults.enabled),
            default_name: env
                .get_string(DEFAULT_NAME_KEY)
                .filter(|name| !name.is_empty())
                .unwrap_or(defaults.default_name),
            strict_parameter_types: env
                .get_bool_or(STRICT_PARAMETER_TYPES_KEY, defaults.strict_parameter_types),
        }
    }
}
