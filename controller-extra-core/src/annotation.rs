use std::any::Any;
use std::fmt::Debug;

/// 控制器方法上的注解
///
/// 由外部注解读取器构造，每个监听器只处理自己认识的注解类型
pub trait Annotation: Any + Send + Sync + Debug + 'static {
    /// 注解名称（用于日志）
    fn annotation_name(&self) -> &str;

    /// 转换为 Any 引用，用于类型转换
    fn as_any(&self) -> &dyn Any;
}

impl dyn Annotation {
    /// 尝试转换为具体注解类型
    pub fn downcast_ref<T: Annotation>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Annotation>(&self) -> bool {
        self.as_any().is::<T>()
    }
}
