use crate::form::Form;
use crate::form_type::FormTypeRef;
use crate::view::FormView;
use controller_extra_core::ParameterDescriptor;

/// 可接收表单注入的参数形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterShape {
    /// 表单类型本身（`Arc<dyn FormType>`）
    RawType,
    /// 表单实例（[`Form`]）
    BoundForm,
    /// 表单视图（[`FormView`]）
    RenderedView,
}

impl ParameterShape {
    /// 根据参数的静态类型确定形态，其他类型返回 None
    pub fn resolve(descriptor: &ParameterDescriptor) -> Option<Self> {
        if descriptor.is::<FormTypeRef>() {
            Some(Self::RawType)
        } else if descriptor.is::<Form>() {
            Some(Self::BoundForm)
        } else if descriptor.is::<FormView>() {
            Some(Self::RenderedView)
        } else {
            None
        }
    }
}
