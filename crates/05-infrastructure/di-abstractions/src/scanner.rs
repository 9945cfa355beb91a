//! 依赖扫描
//!
//! 在构造参数、属性覆盖与对象自身属性中查找 [`Inject`] 占位符。
//! 扫描只看一层，从不递归进入嵌套对象或列表。

use crate::inject::Inject;
use crate::object::ObjectRef;
use crate::value::Value;

/// 构造参数中的依赖：`(参数位置, 描述符)`
pub fn scan_arguments(args: &[Value]) -> Vec<(usize, Inject)> {
    args.iter()
        .enumerate()
        .filter_map(|(index, value)| value.as_inject().map(|inject| (index, inject.clone())))
        .collect()
}

/// 属性集合中的依赖：`(属性名, 描述符)`
pub fn scan_properties<'a, I>(properties: I) -> Vec<(String, Inject)>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    properties
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_inject()
                .map(|inject| (name.to_string(), inject.clone()))
        })
        .collect()
}

/// 对象自身属性中的依赖
///
/// 返回快照，调用方解析依赖时不持有对象的锁。
pub fn scan_object(object: &ObjectRef) -> Vec<(String, Inject)> {
    scan_properties(object.read().properties())
}
