//! 对象模型
//!
//! Bean 实例是带有可选类身份的属性集合。属性按插入顺序保存，
//! 依赖扫描只检查对象自身的一层属性。

use crate::factory::Class;
use crate::value::{Method, Value};
use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::sync::Arc;

/// 属性集合
#[derive(Clone, Default)]
pub struct Object {
    /// 构造该对象的类
    class: Option<Class>,
    /// 自身属性
    properties: IndexMap<String, Value>,
}

impl Object {
    /// 创建没有类身份的空对象
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建属于指定类的空对象
    pub fn of(class: &Class) -> Self {
        Self {
            class: Some(class.clone()),
            properties: IndexMap::new(),
        }
    }

    /// 获取类
    pub fn class(&self) -> Option<&Class> {
        self.class.as_ref()
    }

    /// 设置属性，返回被覆盖的旧值
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.properties.insert(name.into(), value.into())
    }

    /// 定义方法属性
    pub fn define_method<F>(&mut self, name: impl Into<String>, method: F)
    where
        F: Fn(&ObjectRef) -> Result<(), crate::value::MethodError> + Send + Sync + 'static,
    {
        self.properties.insert(name.into(), Value::method(method));
    }

    /// 读取属性
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// 属性是否存在（值为 `Null` 也算存在）
    pub fn has(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// 删除属性
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.properties.shift_remove(name)
    }

    /// 遍历自身属性
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// 属性数量
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// 是否没有属性
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl fmt::Debug for Object {
    // 只打印属性名，相互引用的 Bean 会形成环
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("class", &self.class.as_ref().map(Class::name))
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// 共享对象句柄
///
/// 以指针判断身份。锁只在单个读写操作内持有，调用用户闭包前必须释放。
#[derive(Clone, Default)]
pub struct ObjectRef(Arc<RwLock<Object>>);

impl ObjectRef {
    /// 包装对象
    pub fn new(object: Object) -> Self {
        Self(Arc::new(RwLock::new(object)))
    }

    /// 是否为同一对象
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// 读锁
    pub fn read(&self) -> RwLockReadGuard<'_, Object> {
        self.0.read()
    }

    /// 写锁
    pub fn write(&self) -> RwLockWriteGuard<'_, Object> {
        self.0.write()
    }

    /// 读取属性的副本
    pub fn get(&self, name: &str) -> Option<Value> {
        self.read().get(name).cloned()
    }

    /// 设置属性
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.write().set(name, value)
    }

    /// 属性是否存在
    pub fn has(&self, name: &str) -> bool {
        self.read().has(name)
    }

    /// 获取类
    pub fn class(&self) -> Option<Class> {
        self.read().class().cloned()
    }

    /// 获取类名
    pub fn class_name(&self) -> Option<String> {
        self.read().class().map(|class| class.name().to_string())
    }

    /// 是否为指定类的实例
    pub fn is_instance_of(&self, class: &Class) -> bool {
        self.read()
            .class()
            .is_some_and(|own| own.ptr_eq(class))
    }

    /// 读取方法属性
    pub fn method(&self, name: &str) -> Option<Method> {
        self.read().get(name).and_then(Value::as_method).cloned()
    }

    /// 浅拷贝：复制一层属性，嵌套对象仍然共享
    pub fn shallow_copy(&self) -> ObjectRef {
        ObjectRef::new(self.read().clone())
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_read() {
            Some(object) => write!(f, "{:?}", *object),
            None => f.write_str("Object(<locked>)"),
        }
    }
}
