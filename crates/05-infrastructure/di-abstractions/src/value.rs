//! 动态值
//!
//! Bean、构造参数与对象属性共用的值类型

use crate::inject::Inject;
use crate::object::ObjectRef;
use std::fmt;
use std::sync::Arc;

/// 方法错误类型
pub type MethodError = Box<dyn std::error::Error + Send + Sync>;

/// 对象方法
///
/// 以所属对象为唯一参数调用，生命周期钩子即以此形式挂在对象属性上。
pub type Method = Arc<dyn Fn(&ObjectRef) -> Result<(), MethodError> + Send + Sync>;

/// 动态值
#[derive(Clone, Default)]
pub enum Value {
    /// 显式的 "无值" 标记，与属性不存在不同
    #[default]
    Null,
    /// 布尔值
    Bool(bool),
    /// 整数
    Int(i64),
    /// 浮点数
    Float(f64),
    /// 文本
    Text(String),
    /// 列表
    List(Vec<Value>),
    /// 共享对象
    Object(ObjectRef),
    /// 尚未解析的依赖描述符
    Inject(Inject),
    /// 对象方法
    Method(Method),
}

impl Value {
    /// 创建方法值
    pub fn method<F>(method: F) -> Self
    where
        F: Fn(&ObjectRef) -> Result<(), MethodError> + Send + Sync + 'static,
    {
        Self::Method(Arc::new(method))
    }

    /// 是否为显式的无值标记
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// 作为文本读取
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// 作为布尔值读取
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// 作为整数读取
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// 作为对象读取
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// 作为依赖描述符读取
    pub fn as_inject(&self) -> Option<&Inject> {
        match self {
            Self::Inject(inject) => Some(inject),
            _ => None,
        }
    }

    /// 作为方法读取
    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Self::Method(method) => Some(method),
            _ => None,
        }
    }

    /// 是否与另一个值引用同一对象
    pub fn same_object(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Object(left), Self::Object(right)) => left.ptr_eq(right),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left == right,
            (Self::Text(left), Self::Text(right)) => left == right,
            (Self::List(left), Self::List(right)) => left == right,
            (Self::Object(left), Self::Object(right)) => left.ptr_eq(right),
            (Self::Method(left), Self::Method(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(value) => write!(f, "Bool({value})"),
            Self::Int(value) => write!(f, "Int({value})"),
            Self::Float(value) => write!(f, "Float({value})"),
            Self::Text(value) => write!(f, "Text({value:?})"),
            Self::List(values) => f.debug_list().entries(values).finish(),
            Self::Object(object) => write!(f, "{object:?}"),
            Self::Inject(inject) => write!(f, "{inject:?}"),
            Self::Method(_) => f.write_str("Method(<function>)"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Self::Object(object)
    }
}

impl From<&ObjectRef> for Value {
    fn from(object: &ObjectRef) -> Self {
        Self::Object(object.clone())
    }
}

impl From<Inject> for Value {
    fn from(inject: Inject) -> Self {
        Self::Inject(inject)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(value) => Self::Int(value),
                None => Self::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(text) => Self::Text(text),
            serde_json::Value::Array(values) => {
                Self::List(values.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(map) => {
                let object = crate::object::Object::new();
                let object = ObjectRef::new(object);
                for (name, value) in map {
                    object.set(name, Value::from(value));
                }
                Self::Object(object)
            }
        }
    }
}
