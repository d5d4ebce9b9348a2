//! 待解析的引用

use crate::capability::Service;
use std::fmt;
use std::sync::Arc;

/// 待解析的引用
#[derive(Clone)]
pub enum Reference {
    /// 字符串，可能是 `"identifier:method"` 形式
    Text(String),
    /// 已构造的对象，原生可调用值也以对象形式传入，统一按能力标记分类
    Object(Arc<dyn Service>),
    /// 显式的 `(对象或类型名, 方法名)` 对
    Pair(PairTarget, String),
    /// 其他值（数字、null、数组等），总是无法解析
    Value(serde_json::Value),
}

/// 方法对中的目标
#[derive(Clone)]
pub enum PairTarget {
    Object(Arc<dyn Service>),
    Name(String),
}

impl Reference {
    /// 构造方法对
    pub fn pair(target: impl Into<PairTarget>, method: impl Into<String>) -> Self {
        Self::Pair(target.into(), method.into())
    }

    /// 用于日志和错误信息的描述
    pub fn describe(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Object(service) => service.service_name().to_string(),
            Self::Pair(target, method) => format!("[{}, {}]", target.describe(), method),
            Self::Value(value) => value.to_string(),
        }
    }
}

impl PairTarget {
    /// 用于日志和错误信息的描述
    pub fn describe(&self) -> String {
        match self {
            Self::Object(service) => service.service_name().to_string(),
            Self::Name(name) => name.clone(),
        }
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Object(service) => f.debug_tuple("Object").field(service).finish(),
            Self::Pair(target, method) => f
                .debug_tuple("Pair")
                .field(&target.describe())
                .field(method)
                .finish(),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

impl From<&str> for Reference {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Reference {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Arc<dyn Service>> for Reference {
    fn from(service: Arc<dyn Service>) -> Self {
        Self::Object(service)
    }
}

impl From<serde_json::Value> for Reference {
    fn from(value: serde_json::Value) -> Self {
        Self::Value(value)
    }
}

impl From<Arc<dyn Service>> for PairTarget {
    fn from(service: Arc<dyn Service>) -> Self {
        Self::Object(service)
    }
}

impl From<&str> for PairTarget {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for PairTarget {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}
