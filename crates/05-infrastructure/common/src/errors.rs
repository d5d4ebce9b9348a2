//! 错误类型定义

use thiserror::Error;

/// 可调用对象解析错误
///
/// 三种基本情况 (`NotFound`/`NotCallable`/`NotResolvable`) 共用同一个错误类型，
/// 通过变体和消息区分。协作者的失败原样保留在 `source` 中。
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("可调用对象不存在: {identifier}")]
    NotFound { identifier: String },

    #[error("{value} 不可调用")]
    NotCallable { value: String },

    #[error("{value} 无法解析")]
    NotResolvable { value: String },

    #[error("容器查找失败: {key}, 原因: {source}")]
    LookupFailed {
        key: String,
        #[source]
        source: DependencyError,
    },

    #[error("类型实例化失败: {type_name}, 原因: {source}")]
    ConstructionFailed {
        type_name: String,
        #[source]
        source: DependencyError,
    },
}

impl ResolutionError {
    /// 创建标识符不存在错误
    pub fn not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            identifier: identifier.into(),
        }
    }

    /// 创建不可调用错误
    pub fn not_callable(value: impl Into<String>) -> Self {
        Self::NotCallable {
            value: value.into(),
        }
    }

    /// 创建无法解析错误
    pub fn not_resolvable(value: impl Into<String>) -> Self {
        Self::NotResolvable {
            value: value.into(),
        }
    }
}

/// 依赖查找与实例化错误
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("服务未注册: {key}")]
    ServiceNotRegistered { key: String },

    #[error("服务创建失败: {key}, 原因: {source}")]
    ServiceCreationFailed {
        key: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("构造器未注册: {type_name}")]
    ConstructorNotRegistered { type_name: String },
}

impl DependencyError {
    /// 包装任意错误为服务创建失败
    pub fn creation_failed(
        key: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ServiceCreationFailed {
            key: key.into(),
            source: source.into(),
        }
    }
}

/// 调用已解析对象时的错误
#[derive(Error, Debug)]
pub enum InvocationError {
    #[error("参数无效: 位置 {index}, 期望 {expected}")]
    InvalidArgument { index: usize, expected: String },

    #[error("方法不存在: {method}")]
    MethodNotFound { method: String },
}

impl InvocationError {
    /// 创建参数无效错误
    pub fn invalid_argument(index: usize, expected: impl Into<String>) -> Self {
        Self::InvalidArgument {
            index,
            expected: expected.into(),
        }
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 结果类型别名
pub type ResolutionResult<T> = Result<T, ResolutionError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type InvocationResult<T> = Result<T, InvocationError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
