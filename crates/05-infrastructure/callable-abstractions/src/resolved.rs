//! 解析结果

use crate::capability::{ClosureLike, Invocable, Payload, RequestHandler, Service};
use resolver_common::{InvocationError, InvocationResult};
use std::fmt;
use std::sync::Arc;

/// 请求处理器被分发时使用的方法名
pub const HANDLE_METHOD: &str = "handle";

/// 解析后的可调用对象
///
/// 每次成功解析恰好产生其中一种形式。
#[derive(Clone)]
pub enum ResolvedCallable {
    /// 中间件适配器
    Adapter(Arc<dyn Invocable>),
    /// `(instance, "handle")`
    Handler {
        instance: Arc<dyn Service>,
        handler: Arc<dyn RequestHandler>,
    },
    /// `(instance, method)`
    Method {
        instance: Arc<dyn Service>,
        method: String,
    },
    /// 闭包（可能已重新绑定上下文）
    Closure(Arc<dyn ClosureLike>),
    /// 原生可调用值
    Callable(Arc<dyn Invocable>),
}

impl ResolvedCallable {
    /// 对象/方法对中的对象
    pub fn instance(&self) -> Option<&Arc<dyn Service>> {
        match self {
            Self::Handler { instance, .. } | Self::Method { instance, .. } => Some(instance),
            _ => None,
        }
    }

    /// 对象/方法对中的方法名
    pub fn method_name(&self) -> Option<&str> {
        match self {
            Self::Handler { .. } => Some(HANDLE_METHOD),
            Self::Method { method, .. } => Some(method),
            _ => None,
        }
    }

    /// 供路由层调用
    ///
    /// 请求处理器取第一个参数作为请求。
    pub fn invoke(&self, args: Vec<Payload>) -> InvocationResult<Payload> {
        match self {
            Self::Adapter(callable) | Self::Callable(callable) => callable.invoke(args),
            Self::Closure(closure) => closure.invoke(args),
            Self::Handler { handler, .. } => {
                let request = args
                    .into_iter()
                    .next()
                    .ok_or_else(|| InvocationError::invalid_argument(0, "request"))?;
                handler.handle(request)
            }
            Self::Method { instance, method } => instance.call_method(method, args),
        }
    }

    /// 用于日志的简短描述
    pub fn describe(&self) -> String {
        match self {
            Self::Adapter(_) => "middleware adapter".to_string(),
            Self::Handler { instance, .. } => {
                format!("{}::{}", instance.service_name(), HANDLE_METHOD)
            }
            Self::Method { instance, method } => {
                format!("{}::{}", instance.service_name(), method)
            }
            Self::Closure(_) => "closure".to_string(),
            Self::Callable(_) => "callable".to_string(),
        }
    }
}

impl fmt::Debug for ResolvedCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResolvedCallable")
            .field(&self.describe())
            .finish()
    }
}
