//! 能力标记
//!
//! 一个对象可以同时具备多个能力，解析器按固定顺序检查：
//! `Middleware` > `RequestHandler` > `ClosureLike` > `Invocable`。

use crate::lookup::LookupService;
use resolver_common::{InvocationError, InvocationResult};
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// 调用参数和返回值
///
/// 请求、响应对象由路由层定义，这里只按不透明值传递。
pub type Payload = Arc<dyn Any + Send + Sync>;

/// 可直接调用的值
pub trait Invocable: Send + Sync {
    /// 调用
    fn invoke(&self, args: Vec<Payload>) -> InvocationResult<Payload>;
}

/// 请求处理器，按 `(instance, "handle")` 的形式分发
pub trait RequestHandler: Send + Sync {
    /// 处理请求
    fn handle(&self, request: Payload) -> InvocationResult<Payload>;
}

/// 中间件
pub trait Middleware: Send + Sync {
    /// 处理请求，`next` 为后续处理器
    fn process(&self, request: Payload, next: &dyn RequestHandler) -> InvocationResult<Payload>;
}

/// 支持延迟绑定执行上下文的闭包
pub trait ClosureLike: Invocable {
    /// 返回绑定到 `context` 的新闭包，原闭包不变
    fn bind_to(&self, context: Arc<dyn LookupService>) -> Arc<dyn ClosureLike>;

    /// 当前绑定的上下文
    fn bound_context(&self) -> Option<Arc<dyn LookupService>>;
}

/// 向 [`Any`] 转换，用于调用方还原具体类型
pub trait AsAny: Any + Send + Sync {
    /// 以 `&dyn Any` 访问自身
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 容器中的对象
///
/// 每个 `as_*` 方法对应一个能力标记，具备该能力时返回 `Some`。
/// 默认实现均为 `None`，即一个不可调用的普通对象。
pub trait Service: AsAny + Debug {
    /// 对象名称，用于日志和错误信息
    fn service_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// 中间件能力
    fn as_middleware(self: Arc<Self>) -> Option<Arc<dyn Middleware>> {
        None
    }

    /// 请求处理器能力
    fn as_request_handler(self: Arc<Self>) -> Option<Arc<dyn RequestHandler>> {
        None
    }

    /// 闭包能力
    fn as_closure(self: Arc<Self>) -> Option<Arc<dyn ClosureLike>> {
        None
    }

    /// 可直接调用能力
    fn as_invocable(self: Arc<Self>) -> Option<Arc<dyn Invocable>> {
        None
    }

    /// 是否暴露名为 `method` 的可调用方法
    fn has_method(&self, _method: &str) -> bool {
        false
    }

    /// 调用名为 `method` 的方法
    fn call_method(&self, method: &str, _args: Vec<Payload>) -> InvocationResult<Payload> {
        Err(InvocationError::MethodNotFound {
            method: method.to_string(),
        })
    }
}

impl dyn Service {
    /// 还原为具体类型
    pub fn downcast_ref<T: Service>(&self) -> Option<&T> {
        <dyn Service as AsAny>::as_any(self).downcast_ref::<T>()
    }
}
