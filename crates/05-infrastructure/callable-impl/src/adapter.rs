//! 默认中间件适配器
//!
//! 路由层按 `invoke([request, next])` 调用中间件，其中 `next` 是包装在
//! [`Payload`] 中的 `Arc<dyn Invocable>`。适配器把 `next` 转成
//! [`RequestHandler`] 后交给 [`Middleware::process`]。

use callable_abstractions::{Invocable, Middleware, MiddlewareWrapper, Payload, RequestHandler};
use resolver_common::{InvocationError, InvocationResult};
use std::sync::Arc;

/// 把后续处理器包装为 `next` 参数
pub fn next_payload(next: Arc<dyn Invocable>) -> Payload {
    Arc::new(next)
}

/// 默认适配器
#[derive(Debug, Default, Clone, Copy)]
pub struct MiddlewareAdapter;

impl MiddlewareWrapper for MiddlewareAdapter {
    fn wrap(&self, middleware: Arc<dyn Middleware>) -> Arc<dyn Invocable> {
        Arc::new(AdaptedMiddleware { middleware })
    }
}

/// 包装后的中间件
pub struct AdaptedMiddleware {
    middleware: Arc<dyn Middleware>,
}

impl Invocable for AdaptedMiddleware {
    fn invoke(&self, args: Vec<Payload>) -> InvocationResult<Payload> {
        let mut args = args.into_iter();
        let request = args
            .next()
            .ok_or_else(|| InvocationError::invalid_argument(0, "request"))?;
        let next = args
            .next()
            .and_then(|next| next.downcast_ref::<Arc<dyn Invocable>>().cloned())
            .ok_or_else(|| InvocationError::invalid_argument(1, "Arc<dyn Invocable>"))?;

        self.middleware.process(request, &NextHandler(next))
    }
}

struct NextHandler(Arc<dyn Invocable>);

impl RequestHandler for NextHandler {
    fn handle(&self, request: Payload) -> InvocationResult<Payload> {
        self.0.invoke(vec![request])
    }
}
