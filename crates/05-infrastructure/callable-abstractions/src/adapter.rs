//! 中间件适配器接口

use crate::capability::{Invocable, Middleware};
use std::sync::Arc;

/// 把中间件包装成路由层可直接调用的形式
pub trait MiddlewareWrapper: Send + Sync {
    /// 包装中间件
    fn wrap(&self, middleware: Arc<dyn Middleware>) -> Arc<dyn Invocable>;
}
