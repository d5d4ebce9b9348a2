//! 可重新绑定上下文的闭包

use callable_abstractions::{ClosureLike, Invocable, LookupService, Payload, Reference, Service};
use resolver_common::InvocationResult;
use std::fmt;
use std::sync::Arc;

type ClosureFn = Arc<dyn Fn(&ClosureScope, Vec<Payload>) -> InvocationResult<Payload> + Send + Sync>;

/// 闭包执行时可见的上下文
#[derive(Clone, Default)]
pub struct ClosureScope {
    container: Option<Arc<dyn LookupService>>,
}

impl ClosureScope {
    /// 绑定的查找服务
    pub fn container(&self) -> Option<&Arc<dyn LookupService>> {
        self.container.as_ref()
    }
}

/// 闭包
///
/// `bind_to` 返回共享同一函数体、上下文不同的新闭包。
#[derive(Clone)]
pub struct Closure {
    body: ClosureFn,
    scope: ClosureScope,
}

impl Closure {
    /// 创建未绑定上下文的闭包
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&ClosureScope, Vec<Payload>) -> InvocationResult<Payload> + Send + Sync + 'static,
    {
        Self {
            body: Arc::new(body),
            scope: ClosureScope::default(),
        }
    }

    /// 创建已绑定到 `container` 的闭包
    pub fn bound<F>(container: Arc<dyn LookupService>, body: F) -> Self
    where
        F: Fn(&ClosureScope, Vec<Payload>) -> InvocationResult<Payload> + Send + Sync + 'static,
    {
        Self {
            body: Arc::new(body),
            scope: ClosureScope {
                container: Some(container),
            },
        }
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("bound", &self.scope.container.is_some())
            .finish()
    }
}

impl Invocable for Closure {
    fn invoke(&self, args: Vec<Payload>) -> InvocationResult<Payload> {
        (self.body)(&self.scope, args)
    }
}

impl ClosureLike for Closure {
    fn bind_to(&self, context: Arc<dyn LookupService>) -> Arc<dyn ClosureLike> {
        Arc::new(Self {
            body: self.body.clone(),
            scope: ClosureScope {
                container: Some(context),
            },
        })
    }

    fn bound_context(&self) -> Option<Arc<dyn LookupService>> {
        self.scope.container.clone()
    }
}

impl From<Closure> for Reference {
    fn from(closure: Closure) -> Self {
        Self::Object(Arc::new(closure))
    }
}

impl Service for Closure {
    fn service_name(&self) -> &str {
        "Closure"
    }

    fn as_closure(self: Arc<Self>) -> Option<Arc<dyn ClosureLike>> {
        Some(self)
    }

    fn as_invocable(self: Arc<Self>) -> Option<Arc<dyn Invocable>> {
        Some(self)
    }
}
