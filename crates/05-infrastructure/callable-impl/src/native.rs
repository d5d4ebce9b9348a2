//! 原生函数包装

use callable_abstractions::{Invocable, Payload, Reference, Service};
use resolver_common::InvocationResult;
use std::fmt;
use std::sync::Arc;

type NativeFn = Arc<dyn Fn(Vec<Payload>) -> InvocationResult<Payload> + Send + Sync>;

/// 把普通函数包装为可调用值，同时可以注册到容器中
#[derive(Clone)]
pub struct NativeCallable {
    name: String,
    body: NativeFn,
}

impl NativeCallable {
    /// 以名称和函数体创建，名称用于日志和错误信息
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(Vec<Payload>) -> InvocationResult<Payload> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            body: Arc::new(body),
        }
    }
}

impl fmt::Debug for NativeCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeCallable")
            .field("name", &self.name)
            .finish()
    }
}

impl Invocable for NativeCallable {
    fn invoke(&self, args: Vec<Payload>) -> InvocationResult<Payload> {
        (self.body)(args)
    }
}

impl From<NativeCallable> for Reference {
    fn from(callable: NativeCallable) -> Self {
        Self::Object(Arc::new(callable))
    }
}

impl Service for NativeCallable {
    fn service_name(&self) -> &str {
        &self.name
    }

    fn as_invocable(self: Arc<Self>) -> Option<Arc<dyn Invocable>> {
        Some(self)
    }
}
