//! 可调用对象解析器

use crate::adapter::MiddlewareAdapter;
use crate::registry::ConstructorRegistry;
use callable_abstractions::{
    ClosureLike, LookupService, MiddlewareWrapper, PairTarget, Reference, ResolveCallable,
    ResolveOptions, ResolvedCallable, Service, TypeRegistry,
};
use once_cell::sync::Lazy;
use regex::Regex;
use resolver_common::{ResolutionError, ResolutionResult, ResolverConfig};
use std::sync::Arc;
use tracing::{debug, warn};

/// `identifier:method` 形式，方法名必须是合法标识符
static CALLABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^:]+):([a-zA-Z_\x{7f}-\x{10FFFF}][a-zA-Z0-9_\x{7f}-\x{10FFFF}]*)$")
        .expect("callable pattern is a valid regex")
});

/// 拆分 `identifier:method`，不匹配时返回 `None`
pub fn split_callable(text: &str) -> Option<(&str, &str)> {
    let captures = CALLABLE_PATTERN.captures(text)?;
    match (captures.get(1), captures.get(2)) {
        (Some(identifier), Some(method)) => Some((identifier.as_str(), method.as_str())),
        _ => None,
    }
}

/// 可调用对象解析器
///
/// 构造后无状态，每次解析都完整执行一遍算法，不缓存结果。
/// 递归深度至多为 2：字符串 -> 方法对，或字符串 -> 能力分类，两者都不会再回到 `resolve`。
pub struct CallableResolver {
    container: Option<Arc<dyn LookupService>>,
    types: Arc<dyn TypeRegistry>,
    adapter: Arc<dyn MiddlewareWrapper>,
    config: ResolverConfig,
}

impl CallableResolver {
    /// 使用可选容器创建解析器，类型表为空
    pub fn new(container: Option<Arc<dyn LookupService>>) -> Self {
        Self::builder().with_optional_container(container).build()
    }

    /// 创建解析器构建器
    pub fn builder() -> CallableResolverBuilder {
        CallableResolverBuilder::new()
    }

    /// 按能力标记分类对象
    fn classify(
        &self,
        service: Arc<dyn Service>,
        options: &ResolveOptions,
    ) -> ResolutionResult<ResolvedCallable> {
        if options.resolve_middleware {
            if let Some(middleware) = service.clone().as_middleware() {
                debug!("解析为中间件: {}", service.service_name());
                return Ok(ResolvedCallable::Adapter(self.adapter.wrap(middleware)));
            }
        }

        if let Some(handler) = service.clone().as_request_handler() {
            debug!("解析为请求处理器: {}", service.service_name());
            return Ok(ResolvedCallable::Handler {
                instance: service,
                handler,
            });
        }

        if let Some(closure) = service.clone().as_closure() {
            debug!("解析为闭包: {}", service.service_name());
            return Ok(ResolvedCallable::Closure(self.bind_closure(closure)));
        }

        if let Some(callable) = service.clone().as_invocable() {
            debug!("解析为可调用值: {}", service.service_name());
            return Ok(ResolvedCallable::Callable(callable));
        }

        Err(ResolutionError::not_callable(service.service_name()))
    }

    /// 没有容器时保留闭包原有的绑定
    fn bind_closure(&self, closure: Arc<dyn ClosureLike>) -> Arc<dyn ClosureLike> {
        match &self.container {
            Some(container) if self.config.bind_closures => closure.bind_to(container.clone()),
            _ => closure,
        }
    }

    fn resolve_text(
        &self,
        text: &str,
        options: &ResolveOptions,
    ) -> ResolutionResult<ResolvedCallable> {
        if let Some((identifier, method)) = split_callable(text) {
            debug!("解析 identifier:method 形式: {} -> {}", identifier, method);
            let instance = self.lookup(identifier)?;
            return self.resolve_method(instance, method);
        }

        let instance = self.lookup(text)?;
        self.classify(instance, options)
    }

    fn resolve_pair(&self, target: PairTarget, method: &str) -> ResolutionResult<ResolvedCallable> {
        let instance = match target {
            PairTarget::Object(service) => service,
            PairTarget::Name(name) => self.lookup(&name)?,
        };
        self.resolve_method(instance, method)
    }

    /// 显式方法名优先于能力分类
    fn resolve_method(
        &self,
        instance: Arc<dyn Service>,
        method: &str,
    ) -> ResolutionResult<ResolvedCallable> {
        if !instance.has_method(method) {
            return Err(ResolutionError::not_callable(format!(
                "[{}, {}]",
                instance.service_name(),
                method
            )));
        }

        Ok(ResolvedCallable::Method {
            instance,
            method: method.to_string(),
        })
    }

    /// 先查容器，再尝试直接实例化
    fn lookup(&self, identifier: &str) -> ResolutionResult<Arc<dyn Service>> {
        if let Some(container) = &self.container {
            if container.has(identifier) {
                debug!("从容器获取: {}", identifier);
                return container
                    .get(identifier)
                    .map_err(|source| ResolutionError::LookupFailed {
                        key: identifier.to_string(),
                        source,
                    });
            }
        }

        if self.types.is_constructible(identifier) {
            debug!("直接实例化: {}", identifier);
            return self
                .types
                .construct(identifier, self.container.clone())
                .map_err(|source| ResolutionError::ConstructionFailed {
                    type_name: identifier.to_string(),
                    source,
                });
        }

        Err(ResolutionError::not_found(identifier))
    }
}

impl ResolveCallable for CallableResolver {
    fn resolve(&self, reference: Reference) -> ResolutionResult<ResolvedCallable> {
        let options = ResolveOptions::from(&self.config);
        self.resolve_with_options(reference, &options)
    }

    fn resolve_with_options(
        &self,
        reference: Reference,
        options: &ResolveOptions,
    ) -> ResolutionResult<ResolvedCallable> {
        let description = reference.describe();
        debug!("解析可调用对象: {}", description);

        let result = match reference {
            Reference::Object(service) => self.classify(service, options),
            Reference::Text(text) => self.resolve_text(&text, options),
            Reference::Pair(target, method) => self.resolve_pair(target, &method),
            Reference::Value(value) => Err(ResolutionError::not_resolvable(value.to_string())),
        };

        match &result {
            Ok(resolved) => debug!("解析完成: {} -> {}", description, resolved.describe()),
            Err(e) => warn!("解析失败: {}", e),
        }
        result
    }
}

impl std::fmt::Debug for CallableResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallableResolver")
            .field("has_container", &self.container.is_some())
            .field("config", &self.config)
            .finish()
    }
}

/// 解析器构建器
pub struct CallableResolverBuilder {
    container: Option<Arc<dyn LookupService>>,
    types: Arc<dyn TypeRegistry>,
    adapter: Arc<dyn MiddlewareWrapper>,
    config: ResolverConfig,
}

impl CallableResolverBuilder {
    /// 创建构建器：无容器、空类型表、默认中间件适配器、默认配置
    pub fn new() -> Self {
        Self {
            container: None,
            types: Arc::new(ConstructorRegistry::new()),
            adapter: Arc::new(MiddlewareAdapter),
            config: ResolverConfig::default(),
        }
    }

    /// 设置查找服务
    pub fn with_container(mut self, container: Arc<dyn LookupService>) -> Self {
        self.container = Some(container);
        self
    }

    /// 设置可选的查找服务，`None` 表示不使用容器
    pub fn with_optional_container(mut self, container: Option<Arc<dyn LookupService>>) -> Self {
        self.container = container;
        self
    }

    /// 设置可构造类型表
    pub fn with_types(mut self, types: Arc<dyn TypeRegistry>) -> Self {
        self.types = types;
        self
    }

    /// 替换中间件适配器
    pub fn with_adapter(mut self, adapter: Arc<dyn MiddlewareWrapper>) -> Self {
        self.adapter = adapter;
        self
    }

    /// 设置解析器配置
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// 构建解析器
    pub fn build(self) -> CallableResolver {
        CallableResolver {
            container: self.container,
            types: self.types,
            adapter: self.adapter,
            config: self.config,
        }
    }
}

impl Default for CallableResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}
