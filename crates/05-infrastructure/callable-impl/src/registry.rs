//! 可构造类型表

use callable_abstractions::{Constructible, LookupService, Service, TypeRegistry};
use resolver_common::{DependencyError, DependencyResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// 构造函数类型，唯一参数为查找服务（可能为空）
pub type ConstructorFn = Arc<
    dyn Fn(Option<Arc<dyn LookupService>>) -> DependencyResult<Arc<dyn Service>> + Send + Sync,
>;

/// 按类型名注册构造函数的类型表
#[derive(Default, Clone)]
pub struct ConstructorRegistry {
    constructors: HashMap<String, ConstructorFn>,
}

impl ConstructorRegistry {
    /// 创建空的类型表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册构造函数
    pub fn register<S, F>(&mut self, type_name: impl Into<String>, constructor: F) -> &mut Self
    where
        S: Service,
        F: Fn(Option<Arc<dyn LookupService>>) -> DependencyResult<S> + Send + Sync + 'static,
    {
        let type_name = type_name.into();
        info!("注册可构造类型: {}", type_name);

        let constructor: ConstructorFn = Arc::new(move |container| {
            constructor(container).map(|service| Arc::new(service) as Arc<dyn Service>)
        });
        self.constructors.insert(type_name, constructor);
        self
    }

    /// 以 [`Constructible::TYPE_NAME`] 注册类型
    pub fn register_default<T: Constructible>(&mut self) -> &mut Self {
        self.register(T::TYPE_NAME, T::construct)
    }

    /// 已注册的类型名（按字母顺序）
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for ConstructorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}

impl TypeRegistry for ConstructorRegistry {
    fn is_constructible(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    fn construct(
        &self,
        type_name: &str,
        container: Option<Arc<dyn LookupService>>,
    ) -> DependencyResult<Arc<dyn Service>> {
        let constructor = self.constructors.get(type_name).ok_or_else(|| {
            DependencyError::ConstructorNotRegistered {
                type_name: type_name.to_string(),
            }
        })?;

        debug!(
            "实例化类型: {} (容器: {})",
            type_name,
            if container.is_some() { "有" } else { "无" }
        );
        constructor(container)
    }
}
