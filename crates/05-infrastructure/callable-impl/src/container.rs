//! 内存查找服务

use callable_abstractions::{LookupService, Service};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use resolver_common::{DependencyError, DependencyResult, Lifetime};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 服务工厂函数类型
pub type ServiceFactoryFn = Arc<dyn Fn() -> DependencyResult<Arc<dyn Service>> + Send + Sync>;

/// 服务注册信息
enum ServiceRegistration {
    /// 已创建的共享实例
    Instance(Arc<dyn Service>),
    /// 工厂，单例时缓存首次创建的实例
    Factory {
        factory: ServiceFactoryFn,
        lifetime: Lifetime,
        singleton: OnceCell<Arc<dyn Service>>,
    },
}

impl ServiceRegistration {
    fn get(&self, key: &str) -> DependencyResult<Arc<dyn Service>> {
        match self {
            Self::Instance(instance) => Ok(instance.clone()),
            Self::Factory {
                factory,
                lifetime: Lifetime::Singleton,
                singleton,
            } => singleton
                .get_or_try_init(|| {
                    debug!("创建单例服务: {}", key);
                    factory()
                })
                .cloned(),
            Self::Factory { factory, .. } => {
                debug!("创建瞬时服务: {}", key);
                factory()
            }
        }
    }
}

/// 以字符串为键的内存容器
///
/// 注册与查找都只需要 `&self`，可以放在 `Arc<dyn LookupService>` 后共享。
#[derive(Default)]
pub struct ServiceContainer {
    registrations: RwLock<HashMap<String, Arc<ServiceRegistration>>>,
}

impl ServiceContainer {
    /// 创建新的容器
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册实例
    pub fn register_instance<S>(&self, key: impl Into<String>, instance: S)
    where
        S: Service,
    {
        self.register_shared(key, Arc::new(instance));
    }

    /// 注册已共享的实例
    pub fn register_shared(&self, key: impl Into<String>, instance: Arc<dyn Service>) {
        let key = key.into();
        info!("注册服务实例: {} ({})", key, instance.service_name());
        self.insert(key, ServiceRegistration::Instance(instance));
    }

    /// 注册工厂
    pub fn register_factory<S, F>(&self, key: impl Into<String>, factory: F, lifetime: Lifetime)
    where
        S: Service,
        F: Fn() -> DependencyResult<S> + Send + Sync + 'static,
    {
        let key = key.into();
        info!("注册服务工厂: {} ({:?})", key, lifetime);

        let factory: ServiceFactoryFn =
            Arc::new(move || factory().map(|service| Arc::new(service) as Arc<dyn Service>));
        self.insert(
            key,
            ServiceRegistration::Factory {
                factory,
                lifetime,
                singleton: OnceCell::new(),
            },
        );
    }

    /// 移除注册，返回是否存在
    pub fn remove(&self, key: &str) -> bool {
        self.registrations.write().remove(key).is_some()
    }

    /// 清空容器
    pub fn clear(&self) {
        self.registrations.write().clear();
        info!("容器已清空");
    }

    /// 所有已注册的键（按字母顺序）
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.registrations.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// 已注册的数量
    pub fn len(&self) -> usize {
        self.registrations.read().len()
    }

    /// 是否没有任何注册
    pub fn is_empty(&self) -> bool {
        self.registrations.read().is_empty()
    }

    fn insert(&self, key: String, registration: ServiceRegistration) {
        let previous = self
            .registrations
            .write()
            .insert(key.clone(), Arc::new(registration));
        if previous.is_some() {
            warn!("覆盖已存在的服务注册: {}", key);
        }
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("keys", &self.keys())
            .finish()
    }
}

impl LookupService for ServiceContainer {
    fn has(&self, key: &str) -> bool {
        self.registrations.read().contains_key(key)
    }

    fn get(&self, key: &str) -> DependencyResult<Arc<dyn Service>> {
        // 工厂在锁外执行，工厂内部可以再次访问容器
        let registration = self.registrations.read().get(key).cloned();
        match registration {
            Some(registration) => registration.get(key),
            None => Err(DependencyError::ServiceNotRegistered {
                key: key.to_string(),
            }),
        }
    }
}
