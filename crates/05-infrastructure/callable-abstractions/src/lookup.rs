//! 查找服务与可构造类型
//!
//! 解析器只依赖容器的 `has` / `get` 两个操作，容器内部如何创建对象不在此处定义。

use crate::capability::Service;
use resolver_common::DependencyResult;
use std::sync::Arc;

/// 容器查找接口
///
/// `has` 不得有副作用；解析器保证在 `get` 之前先调用 `has`。
pub trait LookupService: Send + Sync {
    /// 是否存在指定键
    fn has(&self, key: &str) -> bool;

    /// 获取指定键对应的对象
    fn get(&self, key: &str) -> DependencyResult<Arc<dyn Service>>;
}

/// 可构造类型表
///
/// 容器中没有的标识符，如果是已知类型名，则直接实例化。
/// 构造函数只接收一个参数：查找服务，或 `None`。
pub trait TypeRegistry: Send + Sync {
    /// 标识符是否为可构造类型
    fn is_constructible(&self, type_name: &str) -> bool;

    /// 构造实例
    fn construct(
        &self,
        type_name: &str,
        container: Option<Arc<dyn LookupService>>,
    ) -> DependencyResult<Arc<dyn Service>>;
}

/// 可由类型表直接实例化的类型
pub trait Constructible: Service + Sized {
    /// 注册到类型表时使用的名称
    const TYPE_NAME: &'static str;

    /// 以查找服务（可能为空）作为唯一参数构造实例
    fn construct(container: Option<Arc<dyn LookupService>>) -> DependencyResult<Self>;
}
