//! 解析器抽象接口

use crate::reference::Reference;
use crate::resolved::ResolvedCallable;
use resolver_common::{ResolutionResult, ResolverConfig};

/// 解析器 trait
///
/// 把任意引用解析为路由层可以分发的可调用对象。解析器自身不调用结果。
pub trait ResolveCallable: Send + Sync {
    /// 使用解析器的默认选项解析
    fn resolve(&self, reference: Reference) -> ResolutionResult<ResolvedCallable>;

    /// 使用指定选项解析
    fn resolve_with_options(
        &self,
        reference: Reference,
        options: &ResolveOptions,
    ) -> ResolutionResult<ResolvedCallable>;
}

/// 单次解析的选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// 是否把中间件包装为适配器；为 `false` 时中间件按其他能力继续判断
    pub resolve_middleware: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            resolve_middleware: true,
        }
    }
}

impl From<&ResolverConfig> for ResolveOptions {
    fn from(config: &ResolverConfig) -> Self {
        Self {
            resolve_middleware: config.resolve_middleware,
        }
    }
}
