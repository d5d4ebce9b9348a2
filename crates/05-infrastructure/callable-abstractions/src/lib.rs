//! # Callable Abstractions
//!
//! 可调用对象解析的抽象层，定义能力标记和解析器依赖的协作接口。
//!
//! ## 核心接口
//!
//! - [`Service`] - 容器中的对象，通过 `as_*` 暴露能力标记
//! - [`Middleware`] / [`RequestHandler`] / [`ClosureLike`] / [`Invocable`] - 能力标记
//! - [`LookupService`] - 容器查找接口（`has` / `get`）
//! - [`TypeRegistry`] - 可构造类型表
//! - [`MiddlewareWrapper`] - 中间件适配器
//! - [`ResolveCallable`] - 解析器接口

pub mod adapter;
pub mod capability;
pub mod lookup;
pub mod reference;
pub mod resolved;
pub mod resolver;

pub use adapter::*;
pub use capability::*;
pub use lookup::*;
pub use reference::*;
pub use resolved::*;
pub use resolver::*;
