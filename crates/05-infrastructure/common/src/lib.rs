//! # Resolver Common
//!
//! 可调用对象解析器的公共类型。
//!
//! ## 核心内容
//!
//! - [`ResolutionError`] - 解析错误
//! - [`DependencyError`] - 容器与构造错误
//! - [`InvocationError`] - 调用已解析对象时的错误
//! - [`ResolverConfig`] - 解析器配置
//! - [`Lifetime`] - 容器注册的生命周期

pub mod configuration;
pub mod errors;
pub mod lifecycle;

pub use configuration::*;
pub use errors::*;
pub use lifecycle::*;
