//! # 可调用对象解析实现
//!
//! 提供解析器以及它所需的具体协作者：内存容器、构造器表、默认中间件适配器、
//! 可重新绑定的闭包和原生函数包装。

pub mod adapter;
pub mod closure;
pub mod container;
pub mod native;
pub mod registry;
pub mod resolver;

pub use adapter::*;
pub use closure::*;
pub use container::*;
pub use native::*;
pub use registry::*;
pub use resolver::*;
