//! 服务生命周期

/// 容器中工厂注册的生命周期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// 单例模式 - 首次获取时创建，之后复用同一个实例
    Singleton,
    /// 瞬时模式 - 每次获取都创建新实例
    Transient,
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::Transient
    }
}
