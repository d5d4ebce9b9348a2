//! 解析器配置

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error};

/// 默认配置文件（不含扩展名，格式由 config crate 自动识别）
pub const DEFAULT_CONFIG_FILE: &str = "config/resolver";

/// 环境变量前缀，例如 `CALLABLE_RESOLVER_RESOLVE_MIDDLEWARE=false`
pub const ENV_PREFIX: &str = "CALLABLE_RESOLVER";

/// 解析器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// 是否把中间件包装为适配器，作为每次解析的默认值
    pub resolve_middleware: bool,
    /// 是否把闭包重新绑定到查找服务
    pub bind_closures: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            resolve_middleware: true,
            bind_closures: true,
        }
    }
}

impl ResolverConfig {
    /// 从默认配置文件和环境变量加载配置
    ///
    /// 配置文件可以不存在，缺失的字段使用默认值。
    pub fn load() -> ConfigResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| {
                error!("解析器配置构建失败: {}", e);
                ConfigError::ParseError {
                    source: Box::new(e),
                }
            })?;

        Self::bind(settings)
    }

    /// 从指定配置文件加载配置
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .map_err(|e| {
                error!("解析器配置文件读取失败: path={}, error={}", path.display(), e);
                ConfigError::ParseError {
                    source: Box::new(e),
                }
            })?;

        Self::bind(settings)
    }

    fn bind(settings: config::Config) -> ConfigResult<Self> {
        let config: Self = settings.try_deserialize().map_err(|e| {
            error!("解析器配置绑定失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

        debug!("解析器配置加载成功: {:?}", config);
        Ok(config)
    }
}
