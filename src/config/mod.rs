// ==========================================
// 构建分配引擎 - 配置层
// ==========================================
// 职责: 分配默认值管理
// 存储: config_kv 表
// ==========================================

pub mod allocation_config_trait;
pub mod config_manager;

// 重导出核心配置管理器
pub use allocation_config_trait::{AllocationConfigReader, AllocationDefaults};
pub use config_manager::{config_keys, ConfigManager};
