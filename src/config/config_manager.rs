// ==========================================
// 构建分配引擎 - 配置管理器
// ==========================================
// 职责: 分配默认值的加载、查询、覆写
// 存储: config_kv 表 (scope_id = 'global')
// 格式: 列表配置以逗号分隔，"null" 表示匹配字段为空的记录
// ==========================================

use crate::config::allocation_config_trait::AllocationConfigReader;
use crate::db::open_sqlite_connection;
use crate::domain::build::{BuildRequest, InventoryFilter};
use crate::domain::types::{PlateType, SampleEvidence, SampleStatus, SortMethod};
use crate::engine::DEFAULT_WARN_PLATE_COUNT;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::error::Error;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at)
             VALUES ('global', ?1, ?2, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 读取过滤列表配置；空值或含非法项时告警并回退默认值
    fn get_filter_list<T: FromStr>(
        &self,
        key: &str,
        default: Vec<Option<T>>,
    ) -> Result<Vec<Option<T>>, Box<dyn Error>> {
        let Some(raw) = self.get_config_value(key)? else {
            return Ok(default);
        };

        match parse_nullable_list::<T>(&raw) {
            Some(values) if !values.is_empty() => Ok(values),
            _ => {
                tracing::warn!(config_key = key, raw_value = %raw, "过滤条件配置格式错误，使用默认值");
                Ok(default)
            }
        }
    }
}

/// 解析逗号分隔列表，"null" 解析为 None；任一项非法返回 None
fn parse_nullable_list<T: FromStr>(raw: &str) -> Option<Vec<Option<T>>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.eq_ignore_ascii_case("null") {
                Some(None)
            } else {
                s.parse::<T>().ok().map(Some)
            }
        })
        .collect()
}

// ==========================================
// AllocationConfigReader Trait 实现
// ==========================================
#[async_trait]
impl AllocationConfigReader for ConfigManager {
    async fn get_default_sample_status(&self) -> Result<Vec<Option<SampleStatus>>, Box<dyn Error>> {
        self.get_filter_list(
            config_keys::DEFAULT_SAMPLE_STATUS,
            InventoryFilter::default_sample_status(),
        )
    }

    async fn get_default_sample_evidence(
        &self,
    ) -> Result<Vec<Option<SampleEvidence>>, Box<dyn Error>> {
        self.get_filter_list(
            config_keys::DEFAULT_SAMPLE_EVIDENCE,
            InventoryFilter::default_sample_evidence(),
        )
    }

    async fn get_default_plate_type(&self) -> Result<Vec<Option<PlateType>>, Box<dyn Error>> {
        self.get_filter_list(
            config_keys::DEFAULT_PLATE_TYPE,
            InventoryFilter::default_plate_type(),
        )
    }

    async fn get_default_sort_methods(&self) -> Result<Vec<SortMethod>, Box<dyn Error>> {
        let value = self.get_config_or_default(
            config_keys::DEFAULT_SORT_METHODS,
            "fewest_plates,fewest_retrieval",
        )?;

        // 空值表示不收窄（取第一个可行方案）
        let parsed: Result<Vec<SortMethod>, String> = value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(SortMethod::from_str)
            .collect();

        match parsed {
            Ok(methods) => Ok(methods),
            Err(e) => {
                tracing::warn!(
                    config_key = config_keys::DEFAULT_SORT_METHODS,
                    raw_value = %value,
                    error = %e,
                    "排序方式配置格式错误，使用默认值"
                );
                Ok(BuildRequest::default_sort_methods())
            }
        }
    }

    async fn get_candidate_warn_plate_count(&self) -> Result<usize, Box<dyn Error>> {
        let value = self.get_config_or_default(
            config_keys::CANDIDATE_WARN_PLATE_COUNT,
            &DEFAULT_WARN_PLATE_COUNT.to_string(),
        )?;
        match value.trim().parse::<usize>() {
            Ok(count) => Ok(count),
            Err(e) => {
                tracing::warn!(
                    config_key = config_keys::CANDIDATE_WARN_PLATE_COUNT,
                    raw_value = %value,
                    error = %e,
                    "候选板数告警阈值配置格式错误，使用默认值"
                );
                Ok(DEFAULT_WARN_PLATE_COUNT)
            }
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 库存过滤默认值
    pub const DEFAULT_SAMPLE_STATUS: &str = "default_sample_status";
    pub const DEFAULT_SAMPLE_EVIDENCE: &str = "default_sample_evidence";
    pub const DEFAULT_PLATE_TYPE: &str = "default_plate_type";

    // 选择
    pub const DEFAULT_SORT_METHODS: &str = "default_sort_methods";
    pub const CANDIDATE_WARN_PLATE_COUNT: &str = "candidate_warn_plate_count";
}
