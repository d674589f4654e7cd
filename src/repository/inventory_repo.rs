// ==========================================
// 构建分配引擎 - 库存样品仓储
// ==========================================
// 红线: Repository 不含业务逻辑, 只读库存
// ==========================================
// 职责: 查询请求零件在“已入库”板上的可用样品
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

mod query;

#[cfg(test)]
mod tests;

use crate::db::open_sqlite_connection;
use crate::domain::build::InventoryFilter;
use crate::domain::inventory::PartSample;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params_from_iter, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

use query::build_part_sample_query;

// ==========================================
// InventoryRepository - 库存样品仓储
// ==========================================
pub struct InventoryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl InventoryRepository {
    /// 创建新的 InventoryRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询零件的可用样品
    ///
    /// # 参数
    /// - `part_ids`: 请求的零件 uuid（已去重）
    /// - `filter`: 样品状态 / 证据 / 板类型 过滤条件
    ///
    /// # 返回
    /// - Ok(Vec<PartSample>): 已入库板上满足条件的样品，按 板 -> 孔位 -> 零件 排序
    /// - Err: 数据库错误
    ///
    /// 不满足条件的零件不会出现在结果中（不视为错误）。
    pub fn find_part_samples(
        &self,
        part_ids: &[String],
        filter: &InventoryFilter,
    ) -> RepositoryResult<Vec<PartSample>> {
        if part_ids.is_empty() {
            return Ok(Vec::new());
        }

        let (sql, params) = build_part_sample_query(part_ids, filter);
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;

        let samples = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(PartSample {
                    part_id: row.get(0)?,
                    plate_id: row.get(1)?,
                    well_address: row.get(2)?,
                    volume: row.get(3)?,
                    quantity: row.get(4)?,
                    thaw_weight: row.get(5)?,
                    container_id: row.get(6)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        tracing::debug!(
            requested_parts = part_ids.len(),
            rows = samples.len(),
            "库存样品查询完成"
        );

        Ok(samples)
    }
}
