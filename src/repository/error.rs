// ==========================================
// 构建分配引擎 - 仓储层错误类型
// ==========================================
// 范围: 只读库存查询可能出现的失败（连接 / 锁 / 查询）
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    /// 语句准备、参数绑定或行解码失败
    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => RepositoryError::DatabaseQueryError(msg),
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
