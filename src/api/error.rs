// ==========================================
// 构建分配引擎 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换 Repository / 引擎错误为调用方可识别的错误
// 分类: 输入错误（客户端） / 无可行方案 / 方案不完整 / 数据访问 / 内部错误
// ==========================================

use crate::engine::error::AllocationError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    // ==========================================
    // 分配错误
    // ==========================================
    /// 当前库存与过滤条件下无覆盖方案
    #[error("无可行方案: 缺少零件 {missing_parts:?}")]
    NoFeasibleSolution { missing_parts: Vec<String> },

    /// 选中方案无法解析请求零件（内部不变量被破坏）
    #[error("转移方案不完整: part_id={part_id}")]
    IncompletePlan { part_id: String },

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("配置读取失败: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 是否为调用方输入问题（请求本身不合法）
    pub fn is_client_error(&self) -> bool {
        matches!(self, ApiError::InvalidInput(_) | ApiError::ValidationError(_))
    }

    /// 稳定的错误代码（供序列化给调用方）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::NoFeasibleSolution { .. } => "NO_FEASIBLE_SOLUTION",
            ApiError::IncompletePlan { .. } => "INCOMPLETE_PLAN",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::DatabaseConnectionError(_) => "DATABASE_CONNECTION_ERROR",
            ApiError::ConfigError(_) => "CONFIG_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
        }
    }
}

// ==========================================
// 从 AllocationError 转换
// ==========================================
impl From<AllocationError> for ApiError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::NoFeasibleSolution { missing_parts } => {
                ApiError::NoFeasibleSolution { missing_parts }
            }
            AllocationError::IncompletePlan { part_id } => ApiError::IncompletePlan { part_id },
            AllocationError::Inventory(repo_err) => repo_err.into(),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
