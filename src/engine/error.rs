// ==========================================
// 构建分配引擎 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 分配引擎错误类型
#[derive(Error, Debug)]
pub enum AllocationError {
    /// 没有任何连续窗口能覆盖全部请求零件
    #[error("无可行方案: 当前库存与过滤条件下缺少零件 {missing_parts:?}")]
    NoFeasibleSolution { missing_parts: Vec<String> },

    /// 选中方案声称覆盖但无法解析某个零件（内部不变量被破坏）
    #[error("转移方案不完整: 选中方案中找不到零件 {part_id}")]
    IncompletePlan { part_id: String },

    #[error("库存查询失败: {0}")]
    Inventory(#[from] RepositoryError),
}

/// Result 类型别名
pub type AllocationResult<T> = Result<T, AllocationError>;
