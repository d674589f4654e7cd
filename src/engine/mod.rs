// ==========================================
// 构建分配引擎 - 引擎层
// ==========================================
// 职责: 库存索引、候选枚举、覆盖过滤、多准则选择、转移方案生成
// 红线: Engine 不拼 SQL，库存只通过 InventoryQuery 读取
// ==========================================

pub mod allocator;
pub mod candidate;
pub mod coverage;
pub mod error;
pub mod inventory_index;
pub mod inventory_source;
pub mod selector;
pub mod transfer_plan;

// 重导出核心引擎
pub use allocator::{AllocationOutcome, BuildAllocator, DEFAULT_WARN_PLATE_COUNT};
pub use candidate::{CandidateEnumerator, PlateWindow};
pub use coverage::CoverageFilter;
pub use error::{AllocationError, AllocationResult};
pub use inventory_index::InventoryIndex;
pub use inventory_source::{InventoryQuery, SnapshotInventory, SnapshotRecord};
pub use selector::{MultiCriteriaSelector, SelectionStep};
pub use transfer_plan::TransferPlanBuilder;
