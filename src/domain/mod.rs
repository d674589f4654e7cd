// ==========================================
// 构建分配引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod build;
pub mod inventory;
pub mod transfer;
pub mod types;

// 重导出核心类型
pub use build::{BuildRequest, InventoryFilter};
pub use inventory::{PartSample, Plate, PlateCollection, PlateSet};
pub use transfer::{Transfer, TransferPlan};
pub use types::{PlateType, SampleEvidence, SampleStatus, SortMethod};
