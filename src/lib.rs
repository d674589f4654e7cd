// ==========================================
// 构建分配引擎 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 在现有样品库存中为一次构建选择板集合并生成转移方案
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 分配流程
pub mod engine;

// 配置层 - 分配默认值
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/schema）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 构建接口
pub mod api;

// 应用层 - 共享状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{PlateType, SampleEvidence, SampleStatus, SortMethod};

// 领域实体
pub use domain::{
    BuildRequest, InventoryFilter, PartSample, Plate, PlateCollection, PlateSet, Transfer,
    TransferPlan,
};

// 引擎
pub use engine::{
    AllocationError, AllocationOutcome, BuildAllocator, InventoryQuery, SnapshotInventory,
};

// API
pub use api::{ApiError, BuildApi, BuildRequestBody, BuildResponseBody};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "构建分配引擎";
