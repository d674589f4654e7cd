// ==========================================
// 构建分配引擎 - 库存查询接口
// ==========================================
// 职责: 引擎消费的只读库存查询契约
// 实现者:
// - InventoryRepository（SQLite 库存库，每次调用重新查询）
// - SnapshotInventory（调用方提供的冻结快照）
// ==========================================

use crate::domain::build::InventoryFilter;
use crate::domain::inventory::PartSample;
use crate::domain::types::{PlateType, SampleEvidence, SampleStatus};
use crate::repository::error::RepositoryResult;
use crate::repository::InventoryRepository;
use std::collections::HashSet;

// ==========================================
// InventoryQuery Trait
// ==========================================
pub trait InventoryQuery: Send + Sync {
    /// 查询零件在已入库板上满足过滤条件的样品
    ///
    /// 不满足条件的零件直接缺席，不视为错误。返回顺序即发现顺序。
    fn query(&self, part_ids: &[String], filter: &InventoryFilter) -> RepositoryResult<Vec<PartSample>>;
}

impl InventoryQuery for InventoryRepository {
    fn query(&self, part_ids: &[String], filter: &InventoryFilter) -> RepositoryResult<Vec<PartSample>> {
        self.find_part_samples(part_ids, filter)
    }
}

// ==========================================
// SnapshotInventory - 冻结库存快照
// ==========================================

/// 快照中的一条样品记录（含过滤所需属性）
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRecord {
    pub sample: PartSample,
    pub status: Option<SampleStatus>,
    pub evidence: Option<SampleEvidence>,
    pub plate_type: Option<PlateType>,
}

/// 调用方预先取得的库存快照
///
/// 只包含已入库的板；快照过期的风险由调用方承担。
#[derive(Debug, Clone, Default)]
pub struct SnapshotInventory {
    records: Vec<SnapshotRecord>,
}

impl SnapshotInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<SnapshotRecord>) -> Self {
        Self { records }
    }

    /// 追加一条满足默认过滤条件的样品（Confirmed / NGS / glycerol_stock）
    pub fn push(&mut self, sample: PartSample) {
        self.records.push(SnapshotRecord {
            sample,
            status: Some(SampleStatus::Confirmed),
            evidence: Some(SampleEvidence::Ngs),
            plate_type: Some(PlateType::GlycerolStock),
        });
    }

    pub fn push_record(&mut self, record: SnapshotRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl InventoryQuery for SnapshotInventory {
    fn query(&self, part_ids: &[String], filter: &InventoryFilter) -> RepositoryResult<Vec<PartSample>> {
        let wanted: HashSet<&str> = part_ids.iter().map(String::as_str).collect();
        Ok(self
            .records
            .iter()
            .filter(|r| wanted.contains(r.sample.part_id.as_str()))
            .filter(|r| filter.matches(r.status, r.evidence, r.plate_type))
            .map(|r| r.sample.clone())
            .collect())
    }
}
