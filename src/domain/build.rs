// ==========================================
// 构建分配引擎 - 构建请求
// ==========================================
// 职责: 转移分组 + 库存过滤条件 + 排序方式
// 说明: 请求进入引擎前已通过 api::validator 校验
// ==========================================

use crate::domain::types::{PlateType, SampleEvidence, SampleStatus, SortMethod};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// InventoryFilter - 库存过滤条件
// ==========================================
/// 库存过滤条件
///
/// 每个列表按 `IN (...)` 匹配；列表中的 `None` 额外匹配该字段为空的样品/板。
/// 空列表不匹配任何样品。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryFilter {
    pub sample_status: Vec<Option<SampleStatus>>,
    pub sample_evidence: Vec<Option<SampleEvidence>>,
    pub plate_type: Vec<Option<PlateType>>,
}

impl InventoryFilter {
    pub fn default_sample_status() -> Vec<Option<SampleStatus>> {
        vec![Some(SampleStatus::Confirmed)]
    }

    pub fn default_sample_evidence() -> Vec<Option<SampleEvidence>> {
        vec![Some(SampleEvidence::Ngs), Some(SampleEvidence::TwistConfirmed)]
    }

    pub fn default_plate_type() -> Vec<Option<PlateType>> {
        vec![Some(PlateType::GlycerolStock)]
    }

    /// 判断单个样品属性是否满足过滤条件（内存快照使用，与 SQL 语义一致）
    pub fn matches(
        &self,
        status: Option<SampleStatus>,
        evidence: Option<SampleEvidence>,
        plate_type: Option<PlateType>,
    ) -> bool {
        self.sample_status.contains(&status)
            && self.sample_evidence.contains(&evidence)
            && self.plate_type.contains(&plate_type)
    }
}

impl Default for InventoryFilter {
    fn default() -> Self {
        Self {
            sample_status: Self::default_sample_status(),
            sample_evidence: Self::default_sample_evidence(),
            plate_type: Self::default_plate_type(),
        }
    }
}

// ==========================================
// BuildRequest - 构建请求
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildRequest {
    /// 转移分组：每组为一次转移操作所需的零件（有序，可重复）
    pub transfer_groups: Vec<Vec<String>>,
    /// 每次转移的体积 (ul)
    pub volume: f64,
    pub filter: InventoryFilter,
    pub sort_methods: Vec<SortMethod>,
}

impl BuildRequest {
    /// 默认排序方式: 板数最少 + 取件容器最少
    pub fn default_sort_methods() -> Vec<SortMethod> {
        vec![SortMethod::FewestPlates, SortMethod::FewestRetrieval]
    }

    pub fn new(transfer_groups: Vec<Vec<String>>, volume: f64) -> Self {
        Self {
            transfer_groups,
            volume,
            filter: InventoryFilter::default(),
            sort_methods: Self::default_sort_methods(),
        }
    }

    pub fn with_filter(mut self, filter: InventoryFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort_methods(mut self, sort_methods: Vec<SortMethod>) -> Self {
        self.sort_methods = sort_methods;
        self
    }

    /// 展平后的零件列表（保留重复与顺序）
    pub fn flat_part_ids(&self) -> Vec<&str> {
        self.transfer_groups
            .iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// 去重后的零件列表（按首次出现顺序）
    pub fn required_part_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.flat_part_ids()
            .into_iter()
            .filter(|id| seen.insert(*id))
            .map(str::to_string)
            .collect()
    }

    /// 转移总次数
    pub fn transfer_count(&self) -> usize {
        self.transfer_groups.iter().map(Vec::len).sum()
    }
}
