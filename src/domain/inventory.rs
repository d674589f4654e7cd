// ==========================================
// 构建分配引擎 - 库存快照实体
// ==========================================
// 职责: PartSample / Plate / PlateSet 定义与覆盖判断
// 红线: 快照只读,单次分配调用内构造、调用结束即丢弃
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// PartSample - 库存查询返回的一行
// ==========================================
/// 某个零件在某块板某个孔位上的可用样品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSample {
    pub part_id: String,
    pub plate_id: String,
    pub well_address: String,
    /// 孔体积 (ul)，None 表示干粉
    pub volume: Option<f64>,
    /// 物质的量 (fmol)，None 表示未知
    pub quantity: Option<f64>,
    /// (板冻融次数 + 1) * 板上孔数
    pub thaw_weight: i64,
    pub container_id: Option<String>,
}

// ==========================================
// Plate - 按 plate_id 聚合的样品
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    pub plate_id: String,
    pub parts: Vec<PartSample>,
    pub thaw_weight: i64,
    pub container_id: Option<String>,
}

impl Plate {
    /// 创建空板（thaw_weight / container 取自该板的第一行样品）
    pub fn new(plate_id: impl Into<String>, thaw_weight: i64, container_id: Option<String>) -> Self {
        Self {
            plate_id: plate_id.into(),
            parts: Vec::new(),
            thaw_weight,
            container_id,
        }
    }

    /// 板上是否存在该零件的样品
    pub fn contains_part(&self, part_id: &str) -> bool {
        self.parts.iter().any(|p| p.part_id == part_id)
    }

    /// 板上该零件的第一个样品
    pub fn find_part(&self, part_id: &str) -> Option<&PartSample> {
        self.parts.iter().find(|p| p.part_id == part_id)
    }
}

// ==========================================
// PlateCollection - 板集合的公共行为
// ==========================================
// 实现者: PlateSet（全量库存）、PlateWindow（候选连续窗口）
pub trait PlateCollection {
    fn plates(&self) -> &[Plate];

    fn plate_count(&self) -> usize {
        self.plates().len()
    }

    /// 集合中任意一块板含有该零件
    fn contains_part(&self, part_id: &str) -> bool {
        self.plates().iter().any(|plate| plate.contains_part(part_id))
    }

    /// 列表中每个零件都能在集合的某块板上找到（不要求同板）
    fn contains_part_sublist<I, S>(&self, part_ids: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        part_ids
            .into_iter()
            .all(|id| self.contains_part(id.as_ref()))
    }

    /// 每个分组都满足 contains_part_sublist
    fn contains_part_list<G, I, S>(&self, groups: G) -> bool
    where
        G: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        groups
            .into_iter()
            .all(|group| self.contains_part_sublist(group))
    }

    /// 各板 thaw_weight 之和
    fn thaw_weight(&self) -> i64 {
        self.plates().iter().map(|p| p.thaw_weight).sum()
    }

    /// 去重后的容器数（container 缺失视为同一个值参与去重，多块无容器板共计为一个）
    fn distinct_container_count(&self) -> usize {
        self.plates()
            .iter()
            .map(|p| p.container_id.as_deref())
            .collect::<HashSet<_>>()
            .len()
    }

    fn plate_ids(&self) -> Vec<String> {
        self.plates().iter().map(|p| p.plate_id.clone()).collect()
    }

    /// 按板顺序查找零件的第一个样品
    fn find_part(&self, part_id: &str) -> Option<&PartSample> {
        self.plates().iter().find_map(|plate| plate.find_part(part_id))
    }
}

// ==========================================
// PlateSet - 有序板列表
// ==========================================
/// 有序板列表（顺序 = 查询发现顺序）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlateSet {
    pub plates: Vec<Plate>,
}

impl PlateSet {
    pub fn new(plates: Vec<Plate>) -> Self {
        Self { plates }
    }

    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.plates.len()
    }
}

impl PlateCollection for PlateSet {
    fn plates(&self) -> &[Plate] {
        &self.plates
    }
}
