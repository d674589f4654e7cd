// ==========================================
// 构建分配引擎 - 库存索引
// ==========================================
// 职责: 将样品行按 plate_id 聚合为 Plate，形成全量 PlateSet
// 输入: 库存查询返回的 PartSample 列表（发现顺序）
// 输出: 全量板集合（板顺序 = 首次出现顺序）
// ==========================================
// 约束: thaw_weight / container 在构造时确定，后续候选评估不重复计算
// ==========================================

use crate::domain::inventory::{PartSample, Plate, PlateCollection, PlateSet};
use std::collections::HashMap;

pub struct InventoryIndex {
    universe: PlateSet,
}

impl InventoryIndex {
    /// 由样品行构建索引
    pub fn build(samples: Vec<PartSample>) -> Self {
        let mut plates: Vec<Plate> = Vec::new();
        let mut position: HashMap<String, usize> = HashMap::new();

        for sample in samples {
            let idx = match position.get(&sample.plate_id) {
                Some(&idx) => idx,
                None => {
                    plates.push(Plate::new(
                        sample.plate_id.clone(),
                        sample.thaw_weight,
                        sample.container_id.clone(),
                    ));
                    position.insert(sample.plate_id.clone(), plates.len() - 1);
                    plates.len() - 1
                }
            };
            plates[idx].parts.push(sample);
        }

        Self {
            universe: PlateSet::new(plates),
        }
    }

    pub fn universe(&self) -> &PlateSet {
        &self.universe
    }

    pub fn into_universe(self) -> PlateSet {
        self.universe
    }

    /// 全量库存中完全找不到的零件（保持请求顺序）
    pub fn missing_parts(&self, required: &[String]) -> Vec<String> {
        required
            .iter()
            .filter(|id| !self.universe.contains_part(id))
            .cloned()
            .collect()
    }
}
