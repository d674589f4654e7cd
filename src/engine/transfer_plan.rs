// ==========================================
// 构建分配引擎 - 转移方案生成
// ==========================================
// 职责: 将选中方案映射为与请求分组结构一致的转移列表
// 输入: 选中方案 + 构建请求
// 输出: TransferPlan
// ==========================================
// 规则:
// - 同一零件在方案中出现多次时，取按板顺序的第一个样品
// - 请求中重复出现的零件每次都生成一条转移（不扣减体积）
// - 选中方案中找不到零件 => IncompletePlan（不变量被破坏，不能静默跳过）
// ==========================================

use crate::domain::build::BuildRequest;
use crate::domain::inventory::{PartSample, PlateCollection};
use crate::domain::transfer::{Transfer, TransferPlan};
use crate::engine::error::{AllocationError, AllocationResult};
use std::collections::HashMap;
use tracing::error;

pub struct TransferPlanBuilder {
    // 无状态
}

impl TransferPlanBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成转移方案
    ///
    /// # 参数
    /// - solution: 选中方案
    /// - request: 构建请求（分组结构与体积）
    ///
    /// # 返回
    /// - Ok(TransferPlan): plates 为方案内全部板
    /// - Err(IncompletePlan): 方案中缺少某个请求零件
    pub fn build<C: PlateCollection>(
        &self,
        solution: &C,
        request: &BuildRequest,
    ) -> AllocationResult<TransferPlan> {
        let lookup = Self::part_lookup(solution);

        let mut transfers = Vec::with_capacity(request.transfer_groups.len());
        for group in &request.transfer_groups {
            let mut group_transfers = Vec::with_capacity(group.len());
            for part_id in group {
                let Some(sample) = lookup.get(part_id.as_str()) else {
                    error!(
                        part_id = %part_id,
                        plates = ?solution.plate_ids(),
                        "选中方案中找不到请求零件"
                    );
                    return Err(AllocationError::IncompletePlan {
                        part_id: part_id.clone(),
                    });
                };
                group_transfers.push(Transfer {
                    part_id: part_id.clone(),
                    volume: request.volume,
                    address: sample.well_address.clone(),
                    plate_id: sample.plate_id.clone(),
                });
            }
            transfers.push(group_transfers);
        }

        Ok(TransferPlan {
            plates: solution.plate_ids(),
            transfers,
        })
    }

    /// part_id -> 第一个样品（板顺序，再孔位顺序）
    fn part_lookup<C: PlateCollection>(solution: &C) -> HashMap<&str, &PartSample> {
        let mut lookup = HashMap::new();
        for sample in solution.plates().iter().flat_map(|plate| plate.parts.iter()) {
            lookup.entry(sample.part_id.as_str()).or_insert(sample);
        }
        lookup
    }
}

impl Default for TransferPlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::{Plate, PlateSet};

    fn plate(plate_id: &str, parts: &[(&str, &str)]) -> Plate {
        let mut p = Plate::new(plate_id, 1, None);
        for (part_id, address) in parts {
            p.parts.push(PartSample {
                part_id: part_id.to_string(),
                plate_id: plate_id.to_string(),
                well_address: address.to_string(),
                volume: Some(30.0),
                quantity: None,
                thaw_weight: 1,
                container_id: None,
            });
        }
        p
    }

    fn groups(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|g| g.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_structure_mirrors_request_groups() {
        let solution = PlateSet::new(vec![
            plate("A", &[("p1", "A1"), ("p2", "B2")]),
            plate("B", &[("p3", "C3")]),
        ]);
        let request = BuildRequest::new(groups(&[&["p1", "p3"], &["p2", "p1", "p1"]]), 7.5);

        let plan = TransferPlanBuilder::new().build(&solution, &request).unwrap();

        assert_eq!(plan.plates, vec!["A", "B"]);
        assert_eq!(plan.transfers.len(), 2);
        assert_eq!(plan.transfers[0].len(), 2);
        assert_eq!(plan.transfers[1].len(), 3);
        assert_eq!(plan.part_ids(), request.flat_part_ids());
        assert_eq!(plan.transfers[0][1].plate_id, "B");
        assert_eq!(plan.transfers[0][1].address, "C3");
        assert!(plan.transfers.iter().flatten().all(|t| t.volume == 7.5));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let solution = PlateSet::new(vec![
            plate("A", &[("p1", "A1"), ("p1", "A2")]),
            plate("B", &[("p1", "H12")]),
        ]);
        let request = BuildRequest::new(groups(&[&["p1"]]), 1.0);
        let plan = TransferPlanBuilder::new().build(&solution, &request).unwrap();
        assert_eq!(plan.transfers[0][0].plate_id, "A");
        assert_eq!(plan.transfers[0][0].address, "A1");
    }

    #[test]
    fn test_missing_part_is_incomplete_plan() {
        let solution = PlateSet::new(vec![plate("A", &[("p1", "A1")])]);
        let request = BuildRequest::new(groups(&[&["p1", "p2"]]), 1.0);
        let err = TransferPlanBuilder::new()
            .build(&solution, &request)
            .unwrap_err();
        assert!(matches!(err, AllocationError::IncompletePlan { part_id } if part_id == "p2"));
    }

    #[test]
    fn test_empty_request_yields_empty_plan() {
        let request = BuildRequest::new(vec![], 1.0);
        let plan = TransferPlanBuilder::new()
            .build(&PlateSet::default(), &request)
            .unwrap();
        assert_eq!(plan, TransferPlan::default());
    }
}
