// ==========================================
// 构建分配引擎 - 多准则选择器
// ==========================================
// 职责: 按排序方式逐步收窄可行方案，取第一个幸存方案
// 准则:
// - fewest_plates:      板数 = 幸存方案中的最小值
// - fewest_retrieval:   去重容器数 = 幸存方案中的最小值
// - highest_thaw_count: thaw_weight 之和 = 幸存方案中的最大值
// - lowest_thaw_count:  thaw_weight 之和 = 幸存方案中的最小值
// ==========================================
// 红线: 准则按 SortMethod::APPLY_ORDER 固定顺序应用，与请求列表顺序无关；
//       平局取枚举顺序中的第一个，不引入随机性
// ==========================================

use crate::domain::inventory::PlateCollection;
use crate::domain::types::SortMethod;
use serde::Serialize;
use tracing::debug;

/// 一次收窄步骤的记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionStep {
    pub method: SortMethod,
    /// 本步保留方案的目标值（最小/最大）
    pub target: i64,
    pub before: usize,
    pub after: usize,
}

pub struct MultiCriteriaSelector {
    // 无状态
}

impl MultiCriteriaSelector {
    pub fn new() -> Self {
        Self {}
    }

    /// 按请求的排序方式收窄方案集合
    ///
    /// # 参数
    /// - solutions: 可行方案（枚举顺序）
    /// - methods: 请求的排序方式（重复项与顺序均不影响结果）
    ///
    /// # 返回
    /// - (幸存方案, 收窄轨迹)
    pub fn narrow<C: PlateCollection>(
        &self,
        solutions: Vec<C>,
        methods: &[SortMethod],
    ) -> (Vec<C>, Vec<SelectionStep>) {
        let mut survivors = solutions;
        let mut trace = Vec::new();

        for method in SortMethod::APPLY_ORDER {
            if !methods.contains(&method) || survivors.is_empty() {
                continue;
            }

            let metrics: Vec<i64> = survivors.iter().map(|s| Self::metric(method, s)).collect();
            let target = match method {
                SortMethod::HighestThawCount => metrics.iter().copied().max(),
                _ => metrics.iter().copied().min(),
            };
            let Some(target) = target else { continue };

            let before = survivors.len();
            survivors = survivors
                .into_iter()
                .zip(metrics)
                .filter(|(_, metric)| *metric == target)
                .map(|(solution, _)| solution)
                .collect();

            debug!(
                method = %method,
                target_value = target,
                before = before,
                after = survivors.len(),
                "收窄可行方案"
            );
            trace.push(SelectionStep {
                method,
                target,
                before,
                after: survivors.len(),
            });
        }

        (survivors, trace)
    }

    /// 收窄后取枚举顺序中的第一个方案
    pub fn select<C: PlateCollection>(
        &self,
        solutions: Vec<C>,
        methods: &[SortMethod],
    ) -> (Option<C>, Vec<SelectionStep>) {
        let (survivors, trace) = self.narrow(solutions, methods);
        (survivors.into_iter().next(), trace)
    }

    fn metric<C: PlateCollection>(method: SortMethod, solution: &C) -> i64 {
        match method {
            SortMethod::FewestPlates => solution.plate_count() as i64,
            SortMethod::FewestRetrieval => solution.distinct_container_count() as i64,
            SortMethod::HighestThawCount | SortMethod::LowestThawCount => solution.thaw_weight(),
        }
    }
}

impl Default for MultiCriteriaSelector {
    fn default() -> Self {
        Self::new()
    }
}
