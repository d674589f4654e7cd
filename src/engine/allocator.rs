// ==========================================
// 构建分配引擎 - 分配主流程
// ==========================================
// 流程: 库存查询 -> 库存索引 -> 连续窗口枚举 -> 覆盖过滤 -> 多准则选择 -> 转移方案
// 输入: BuildRequest（已校验）
// 输出: AllocationOutcome（转移方案 + 各阶段计数 + 收窄轨迹）
// ==========================================
// 红线:
// - 只读库存，不写库、不扣减体积
// - 同一库存状态 + 同一请求 => 相同结果
// - 每次调用独立构造 Plate，不跨调用共享可变状态
// ==========================================

use crate::domain::build::BuildRequest;
use crate::domain::inventory::{PartSample, PlateCollection};
use crate::domain::transfer::TransferPlan;
use crate::engine::candidate::CandidateEnumerator;
use crate::engine::coverage::CoverageFilter;
use crate::engine::error::{AllocationError, AllocationResult};
use crate::engine::inventory_index::InventoryIndex;
use crate::engine::inventory_source::InventoryQuery;
use crate::engine::selector::{MultiCriteriaSelector, SelectionStep};
use crate::engine::transfer_plan::TransferPlanBuilder;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// 板数超过该值时提示候选数量（平方增长）
pub const DEFAULT_WARN_PLATE_COUNT: usize = 200;

// ==========================================
// AllocationOutcome - 分配结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct AllocationOutcome {
    pub plan: TransferPlan,
    /// 全量库存中的板数
    pub universe_size: usize,
    /// 评估过的候选窗口数（含空窗口）
    pub candidates_considered: usize,
    /// 覆盖全部零件的候选数
    pub solutions_found: usize,
    pub selection_trace: Vec<SelectionStep>,
    pub computed_at: DateTime<Utc>,
}

// ==========================================
// BuildAllocator - 构建分配器
// ==========================================
pub struct BuildAllocator<Q>
where
    Q: InventoryQuery,
{
    inventory: Arc<Q>,
    enumerator: CandidateEnumerator,
    selector: MultiCriteriaSelector,
    plan_builder: TransferPlanBuilder,
    warn_plate_count: usize,
}

impl<Q> BuildAllocator<Q>
where
    Q: InventoryQuery,
{
    /// 创建新的 BuildAllocator 实例
    ///
    /// # 参数
    /// - inventory: 库存查询实现（SQLite 库或内存快照）
    pub fn new(inventory: Arc<Q>) -> Self {
        Self {
            inventory,
            enumerator: CandidateEnumerator::new(),
            selector: MultiCriteriaSelector::new(),
            plan_builder: TransferPlanBuilder::new(),
            warn_plate_count: DEFAULT_WARN_PLATE_COUNT,
        }
    }

    pub fn with_warn_plate_count(mut self, warn_plate_count: usize) -> Self {
        self.warn_plate_count = warn_plate_count;
        self
    }

    /// 执行一次分配
    ///
    /// # 返回
    /// - Ok(AllocationOutcome)
    /// - Err(NoFeasibleSolution): 当前库存与过滤条件下无覆盖方案
    /// - Err(IncompletePlan): 选中方案无法解析某个零件
    /// - Err(Inventory): 库存查询失败
    #[instrument(skip(self, request), fields(
        groups = request.transfer_groups.len(),
        transfers = request.transfer_count(),
        volume = request.volume
    ))]
    pub fn allocate(&self, request: &BuildRequest) -> AllocationResult<AllocationOutcome> {
        let required = request.required_part_ids();
        let samples = if required.is_empty() {
            Vec::new()
        } else {
            self.inventory.query(&required, &request.filter)?
        };
        debug!(parts = required.len(), rows = samples.len(), "库存查询完成");

        self.allocate_from_samples(samples, request)
    }

    /// 基于已取得的样品行执行分配（不访问库存）
    pub fn allocate_from_samples(
        &self,
        samples: Vec<PartSample>,
        request: &BuildRequest,
    ) -> AllocationResult<AllocationOutcome> {
        let index = InventoryIndex::build(samples);
        let universe = index.universe();
        let universe_size = universe.plate_count();

        if universe_size > self.warn_plate_count {
            warn!(
                plates = universe_size,
                candidates = CandidateEnumerator::candidate_count(universe_size),
                "库存板数较多，候选窗口数量按平方增长"
            );
        }

        let coverage = CoverageFilter::new(request);
        let (solutions, candidates_considered) =
            coverage.retain_covering(self.enumerator.windows(universe));
        let solutions_found = solutions.len();
        debug!(
            plates = universe_size,
            candidates = candidates_considered,
            solutions = solutions_found,
            "覆盖过滤完成"
        );

        let (chosen, selection_trace) = self.selector.select(solutions, &request.sort_methods);
        let Some(chosen) = chosen else {
            let missing_parts = index.missing_parts(coverage.required());
            info!(missing = ?missing_parts, "无可行方案");
            return Err(AllocationError::NoFeasibleSolution { missing_parts });
        };

        let plan = self.plan_builder.build(&chosen, request)?;
        info!(
            start = chosen.start,
            end = chosen.end,
            plates = plan.plates.len(),
            transfers = plan.transfer_count(),
            "分配完成"
        );

        Ok(AllocationOutcome {
            plan,
            universe_size,
            candidates_considered,
            solutions_found,
            selection_trace,
            computed_at: Utc::now(),
        })
    }
}
