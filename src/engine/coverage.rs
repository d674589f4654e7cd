// ==========================================
// 构建分配引擎 - 覆盖过滤
// ==========================================
// 职责: 保留覆盖全部请求零件的候选窗口
// 规则: 请求零件展平为一个列表（分组结构不参与覆盖判断），
//       每个零件至少出现在窗口内某一块板上
// ==========================================

use crate::domain::build::BuildRequest;
use crate::domain::inventory::PlateCollection;

pub struct CoverageFilter {
    required: Vec<String>,
}

impl CoverageFilter {
    /// 以请求的去重零件列表构建过滤器
    pub fn new(request: &BuildRequest) -> Self {
        Self {
            required: request.required_part_ids(),
        }
    }

    pub fn from_part_ids(required: Vec<String>) -> Self {
        Self { required }
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// 候选是否覆盖全部零件（空需求被任何候选覆盖）
    pub fn covers<C: PlateCollection>(&self, candidate: &C) -> bool {
        candidate.contains_part_sublist(&self.required)
    }

    /// 过滤候选，保持枚举顺序
    ///
    /// # 返回
    /// - (覆盖的候选, 评估过的候选数)
    pub fn retain_covering<C, I>(&self, candidates: I) -> (Vec<C>, usize)
    where
        C: PlateCollection,
        I: IntoIterator<Item = C>,
    {
        let mut considered = 0usize;
        let solutions = candidates
            .into_iter()
            .inspect(|_| considered += 1)
            .filter(|candidate| self.covers(candidate))
            .collect();
        (solutions, considered)
    }
}
