// ==========================================
// 构建分配引擎 - 候选方案枚举
// ==========================================
// 职责: 枚举全量板列表的所有连续窗口 plates[i..j]（0 <= i <= j <= N）
// 顺序: 空窗口 -> (0,1) (0,2) .. (0,N) -> (1,2) .. -> (N-1,N)
// ==========================================
// 注: 只枚举连续窗口（O(N²)），不做全子集搜索；
//     发现顺序上不相邻的板组合不会成为候选
// ==========================================

use crate::domain::inventory::{Plate, PlateCollection, PlateSet};

// ==========================================
// PlateWindow - 候选连续窗口
// ==========================================
/// 全量板列表上的一个连续窗口 `[start, end)`
#[derive(Debug, Clone, Copy)]
pub struct PlateWindow<'a> {
    pub start: usize,
    pub end: usize,
    plates: &'a [Plate],
}

impl<'a> PlateWindow<'a> {
    fn new(universe: &'a [Plate], start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            plates: &universe[start..end],
        }
    }
}

impl PlateCollection for PlateWindow<'_> {
    fn plates(&self) -> &[Plate] {
        self.plates
    }
}

// ==========================================
// CandidateEnumerator - 连续窗口枚举器
// ==========================================
pub struct CandidateEnumerator {
    // 无状态
}

impl CandidateEnumerator {
    pub fn new() -> Self {
        Self {}
    }

    /// 惰性枚举全部候选窗口
    pub fn windows<'a>(&self, universe: &'a PlateSet) -> Windows<'a> {
        Windows {
            plates: &universe.plates,
            emitted_empty: false,
            start: 0,
            end: 1,
        }
    }

    /// N 块板的候选总数: 1（空窗口）+ N(N+1)/2
    pub fn candidate_count(plate_count: usize) -> usize {
        1 + plate_count * (plate_count + 1) / 2
    }
}

impl Default for CandidateEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

/// 连续窗口迭代器
pub struct Windows<'a> {
    plates: &'a [Plate],
    emitted_empty: bool,
    start: usize,
    end: usize,
}

impl<'a> Iterator for Windows<'a> {
    type Item = PlateWindow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.emitted_empty {
            self.emitted_empty = true;
            return Some(PlateWindow::new(self.plates, 0, 0));
        }

        let n = self.plates.len();
        if self.end > n {
            self.start += 1;
            self.end = self.start + 1;
        }
        if self.start >= n {
            return None;
        }

        let window = PlateWindow::new(self.plates, self.start, self.end);
        self.end += 1;
        Some(window)
    }
}
