// ==========================================
// 构建分配引擎 - 领域类型定义
// ==========================================
// 职责: 样品状态 / 证据 / 板类型 / 排序方式 枚举
// 序列化格式: 与请求体及库存表中的字符串一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 样品状态 (Sample Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleStatus {
    Confirmed, // 序列已确认
    Mutated,   // 存在突变
}

impl SampleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleStatus::Confirmed => "Confirmed",
            SampleStatus::Mutated => "Mutated",
        }
    }
}

impl fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SampleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Confirmed" => Ok(SampleStatus::Confirmed),
            "Mutated" => Ok(SampleStatus::Mutated),
            other => Err(format!("未知样品状态: {}", other)),
        }
    }
}

// ==========================================
// 样品证据 (Sample Evidence)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleEvidence {
    #[serde(rename = "Twist_Confirmed")]
    TwistConfirmed,
    #[serde(rename = "NGS")]
    Ngs,
    Sanger,
    Nanopore,
    Derived,
}

impl SampleEvidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleEvidence::TwistConfirmed => "Twist_Confirmed",
            SampleEvidence::Ngs => "NGS",
            SampleEvidence::Sanger => "Sanger",
            SampleEvidence::Nanopore => "Nanopore",
            SampleEvidence::Derived => "Derived",
        }
    }
}

impl fmt::Display for SampleEvidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SampleEvidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Twist_Confirmed" => Ok(SampleEvidence::TwistConfirmed),
            "NGS" => Ok(SampleEvidence::Ngs),
            "Sanger" => Ok(SampleEvidence::Sanger),
            "Nanopore" => Ok(SampleEvidence::Nanopore),
            "Derived" => Ok(SampleEvidence::Derived),
            other => Err(format!("未知样品证据: {}", other)),
        }
    }
}

// ==========================================
// 板类型 (Plate Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlateType {
    GlycerolStock, // 甘油菌种板
    Distro,        // 分发板
}

impl PlateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlateType::GlycerolStock => "glycerol_stock",
            PlateType::Distro => "distro",
        }
    }
}

impl fmt::Display for PlateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "glycerol_stock" => Ok(PlateType::GlycerolStock),
            "distro" => Ok(PlateType::Distro),
            other => Err(format!("未知板类型: {}", other)),
        }
    }
}

// ==========================================
// 排序方式 (Sort Method)
// ==========================================
// 收窄顺序固定: FewestPlates -> FewestRetrieval -> HighestThawCount -> LowestThawCount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMethod {
    FewestPlates,     // 板数最少
    FewestRetrieval,  // 取件容器最少
    HighestThawCount, // 冻融权重最高
    LowestThawCount,  // 冻融权重最低
}

impl SortMethod {
    /// 按收窄顺序排列的全部排序方式
    pub const APPLY_ORDER: [SortMethod; 4] = [
        SortMethod::FewestPlates,
        SortMethod::FewestRetrieval,
        SortMethod::HighestThawCount,
        SortMethod::LowestThawCount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMethod::FewestPlates => "fewest_plates",
            SortMethod::FewestRetrieval => "fewest_retrieval",
            SortMethod::HighestThawCount => "highest_thaw_count",
            SortMethod::LowestThawCount => "lowest_thaw_count",
        }
    }
}

impl fmt::Display for SortMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fewest_plates" | "fewest-plates" => Ok(SortMethod::FewestPlates),
            "fewest_retrieval" | "fewest-retrieval" => Ok(SortMethod::FewestRetrieval),
            "highest_thaw_count" | "highest-thaw-count" => Ok(SortMethod::HighestThawCount),
            "lowest_thaw_count" | "lowest-thaw-count" => Ok(SortMethod::LowestThawCount),
            other => Err(format!("未知排序方式: {}", other)),
        }
    }
}
