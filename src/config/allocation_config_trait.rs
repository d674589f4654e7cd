// ==========================================
// 构建分配引擎 - 分配配置读取 Trait
// ==========================================
// 职责: 定义分配流程所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::build::{BuildRequest, InventoryFilter};
use crate::domain::types::{PlateType, SampleEvidence, SampleStatus, SortMethod};
use crate::engine::DEFAULT_WARN_PLATE_COUNT;
use async_trait::async_trait;
use std::error::Error;

/// 请求省略字段时使用的默认值
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationDefaults {
    pub filter: InventoryFilter,
    pub sort_methods: Vec<SortMethod>,
    pub warn_plate_count: usize,
}

impl Default for AllocationDefaults {
    fn default() -> Self {
        Self {
            filter: InventoryFilter::default(),
            sort_methods: BuildRequest::default_sort_methods(),
            warn_plate_count: DEFAULT_WARN_PLATE_COUNT,
        }
    }
}

// ==========================================
// AllocationConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait AllocationConfigReader: Send + Sync {
    /// 默认样品状态过滤
    ///
    /// # 默认值
    /// - [Confirmed]
    async fn get_default_sample_status(&self) -> Result<Vec<Option<SampleStatus>>, Box<dyn Error>>;

    /// 默认样品证据过滤
    ///
    /// # 默认值
    /// - [NGS, Twist_Confirmed]
    async fn get_default_sample_evidence(
        &self,
    ) -> Result<Vec<Option<SampleEvidence>>, Box<dyn Error>>;

    /// 默认板类型过滤
    ///
    /// # 默认值
    /// - [glycerol_stock]
    async fn get_default_plate_type(&self) -> Result<Vec<Option<PlateType>>, Box<dyn Error>>;

    /// 默认排序方式
    ///
    /// # 默认值
    /// - [fewest_plates, fewest_retrieval]
    async fn get_default_sort_methods(&self) -> Result<Vec<SortMethod>, Box<dyn Error>>;

    /// 触发候选数量告警的板数阈值
    ///
    /// # 默认值
    /// - 200
    async fn get_candidate_warn_plate_count(&self) -> Result<usize, Box<dyn Error>>;

    /// 一次读取全部分配默认值
    async fn get_allocation_defaults(&self) -> Result<AllocationDefaults, Box<dyn Error>> {
        let sample_status = self.get_default_sample_status().await?;
        let sample_evidence = self.get_default_sample_evidence().await?;
        let plate_type = self.get_default_plate_type().await?;
        let sort_methods = self.get_default_sort_methods().await?;
        let warn_plate_count = self.get_candidate_warn_plate_count().await?;

        Ok(AllocationDefaults {
            filter: InventoryFilter {
                sample_status,
                sample_evidence,
                plate_type,
            },
            sort_methods,
            warn_plate_count,
        })
    }
}
