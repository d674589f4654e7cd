// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use build_allocator::config::{AllocationConfigReader, AllocationDefaults};
use build_allocator::domain::types::{PlateType, SampleEvidence, SampleStatus, SortMethod};
use std::error::Error;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub defaults: AllocationDefaults,
    /// 为 true 时所有读取返回错误（模拟配置库不可用）
    pub unavailable: bool,
}

impl MockConfig {
    /// 创建默认配置
    pub fn default() -> Self {
        Self {
            defaults: AllocationDefaults::default(),
            unavailable: false,
        }
    }

    /// 创建自定义默认排序方式
    pub fn with_sort_methods(sort_methods: Vec<SortMethod>) -> Self {
        let mut config = Self::default();
        config.defaults.sort_methods = sort_methods;
        config
    }

    /// 创建不可用配置
    pub fn unavailable() -> Self {
        let mut config = Self::default();
        config.unavailable = true;
        config
    }

    fn check(&self) -> Result<(), Box<dyn Error>> {
        if self.unavailable {
            Err("配置库不可用".into())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AllocationConfigReader for MockConfig {
    async fn get_default_sample_status(&self) -> Result<Vec<Option<SampleStatus>>, Box<dyn Error>> {
        self.check()?;
        Ok(self.defaults.filter.sample_status.clone())
    }

    async fn get_default_sample_evidence(
        &self,
    ) -> Result<Vec<Option<SampleEvidence>>, Box<dyn Error>> {
        self.check()?;
        Ok(self.defaults.filter.sample_evidence.clone())
    }

    async fn get_default_plate_type(&self) -> Result<Vec<Option<PlateType>>, Box<dyn Error>> {
        self.check()?;
        Ok(self.defaults.filter.plate_type.clone())
    }

    async fn get_default_sort_methods(&self) -> Result<Vec<SortMethod>, Box<dyn Error>> {
        self.check()?;
        Ok(self.defaults.sort_methods.clone())
    }

    async fn get_candidate_warn_plate_count(&self) -> Result<usize, Box<dyn Error>> {
        self.check()?;
        Ok(self.defaults.warn_plate_count)
    }
}
