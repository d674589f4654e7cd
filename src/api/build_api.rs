// ==========================================
// 构建分配引擎 - 构建 API
// ==========================================
// 职责: 请求校验 -> 补齐配置默认值 -> 执行分配 -> 组装响应
// 说明: 分配为同步 SQLite 读取 + CPU 计算，放入 blocking 线程池执行
// ==========================================

use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::api::dto::{AllocationReport, BuildRequestBody, BuildResponseBody};
use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::BuildRequestValidator;
use crate::config::{AllocationConfigReader, AllocationDefaults};
use crate::domain::build::{BuildRequest, InventoryFilter};
use crate::engine::{AllocationOutcome, BuildAllocator, InventoryQuery};

// ==========================================
// BuildApi - 构建 API
// ==========================================
pub struct BuildApi<Q, C>
where
    Q: InventoryQuery + 'static,
    C: AllocationConfigReader,
{
    inventory: Arc<Q>,
    config: Arc<C>,
    validator: BuildRequestValidator,
}

impl<Q, C> BuildApi<Q, C>
where
    Q: InventoryQuery + 'static,
    C: AllocationConfigReader,
{
    /// 创建新的 BuildApi 实例
    ///
    /// # 参数
    /// - inventory: 库存查询实现
    /// - config: 分配默认值读取器
    pub fn new(inventory: Arc<Q>, config: Arc<C>) -> Self {
        Self {
            inventory,
            config,
            validator: BuildRequestValidator::new(),
        }
    }

    /// 生成转移方案
    ///
    /// # 返回
    /// - Ok(BuildResponseBody): plates + transfers
    /// - Err(ApiError): 输入错误 / 无可行方案 / 方案不完整 / 数据访问错误
    pub async fn plan_build(&self, body: BuildRequestBody) -> ApiResult<BuildResponseBody> {
        let outcome = self.run(body).await?;
        Ok(outcome.plan.into())
    }

    /// 生成转移方案并附带分配过程报告
    pub async fn plan_build_with_report(
        &self,
        body: BuildRequestBody,
    ) -> ApiResult<(BuildResponseBody, AllocationReport)> {
        let outcome = self.run(body).await?;
        Ok(AllocationReport::split(outcome))
    }

    /// 从原始 JSON 请求体生成转移方案
    pub async fn plan_build_json(&self, raw: &str) -> ApiResult<BuildResponseBody> {
        let body = self.validator.parse_json(raw)?;
        self.plan_build(body).await
    }

    #[instrument(skip(self, body), fields(groups = body.parts.len(), volume = body.volume))]
    async fn run(&self, body: BuildRequestBody) -> ApiResult<AllocationOutcome> {
        self.validator.validate(&body)?;

        let defaults = self
            .config
            .get_allocation_defaults()
            .await
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        let warn_plate_count = defaults.warn_plate_count;
        let request = Self::to_request(body, defaults);
        debug!(
            sort_methods = ?request.sort_methods,
            filter = ?request.filter,
            "构建请求已补齐默认值"
        );

        let allocator =
            BuildAllocator::new(Arc::clone(&self.inventory)).with_warn_plate_count(warn_plate_count);
        let result = tokio::task::spawn_blocking(move || allocator.allocate(&request))
            .await
            .map_err(|e| ApiError::InternalError(format!("分配任务执行失败: {}", e)))?;

        result.map_err(|e| {
            let api_err = ApiError::from(e);
            if !matches!(api_err, ApiError::NoFeasibleSolution { .. }) {
                warn!(error = %api_err, "分配失败");
            }
            api_err
        })
    }

    /// 请求体 -> 引擎请求（只对省略的字段使用默认值）
    fn to_request(body: BuildRequestBody, defaults: AllocationDefaults) -> BuildRequest {
        let AllocationDefaults {
            filter: default_filter,
            sort_methods: default_sort_methods,
            ..
        } = defaults;

        let filter = InventoryFilter {
            sample_status: body.sample_status.unwrap_or(default_filter.sample_status),
            sample_evidence: body.sample_evidence.unwrap_or(default_filter.sample_evidence),
            plate_type: body.plate_type.unwrap_or(default_filter.plate_type),
        };

        BuildRequest::new(body.parts, body.volume)
            .with_filter(filter)
            .with_sort_methods(body.sort_method.unwrap_or(default_sort_methods))
    }
}
