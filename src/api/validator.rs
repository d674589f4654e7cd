// ==========================================
// 构建分配引擎 - 请求校验器
// ==========================================
// 职责: 构建请求进入引擎前的结构与取值校验
// 规则:
// - JSON 无法解析 / 缺少必填字段 / 枚举取值非法 => InvalidInput
// - part id 不是 UUID / volume 非有限正数 => ValidationError
// ==========================================

use crate::api::dto::BuildRequestBody;
use crate::api::error::{ApiError, ApiResult};
use uuid::Uuid;

pub struct BuildRequestValidator {
    // 无状态
}

impl BuildRequestValidator {
    pub fn new() -> Self {
        Self {}
    }

    /// 解析 JSON 请求体
    pub fn parse_json(&self, raw: &str) -> ApiResult<BuildRequestBody> {
        serde_json::from_str(raw).map_err(|e| ApiError::InvalidInput(format!("请求体解析失败: {}", e)))
    }

    /// 校验请求取值
    ///
    /// # 返回
    /// - Ok(()): 校验通过
    /// - Err(ApiError::ValidationError): 第一个不合法的字段
    pub fn validate(&self, body: &BuildRequestBody) -> ApiResult<()> {
        if !body.volume.is_finite() || body.volume <= 0.0 {
            return Err(ApiError::ValidationError(format!(
                "volume 必须为正数: {}",
                body.volume
            )));
        }

        for (group_index, group) in body.parts.iter().enumerate() {
            for (part_index, part_id) in group.iter().enumerate() {
                if Uuid::parse_str(part_id).is_err() {
                    return Err(ApiError::ValidationError(format!(
                        "parts[{}][{}] 不是合法的 UUID: {}",
                        group_index, part_index, part_id
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for BuildRequestValidator {
    fn default() -> Self {
        Self::new()
    }
}
