// ==========================================
// 构建分配引擎 - API 层
// ==========================================
// 职责: 对外构建接口，供 CLI 与上层服务调用
// ==========================================

pub mod build_api;
pub mod dto;
pub mod error;
pub mod validator;

// 重导出核心类型
pub use build_api::BuildApi;
pub use dto::{AllocationReport, BuildRequestBody, BuildResponseBody, ErrorBody, TransferBody};
pub use error::{ApiError, ApiResult};
pub use validator::BuildRequestValidator;
