// ==========================================
// 构建分配引擎 - API 请求/响应结构
// ==========================================
// 职责: 对外 JSON 结构（字段名与线上格式一致）
// ==========================================

use crate::api::error::ApiError;
use crate::domain::transfer::{Transfer, TransferPlan};
use crate::domain::types::{PlateType, SampleEvidence, SampleStatus, SortMethod};
use crate::engine::{AllocationOutcome, SelectionStep};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// 请求
// ==========================================

/// 构建请求体
///
/// 过滤与排序字段省略时使用配置默认值；显式给出（包括空列表）时原样使用。
/// 列表中的 `null` 额外匹配对应字段为空的库存记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildRequestBody {
    pub parts: Vec<Vec<String>>,
    pub volume: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_status: Option<Vec<Option<SampleStatus>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_evidence: Option<Vec<Option<SampleEvidence>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate_type: Option<Vec<Option<PlateType>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_method: Option<Vec<SortMethod>>,
}

impl BuildRequestBody {
    pub fn new(parts: Vec<Vec<String>>, volume: f64) -> Self {
        Self {
            parts,
            volume,
            sample_status: None,
            sample_evidence: None,
            plate_type: None,
            sort_method: None,
        }
    }
}

// ==========================================
// 响应
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferBody {
    pub part: String,
    pub volume: f64,
    pub address: String,
    pub plate_uuid: String,
}

impl From<Transfer> for TransferBody {
    fn from(transfer: Transfer) -> Self {
        Self {
            part: transfer.part_id,
            volume: transfer.volume,
            address: transfer.address,
            plate_uuid: transfer.plate_id,
        }
    }
}

/// 构建响应体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildResponseBody {
    pub plates: Vec<String>,
    pub transfers: Vec<Vec<TransferBody>>,
}

impl From<TransferPlan> for BuildResponseBody {
    fn from(plan: TransferPlan) -> Self {
        Self {
            plates: plan.plates,
            transfers: plan
                .transfers
                .into_iter()
                .map(|group| group.into_iter().map(TransferBody::from).collect())
                .collect(),
        }
    }
}

impl From<BuildResponseBody> for TransferPlan {
    fn from(body: BuildResponseBody) -> Self {
        Self {
            plates: body.plates,
            transfers: body
                .transfers
                .into_iter()
                .map(|group| {
                    group
                        .into_iter()
                        .map(|t| Transfer {
                            part_id: t.part,
                            volume: t.volume,
                            address: t.address,
                            plate_id: t.plate_uuid,
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

/// 分配过程报告（响应之外的诊断信息）
#[derive(Debug, Clone, Serialize)]
pub struct AllocationReport {
    pub universe_size: usize,
    pub candidates_considered: usize,
    pub solutions_found: usize,
    pub selection_trace: Vec<SelectionStep>,
    pub computed_at: DateTime<Utc>,
}

impl AllocationReport {
    /// 拆分分配结果为响应体与报告
    pub fn split(outcome: AllocationOutcome) -> (BuildResponseBody, AllocationReport) {
        let report = AllocationReport {
            universe_size: outcome.universe_size,
            candidates_considered: outcome.candidates_considered,
            solutions_found: outcome.solutions_found,
            selection_trace: outcome.selection_trace,
            computed_at: outcome.computed_at,
        };
        (outcome.plan.into(), report)
    }
}

/// 错误响应体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_parts: Vec<String>,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        let missing_parts = match err {
            ApiError::NoFeasibleSolution { missing_parts } => missing_parts.clone(),
            _ => Vec::new(),
        };
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            missing_parts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_optional_fields() {
        let body: BuildRequestBody =
            serde_json::from_str(r#"{"parts": [["a", "b"]], "volume": 10}"#).unwrap();
        assert_eq!(body.parts, vec![vec!["a".to_string(), "b".to_string()]]);
        assert_eq!(body.volume, 10.0);
        assert!(body.sample_status.is_none());
        assert!(body.sort_method.is_none());

        let body: BuildRequestBody = serde_json::from_str(
            r#"{"parts": [], "volume": 1.5, "sample_status": ["Confirmed", null],
                "plate_type": [], "sort_method": ["lowest_thaw_count"]}"#,
        )
        .unwrap();
        assert_eq!(
            body.sample_status,
            Some(vec![Some(SampleStatus::Confirmed), None])
        );
        assert_eq!(body.plate_type, Some(vec![]));
        assert_eq!(body.sort_method, Some(vec![SortMethod::LowestThawCount]));
    }

    #[test]
    fn test_request_rejects_unknown_values() {
        assert!(serde_json::from_str::<BuildRequestBody>(
            r#"{"parts": [], "volume": 1, "plate_type": ["agar"]}"#
        )
        .is_err());
        assert!(serde_json::from_str::<BuildRequestBody>(r#"{"parts": []}"#).is_err());
        assert!(serde_json::from_str::<BuildRequestBody>(
            r#"{"parts": [], "volume": 1, "priority": 3}"#
        )
        .is_err());
    }

    #[test]
    fn test_response_wire_format() {
        let plan = TransferPlan {
            plates: vec!["A".to_string()],
            transfers: vec![vec![Transfer {
                part_id: "p1".to_string(),
                volume: 10.0,
                address: "A1".to_string(),
                plate_id: "A".to_string(),
            }]],
        };
        let body = BuildResponseBody::from(plan);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "plates": ["A"],
                "transfers": [[{"part": "p1", "volume": 10.0, "address": "A1", "plate_uuid": "A"}]]
            })
        );
    }

    #[test]
    fn test_error_body() {
        let err = ApiError::NoFeasibleSolution {
            missing_parts: vec!["p9".to_string()],
        };
        let body = ErrorBody::from(&err);
        assert_eq!(body.code, "NO_FEASIBLE_SOLUTION");
        assert_eq!(body.missing_parts, vec!["p9"]);

        let body = ErrorBody::from(&ApiError::InvalidInput("bad".to_string()));
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("missing_parts").is_none());
    }
}
