// ==========================================
// 构建分配引擎 - 库存样品查询 SQL 构建
// ==========================================
// 约束: 所有取值走参数绑定, 不拼接用户输入
// ==========================================

use crate::domain::build::InventoryFilter;

/// 样品查询基础语句
///
/// thaw_weight = (板冻融次数 + 1) * 板上孔数
const PART_SAMPLE_BASE_SQL: &str = r#"
SELECT DISTINCT
    p.uuid AS part_uuid,
    pl.uuid AS plate_uuid,
    w.address,
    w.volume,
    w.quantity,
    (COALESCE(pl.thaw_count, 0) + 1) * t.well_count AS thaw_weight,
    pl.container_uuid
FROM parts AS p
JOIN samples AS s ON s.part_uuid = p.uuid
JOIN samples_wells AS sw ON sw.samples_uuid = s.uuid
JOIN wells AS w ON w.uuid = sw.wells_uuid
JOIN plates AS pl ON pl.uuid = w.plate_uuid
JOIN (
    SELECT plate_uuid, COUNT(*) AS well_count FROM wells GROUP BY plate_uuid
) AS t ON t.plate_uuid = pl.uuid
WHERE pl.status = 'Stocked'"#;

/// 发现顺序: 板 -> 孔位 -> 零件
const PART_SAMPLE_ORDER_BY: &str = "pl.uuid ASC, w.address ASC, p.uuid ASC";

/// 构建带参数的样品查询
///
/// # 返回
/// (SQL, 按 ?1..?N 顺序绑定的参数)
pub(super) fn build_part_sample_query(
    part_ids: &[String],
    filter: &InventoryFilter,
) -> (String, Vec<String>) {
    let mut params: Vec<String> = Vec::new();
    let mut sql = String::from(PART_SAMPLE_BASE_SQL);

    let part_values: Vec<Option<&str>> = part_ids.iter().map(|id| Some(id.as_str())).collect();
    sql.push_str(&in_clause("p.uuid", &part_values, &mut params));

    let status: Vec<Option<&str>> = filter
        .sample_status
        .iter()
        .map(|v| v.map(|s| s.as_str()))
        .collect();
    sql.push_str(&in_clause("s.status", &status, &mut params));

    let evidence: Vec<Option<&str>> = filter
        .sample_evidence
        .iter()
        .map(|v| v.map(|e| e.as_str()))
        .collect();
    sql.push_str(&in_clause("s.evidence", &evidence, &mut params));

    let plate_type: Vec<Option<&str>> = filter
        .plate_type
        .iter()
        .map(|v| v.map(|t| t.as_str()))
        .collect();
    sql.push_str(&in_clause("pl.plate_type", &plate_type, &mut params));

    sql.push_str(&format!("\nORDER BY {}", PART_SAMPLE_ORDER_BY));
    (sql, params)
}

/// 生成 `AND column IN (...)` 条件
///
/// - `None` 项: 额外匹配 `column IS NULL`
/// - 空列表: 不匹配任何行
fn in_clause(column: &str, values: &[Option<&str>], params: &mut Vec<String>) -> String {
    let accepts_null = values.iter().any(Option::is_none);
    let placeholders: Vec<String> = values
        .iter()
        .flatten()
        .map(|value| {
            params.push((*value).to_string());
            format!("?{}", params.len())
        })
        .collect();

    match (placeholders.is_empty(), accepts_null) {
        (true, false) => "\nAND 0".to_string(),
        (true, true) => format!("\nAND {} IS NULL", column),
        (false, false) => format!("\nAND {} IN ({})", column, placeholders.join(", ")),
        (false, true) => format!(
            "\nAND ({} IN ({}) OR {} IS NULL)",
            column,
            placeholders.join(", "),
            column
        ),
    }
}
