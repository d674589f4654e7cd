// ==========================================
// 构建分配引擎 - 转移方案
// ==========================================
// 职责: 转移方案实体 + 人工移液清单导出
// 约束: transfers 与请求的 transfer_groups 结构一致（组数、组内顺序）
// ==========================================

use serde::{Deserialize, Serialize};
use std::io;

/// 单次转移：从 plate_id 的 address 孔位取 volume 的 part_id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub part_id: String,
    pub volume: f64,
    pub address: String,
    pub plate_id: String,
}

/// 转移方案
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferPlan {
    /// 选中方案涉及的板（按发现顺序）
    pub plates: Vec<String>,
    pub transfers: Vec<Vec<Transfer>>,
}

/// 清单行（展平后的单次转移）
#[derive(Debug, Serialize)]
struct WorklistRow<'a> {
    group: usize,
    part: &'a str,
    volume: f64,
    plate_uuid: &'a str,
    address: &'a str,
}

impl TransferPlan {
    /// 转移总次数
    pub fn transfer_count(&self) -> usize {
        self.transfers.iter().map(Vec::len).sum()
    }

    /// 按分组顺序展平的零件列表
    pub fn part_ids(&self) -> Vec<&str> {
        self.transfers
            .iter()
            .flatten()
            .map(|t| t.part_id.as_str())
            .collect()
    }

    /// 导出人工移液清单（CSV）
    ///
    /// 列: group,part,volume,plate_uuid,address（group 从 1 开始）
    pub fn write_csv<W: io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for (index, group) in self.transfers.iter().enumerate() {
            for transfer in group {
                wtr.serialize(WorklistRow {
                    group: index + 1,
                    part: &transfer.part_id,
                    volume: transfer.volume,
                    plate_uuid: &transfer.plate_id,
                    address: &transfer.address,
                })?;
            }
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(part: &str, plate: &str, address: &str) -> Transfer {
        Transfer {
            part_id: part.to_string(),
            volume: 10.0,
            address: address.to_string(),
            plate_id: plate.to_string(),
        }
    }

    #[test]
    fn test_write_csv_worklist() {
        let plan = TransferPlan {
            plates: vec!["A".to_string()],
            transfers: vec![
                vec![transfer("p1", "A", "A1"), transfer("p2", "A", "B2")],
                vec![transfer("p1", "A", "A1")],
            ],
        };

        let mut out = Vec::new();
        plan.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "group,part,volume,plate_uuid,address");
        assert_eq!(lines[1], "1,p1,10.0,A,A1");
        assert_eq!(lines[2], "1,p2,10.0,A,B2");
        assert_eq!(lines[3], "2,p1,10.0,A,A1");
        assert_eq!(plan.transfer_count(), 3);
        assert_eq!(plan.part_ids(), vec!["p1", "p2", "p1"]);
    }

    #[test]
    fn test_empty_plan_writes_nothing() {
        let mut out = Vec::new();
        TransferPlan::default().write_csv(&mut out).unwrap();
        assert!(out.is_empty());
    }
}
