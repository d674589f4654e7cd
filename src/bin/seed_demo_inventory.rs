// ==========================================
// 构建分配引擎 - 演示库存生成
// ==========================================
// 用法: seed_demo_inventory [db_path]
// 行为: 创建库存表结构，写入一组演示零件/板/孔位/样品，
//       并在 stdout 输出一个可直接使用的构建请求 JSON
// ==========================================

use rusqlite::{params, Connection};
use std::error::Error;
use uuid::Uuid;

use build_allocator::api::BuildRequestBody;
use build_allocator::app::get_default_db_path;
use build_allocator::db::{ensure_inventory_schema, open_sqlite_connection};

struct DemoPlate {
    name: &'static str,
    status: &'static str,
    plate_type: &'static str,
    thaw_count: i64,
    container: usize,
    /// (零件序号, 孔位, 样品状态, 证据)
    wells: &'static [(usize, &'static str, &'static str, &'static str)],
}

const PART_NAMES: [&str; 5] = ["pJ23100", "B0034", "GFP", "B0015", "KanR"];
const CONTAINER_COUNT: usize = 2;

const DEMO_PLATES: &[DemoPlate] = &[
    DemoPlate {
        name: "GS-001",
        status: "Stocked",
        plate_type: "glycerol_stock",
        thaw_count: 3,
        container: 0,
        wells: &[
            (0, "A1", "Confirmed", "NGS"),
            (1, "A2", "Confirmed", "Twist_Confirmed"),
            (2, "A3", "Mutated", "NGS"),
        ],
    },
    DemoPlate {
        name: "GS-002",
        status: "Stocked",
        plate_type: "glycerol_stock",
        thaw_count: 0,
        container: 0,
        wells: &[
            (2, "B1", "Confirmed", "NGS"),
            (3, "B2", "Confirmed", "NGS"),
        ],
    },
    DemoPlate {
        name: "GS-003",
        status: "Stocked",
        plate_type: "glycerol_stock",
        thaw_count: 1,
        container: 1,
        wells: &[
            (0, "C1", "Confirmed", "NGS"),
            (1, "C2", "Confirmed", "NGS"),
            (2, "C3", "Confirmed", "NGS"),
            (3, "C4", "Confirmed", "Sanger"),
            (4, "C5", "Confirmed", "NGS"),
        ],
    },
    DemoPlate {
        name: "DI-001",
        status: "Stocked",
        plate_type: "distro",
        thaw_count: 0,
        container: 1,
        wells: &[(4, "D1", "Confirmed", "NGS")],
    },
    DemoPlate {
        name: "GS-004",
        status: "Planned",
        plate_type: "glycerol_stock",
        thaw_count: 0,
        container: 1,
        wells: &[(4, "E1", "Confirmed", "NGS")],
    },
];

fn main() -> Result<(), Box<dyn Error>> {
    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);

    let conn = open_sqlite_connection(&db_path)?;
    ensure_inventory_schema(&conn)?;

    let part_ids = seed_demo_inventory(&conn)?;
    eprintln!("Seeded demo inventory into {}", db_path);
    print_quick_counts(&conn)?;

    let request = BuildRequestBody::new(
        vec![
            vec![part_ids[0].clone(), part_ids[1].clone(), part_ids[2].clone()],
            vec![part_ids[0].clone(), part_ids[3].clone()],
        ],
        2.0,
    );
    println!("{}", serde_json::to_string_pretty(&request)?);

    Ok(())
}

fn seed_demo_inventory(conn: &Connection) -> Result<Vec<String>, Box<dyn Error>> {
    let part_ids: Vec<String> = PART_NAMES.iter().map(|_| Uuid::new_v4().to_string()).collect();
    let containers: Vec<String> = (0..CONTAINER_COUNT)
        .map(|_| Uuid::new_v4().to_string())
        .collect();

    let tx = conn.unchecked_transaction()?;

    for (part_id, name) in part_ids.iter().zip(PART_NAMES) {
        tx.execute(
            "INSERT INTO parts (uuid, name) VALUES (?1, ?2)",
            params![part_id, name],
        )?;
    }

    for plate in DEMO_PLATES {
        let plate_id = Uuid::new_v4().to_string();
        tx.execute(
            "INSERT INTO plates (uuid, plate_name, status, plate_type, thaw_count, container_uuid)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                plate_id,
                plate.name,
                plate.status,
                plate.plate_type,
                plate.thaw_count,
                containers[plate.container]
            ],
        )?;

        for (part_index, address, status, evidence) in plate.wells {
            let well_id = Uuid::new_v4().to_string();
            let sample_id = Uuid::new_v4().to_string();
            tx.execute(
                "INSERT INTO wells (uuid, plate_uuid, address, volume, quantity) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![well_id, plate_id, address, 40.0_f64, 25.0_f64],
            )?;
            tx.execute(
                "INSERT INTO samples (uuid, part_uuid, status, evidence) VALUES (?1, ?2, ?3, ?4)",
                params![sample_id, part_ids[*part_index], status, evidence],
            )?;
            tx.execute(
                "INSERT INTO samples_wells (samples_uuid, wells_uuid) VALUES (?1, ?2)",
                params![sample_id, well_id],
            )?;
        }
    }

    tx.commit()?;
    Ok(part_ids)
}

fn print_quick_counts(conn: &Connection) -> Result<(), Box<dyn Error>> {
    eprintln!("Row counts:");
    for table in ["parts", "plates", "wells", "samples", "samples_wells"] {
        let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })?;
        eprintln!("  {:<16} {}", table, count);
    }
    Ok(())
}
