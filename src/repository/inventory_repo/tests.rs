use super::*;
use crate::db::{configure_sqlite_connection, ensure_inventory_schema};
use crate::domain::types::{PlateType, SampleEvidence, SampleStatus};
use rusqlite::params;

// ==========================================
// 测试辅助函数
// ==========================================

fn setup() -> (InventoryRepository, Arc<Mutex<Connection>>) {
    let conn = Connection::open_in_memory().unwrap();
    configure_sqlite_connection(&conn).unwrap();
    ensure_inventory_schema(&conn).unwrap();
    let conn = Arc::new(Mutex::new(conn));
    (InventoryRepository::from_connection(conn.clone()), conn)
}

fn insert_plate(
    conn: &Connection,
    uuid: &str,
    status: &str,
    plate_type: Option<&str>,
    thaw_count: i64,
    container: Option<&str>,
) {
    conn.execute(
        "INSERT INTO plates (uuid, status, plate_type, thaw_count, container_uuid) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![uuid, status, plate_type, thaw_count, container],
    )
    .unwrap();
}

fn insert_empty_well(conn: &Connection, plate: &str, address: &str) {
    conn.execute(
        "INSERT INTO wells (uuid, plate_uuid, address) VALUES (?1, ?2, ?3)",
        params![format!("{}-{}", plate, address), plate, address],
    )
    .unwrap();
}

fn insert_sample(
    conn: &Connection,
    part: &str,
    plate: &str,
    address: &str,
    status: Option<&str>,
    evidence: Option<&str>,
    volume: Option<f64>,
) {
    conn.execute("INSERT OR IGNORE INTO parts (uuid) VALUES (?1)", params![part])
        .unwrap();
    let sample_uuid = format!("s-{}-{}-{}", part, plate, address);
    conn.execute(
        "INSERT INTO samples (uuid, part_uuid, status, evidence) VALUES (?1, ?2, ?3, ?4)",
        params![sample_uuid, part, status, evidence],
    )
    .unwrap();
    let well_uuid = format!("{}-{}", plate, address);
    conn.execute(
        "INSERT OR IGNORE INTO wells (uuid, plate_uuid, address, volume) VALUES (?1, ?2, ?3, ?4)",
        params![well_uuid, plate, address, volume],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO samples_wells (samples_uuid, wells_uuid) VALUES (?1, ?2)",
        params![sample_uuid, well_uuid],
    )
    .unwrap();
}

fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

// ==========================================
// 测试用例
// ==========================================

#[test]
fn test_thaw_weight_counts_all_wells_on_plate() {
    let (repo, conn) = setup();
    {
        let c = conn.lock().unwrap();
        insert_plate(&c, "PL1", "Stocked", Some("glycerol_stock"), 2, Some("FRZ1"));
        insert_sample(&c, "p1", "PL1", "A1", Some("Confirmed"), Some("NGS"), Some(40.0));
        insert_empty_well(&c, "PL1", "A2");
        insert_empty_well(&c, "PL1", "A3");
    }

    let rows = repo
        .find_part_samples(&ids(&["p1"]), &InventoryFilter::default())
        .unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.part_id, "p1");
    assert_eq!(row.plate_id, "PL1");
    assert_eq!(row.well_address, "A1");
    assert_eq!(row.volume, Some(40.0));
    assert_eq!(row.quantity, None);
    // (2 + 1) * 3 孔
    assert_eq!(row.thaw_weight, 9);
    assert_eq!(row.container_id.as_deref(), Some("FRZ1"));
}

#[test]
fn test_only_stocked_plates_and_matching_filters_are_returned() {
    let (repo, conn) = setup();
    {
        let c = conn.lock().unwrap();
        insert_plate(&c, "PL1", "Stocked", Some("glycerol_stock"), 0, None);
        insert_plate(&c, "PL2", "Planned", Some("glycerol_stock"), 0, None);
        insert_plate(&c, "PL3", "Stocked", Some("distro"), 0, None);
        insert_sample(&c, "p1", "PL1", "A1", Some("Confirmed"), Some("NGS"), None);
        insert_sample(&c, "p1", "PL2", "A1", Some("Confirmed"), Some("NGS"), None);
        insert_sample(&c, "p1", "PL3", "A1", Some("Confirmed"), Some("NGS"), None);
        insert_sample(&c, "p2", "PL1", "B1", Some("Mutated"), Some("NGS"), None);
        insert_sample(&c, "p3", "PL1", "C1", Some("Confirmed"), Some("Sanger"), None);
    }

    let rows = repo
        .find_part_samples(&ids(&["p1", "p2", "p3"]), &InventoryFilter::default())
        .unwrap();
    let found: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.part_id.as_str(), r.plate_id.as_str()))
        .collect();
    assert_eq!(found, vec![("p1", "PL1")]);

    let wide = InventoryFilter {
        sample_status: vec![Some(SampleStatus::Confirmed), Some(SampleStatus::Mutated)],
        sample_evidence: vec![Some(SampleEvidence::Ngs), Some(SampleEvidence::Sanger)],
        plate_type: vec![Some(PlateType::GlycerolStock), Some(PlateType::Distro)],
    };
    let rows = repo
        .find_part_samples(&ids(&["p1", "p2", "p3"]), &wide)
        .unwrap();
    let found: Vec<(&str, &str, &str)> = rows
        .iter()
        .map(|r| (r.plate_id.as_str(), r.well_address.as_str(), r.part_id.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("PL1", "A1", "p1"),
            ("PL1", "B1", "p2"),
            ("PL1", "C1", "p3"),
            ("PL3", "A1", "p1"),
        ]
    );
}

#[test]
fn test_null_filter_entry_admits_missing_values() {
    let (repo, conn) = setup();
    {
        let c = conn.lock().unwrap();
        insert_plate(&c, "PL1", "Stocked", None, 0, None);
        insert_sample(&c, "p1", "PL1", "A1", None, Some("NGS"), None);
    }

    assert!(repo
        .find_part_samples(&ids(&["p1"]), &InventoryFilter::default())
        .unwrap()
        .is_empty());

    let with_null = InventoryFilter {
        sample_status: vec![Some(SampleStatus::Confirmed), None],
        sample_evidence: InventoryFilter::default_sample_evidence(),
        plate_type: vec![None],
    };
    let rows = repo.find_part_samples(&ids(&["p1"]), &with_null).unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn test_empty_filter_list_and_empty_request() {
    let (repo, conn) = setup();
    {
        let c = conn.lock().unwrap();
        insert_plate(&c, "PL1", "Stocked", Some("glycerol_stock"), 0, None);
        insert_sample(&c, "p1", "PL1", "A1", Some("Confirmed"), Some("NGS"), None);
    }

    let no_types = InventoryFilter {
        plate_type: vec![],
        ..InventoryFilter::default()
    };
    assert!(repo.find_part_samples(&ids(&["p1"]), &no_types).unwrap().is_empty());
    assert!(repo
        .find_part_samples(&[], &InventoryFilter::default())
        .unwrap()
        .is_empty());
}

#[test]
fn test_unknown_part_is_absent_not_error() {
    let (repo, _conn) = setup();
    let rows = repo
        .find_part_samples(&ids(&["missing"]), &InventoryFilter::default())
        .unwrap();
    assert!(rows.is_empty());
}
