// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证分配默认值读取功能的正确性
// ==========================================


use build_allocator::config::{config_keys, AllocationConfigReader, AllocationDefaults, ConfigManager};
use build_allocator::domain::types::{PlateType, SampleEvidence, SampleStatus, SortMethod};
use std::io;
use std::sync::{Arc, Mutex};
use test_helpers::{create_test_db, insert_config, open_test_connection};

/// 收集日志输出的内存 writer
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_config_manager_creation() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let config_manager = ConfigManager::new(&db_path);
    assert!(
        config_manager.is_ok(),
        "ConfigManager should be created successfully"
    );
}

#[tokio::test]
async fn test_defaults_without_stored_config() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    let defaults = config_manager
        .get_allocation_defaults()
        .await
        .expect("Should read defaults");
    assert_eq!(defaults, AllocationDefaults::default());
    assert_eq!(
        defaults.sort_methods,
        vec![SortMethod::FewestPlates, SortMethod::FewestRetrieval]
    );
    assert_eq!(defaults.warn_plate_count, 200);
}

#[tokio::test]
async fn test_stored_values_override_defaults() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_config(&conn, config_keys::DEFAULT_SAMPLE_STATUS, "Confirmed,Mutated").unwrap();
    insert_config(&conn, config_keys::DEFAULT_SAMPLE_EVIDENCE, "NGS, Sanger, null").unwrap();
    insert_config(&conn, config_keys::DEFAULT_PLATE_TYPE, "distro").unwrap();
    insert_config(&conn, config_keys::DEFAULT_SORT_METHODS, "lowest_thaw_count").unwrap();
    insert_config(&conn, config_keys::CANDIDATE_WARN_PLATE_COUNT, "50").unwrap();

    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");
    let defaults = config_manager.get_allocation_defaults().await.unwrap();

    assert_eq!(
        defaults.filter.sample_status,
        vec![Some(SampleStatus::Confirmed), Some(SampleStatus::Mutated)]
    );
    assert_eq!(
        defaults.filter.sample_evidence,
        vec![Some(SampleEvidence::Ngs), Some(SampleEvidence::Sanger), None]
    );
    assert_eq!(defaults.filter.plate_type, vec![Some(PlateType::Distro)]);
    assert_eq!(defaults.sort_methods, vec![SortMethod::LowestThawCount]);
    assert_eq!(defaults.warn_plate_count, 50);
}

#[tokio::test]
async fn test_invalid_values_fall_back_to_defaults() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_config(&conn, config_keys::DEFAULT_SAMPLE_STATUS, "Confirmed,Pending").unwrap();
    insert_config(&conn, config_keys::DEFAULT_PLATE_TYPE, "").unwrap();
    insert_config(&conn, config_keys::DEFAULT_SORT_METHODS, "fewest_plates,random").unwrap();
    insert_config(&conn, config_keys::CANDIDATE_WARN_PLATE_COUNT, "many").unwrap();

    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");
    let defaults = config_manager.get_allocation_defaults().await.unwrap();

    assert_eq!(defaults, AllocationDefaults::default());
}

#[tokio::test]
async fn test_empty_sort_methods_value_disables_narrowing() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    config_manager
        .set_global_config_value(config_keys::DEFAULT_SORT_METHODS, "")
        .unwrap();
    assert!(config_manager.get_default_sort_methods().await.unwrap().is_empty());

    // 覆盖写入
    config_manager
        .set_global_config_value(config_keys::DEFAULT_SORT_METHODS, "highest_thaw_count")
        .unwrap();
    assert_eq!(
        config_manager.get_default_sort_methods().await.unwrap(),
        vec![SortMethod::HighestThawCount]
    );
    assert_eq!(
        config_manager
            .get_global_config_value(config_keys::DEFAULT_SORT_METHODS)
            .unwrap()
            .as_deref(),
        Some("highest_thaw_count")
    );
}

#[tokio::test]
async fn test_invalid_warn_plate_count_logs_warning() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");
    config_manager
        .set_global_config_value(config_keys::CANDIDATE_WARN_PLATE_COUNT, "many")
        .unwrap();

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let count = config_manager.get_candidate_warn_plate_count().await.unwrap();
    assert_eq!(count, 200);

    let output = logs.contents();
    assert!(output.contains("WARN"), "missing warning: {}", output);
    assert!(output.contains(config_keys::CANDIDATE_WARN_PLATE_COUNT));
    assert!(output.contains("many"));
}
