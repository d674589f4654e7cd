// ==========================================
// 构建分配引擎 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享连接、仓储、配置与 API 实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::BuildApi;
use crate::config::ConfigManager;
use crate::db::{ensure_inventory_schema, open_sqlite_connection, warn_on_schema_mismatch};
use crate::repository::InventoryRepository;

/// 应用状态
///
/// 库存仓储与配置管理器共享同一个连接；并发请求在连接锁上串行化读取。
pub struct AppState {
    db_path: String,
    pub inventory_repo: Arc<InventoryRepository>,
    pub config_manager: Arc<ConfigManager>,
    pub build_api: Arc<BuildApi<InventoryRepository, ConfigManager>>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 数据库不存在时会创建并初始化库存表结构（幂等）。
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        ensure_inventory_schema(&conn).map_err(|e| format!("库存表结构初始化失败: {}", e))?;
        warn_on_schema_mismatch(&conn);
        let conn = Arc::new(Mutex::new(conn));

        let inventory_repo = Arc::new(InventoryRepository::from_connection(conn.clone()));
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let build_api = Arc::new(BuildApi::new(
            inventory_repo.clone(),
            config_manager.clone(),
        ));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            inventory_repo,
            config_manager,
            build_api,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 优先级
/// 1. 环境变量 BUILD_ALLOCATOR_DB_PATH
/// 2. 用户数据目录/build-allocator/build_allocator.db
/// 3. ./build_allocator.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("BUILD_ALLOCATOR_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./build_allocator.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("build-allocator");
        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("build_allocator.db");
        }
    }

    path.to_string_lossy().to_string()
}
