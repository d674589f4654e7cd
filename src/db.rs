// ==========================================
// 构建分配引擎 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发读写时的偶发 busy 错误
// - 提供库存库 schema 初始化（测试/演示数据使用）
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version（与 `migrations/v0.*.sql` 对齐）
///
/// 版本号仅用于告警，不做自动迁移。
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 库存库 schema
const INVENTORY_SCHEMA_SQL: &str = include_str!("../migrations/v0.1_inventory_schema.sql");

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 创建库存库表结构（幂等）
pub fn ensure_inventory_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(INVENTORY_SCHEMA_SQL)
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// 检查 schema_version 与代码期望是否一致（不一致仅告警）
pub fn warn_on_schema_mismatch(conn: &Connection) {
    match read_schema_version(conn) {
        Ok(Some(v)) if v == CURRENT_SCHEMA_VERSION => {}
        Ok(Some(v)) => tracing::warn!(
            actual = v,
            expected = CURRENT_SCHEMA_VERSION,
            "库存库 schema_version 与代码不一致"
        ),
        Ok(None) => tracing::warn!("库存库缺少 schema_version 表"),
        Err(e) => tracing::warn!("读取 schema_version 失败: {}", e),
    }
}
