use crate::adapter::store_error::StoreBackendError;
use sqlx::{MySql, Pool};

/// ストアのマイグレーションを管理する構造体
pub struct StoreMigration {
    pool: Pool<MySql>,
}

impl StoreMigration {
    /// 新しいStoreMigrationインスタンスを作成
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    /// マイグレーションを実行
    /// べき等性を保証（CREATE TABLE IF NOT EXISTS）。
    /// 予約台帳テーブルもここで作成されるため、初回予約時の遅延作成は不要になる
    pub async fn run(&self) -> Result<(), StoreBackendError> {
        // マイグレーションファイルのリスト
        let migrations = vec![
            include_str!("../../migrations/001_create_rooms_table.sql"),
            include_str!("../../migrations/002_create_inventory_entries_table.sql"),
            include_str!("../../migrations/003_create_bookings_table.sql"),
        ];

        // 各マイグレーションを順番に実行
        for (index, migration_sql) in migrations.iter().enumerate() {
            println!("Running migration {}...", index + 1);
            sqlx::query(migration_sql)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    StoreBackendError::MigrationError(format!(
                        "Migration {} failed: {}",
                        index + 1,
                        e
                    ))
                })?;
            println!("Migration {} completed successfully", index + 1);
        }

        println!("All migrations completed successfully");
        Ok(())
    }
}
