use crate::adapter::store_error::StoreBackendError;
use crate::domain::model::{Booking, BookingId, InventoryEntry, Money, Room, RoomId};
use crate::domain::port::{BookingLedger, InventoryStore, RoomCatalog, StoreError};
use async_trait::async_trait;
use chrono::NaiveDate;

// MySQL関連のインポート
use sqlx::{MySql, Pool, Row};

/// MySQL表形式ストア
/// 客室カタログ・在庫・予約台帳の3テーブルを単一行の読み書きだけで操作する。
/// 複数行トランザクションは意図的に使用しない（行単位の操作しか持たない
/// 外部ストアをモデル化しているため）。在庫行の更新はversion列で保護する
#[derive(Clone)]
pub struct MySqlTabularStore {
    pool: Pool<MySql>,
}

impl MySqlTabularStore {
    /// 新しいMySQL表形式ストアを作成
    ///
    /// # Arguments
    /// * `pool` - MySQLコネクションプール
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    fn room_from_row(row: &sqlx::mysql::MySqlRow) -> Result<Room, StoreError> {
        let room_id = RoomId::new(row.get::<String, _>("id"))
            .map_err(|e| StoreError::FetchFailed(format!("客室IDの解析に失敗しました: {}", e)))?;

        // アメニティはカンマ区切りの1セルに格納される
        let amenities: Vec<String> = row
            .get::<String, _>("amenities")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Room::new(
            room_id,
            row.get("name"),
            row.get("room_type"),
            row.get("description"),
            row.get("image_url"),
            Money::usd(row.get::<i64, _>("base_price_single_cents")),
            Money::usd(row.get::<i64, _>("base_price_double_cents")),
            Money::usd(row.get::<i64, _>("extra_adult_cents")),
            Money::usd(row.get::<i64, _>("extra_child_cents")),
            amenities,
            row.get::<u32, _>("max_occupancy"),
        ))
    }
}

#[async_trait]
impl RoomCatalog for MySqlTabularStore {
    async fn find_all(&self) -> Result<Vec<Room>, StoreError> {
        // roomsテーブルからすべての客室を取得
        // 客室IDの昇順で並べる
        let rows = sqlx::query(
            r#"
            SELECT id, name, room_type, description, image_url,
                   base_price_single_cents, base_price_double_cents,
                   extra_adult_cents, extra_child_cents, amenities, max_occupancy
            FROM rooms ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreBackendError::QueryError(format!("客室一覧の取得に失敗しました: {}", e)))
        .map_err(StoreError::from)?;

        let mut rooms = Vec::new();
        for row in rows {
            rooms.push(Self::room_from_row(&row)?);
        }
        Ok(rooms)
    }

    async fn find_by_id(&self, room_id: &RoomId) -> Result<Option<Room>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, room_type, description, image_url,
                   base_price_single_cents, base_price_double_cents,
                   extra_adult_cents, extra_child_cents, amenities, max_occupancy
            FROM rooms WHERE id = ?
            "#,
        )
        .bind(room_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreBackendError::QueryError(format!("客室の取得に失敗しました: {}", e)))
        .map_err(StoreError::from)?;

        match row {
            Some(row) => Ok(Some(Self::room_from_row(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl InventoryStore for MySqlTabularStore {
    async fn find_entry(
        &self,
        date: NaiveDate,
        room_id: &RoomId,
    ) -> Result<Option<InventoryEntry>, StoreError> {
        let row = sqlx::query(
            "SELECT stay_date, room_id, available_count, version \
             FROM inventory_entries WHERE stay_date = ? AND room_id = ?",
        )
        .bind(date)
        .bind(room_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreBackendError::QueryError(format!("在庫の取得に失敗しました: {}", e)))
        .map_err(StoreError::from)?;

        match row {
            Some(row) => {
                let room_id = RoomId::new(row.get::<String, _>("room_id")).map_err(|e| {
                    StoreError::FetchFailed(format!("客室IDの解析に失敗しました: {}", e))
                })?;
                Ok(Some(InventoryEntry::new(
                    row.get::<NaiveDate, _>("stay_date"),
                    room_id,
                    row.get::<u32, _>("available_count"),
                    row.get::<u64, _>("version"),
                )))
            }
            None => Ok(None),
        }
    }

    async fn update_entry(&self, entry: &InventoryEntry) -> Result<(), StoreError> {
        // 読み取り時のversionをガードとする単一行の条件付き更新。
        // 影響行数が0の場合は読み取り後に別の書き込みがあったことを意味する
        let result = sqlx::query(
            "UPDATE inventory_entries \
             SET available_count = ?, version = version + 1 \
             WHERE stay_date = ? AND room_id = ? AND version = ?",
        )
        .bind(entry.available_count())
        .bind(entry.date())
        .bind(entry.room_id().as_str())
        .bind(entry.version())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreBackendError::QueryError(format!("在庫の更新に失敗しました: {}", e)))
        .map_err(StoreError::from)?;

        if result.rows_affected() == 0 {
            return Err(StoreBackendError::RowConflict(format!(
                "在庫行が競合しました: {} / {}",
                entry.date(),
                entry.room_id()
            ))
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl BookingLedger for MySqlTabularStore {
    async fn append(&self, booking: &Booking) -> Result<(), StoreError> {
        // 台帳は追記専用。UPDATEやDELETEは発行しない
        sqlx::query(
            r#"
            INSERT INTO bookings
                (id, room_id, check_in, check_out, adults, children, rate_plan_id, total_price_cents)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(booking.id().as_str())
        .bind(booking.room_id().as_str())
        .bind(booking.stay().check_in())
        .bind(booking.stay().check_out())
        .bind(booking.guests().adults())
        .bind(booking.guests().children())
        .bind(booking.rate_plan_id().as_str())
        .bind(booking.total_price().amount_cents())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreBackendError::QueryError(format!("予約台帳への追記に失敗しました: {}", e)))
        .map_err(StoreError::from)?;

        Ok(())
    }

    fn next_identity(&self) -> BookingId {
        BookingId::new()
    }
}
