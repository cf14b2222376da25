use crate::domain::model::{Booking, BookingId, InventoryEntry, Room, RoomId};
use crate::domain::port::{BookingLedger, InventoryStore, RoomCatalog, StoreError};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

/// インメモリ表形式ストア
/// MySQLアダプターと同じ契約（行単位の読み書き + versionガード）を
/// HashMapで実装する。統合テストとローカルデモで使用する
#[derive(Default)]
pub struct InMemoryTabularStore {
    rooms: Mutex<HashMap<RoomId, Room>>,
    inventory: Mutex<HashMap<(NaiveDate, RoomId), InventoryEntry>>,
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryTabularStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 客室カタログに客室を登録する（テスト・デモ用のセットアップ）
    pub fn insert_room(&self, room: Room) {
        let mut rooms = self.rooms.lock().unwrap();
        rooms.insert(room.id().clone(), room);
    }

    /// 在庫行を初期投入する（version 0 から開始）
    pub fn seed_inventory(&self, date: NaiveDate, room_id: RoomId, available_count: u32) {
        let entry = InventoryEntry::new(date, room_id.clone(), available_count, 0);
        let mut inventory = self.inventory.lock().unwrap();
        inventory.insert((date, room_id), entry);
    }

    /// 指定行の残在庫を取得する（検証用）
    pub fn available_count(&self, date: NaiveDate, room_id: &RoomId) -> Option<u32> {
        let inventory = self.inventory.lock().unwrap();
        inventory
            .get(&(date, room_id.clone()))
            .map(|entry| entry.available_count())
    }

    /// 台帳のレコード数を取得する（検証用）
    pub fn booking_count(&self) -> usize {
        self.bookings.lock().unwrap().len()
    }

    /// 台帳の全レコードを取得する（検証用）
    pub fn bookings(&self) -> Vec<Booking> {
        self.bookings.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoomCatalog for InMemoryTabularStore {
    async fn find_all(&self) -> Result<Vec<Room>, StoreError> {
        let rooms = self.rooms.lock().unwrap();
        let mut result: Vec<Room> = rooms.values().cloned().collect();
        // 客室IDの昇順でソート
        result.sort_by(|a, b| a.id().as_str().cmp(b.id().as_str()));
        Ok(result)
    }

    async fn find_by_id(&self, room_id: &RoomId) -> Result<Option<Room>, StoreError> {
        let rooms = self.rooms.lock().unwrap();
        Ok(rooms.get(room_id).cloned())
    }
}

#[async_trait]
impl InventoryStore for InMemoryTabularStore {
    async fn find_entry(
        &self,
        date: NaiveDate,
        room_id: &RoomId,
    ) -> Result<Option<InventoryEntry>, StoreError> {
        let inventory = self.inventory.lock().unwrap();
        Ok(inventory.get(&(date, room_id.clone())).cloned())
    }

    async fn update_entry(&self, entry: &InventoryEntry) -> Result<(), StoreError> {
        let mut inventory = self.inventory.lock().unwrap();
        let key = (entry.date(), entry.room_id().clone());
        let current = inventory.get(&key).ok_or_else(|| {
            StoreError::OperationFailed(format!(
                "在庫行が存在しません: {} / {}",
                entry.date(),
                entry.room_id()
            ))
        })?;

        // MySQLアダプターと同じversionガード
        if current.version() != entry.version() {
            return Err(StoreError::VersionConflict(format!(
                "在庫行が競合しました: {} / {}",
                entry.date(),
                entry.room_id()
            )));
        }

        inventory.insert(
            key,
            InventoryEntry::new(
                entry.date(),
                entry.room_id().clone(),
                entry.available_count(),
                entry.version() + 1,
            ),
        );
        Ok(())
    }
}

#[async_trait]
impl BookingLedger for InMemoryTabularStore {
    async fn append(&self, booking: &Booking) -> Result<(), StoreError> {
        let mut bookings = self.bookings.lock().unwrap();
        bookings.push(booking.clone());
        Ok(())
    }

    fn next_identity(&self) -> BookingId {
        BookingId::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Money;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn room(id: &str) -> Room {
        Room::new(
            RoomId::new(id).unwrap(),
            format!("Room {}", id),
            "standard".to_string(),
            "Test room".to_string(),
            "https://example.com/room.jpg".to_string(),
            Money::usd(15000),
            Money::usd(18000),
            Money::usd(5000),
            Money::usd(2500),
            vec![],
            3,
        )
    }

    #[tokio::test]
    async fn test_rooms_sorted_by_id() {
        let store = InMemoryTabularStore::new();
        store.insert_room(room("R2"));
        store.insert_room(room("R1"));

        let rooms = store.find_all().await.unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].id().as_str(), "R1");
        assert_eq!(rooms[1].id().as_str(), "R2");
    }

    #[tokio::test]
    async fn test_update_entry_bumps_version() {
        let store = InMemoryTabularStore::new();
        let room_id = RoomId::new("R1").unwrap();
        store.seed_inventory(date("2024-06-01"), room_id.clone(), 3);

        let mut entry = store
            .find_entry(date("2024-06-01"), &room_id)
            .await
            .unwrap()
            .unwrap();
        entry.decrement().unwrap();
        store.update_entry(&entry).await.unwrap();

        let updated = store
            .find_entry(date("2024-06-01"), &room_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.available_count(), 2);
        assert_eq!(updated.version(), 1);
    }

    #[tokio::test]
    async fn test_stale_version_is_rejected() {
        let store = InMemoryTabularStore::new();
        let room_id = RoomId::new("R1").unwrap();
        store.seed_inventory(date("2024-06-01"), room_id.clone(), 3);

        let entry = store
            .find_entry(date("2024-06-01"), &room_id)
            .await
            .unwrap()
            .unwrap();

        // 1回目の書き込みでversionが進む
        store.update_entry(&entry).await.unwrap();
        // 同じ読み取り結果での2回目の書き込みは競合
        let result = store.update_entry(&entry).await;
        assert!(matches!(result, Err(StoreError::VersionConflict(_))));
    }
}
