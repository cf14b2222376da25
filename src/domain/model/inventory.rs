use crate::domain::error::DomainError;
use crate::domain::model::RoomId;
use chrono::NaiveDate;

/// 在庫エントリ
/// 1客室・1泊分の残り販売可能数を管理する
/// `(date, room_id)` の組で一意。Booking Committer以外は変更してはならない
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryEntry {
    date: NaiveDate,
    room_id: RoomId,
    available_count: u32,
    version: u64,
}

impl InventoryEntry {
    /// 新しい在庫エントリを作成
    ///
    /// # Arguments
    /// * `date` - 宿泊日
    /// * `room_id` - 客室ID
    /// * `available_count` - 残り販売可能数
    /// * `version` - 楽観的同時実行制御用のバージョントークン
    pub fn new(date: NaiveDate, room_id: RoomId, available_count: u32, version: u64) -> Self {
        Self {
            date,
            room_id,
            available_count,
            version,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn available_count(&self) -> u32 {
        self.available_count
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// この夜に空きがあるかチェック
    pub fn has_capacity(&self) -> bool {
        self.available_count > 0
    }

    /// 在庫を1つ消費する
    /// u32のため負の値には型レベルでならないが、0からの消費は明示的に拒否する
    ///
    /// # Returns
    /// * `Ok(())` - 消費成功
    /// * `Err(DomainError::Unavailable)` - 空きがない
    pub fn decrement(&mut self) -> Result<(), DomainError> {
        if !self.has_capacity() {
            return Err(DomainError::Unavailable(self.date));
        }
        self.available_count -= 1;
        Ok(())
    }

    /// 在庫を1つ戻す（コミット途中失敗時の補償用）
    pub fn restore(&mut self) {
        self.available_count += 1;
    }
}
