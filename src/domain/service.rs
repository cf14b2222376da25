// ドメインサービス
// 複数の在庫行にまたがるビジネスロジックを実装

use crate::domain::model::{Booking, BookingId, InventoryEntry, Money, RoomId, StayRequest};
use crate::domain::port::{BookingLedger, InventoryStore, Logger, StoreError};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// 空室チェッカー
/// 宿泊期間の全夜に残在庫があるかを読み取り専用で確認する
pub struct AvailabilityChecker {
    inventory: Arc<dyn InventoryStore>,
}

impl AvailabilityChecker {
    /// 新しい空室チェッカーを作成
    pub fn new(inventory: Arc<dyn InventoryStore>) -> Self {
        Self { inventory }
    }

    /// 宿泊期間のうち最初に空きがない日付を返す
    ///
    /// 各夜を日付順に列挙し、在庫エントリが存在しないか
    /// `available_count` が0の夜を検出した時点で打ち切る。
    /// エントリの欠落は「無制限」ではなく在庫ゼロとして扱う。
    /// ストア障害は「満室」と混同せず `StoreError` として伝播する
    ///
    /// # Returns
    /// * `Ok(None)` - 全夜に空きがある
    /// * `Ok(Some(date))` - 最初に空きがなかった日付
    /// * `Err(StoreError)` - ストア障害
    pub async fn first_blocked_night(
        &self,
        room_id: &RoomId,
        stay: &crate::domain::model::StayDates,
    ) -> Result<Option<NaiveDate>, StoreError> {
        for night in stay.nights() {
            match self.inventory.find_entry(night, room_id).await? {
                Some(entry) if entry.has_capacity() => continue,
                _ => return Ok(Some(night)),
            }
        }
        Ok(None)
    }

    /// 宿泊期間の全夜に空きがあるかチェック
    pub async fn is_available(
        &self,
        room_id: &RoomId,
        stay: &crate::domain::model::StayDates,
    ) -> Result<bool, StoreError> {
        Ok(self.first_blocked_night(room_id, stay).await?.is_none())
    }
}

/// 客室ごとのコミット直列化ロック
/// バックエンドが複数行トランザクションを提供しないため、
/// プロセス内の同一客室へのコミットをミューテックスで直列化する
#[derive(Clone, Default)]
pub struct RoomLocks {
    locks: Arc<StdMutex<HashMap<RoomId, Arc<Mutex<()>>>>>,
}

impl RoomLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定した客室のロックを取得する
    /// ガードを保持している間、その客室へのコミットは他に実行されない
    pub async fn acquire(&self, room_id: &RoomId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap();
            locks
                .entry(room_id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

/// コミット失敗の分類
/// 「満室」「競合」「ストア障害」を呼び出し側が区別できるようにする
#[derive(Debug, Clone, PartialEq)]
pub enum CommitFailure {
    /// 再検証で空きがなかった日付。ストアは一切変更されていない
    Unavailable(NaiveDate),
    /// 読み取り後に別の書き込みが在庫行を変更した日付。補償ロールバック済み
    Conflict(NaiveDate),
    /// ストア障害。補償ロールバックを試行済み
    Store(StoreError),
}

impl std::fmt::Display for CommitFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitFailure::Unavailable(date) => write!(f, "No availability on {}", date),
            CommitFailure::Conflict(date) => write!(f, "Concurrent write conflict on {}", date),
            CommitFailure::Store(err) => write!(f, "Store failure: {}", err),
        }
    }
}

impl std::error::Error for CommitFailure {}

/// 予約コミッター
/// 再検証 → 夜ごとの在庫デクリメント → 台帳追記を1つの論理操作として実行する。
///
/// 同時実行性の契約:
/// - プロセス内では `RoomLocks` により同一客室のコミットを直列化する
/// - プロセス外の書き込みは在庫行のバージョントークンで検出し、
///   自動リトライせず `Conflict` として返す（呼び出し側が予約全体を再試行してよい）
/// - 途中失敗時は同一呼び出し内でデクリメント済みの夜を補償ロールバックする
pub struct BookingCommitter {
    inventory: Arc<dyn InventoryStore>,
    ledger: Arc<dyn BookingLedger>,
    locks: RoomLocks,
    logger: Arc<dyn Logger>,
}

const COMPONENT: &str = "BookingCommitter";

impl BookingCommitter {
    /// 新しい予約コミッターを作成
    pub fn new(
        inventory: Arc<dyn InventoryStore>,
        ledger: Arc<dyn BookingLedger>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            inventory,
            ledger,
            locks: RoomLocks::new(),
            logger,
        }
    }

    /// 予約を確定する
    ///
    /// # Arguments
    /// * `request` - 検証済みの予約リクエスト
    /// * `total_price` - 確定済みの合計金額
    ///
    /// # Returns
    /// * `Ok(BookingId)` - 予約成功
    /// * `Err(CommitFailure)` - 予約失敗（分類は `CommitFailure` を参照）
    pub async fn commit(
        &self,
        request: &StayRequest,
        total_price: Money,
    ) -> Result<BookingId, CommitFailure> {
        let room_id = request.room_id();
        let _guard = self.locks.acquire(room_id).await;

        // 事前の空室チェックは信用せず、ロック内で必ず再検証する
        let checker = AvailabilityChecker::new(self.inventory.clone());
        if let Some(blocked) = checker
            .first_blocked_night(room_id, request.stay())
            .await
            .map_err(CommitFailure::Store)?
        {
            return Err(CommitFailure::Unavailable(blocked));
        }

        // 夜ごとにデクリメント（日付順）。バックエンドは行単位の書き込みしか持たない
        let mut decremented: Vec<NaiveDate> = Vec::new();
        for night in request.stay().nights() {
            match self.decrement_night(night, room_id).await {
                Ok(()) => decremented.push(night),
                Err(failure) => {
                    self.log_commit_failure(request, night, &failure);
                    self.rollback(room_id, &decremented).await;
                    return Err(failure);
                }
            }
        }

        // 台帳追記。ここで失敗した場合もデクリメント済みの夜を戻す
        let booking_id = self.ledger.next_identity();
        let booking = Booking::new(booking_id.clone(), request, total_price);
        if let Err(err) = self.ledger.append(&booking).await {
            let failure = CommitFailure::Store(err);
            self.log_commit_failure(request, request.stay().check_in(), &failure);
            self.rollback(room_id, &decremented).await;
            return Err(failure);
        }

        Ok(booking_id)
    }

    /// 1夜分の在庫をデクリメントして書き戻す
    async fn decrement_night(
        &self,
        night: NaiveDate,
        room_id: &RoomId,
    ) -> Result<(), CommitFailure> {
        let mut entry = self
            .inventory
            .find_entry(night, room_id)
            .await
            .map_err(CommitFailure::Store)?
            .ok_or(CommitFailure::Unavailable(night))?;

        entry
            .decrement()
            .map_err(|_| CommitFailure::Unavailable(night))?;

        self.inventory.update_entry(&entry).await.map_err(|err| {
            match err {
                StoreError::VersionConflict(_) => CommitFailure::Conflict(night),
                other => CommitFailure::Store(other),
            }
        })
    }

    /// 補償ロールバック
    /// この呼び出しでデクリメント済みの夜を再インクリメントする。
    /// ベストエフォートであり、戻せなかった夜はコンテキスト付きでログに残す
    async fn rollback(&self, room_id: &RoomId, decremented: &[NaiveDate]) {
        for night in decremented {
            if let Err(err) = self.restore_night(*night, room_id).await {
                let mut context = HashMap::new();
                context.insert("room_id".to_string(), room_id.to_string());
                context.insert("date".to_string(), night.to_string());
                context.insert("operation".to_string(), "rollback".to_string());
                self.logger.error(
                    COMPONENT,
                    &format!("補償ロールバックに失敗しました: {}", err),
                    Some(context),
                );
            }
        }
    }

    async fn restore_night(&self, night: NaiveDate, room_id: &RoomId) -> Result<(), StoreError> {
        let mut entry = self
            .inventory
            .find_entry(night, room_id)
            .await?
            .ok_or_else(|| {
                StoreError::OperationFailed(format!(
                    "ロールバック対象の在庫行が見つかりません: {} / {}",
                    night, room_id
                ))
            })?;
        entry.restore();
        self.inventory.update_entry(&entry).await
    }

    fn log_commit_failure(&self, request: &StayRequest, night: NaiveDate, failure: &CommitFailure) {
        let mut context = HashMap::new();
        context.insert("room_id".to_string(), request.room_id().to_string());
        context.insert(
            "date_range".to_string(),
            format!(
                "{}..{}",
                request.stay().check_in(),
                request.stay().check_out()
            ),
        );
        context.insert("failed_night".to_string(), night.to_string());
        context.insert("operation".to_string(), "commit".to_string());
        self.logger.error(
            COMPONENT,
            &format!("予約コミットに失敗しました: {}", failure),
            Some(context),
        );
    }
}
