// 出力ポート
// ドメイン層が外部に依存する機能をトレイトとして定義
// アダプター層でこれらのトレイトを実装する

use crate::domain::model::{Booking, BookingId, InventoryEntry, Room, RoomId};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// ロガートレイト
/// ログ出力を抽象化するポート
pub trait Logger: Send + Sync {
    /// デバッグレベルのログを出力
    fn debug(&self, component: &str, message: &str, context: Option<HashMap<String, String>>);

    /// 情報レベルのログを出力
    fn info(&self, component: &str, message: &str, context: Option<HashMap<String, String>>);

    /// 警告レベルのログを出力
    fn warn(&self, component: &str, message: &str, context: Option<HashMap<String, String>>);

    /// エラーレベルのログを出力
    fn error(&self, component: &str, message: &str, context: Option<HashMap<String, String>>);
}

/// ストアエラー型
/// 表形式ストアの操作で発生するエラーを表現する
/// インフラ障害は「満室」と区別して呼び出し側に伝える
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// ストアへの接続に失敗
    ConnectionFailed(String),
    /// 操作に失敗
    OperationFailed(String),
    /// データの取得に失敗
    FetchFailed(String),
    /// ガード付き書き込みが競合で失敗（バージョントークンが古い）
    VersionConflict(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            StoreError::OperationFailed(msg) => write!(f, "Operation failed: {}", msg),
            StoreError::FetchFailed(msg) => write!(f, "Fetch failed: {}", msg),
            StoreError::VersionConflict(msg) => write!(f, "Version conflict: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// 客室カタログトレイト
/// 客室マスタの読み取りを抽象化する。エンジンからは読み取り専用
#[async_trait]
pub trait RoomCatalog: Send + Sync {
    /// すべての客室を取得する
    ///
    /// # Returns
    /// * `Ok(Vec<Room>)` - 客室のリスト
    /// * `Err(StoreError)` - 取得失敗
    async fn find_all(&self) -> Result<Vec<Room>, StoreError>;

    /// 客室IDで客室を検索する
    ///
    /// # Arguments
    /// * `room_id` - 検索する客室ID
    ///
    /// # Returns
    /// * `Ok(Some(Room))` - 客室が見つかった
    /// * `Ok(None)` - 客室が見つからなかった
    /// * `Err(StoreError)` - 検索失敗
    async fn find_by_id(&self, room_id: &RoomId) -> Result<Option<Room>, StoreError>;
}

/// 在庫ストアトレイト
/// 在庫エントリの行単位の読み書きを抽象化する
/// バックエンドは行単位の操作しか提供しない前提であり、
/// 複数行にまたがる一貫性はドメイン層（Booking Committer）が担う
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// `(日付, 客室ID)` で在庫エントリを検索する
    ///
    /// # Returns
    /// * `Ok(Some(InventoryEntry))` - エントリが見つかった
    /// * `Ok(None)` - エントリが存在しない（在庫ゼロ扱い）
    /// * `Err(StoreError)` - 検索失敗
    async fn find_entry(
        &self,
        date: NaiveDate,
        room_id: &RoomId,
    ) -> Result<Option<InventoryEntry>, StoreError>;

    /// 在庫エントリを書き戻す
    /// `entry.version()` をガードとする単一行の条件付き更新。
    /// 読み取り後に他の書き込みがあった場合は `VersionConflict` を返す
    ///
    /// # Returns
    /// * `Ok(())` - 更新成功
    /// * `Err(StoreError::VersionConflict)` - 競合する書き込みを検出
    /// * `Err(StoreError)` - 更新失敗
    async fn update_entry(&self, entry: &InventoryEntry) -> Result<(), StoreError>;
}

/// 予約台帳トレイト
/// 追記専用の台帳を抽象化する
#[async_trait]
pub trait BookingLedger: Send + Sync {
    /// 台帳に予約レコードを1件追記する
    ///
    /// # Returns
    /// * `Ok(())` - 追記成功
    /// * `Err(StoreError)` - 追記失敗
    async fn append(&self, booking: &Booking) -> Result<(), StoreError>;

    /// 新しい一意の予約IDを生成する
    fn next_identity(&self) -> BookingId;
}
