use crate::application::error::ApplicationError;
use crate::domain::error::DomainError;
use crate::domain::model::{
    BookingId, Money, RatePlanCatalog, Room, RoomId, StayDates, StayRequest,
};
use crate::domain::port::{BookingLedger, InventoryStore, Logger, RoomCatalog};
use crate::domain::pricing;
use crate::domain::service::{AvailabilityChecker, BookingCommitter, CommitFailure};
use std::sync::Arc;

/// 構成済みのストア一式
/// 客室カタログ・空室チェッカー・予約コミッターを束ねる
pub struct ReadyStore {
    rooms: Arc<dyn RoomCatalog>,
    checker: AvailabilityChecker,
    committer: BookingCommitter,
}

impl ReadyStore {
    pub fn new(
        rooms: Arc<dyn RoomCatalog>,
        inventory: Arc<dyn InventoryStore>,
        ledger: Arc<dyn BookingLedger>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            rooms,
            checker: AvailabilityChecker::new(inventory.clone()),
            committer: BookingCommitter::new(inventory, ledger, logger),
        }
    }
}

/// ストアの状態
/// 未構成（オフライン）は暗黙のnullチェックではなく明示的な型で表現し、
/// すべての操作がこの状態を明示的に分岐する
pub enum StoreState {
    /// ストアが構成済みで利用可能
    Ready(ReadyStore),
    /// デモ・オフライン運用モード
    /// 空室照会は常にtrue、予約は擬似IDで成功を返す（意図的な縮退動作）
    Offline,
}

/// 予約確定の結果
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfirmation {
    pub booking_id: BookingId,
    pub total_price: Money,
}

/// 予約アプリケーションサービス
/// 料金計算・空室チェック・予約コミットを1つのリクエスト/レスポンス契約に束ねる。
/// トランスポート層はこのサービスだけを呼び出す
pub struct BookingService {
    state: StoreState,
    rate_plans: RatePlanCatalog,
}

impl BookingService {
    /// 新しい予約サービスを作成
    ///
    /// # Arguments
    /// * `state` - 構成済みストアまたはオフラインモード
    /// * `rate_plans` - 設定済みレートプランのカタログ
    pub fn new(state: StoreState, rate_plans: RatePlanCatalog) -> Self {
        Self { state, rate_plans }
    }

    /// すべての客室を取得
    /// オフラインモードでは空のリストを返す（エラーにしない）
    pub async fn list_rooms(&self) -> Result<Vec<Room>, ApplicationError> {
        match &self.state {
            StoreState::Ready(store) => Ok(store.rooms.find_all().await?),
            StoreState::Offline => Ok(Vec::new()),
        }
    }

    /// 宿泊期間の全夜に空きがあるかチェック（読み取り専用）
    /// オフラインモードでは常にtrueを返す（意図的な縮退動作）
    pub async fn check_availability(
        &self,
        room_id: &RoomId,
        stay: &StayDates,
    ) -> Result<bool, ApplicationError> {
        match &self.state {
            StoreState::Ready(store) => Ok(store.checker.is_available(room_id, stay).await?),
            StoreState::Offline => Ok(true),
        }
    }

    /// 予約を確定する
    ///
    /// 料金はサーバー側で計算し、無効な宿泊条件はストアに触れる前に失敗させる。
    /// 空室の最終判定はコミッターがロック内で再検証する
    ///
    /// # Returns
    /// * `Ok(BookingConfirmation)` - 予約ID と確定金額
    /// * `Err(ApplicationError)` - 検証失敗 / 満室 / 競合 / ストア障害
    pub async fn book(
        &self,
        request: StayRequest,
    ) -> Result<BookingConfirmation, ApplicationError> {
        let store = match &self.state {
            StoreState::Ready(store) => store,
            StoreState::Offline => {
                // 擬似予約: ストアには一切アクセスしない
                return Ok(BookingConfirmation {
                    booking_id: BookingId::simulated(),
                    total_price: Money::usd(0),
                });
            }
        };

        let room = store
            .rooms
            .find_by_id(request.room_id())
            .await?
            .ok_or_else(|| {
                ApplicationError::NotFound(format!(
                    "客室が見つかりません: {}",
                    request.room_id()
                ))
            })?;

        let plan = self
            .rate_plans
            .resolve(request.rate_plan_id())
            .ok_or_else(|| {
                DomainError::UnknownRatePlan(request.rate_plan_id().to_string())
            })?;

        let total_price = pricing::quote(&room, request.guests(), request.stay(), plan)?;

        let booking_id = store
            .committer
            .commit(&request, total_price)
            .await
            .map_err(|failure| match failure {
                CommitFailure::Unavailable(date) => {
                    ApplicationError::DomainError(DomainError::Unavailable(date))
                }
                CommitFailure::Conflict(date) => {
                    ApplicationError::DomainError(DomainError::Conflict(date))
                }
                CommitFailure::Store(err) => ApplicationError::StoreError(err),
            })?;

        Ok(BookingConfirmation {
            booking_id,
            total_price,
        })
    }

    /// 設定済みレートプランのカタログ
    pub fn rate_plans(&self) -> &RatePlanCatalog {
        &self.rate_plans
    }
}
