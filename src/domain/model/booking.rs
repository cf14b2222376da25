use crate::domain::model::{BookingId, GuestCount, Money, RatePlanId, RoomId, StayDates};

/// 予約リクエスト
/// 検証済みの値オブジェクトのみで構成される一時的な値
#[derive(Debug, Clone, PartialEq)]
pub struct StayRequest {
    room_id: RoomId,
    stay: StayDates,
    guests: GuestCount,
    rate_plan_id: RatePlanId,
}

impl StayRequest {
    pub fn new(
        room_id: RoomId,
        stay: StayDates,
        guests: GuestCount,
        rate_plan_id: RatePlanId,
    ) -> Self {
        Self {
            room_id,
            stay,
            guests,
            rate_plan_id,
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn stay(&self) -> &StayDates {
        &self.stay
    }

    pub fn guests(&self) -> &GuestCount {
        &self.guests
    }

    pub fn rate_plan_id(&self) -> &RatePlanId {
        &self.rate_plan_id
    }
}

/// 予約台帳レコード
/// コミット成功ごとに1件だけ追記される。エンジンは変更も削除もしない
/// （キャンセルを導入する場合も新しいレコードの追記で表現する）
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    id: BookingId,
    room_id: RoomId,
    stay: StayDates,
    guests: GuestCount,
    rate_plan_id: RatePlanId,
    total_price: Money,
}

impl Booking {
    /// 予約リクエストと確定金額から台帳レコードを作成
    pub fn new(id: BookingId, request: &StayRequest, total_price: Money) -> Self {
        Self {
            id,
            room_id: request.room_id().clone(),
            stay: *request.stay(),
            guests: *request.guests(),
            rate_plan_id: request.rate_plan_id().clone(),
            total_price,
        }
    }

    pub fn id(&self) -> &BookingId {
        &self.id
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn stay(&self) -> &StayDates {
        &self.stay
    }

    pub fn guests(&self) -> &GuestCount {
        &self.guests
    }

    pub fn rate_plan_id(&self) -> &RatePlanId {
        &self.rate_plan_id
    }

    pub fn total_price(&self) -> Money {
        self.total_price
    }
}
