// 料金計算
// 純粋関数として実装し、同じ入力に対して常に同じ結果を返す

use crate::domain::error::DomainError;
use crate::domain::model::{GuestCount, Money, RatePlan, Room, StayDates};

/// 宿泊料金を見積もる
///
/// 1泊あたりの基本料金は「大人1人・子供0人」の場合のみシングル料金、
/// それ以外はダブル料金（人数別の段階料金ではない、仕様上の単純化）。
/// 追加料金は3人目以降の大人と、子供全員に対して加算する。
/// 合計 = (基本 + 追加) × 泊数 × レートプラン倍率。
///
/// # Arguments
/// * `room` - 客室カタログエントリ
/// * `guests` - 宿泊人数（検証済み）
/// * `stay` - 宿泊期間（検証済み、泊数1以上が保証される）
/// * `plan` - 解決済みレートプラン
///
/// # Returns
/// * `Ok(Money)` - 合計金額
/// * `Err(DomainError::OccupancyExceeded)` - 合計人数が最大定員を超過
pub fn quote(
    room: &Room,
    guests: &GuestCount,
    stay: &StayDates,
    plan: &RatePlan,
) -> Result<Money, DomainError> {
    if guests.total() > room.max_occupancy() {
        return Err(DomainError::OccupancyExceeded {
            guests: guests.total(),
            max_occupancy: room.max_occupancy(),
        });
    }

    let base = if guests.adults() == 1 && guests.children() == 0 {
        room.base_price_single()
    } else {
        room.base_price_double()
    };

    // 最初の2人の大人は追加料金なし
    let mut surcharge = Money::usd(0);
    if guests.adults() > 2 {
        surcharge = surcharge.add(&room.extra_adult().multiply(guests.adults() - 2))?;
    }
    if guests.children() > 0 {
        surcharge = surcharge.add(&room.extra_child().multiply(guests.children()))?;
    }

    let nightly_rate = base.add(&surcharge)?;
    Ok(plan.apply(nightly_rate.multiply(stay.night_count())))
}
