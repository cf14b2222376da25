use serde::{Deserialize, Serialize};

/// 予約作成用のリクエストDTO
/// roomId / startDate / endDate は必須。人数とレートプランは省略可能で、
/// 省略時は大人1人・子供0人・標準プラン（朝食なし）として扱う
#[derive(Serialize, Deserialize)]
pub struct BookRoomRequest {
    pub room_id: String,
    pub start_date: String,
    pub end_date: String,
    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub rate_plan_id: Option<String>,
}

/// 空室照会用のクエリパラメータ
/// 3つすべて必須（欠落はクエリ拒否として400になる）
#[derive(Deserialize)]
pub struct AvailabilityQueryParams {
    pub room_id: String,
    pub start_date: String,
    pub end_date: String,
}
