use crate::application::service::BookingConfirmation;
use crate::domain::model::Room;
use serde::Serialize;

/// 客室一覧用のレスポンスDTO
#[derive(Serialize)]
pub struct RoomResponse {
    pub id: String,
    pub name: String,
    pub room_type: String,
    pub description: String,
    pub image_url: String,
    pub base_price_single: String,
    pub base_price_double: String,
    pub extra_adult: String,
    pub extra_child: String,
    pub currency: String,
    pub amenities: Vec<String>,
    pub max_occupancy: u32,
}

impl RoomResponse {
    /// ドメインオブジェクトからRoomResponseを作成
    pub fn from_room(room: &Room) -> Self {
        Self {
            id: room.id().to_string(),
            name: room.name().to_string(),
            room_type: room.room_type().to_string(),
            description: room.description().to_string(),
            image_url: room.image_url().to_string(),
            base_price_single: room.base_price_single().to_decimal_string(),
            base_price_double: room.base_price_double().to_decimal_string(),
            extra_adult: room.extra_adult().to_decimal_string(),
            extra_child: room.extra_child().to_decimal_string(),
            currency: room.base_price_single().currency(),
            amenities: room.amenities().to_vec(),
            max_occupancy: room.max_occupancy(),
        }
    }
}

/// 空室照会用のレスポンスDTO
#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub is_available: bool,
}

/// 予約確定用のレスポンスDTO
#[derive(Serialize)]
pub struct BookRoomResponse {
    pub success: bool,
    pub booking_id: String,
    pub total_price: String,
    pub currency: String,
}

impl BookRoomResponse {
    /// 予約確定結果からBookRoomResponseを作成
    pub fn from_confirmation(confirmation: &BookingConfirmation) -> Self {
        Self {
            success: true,
            booking_id: confirmation.booking_id.to_string(),
            total_price: confirmation.total_price.to_decimal_string(),
            currency: confirmation.total_price.currency(),
        }
    }
}
