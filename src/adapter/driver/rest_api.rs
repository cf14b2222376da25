use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapter::driver::request_dto::{AvailabilityQueryParams, BookRoomRequest};
use crate::adapter::driver::response_dto::{AvailabilityResponse, BookRoomResponse, RoomResponse};
use crate::application::service::BookingService;
use crate::application::ApplicationError;
use crate::domain::error::DomainError;
use crate::domain::model::{GuestCount, RatePlanId, RoomId, StayDates, StayRequest};

#[derive(Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

// アプリケーションサービスを含む状態
pub type AppState = AppStateInner;

#[derive(Clone)]
pub struct AppStateInner {
    pub booking_service: Arc<BookingService>,
}

// REST APIルーターを作成
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/rooms", get(get_rooms))
        .route("/rooms/availability", get(get_availability))
        .route("/rooms/book", post(book_room))
}

// ヘルスチェックエンドポイント
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "hotel-booking-engine",
        "version": "0.1.0"
    }))
}

// 客室一覧取得エンドポイント
// ストア未構成（オフラインモード）では空のリストを返す
async fn get_rooms(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoomResponse>>, (StatusCode, Json<ApiError>)> {
    match state.booking_service.list_rooms().await {
        Ok(rooms) => {
            let response: Vec<RoomResponse> = rooms.iter().map(RoomResponse::from_room).collect();
            Ok(Json(response))
        }
        Err(err) => Err(map_application_error(err)),
    }
}

// 空室照会エンドポイント
async fn get_availability(
    State(state): State<AppState>,
    query: Result<Query<AvailabilityQueryParams>, axum::extract::rejection::QueryRejection>,
) -> Result<Json<AvailabilityResponse>, (StatusCode, Json<ApiError>)> {
    let Query(params) = query.map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: "room_id, start_date, end_date を指定してください".to_string(),
                code: "INVALID_PARAMETER".to_string(),
            }),
        )
    })?;

    let room_id = parse_room_id(&params.room_id)?;
    let stay = parse_stay(&params.start_date, &params.end_date)?;

    match state.booking_service.check_availability(&room_id, &stay).await {
        Ok(is_available) => Ok(Json(AvailabilityResponse { is_available })),
        Err(err) => Err(map_application_error(err)),
    }
}

// 予約作成エンドポイント
// 必須フィールドの欠落はJSONデシリアライズの時点で拒否され、ストアへはアクセスしない
async fn book_room(
    State(state): State<AppState>,
    Json(request): Json<BookRoomRequest>,
) -> Result<Json<BookRoomResponse>, (StatusCode, Json<ApiError>)> {
    let room_id = parse_room_id(&request.room_id)?;
    let stay = parse_stay(&request.start_date, &request.end_date)?;

    let guests = GuestCount::new(request.adults.unwrap_or(1), request.children.unwrap_or(0))
        .map_err(map_validation_error)?;

    // レートプラン省略時は標準プラン（朝食なし）
    let rate_plan_id = RatePlanId::new(request.rate_plan_id.unwrap_or_else(|| "wob".to_string()));

    let stay_request = StayRequest::new(room_id, stay, guests, rate_plan_id);

    match state.booking_service.book(stay_request).await {
        Ok(confirmation) => Ok(Json(BookRoomResponse::from_confirmation(&confirmation))),
        Err(err) => Err(map_application_error(err)),
    }
}

fn parse_room_id(raw: &str) -> Result<RoomId, (StatusCode, Json<ApiError>)> {
    RoomId::new(raw).map_err(map_validation_error)
}

fn parse_stay(start: &str, end: &str) -> Result<StayDates, (StatusCode, Json<ApiError>)> {
    let check_in = StayDates::parse_calendar_date(start).map_err(map_validation_error)?;
    let check_out = StayDates::parse_calendar_date(end).map_err(map_validation_error)?;
    StayDates::new(check_in, check_out).map_err(map_validation_error)
}

fn map_validation_error(err: DomainError) -> (StatusCode, Json<ApiError>) {
    map_domain_error(err)
}

// アプリケーションエラーをHTTPエラーにマッピング
// ストア障害は内部詳細を漏らさず、汎用メッセージで503を返す
fn map_application_error(err: ApplicationError) -> (StatusCode, Json<ApiError>) {
    match err {
        ApplicationError::DomainError(domain_err) => map_domain_error(domain_err),
        ApplicationError::StoreError(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError {
                error: "予約ストアを一時的に利用できません".to_string(),
                code: "STORE_UNAVAILABLE".to_string(),
            }),
        ),
        ApplicationError::NotFound(msg) => (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: msg,
                code: "NOT_FOUND".to_string(),
            }),
        ),
    }
}

// ドメインエラーを適切なHTTPステータスコードとエラーコードにマッピング
fn map_domain_error(domain_err: DomainError) -> (StatusCode, Json<ApiError>) {
    match domain_err {
        DomainError::InvalidStay(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: msg,
                code: "INVALID_STAY".to_string(),
            }),
        ),
        DomainError::InvalidGuestCount(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: msg,
                code: "INVALID_GUEST_COUNT".to_string(),
            }),
        ),
        DomainError::OccupancyExceeded {
            guests,
            max_occupancy,
        } => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: format!(
                    "宿泊人数{}人が最大定員{}人を超えています",
                    guests, max_occupancy
                ),
                code: "OCCUPANCY_EXCEEDED".to_string(),
            }),
        ),
        DomainError::UnknownRatePlan(id) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: format!("未知のレートプランです: {}", id),
                code: "UNKNOWN_RATE_PLAN".to_string(),
            }),
        ),
        DomainError::Unavailable(date) => (
            StatusCode::CONFLICT,
            Json(ApiError {
                error: format!("No availability on {}", date),
                code: "UNAVAILABLE".to_string(),
            }),
        ),
        DomainError::Conflict(date) => (
            StatusCode::CONFLICT,
            Json(ApiError {
                error: format!("Concurrent booking conflict on {}", date),
                code: "CONFLICT".to_string(),
            }),
        ),
        DomainError::CurrencyMismatch => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: "通貨が一致しません".to_string(),
                code: "CURRENCY_MISMATCH".to_string(),
            }),
        ),
        DomainError::InvalidValue(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: msg,
                code: "INVALID_VALUE".to_string(),
            }),
        ),
    }
}
