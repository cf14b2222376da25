// 予約フローの統合テスト
// インメモリ表形式ストアに対して、料金計算・空室チェック・予約コミットを
// アプリケーションサービス経由で一気通貫に検証する

use hotel_booking_engine::adapter::driven::InMemoryTabularStore;
use hotel_booking_engine::application::service::{BookingService, ReadyStore, StoreState};
use hotel_booking_engine::application::ApplicationError;
use hotel_booking_engine::domain::error::DomainError;
use hotel_booking_engine::domain::model::{
    GuestCount, Money, RatePlanCatalog, RatePlanId, Room, RoomId, StayDates, StayRequest,
};
use hotel_booking_engine::domain::port::Logger;

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;

struct NullLogger;

impl Logger for NullLogger {
    fn debug(&self, _: &str, _: &str, _: Option<HashMap<String, String>>) {}
    fn info(&self, _: &str, _: &str, _: Option<HashMap<String, String>>) {}
    fn warn(&self, _: &str, _: &str, _: Option<HashMap<String, String>>) {}
    fn error(&self, _: &str, _: &str, _: Option<HashMap<String, String>>) {}
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn room_id() -> RoomId {
    RoomId::new("R1").unwrap()
}

fn room_r1(max_occupancy: u32) -> Room {
    Room::new(
        room_id(),
        "Deluxe Queen Room".to_string(),
        "deluxe".to_string(),
        "Spacious room with queen bed".to_string(),
        "https://example.com/r1.jpg".to_string(),
        Money::usd(15000),
        Money::usd(18000),
        Money::usd(5000),
        Money::usd(2500),
        vec!["Free WiFi".to_string(), "City View".to_string()],
        max_occupancy,
    )
}

fn service_over(store: Arc<InMemoryTabularStore>) -> BookingService {
    BookingService::new(
        StoreState::Ready(ReadyStore::new(
            store.clone(),
            store.clone(),
            store,
            Arc::new(NullLogger),
        )),
        RatePlanCatalog::standard(),
    )
}

fn request(start: &str, end: &str, adults: u32, children: u32, plan: &str) -> StayRequest {
    StayRequest::new(
        room_id(),
        StayDates::new(date(start), date(end)).unwrap(),
        GuestCount::new(adults, children).unwrap(),
        RatePlanId::new(plan),
    )
}

/// 大人1人・2泊・朝食なしプラン: 150 × 2 × 1.0 = 300.00
#[tokio::test]
async fn test_single_adult_two_nights_without_breakfast() {
    let store = Arc::new(InMemoryTabularStore::new());
    store.insert_room(room_r1(3));
    store.seed_inventory(date("2024-06-01"), room_id(), 2);
    store.seed_inventory(date("2024-06-02"), room_id(), 2);
    let service = service_over(store.clone());

    let confirmation = service
        .book(request("2024-06-01", "2024-06-03", 1, 0, "wob"))
        .await
        .unwrap();

    assert_eq!(confirmation.total_price, Money::usd(30000));
    assert_eq!(confirmation.total_price.to_decimal_string(), "300.00");
    assert!(confirmation.booking_id.as_str().starts_with("BK-"));

    // 各夜の在庫がちょうど1ずつ減り、台帳にはレコードが1件だけ追加される
    assert_eq!(store.available_count(date("2024-06-01"), &room_id()), Some(1));
    assert_eq!(store.available_count(date("2024-06-02"), &room_id()), Some(1));
    assert_eq!(store.booking_count(), 1);
}

/// 大人3人・子供1人・2泊・朝食ありプラン:
/// 1泊 = 180 + 1×50 + 1×25 = 255; 合計 = 255 × 2 × 1.15 = 586.50
#[tokio::test]
async fn test_surcharges_with_breakfast_plan() {
    let store = Arc::new(InMemoryTabularStore::new());
    store.insert_room(room_r1(4));
    store.seed_inventory(date("2024-06-01"), room_id(), 1);
    store.seed_inventory(date("2024-06-02"), room_id(), 1);
    let service = service_over(store.clone());

    let confirmation = service
        .book(request("2024-06-01", "2024-06-03", 3, 1, "wb"))
        .await
        .unwrap();

    assert_eq!(confirmation.total_price, Money::usd(58650));
    assert_eq!(confirmation.total_price.to_decimal_string(), "586.50");
}

/// 期間中に満室の夜が1つでもあれば予約全体が失敗し、
/// 先行する夜の在庫も減らない（部分減算なし）
#[tokio::test]
async fn test_rejection_is_atomic_and_names_blocking_night() {
    let store = Arc::new(InMemoryTabularStore::new());
    store.insert_room(room_r1(3));
    store.seed_inventory(date("2024-06-01"), room_id(), 1);
    store.seed_inventory(date("2024-06-02"), room_id(), 0);
    let service = service_over(store.clone());

    let result = service
        .book(request("2024-06-01", "2024-06-03", 1, 0, "wob"))
        .await;

    // 満室の夜（2024-06-02）を名指しして失敗する
    match result {
        Err(ApplicationError::DomainError(DomainError::Unavailable(blocked))) => {
            assert_eq!(blocked, date("2024-06-02"));
        }
        other => panic!("満室エラーを期待したが {:?} が返された", other.err()),
    }

    // 06-01の在庫は1のまま、台帳にもレコードは追加されない
    assert_eq!(store.available_count(date("2024-06-01"), &room_id()), Some(1));
    assert_eq!(store.available_count(date("2024-06-02"), &room_id()), Some(0));
    assert_eq!(store.booking_count(), 0);
}

/// 在庫行が存在しない夜は空室0として扱われる
#[tokio::test]
async fn test_missing_inventory_row_means_no_capacity() {
    let store = Arc::new(InMemoryTabularStore::new());
    store.insert_room(room_r1(3));
    store.seed_inventory(date("2024-06-01"), room_id(), 2);
    // 2024-06-02 の在庫行は存在しない
    let service = service_over(store.clone());

    let result = service
        .book(request("2024-06-01", "2024-06-03", 1, 0, "wob"))
        .await;

    assert!(matches!(
        result,
        Err(ApplicationError::DomainError(DomainError::Unavailable(d))) if d == date("2024-06-02")
    ));
    assert_eq!(store.available_count(date("2024-06-01"), &room_id()), Some(2));
}

/// 空室照会は読み取り専用で、何度呼んでも在庫は変化しない
#[tokio::test]
async fn test_availability_check_is_read_only() {
    let store = Arc::new(InMemoryTabularStore::new());
    store.insert_room(room_r1(3));
    store.seed_inventory(date("2024-06-01"), room_id(), 1);
    store.seed_inventory(date("2024-06-02"), room_id(), 1);
    let service = service_over(store.clone());

    let stay = StayDates::new(date("2024-06-01"), date("2024-06-03")).unwrap();
    for _ in 0..3 {
        assert!(service.check_availability(&room_id(), &stay).await.unwrap());
    }
    assert_eq!(store.available_count(date("2024-06-01"), &room_id()), Some(1));
    assert_eq!(store.available_count(date("2024-06-02"), &room_id()), Some(1));
}

/// 在庫を使い切るまで予約でき、使い切った後は失敗する。
/// 残在庫は決して負にならない
#[tokio::test]
async fn test_inventory_exhaustion_never_goes_negative() {
    let store = Arc::new(InMemoryTabularStore::new());
    store.insert_room(room_r1(3));
    store.seed_inventory(date("2024-06-01"), room_id(), 2);
    let service = service_over(store.clone());

    assert!(service
        .book(request("2024-06-01", "2024-06-02", 1, 0, "wob"))
        .await
        .is_ok());
    assert!(service
        .book(request("2024-06-01", "2024-06-02", 1, 0, "wob"))
        .await
        .is_ok());

    // 3件目は満室
    let result = service
        .book(request("2024-06-01", "2024-06-02", 1, 0, "wob"))
        .await;
    assert!(matches!(
        result,
        Err(ApplicationError::DomainError(DomainError::Unavailable(_)))
    ));

    assert_eq!(store.available_count(date("2024-06-01"), &room_id()), Some(0));
    assert_eq!(store.booking_count(), 2);
}

/// 最後の1室をめぐる同時予約: ちょうど1件だけ成功し、
/// もう1件は満室または競合で失敗する（二重予約は起こらない）
#[tokio::test]
async fn test_concurrent_bookings_for_last_unit() {
    let store = Arc::new(InMemoryTabularStore::new());
    store.insert_room(room_r1(3));
    store.seed_inventory(date("2024-06-01"), room_id(), 1);
    let service = Arc::new(service_over(store.clone()));

    let first = tokio::spawn({
        let service = service.clone();
        async move {
            service
                .book(request("2024-06-01", "2024-06-02", 1, 0, "wob"))
                .await
        }
    });
    let second = tokio::spawn({
        let service = service.clone();
        async move {
            service
                .book(request("2024-06-01", "2024-06-02", 1, 0, "wob"))
                .await
        }
    });

    let results = [first.await.unwrap(), second.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);

    // 失敗した側は満室か競合のどちらかを観測する
    let failure = results.iter().find(|r| r.is_err()).unwrap();
    assert!(matches!(
        failure,
        Err(ApplicationError::DomainError(
            DomainError::Unavailable(_) | DomainError::Conflict(_)
        ))
    ));

    assert_eq!(store.available_count(date("2024-06-01"), &room_id()), Some(0));
    assert_eq!(store.booking_count(), 1);
}

/// 台帳は追記専用: 予約のたびにレコードが1件ずつ増え、既存レコードは変化しない
#[tokio::test]
async fn test_ledger_is_append_only() {
    let store = Arc::new(InMemoryTabularStore::new());
    store.insert_room(room_r1(3));
    store.seed_inventory(date("2024-06-01"), room_id(), 3);
    let service = service_over(store.clone());

    let first = service
        .book(request("2024-06-01", "2024-06-02", 1, 0, "wob"))
        .await
        .unwrap();
    let second = service
        .book(request("2024-06-01", "2024-06-02", 2, 0, "wb"))
        .await
        .unwrap();

    let bookings = store.bookings();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0].id(), &first.booking_id);
    assert_eq!(bookings[1].id(), &second.booking_id);
    // 予約IDは一意
    assert_ne!(first.booking_id, second.booking_id);
}

/// 未知のレートプランはストアに触れる前に失敗する
#[tokio::test]
async fn test_unknown_rate_plan_rejected_without_mutation() {
    let store = Arc::new(InMemoryTabularStore::new());
    store.insert_room(room_r1(3));
    store.seed_inventory(date("2024-06-01"), room_id(), 2);
    let service = service_over(store.clone());

    let result = service
        .book(request("2024-06-01", "2024-06-02", 1, 0, "premium"))
        .await;

    assert!(matches!(
        result,
        Err(ApplicationError::DomainError(DomainError::UnknownRatePlan(_)))
    ));
    assert_eq!(store.available_count(date("2024-06-01"), &room_id()), Some(2));
    assert_eq!(store.booking_count(), 0);
}

/// オフラインモード: 客室一覧は空、空室照会は常にtrue、予約は擬似IDで成功
#[tokio::test]
async fn test_offline_mode_end_to_end() {
    let service = BookingService::new(StoreState::Offline, RatePlanCatalog::standard());

    assert!(service.list_rooms().await.unwrap().is_empty());

    let stay = StayDates::new(date("2024-06-01"), date("2024-06-03")).unwrap();
    assert!(service.check_availability(&room_id(), &stay).await.unwrap());

    let confirmation = service
        .book(request("2024-06-01", "2024-06-03", 1, 0, "wob"))
        .await
        .unwrap();
    assert!(confirmation.booking_id.is_simulated());
    assert!(confirmation.booking_id.as_str().starts_with("SIM-"));
}
