use hotel_booking_engine::adapter::driven::{ConsoleLogger, MySqlTabularStore};
use hotel_booking_engine::adapter::driver::rest_api::{create_router, AppStateInner};
use hotel_booking_engine::adapter::{StoreConfig, StoreMigration, StoreMode};
use hotel_booking_engine::application::service::{BookingService, ReadyStore, StoreState};
use hotel_booking_engine::domain::model::RatePlanCatalog;

use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== ホテル在庫・予約エンジン REST API ===");
    println!();

    // .envファイルから環境変数を読み込む
    dotenvy::dotenv().ok();

    // ストア設定を読み込む
    let config = StoreConfig::from_env()?;

    let logger = Arc::new(ConsoleLogger::new());

    // 運用モードに応じてストアを構成する
    let state = match config.mode {
        StoreMode::Database => {
            println!(
                "ストア設定を読み込みました: {}:{}",
                config.host, config.port
            );

            // 接続プールを作成
            let pool = MySqlPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.connection_string())
                .await?;
            println!("ストア接続プールを作成しました");

            // マイグレーションを実行
            let migration = StoreMigration::new(pool.clone());
            migration.run().await?;
            println!("ストアマイグレーションを実行しました");

            let store = Arc::new(MySqlTabularStore::new(pool));
            StoreState::Ready(ReadyStore::new(
                store.clone(),
                store.clone(),
                store,
                logger.clone(),
            ))
        }
        StoreMode::Offline => {
            println!("オフラインモードで起動します（ストアなし、予約は擬似成功）");
            StoreState::Offline
        }
    };

    // 予約サービスを作成
    let booking_service = BookingService::new(state, RatePlanCatalog::standard());

    // アプリケーション状態を作成
    let app_state = AppStateInner {
        booking_service: Arc::new(booking_service),
    };

    // REST APIルーターを作成
    let app = create_router()
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // サーバーを起動
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    println!("REST APIサーバーが起動しました: http://localhost:3000");
    println!("ヘルスチェック: GET http://localhost:3000/health");
    println!("API仕様:");
    println!("  GET  /rooms - 客室一覧取得");
    println!("  GET  /rooms/availability - 空室照会");
    println!("  POST /rooms/book - 予約作成");
    println!();

    axum::serve(listener, app).await?;

    Ok(())
}
