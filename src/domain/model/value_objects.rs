use crate::domain::error::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

/// 客室の一意識別子
/// カタログ管理プロセスが割り当てる文字列ID（例: "R1"）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// 文字列からRoomIdを作成
    /// 空文字列は許可しない
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidValue(
                "客室IDは空にできません".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// 内部の文字列を取得
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 予約の一意識別子
/// 確定予約は `BK-<uuid>`、オフラインモードの擬似予約は `SIM-<epoch millis>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(String);

impl BookingId {
    /// 新しい一意のBookingIdを生成
    pub fn new() -> Self {
        Self(format!("BK-{}", Uuid::new_v4()))
    }

    /// オフラインモード用の擬似BookingIdを生成
    pub fn simulated() -> Self {
        Self(format!("SIM-{}", Utc::now().timestamp_millis()))
    }

    /// 文字列からBookingIdを復元
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// 内部の文字列を取得
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 擬似予約IDかどうか
    pub fn is_simulated(&self) -> bool {
        self.0.starts_with("SIM-")
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

/// レートプランの識別子（例: "wb" = 朝食付き）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatePlanId(String);

impl RatePlanId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RatePlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 通貨
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    /// 米ドル
    #[allow(clippy::upper_case_acronyms)]
    USD,
}

/// 金額を表す値オブジェクト
/// 浮動小数点誤差を避けるためセント単位の整数で保持する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount_cents: i64,
    currency: Currency,
}

impl Money {
    /// 米ドルの金額をセント単位で作成
    pub fn usd(amount_cents: i64) -> Self {
        Self {
            amount_cents,
            currency: Currency::USD,
        }
    }

    /// セント単位の金額を取得
    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    /// 通貨を文字列として取得
    pub fn currency(&self) -> String {
        match self.currency {
            Currency::USD => "USD".to_string(),
        }
    }

    /// 金額を加算
    pub fn add(&self, other: &Money) -> Result<Money, DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch);
        }
        Ok(Money {
            amount_cents: self.amount_cents + other.amount_cents,
            currency: self.currency,
        })
    }

    /// 金額を乗算
    pub fn multiply(&self, factor: u32) -> Money {
        Money {
            amount_cents: self.amount_cents * factor as i64,
            currency: self.currency,
        }
    }

    /// パーセント表記の倍率を適用（115 = ×1.15）
    /// 端数はセント未満を切り捨てる
    pub fn apply_percent(&self, percent: u32) -> Money {
        Money {
            amount_cents: self.amount_cents * percent as i64 / 100,
            currency: self.currency,
        }
    }

    /// 十進表記（"586.50"）に整形
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// 宿泊人数を表す値オブジェクト
/// 大人は1人以上である必要がある
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestCount {
    adults: u32,
    children: u32,
}

impl GuestCount {
    /// 新しい宿泊人数を作成
    pub fn new(adults: u32, children: u32) -> Result<Self, DomainError> {
        if adults == 0 {
            return Err(DomainError::InvalidGuestCount(
                "大人の人数は1人以上である必要があります".to_string(),
            ));
        }
        Ok(Self { adults, children })
    }

    pub fn adults(&self) -> u32 {
        self.adults
    }

    pub fn children(&self) -> u32 {
        self.children
    }

    /// 合計人数
    pub fn total(&self) -> u32 {
        self.adults + self.children
    }
}

/// 宿泊期間を表す値オブジェクト
/// チェックアウト日は排他的（泊数 = checkIn ≤ d < checkOut の日数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayDates {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayDates {
    /// 新しい宿泊期間を作成
    /// チェックアウト日はチェックイン日より後である必要がある
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, DomainError> {
        if check_out <= check_in {
            return Err(DomainError::InvalidStay(format!(
                "チェックアウト日はチェックイン日より後である必要があります: {} .. {}",
                check_in, check_out
            )));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// 泊数（暦日単位）
    pub fn night_count(&self) -> u32 {
        (self.check_out - self.check_in).num_days() as u32
    }

    /// 宿泊する各日付を日付順に列挙する
    pub fn nights(&self) -> impl Iterator<Item = NaiveDate> {
        let check_out = self.check_out;
        self.check_in
            .iter_days()
            .take_while(move |d| *d < check_out)
    }

    /// ISO-8601文字列を暦日に正規化する
    /// 日付のみの表記に加え、タイムスタンプ付きの入力も日付部分に丸める
    pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, DomainError> {
        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return Ok(date);
        }
        if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
            return Ok(datetime.date_naive());
        }
        Err(DomainError::InvalidStay(format!(
            "日付の形式が不正です（ISO-8601を期待）: {}",
            input
        )))
    }
}
