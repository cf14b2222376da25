use chrono::NaiveDate;

/// ドメイン層のエラー型
/// ビジネスルール違反を表現する
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 無効な宿泊期間（例: チェックアウト日がチェックイン日以前）
    InvalidStay(String),
    /// 無効な宿泊人数（例: 大人0人）
    InvalidGuestCount(String),
    /// 最大定員超過
    OccupancyExceeded { guests: u32, max_occupancy: u32 },
    /// 未知のレートプランID
    UnknownRatePlan(String),
    /// 在庫不足（最初に空きがなかった日付を保持）
    Unavailable(NaiveDate),
    /// 予約確定中に競合する書き込みを検出した日付
    Conflict(NaiveDate),
    /// 通貨の不一致
    CurrencyMismatch,
    /// 無効な値
    InvalidValue(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidStay(msg) => write!(f, "Invalid stay: {}", msg),
            DomainError::InvalidGuestCount(msg) => write!(f, "Invalid guest count: {}", msg),
            DomainError::OccupancyExceeded {
                guests,
                max_occupancy,
            } => write!(
                f,
                "Occupancy exceeded: {} guests > max {}",
                guests, max_occupancy
            ),
            DomainError::UnknownRatePlan(id) => write!(f, "Unknown rate plan: {}", id),
            DomainError::Unavailable(date) => write!(f, "No availability on {}", date),
            DomainError::Conflict(date) => {
                write!(f, "Concurrent booking conflict on {}", date)
            }
            DomainError::CurrencyMismatch => write!(f, "Currency mismatch"),
            DomainError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
