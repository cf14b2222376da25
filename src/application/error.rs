use crate::domain::error::DomainError;
use crate::domain::port::StoreError;

/// アプリケーション層のエラー型
/// ドメインエラーとストアエラーをラップする
/// インフラ障害（Store）は業務上の失敗（Domain）と常に区別して保持する
#[derive(Debug)]
pub enum ApplicationError {
    /// ドメインエラー（ビジネスルール違反、満室、競合）
    DomainError(DomainError),
    /// ストアエラー（バックエンドの障害・設定不備）
    StoreError(StoreError),
    /// エンティティが見つからない
    NotFound(String),
}

impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationError::DomainError(err) => write!(f, "Domain error: {}", err),
            ApplicationError::StoreError(err) => write!(f, "Store error: {}", err),
            ApplicationError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for ApplicationError {}

// From実装でエラー変換を簡潔に
impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        ApplicationError::DomainError(err)
    }
}

impl From<StoreError> for ApplicationError {
    fn from(err: StoreError) -> Self {
        ApplicationError::StoreError(err)
    }
}
