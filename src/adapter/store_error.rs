use crate::domain::port::StoreError;

/// ストアバックエンドのエラー型
/// MySQLアダプターの操作で発生するエラーを表現する
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreBackendError {
    /// データベース接続エラー
    #[error("Store connection error: {0}")]
    ConnectionError(String),
    /// SQLクエリエラー
    #[error("Store query error: {0}")]
    QueryError(String),
    /// ガード付き更新の競合（影響行数0）
    #[error("Store row conflict: {0}")]
    RowConflict(String),
    /// マイグレーションエラー
    #[error("Migration error: {0}")]
    MigrationError(String),
}

/// StoreBackendErrorからポートのStoreErrorへの変換
impl From<StoreBackendError> for StoreError {
    fn from(err: StoreBackendError) -> Self {
        match err {
            StoreBackendError::ConnectionError(msg) => StoreError::ConnectionFailed(msg),
            StoreBackendError::QueryError(msg) => StoreError::OperationFailed(msg),
            StoreBackendError::RowConflict(msg) => StoreError::VersionConflict(msg),
            StoreBackendError::MigrationError(msg) => StoreError::OperationFailed(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conflict_maps_to_version_conflict() {
        let err = StoreBackendError::RowConflict("inventory 2024-06-01/R1".to_string());
        let port_err: StoreError = err.into();
        assert!(matches!(port_err, StoreError::VersionConflict(_)));
    }

    #[test]
    fn test_connection_error_maps_to_connection_failed() {
        let err = StoreBackendError::ConnectionError("refused".to_string());
        let port_err: StoreError = err.into();
        assert!(matches!(port_err, StoreError::ConnectionFailed(_)));
    }
}
