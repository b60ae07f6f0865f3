//! Error handling for Pollen Watch
//!
//! Every failure resolves to a dismissable status message in English and
//! Japanese; nothing here halts the dashboard.

use serde::Serialize;
use shared::Language;
use thiserror::Error;

use crate::external::geolocation::GeolocationError;

/// Application error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    // External service errors
    #[error("Weather provider error: {0}")]
    Provider(String),

    #[error("No map region could be loaded ({failed} cities failed)")]
    MapUnavailable { failed: usize },

    #[error("Geolocation failed: {0}")]
    Geolocation(#[from] GeolocationError),

    // Local errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_ja: String,
    },

    #[error("Unknown location: {0}")]
    UnknownLocation(String),
}

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Error,
    Warning,
    Info,
}

/// User-visible status line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub code: String,
    pub message_en: String,
    pub message_ja: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl StatusMessage {
    fn new(kind: StatusKind, code: &str, message_en: String, message_ja: String) -> Self {
        Self {
            kind,
            code: code.to_string(),
            message_en,
            message_ja,
            field: None,
        }
    }

    /// Some map cities failed but at least one loaded
    pub fn partial_map(failed: usize, total: usize) -> Self {
        Self::new(
            StatusKind::Warning,
            "MAP_PARTIAL",
            format!("Some regions are unavailable ({} of {})", failed, total),
            format!("一部の地域のデータを取得できませんでした（{}/{}）", failed, total),
        )
    }

    pub fn log_saved() -> Self {
        Self::new(
            StatusKind::Info,
            "LOG_SAVED",
            "Today's symptom log was saved".to_string(),
            "今日の症状記録を保存しました".to_string(),
        )
    }

    /// Message text in the requested language
    pub fn text(&self, language: Language) -> &str {
        match language {
            Language::English => &self.message_en,
            Language::Japanese => &self.message_ja,
        }
    }
}

impl AppError {
    /// Convert into the status message shown to the user
    pub fn status_message(&self) -> StatusMessage {
        match self {
            AppError::Provider(_) => StatusMessage::new(
                StatusKind::Error,
                "PROVIDER_ERROR",
                "Weather data could not be loaded. Please try again later.".to_string(),
                "気象データを取得できませんでした。しばらくしてから再試行してください。".to_string(),
            ),
            AppError::MapUnavailable { .. } => StatusMessage::new(
                StatusKind::Error,
                "MAP_UNAVAILABLE",
                "Map data is unavailable for every region".to_string(),
                "すべての地域でマップデータを取得できませんでした".to_string(),
            ),
            AppError::Geolocation(GeolocationError::PermissionDenied) => StatusMessage::new(
                StatusKind::Error,
                "GEOLOCATION_DENIED",
                "Location access was denied".to_string(),
                "位置情報の利用が許可されていません".to_string(),
            ),
            AppError::Geolocation(GeolocationError::Timeout(timeout)) => StatusMessage::new(
                StatusKind::Error,
                "GEOLOCATION_TIMEOUT",
                format!("Location request timed out after {} seconds", timeout.as_secs()),
                format!("位置情報の取得が{}秒以内に完了しませんでした", timeout.as_secs()),
            ),
            AppError::Geolocation(GeolocationError::Unavailable(_)) => StatusMessage::new(
                StatusKind::Error,
                "GEOLOCATION_UNAVAILABLE",
                "Current position is unavailable".to_string(),
                "現在地を取得できませんでした".to_string(),
            ),
            AppError::Geolocation(GeolocationError::InvalidPosition(reason)) => StatusMessage::new(
                StatusKind::Error,
                "GEOLOCATION_INVALID",
                format!("Received an invalid position: {}", reason),
                "無効な位置情報を受け取りました".to_string(),
            ),
            AppError::Storage(msg) => StatusMessage::new(
                StatusKind::Warning,
                "STORAGE_ERROR",
                format!("Could not save local data: {}", msg),
                "ローカルデータを保存できませんでした".to_string(),
            ),
            AppError::Configuration(msg) => StatusMessage::new(
                StatusKind::Error,
                "CONFIGURATION_ERROR",
                format!("Configuration error: {}", msg),
                format!("設定エラー: {}", msg),
            ),
            AppError::Validation {
                field,
                message,
                message_ja,
            } => StatusMessage {
                field: Some(field.clone()),
                ..StatusMessage::new(
                    StatusKind::Error,
                    "VALIDATION_ERROR",
                    message.clone(),
                    message_ja.clone(),
                )
            },
            AppError::UnknownLocation(id) => StatusMessage::new(
                StatusKind::Error,
                "UNKNOWN_LOCATION",
                format!("Location '{}' is not available", id),
                format!("地点「{}」は選択できません", id),
            ),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<&&'static str> = field_errors.keys().collect();
        fields.sort();

        let Some(&&field) = fields.first() else {
            return AppError::Validation {
                field: String::new(),
                message: errors.to_string(),
                message_ja: "入力内容が正しくありません".to_string(),
            };
        };

        let message = field_errors
            .get(field)
            .and_then(|list| list.first())
            .and_then(|e| e.message.as_ref())
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("Invalid value for {}", field));

        let message_ja = match field {
            "severity" => "症状の強さは0から10の範囲で入力してください".to_string(),
            "memo" => "メモは200文字以内で入力してください".to_string(),
            other => format!("{} の値が正しくありません", other),
        };

        AppError::Validation {
            field: field.to_string(),
            message,
            message_ja,
        }
    }
}

/// Result type alias for fallible operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::SymptomLogInput;
    use std::time::Duration;
    use validator::Validate;

    #[test]
    fn test_provider_error_is_blocking() {
        let status = AppError::Provider("HTTP 503".into()).status_message();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.code, "PROVIDER_ERROR");
        assert!(!status.message_ja.is_empty());
    }

    #[test]
    fn test_geolocation_timeout_message() {
        let error = AppError::from(GeolocationError::Timeout(Duration::from_secs(12)));
        let status = error.status_message();
        assert_eq!(status.code, "GEOLOCATION_TIMEOUT");
        assert!(status.text(Language::English).contains("12 seconds"));
    }

    #[test]
    fn test_partial_map_is_warning() {
        let status = StatusMessage::partial_map(2, 10);
        assert_eq!(status.kind, StatusKind::Warning);
        assert!(status.message_en.contains("2 of 10"));
    }

    #[test]
    fn test_validation_errors_convert() {
        let input = SymptomLogInput {
            severity: 11,
            took_medicine: false,
            memo: String::new(),
        };
        let error = AppError::from(input.validate().unwrap_err());
        let status = error.status_message();
        assert_eq!(status.code, "VALIDATION_ERROR");
        assert_eq!(status.field.as_deref(), Some("severity"));
        assert_eq!(status.message_en, "Severity must be between 0 and 10");
    }
}
