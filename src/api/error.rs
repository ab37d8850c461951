use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::CirculationError;

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへの
/// マッピングを提供する。拒否されたコマンドは具体的な理由つきで
/// クライアントへ返す。
#[derive(Debug)]
pub struct ApiError(CirculationError);

impl From<CirculationError> for ApiError {
    fn from(err: CirculationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();

        let (status, code, message) = match &self.0 {
            // 404 Not Found - 対象の書籍が存在しない
            CirculationError::BookNotFound => (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND", message),

            // 409 Conflict - 現在の状態と衝突する操作
            CirculationError::DuplicateIsbn => (StatusCode::CONFLICT, "DUPLICATE_ISBN", message),
            CirculationError::BookUnavailable => {
                (StatusCode::CONFLICT, "BOOK_UNAVAILABLE", message)
            }
            CirculationError::AlreadyLoaned => (StatusCode::CONFLICT, "ALREADY_LOANED", message),

            // 422 Unprocessable Entity - 入力の検証失敗
            CirculationError::NoActiveLoan => {
                (StatusCode::UNPROCESSABLE_ENTITY, "NO_ACTIVE_LOAN", message)
            }
            CirculationError::InvalidMember => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_MEMBER", message)
            }
            CirculationError::InvalidDueDate => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_DUE_DATE", message)
            }
            CirculationError::InvalidBook(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_BOOK", message)
            }

            // 500 Internal Server Error - 不変条件違反（到達すれば欠陥）
            // 詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            CirculationError::InconsistentState(detail) => {
                tracing::error!(detail = %detail, "catalog/ledger invariant violated");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INCONSISTENT_STATE",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(code, message));
        (status, body).into_response()
    }
}
