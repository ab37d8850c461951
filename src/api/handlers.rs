use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::{Arc, RwLock};

use crate::application::circulation::{self, Library};
use crate::application::projection::{
    self, CategoryCount, Dashboard, SearchResults, SortKey,
};
use crate::domain::commands::ReturnBook;
use crate::domain::{Book, Loan};
use crate::ports::member_directory::{Member, MemberDirectory};

use super::error::ApiError;
use super::types::{AddBookRequest, BorrowRequest, CatalogQuery, SearchQuery};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
///
/// コマンドは書き込みロック、射影は読み取りロックを取る。
/// ロックはawaitをまたがずに解放されるため、コマンドは常に
/// 直列に実行される（遷移の途中状態は観測されない）。
pub struct AppState {
    pub library: RwLock<Library>,
    pub members: Arc<dyn MemberDirectory>,
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /books - 書籍をカタログに登録
///
/// 強制されるルール:
/// - 必須フィールドが空でないこと
/// - ISBNがカタログ全体で一意であること
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddBookRequest>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let cmd = req.to_command();

    let book = {
        let mut library = state.library.write().unwrap();
        circulation::add_book(&mut library, cmd)?
    };

    tracing::info!(isbn = %book.isbn, title = %book.title, "book added to catalog");
    Ok((StatusCode::CREATED, Json(book)))
}

/// POST /loans - 書籍を貸し出す
///
/// 強制されるルール:
/// - 書籍が存在し、貸出可能であること
/// - 会員が選択されていること（ID・氏名が空でない）
/// - 返却期限が貸出日以降であること
pub async fn borrow_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BorrowRequest>,
) -> Result<(StatusCode, Json<Loan>), ApiError> {
    let cmd = req.to_command(today());

    let loan = {
        let mut library = state.library.write().unwrap();
        circulation::borrow_book(&mut library, cmd)?
    };

    tracing::info!(isbn = %loan.book_isbn, member = %loan.member_id, "book borrowed");
    Ok((StatusCode::CREATED, Json(loan)))
}

/// POST /loans/:isbn/return - 書籍を返却する
///
/// 強制されるルール:
/// - 対象の貸出が開いていること
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Path(isbn): Path<String>,
) -> Result<(StatusCode, Json<Loan>), ApiError> {
    let cmd = ReturnBook {
        isbn: isbn.trim().to_string(),
    };

    let closed = {
        let mut library = state.library.write().unwrap();
        circulation::return_book(&mut library, cmd)?
    };

    tracing::info!(isbn = %closed.book_isbn, "book returned");
    Ok((StatusCode::OK, Json(closed)))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /dashboard - ダッシュボード集計
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Json<Dashboard> {
    let library = state.library.read().unwrap();
    Json(projection::dashboard(library.catalog.all()))
}

/// GET /categories - カテゴリ別ヒストグラム
pub async fn categories(State(state): State<Arc<AppState>>) -> Json<Vec<CategoryCount>> {
    let library = state.library.read().unwrap();
    Json(projection::category_histogram(library.catalog.all()))
}

/// GET /books - カタログ一覧（フィルタ・ソートつき）
///
/// クエリパラメータ:
/// - category: カテゴリの完全一致フィルタ（オプション）
/// - sort: title / author / category / available（未知の値は無視）
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CatalogQuery>,
) -> Json<Vec<Book>> {
    let sort = query.sort.as_deref().map(SortKey::parse).unwrap_or_default();

    let library = state.library.read().unwrap();
    Json(projection::catalog(
        library.catalog.all(),
        query.category.as_deref(),
        sort,
    ))
}

/// GET /books/available - 貸出フォーム用の選択リスト
pub async fn available_books(State(state): State<Arc<AppState>>) -> Json<Vec<Book>> {
    let library = state.library.read().unwrap();
    Json(projection::available_books(library.catalog.all()))
}

/// GET /search?q= - 横断検索
///
/// 検索語が空の場合は `no_query` を返す（0件ヒットとは区別される）。
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResults> {
    let term = query.q.as_deref().unwrap_or("").trim().to_string();

    let library = state.library.read().unwrap();
    Json(projection::search(library.catalog.all(), &term))
}

/// GET /loans - 貸出中一覧（古い順）
pub async fn list_loans(State(state): State<Arc<AppState>>) -> Json<Vec<Loan>> {
    let library = state.library.read().unwrap();
    Json(projection::borrowed(library.ledger.all()))
}

/// GET /members - 会員名簿（選択リスト用）
pub async fn list_members(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Member>>, QueryError> {
    match state.members.list_members().await {
        Ok(members) => Ok(Json(members)),
        Err(e) => Err(QueryError::InternalError(e.to_string())),
    }
}

// ============================================================================
// Error types
// ============================================================================

/// クエリハンドラー用のエラー型
#[derive(Debug)]
pub enum QueryError {
    InternalError(String),
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let QueryError::InternalError(msg) = self;
        // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
        tracing::error!("Internal error in query handler: {}", msg);
        let body = Json(super::types::ErrorResponse::new(
            "internal_error",
            "An unexpected error occurred",
        ));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
