use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::BookType;
use crate::domain::commands::{AddBook, BorrowBook};

/// 書籍登録リクエスト（POST /books）
#[derive(Debug, Deserialize)]
pub struct AddBookRequest {
    pub isbn: String,
    pub title: String,
    pub author: String,
    #[serde(rename = "type")]
    pub book_type: BookType,
    pub category: String,
}

impl AddBookRequest {
    /// フィールドをトリムしてコマンドへ変換する
    ///
    /// 空文字の拒否はコーディネーター側の責務。
    pub fn to_command(&self) -> AddBook {
        AddBook {
            isbn: self.isbn.trim().to_string(),
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            book_type: self.book_type,
            category: self.category.trim().to_string(),
        }
    }
}

/// 貸出リクエスト（POST /loans）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    pub isbn: String,
    pub member_id: String,
    pub member_name: String,
    pub due_date: Option<NaiveDate>,
}

impl BorrowRequest {
    pub fn to_command(&self, borrow_date: NaiveDate) -> BorrowBook {
        BorrowBook {
            isbn: self.isbn.trim().to_string(),
            member_id: self.member_id.trim().to_string(),
            member_name: self.member_name.trim().to_string(),
            due_date: self.due_date,
            borrow_date,
        }
    }
}

/// カタログ一覧のクエリパラメータ（GET /books）
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// カテゴリの完全一致フィルタ
    pub category: Option<String>,
    /// ソートキー（title / author / category / available）
    pub sort: Option<String>,
}

/// 検索のクエリパラメータ（GET /search）
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// エラーレスポンス
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            error: error.into(),
        }
    }
}
