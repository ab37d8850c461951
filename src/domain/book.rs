use serde::{Deserialize, Serialize};

/// 蔵書種別
///
/// 閉じた列挙型。カタログ上の書籍は必ずこの3種別のいずれかに属する。
/// カテゴリ（`Book::category`）は自由記述のため、こちらとは別物。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookType {
    Fiction,
    NonFiction,
    Reference,
}

impl BookType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookType::Fiction => "Fiction",
            BookType::NonFiction => "NonFiction",
            BookType::Reference => "Reference",
        }
    }
}

/// 書籍レコード - カタログ管理の基本単位
///
/// 不変条件：
/// - `isbn` はカタログ全体で一意（大文字小文字を区別した完全一致）
/// - `available == true` ⇔ このISBNを参照する貸出が存在しない
///
/// `available` を書き換えるのは貸出コーディネーターのみ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    #[serde(rename = "type")]
    pub book_type: BookType,
    pub category: String,
    pub available: bool,
}

impl Book {
    /// 新規書籍を作成する
    ///
    /// 新しく登録される書籍は必ず貸出可能な状態で始まる。
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        book_type: BookType,
        category: impl Into<String>,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            book_type,
            category: category.into(),
            available: true,
        }
    }
}
