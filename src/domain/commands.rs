use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::BookType;

/// コマンド：書籍をカタログに登録する
///
/// 文字列フィールドはコマンド生成側（入力層）でトリム済み。
/// 空文字の拒否はコーディネーター側で行う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub book_type: BookType,
    pub category: String,
}

/// コマンド：書籍を貸し出す
///
/// `due_date` は呼び出し側の入力をそのまま運ぶ（未入力はNone）。
/// 必須チェックと `due_date >= borrow_date` の検証はコーディネーターの責務。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowBook {
    pub isbn: String,
    pub member_id: String,
    pub member_name: String,
    pub due_date: Option<NaiveDate>,
    pub borrow_date: NaiveDate,
}

/// コマンド：書籍を返却する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBook {
    pub isbn: String,
}
