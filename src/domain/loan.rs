use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LoanId;

/// 貸出レコード - 1冊の書籍が1人の会員に貸し出されている事実
///
/// 不変条件：同じ `book_isbn` を持つ貸出は台帳上に高々1件。
///
/// `book_title` は貸出時点のタイトルのスナップショット（非正規化）。
/// 仮に将来タイトル編集機能が入っても、貸出一覧の表示は貸出時の
/// タイトルのまま安定させる。表示時に再結合はしない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub loan_id: LoanId,
    pub book_isbn: String,
    pub book_title: String,
    pub member_id: String,
    pub member_name: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
}
