use thiserror::Error;

/// 貸出・カタログ操作のエラー
///
/// すべて呼び出し元に返される回復可能な失敗。プロセスを落とすものはない。
/// `InconsistentState` のみ不変条件違反（観測されたら欠陥）を表す。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CirculationError {
    /// 同じISBNの書籍が既に登録されている
    #[error("A book with this ISBN already exists")]
    DuplicateIsbn,

    /// 書籍が見つからない
    #[error("Book not found")]
    BookNotFound,

    /// 書籍が貸出中
    #[error("Book is currently borrowed")]
    BookUnavailable,

    /// 同じ書籍の貸出が既に開いている
    #[error("An open loan already exists for this book")]
    AlreadyLoaned,

    /// 返却対象の貸出が開いていない
    #[error("No active loan exists for this book")]
    NoActiveLoan,

    /// 会員の選択が無効（ID・氏名が空）
    #[error("A member must be selected")]
    InvalidMember,

    /// 返却期限が未入力、または貸出日より前
    #[error("Due date must be on or after the borrow date")]
    InvalidDueDate,

    /// 書籍の必須フィールドが空
    #[error("Missing required book field: {0}")]
    InvalidBook(&'static str),

    /// カタログと台帳の不整合（不変条件違反 - 到達すれば欠陥）
    #[error("Catalog and ledger disagree: {0}")]
    InconsistentState(&'static str),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, CirculationError>;
