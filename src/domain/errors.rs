/// カタログ操作のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// 同じISBNの書籍が既に登録されている
    DuplicateIsbn,
    /// 該当するISBNの書籍が存在しない
    BookNotFound,
}

/// 貸出台帳操作のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    /// 同じ書籍の貸出が既に開いている
    AlreadyLoaned,
    /// 該当する書籍の貸出が開いていない
    NoActiveLoan,
}
