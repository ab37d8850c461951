use super::Loan;
use super::errors::LedgerError;

/// 貸出台帳 - 開いている貸出レコードの集合を所有する
///
/// 不変条件：同じ `book_isbn` の貸出は高々1件。
/// 返却された貸出は台帳から取り除かれる（履歴は持たない）。
#[derive(Debug, Default)]
pub struct LoanLedger {
    loans: Vec<Loan>,
}

impl LoanLedger {
    pub fn new() -> Self {
        Self { loans: Vec::new() }
    }

    /// 貸出を開く
    ///
    /// 同じ書籍の貸出が既に開いている場合は `AlreadyLoaned` を返し、
    /// 台帳は変化しない。
    pub fn open_loan(&mut self, loan: Loan) -> Result<&Loan, LedgerError> {
        if self.loans.iter().any(|l| l.book_isbn == loan.book_isbn) {
            return Err(LedgerError::AlreadyLoaned);
        }
        self.loans.push(loan);
        Ok(self.loans.last().expect("just pushed"))
    }

    /// 貸出を閉じ、閉じたレコードを返す
    pub fn close_loan(&mut self, book_isbn: &str) -> Result<Loan, LedgerError> {
        let index = self
            .loans
            .iter()
            .position(|l| l.book_isbn == book_isbn)
            .ok_or(LedgerError::NoActiveLoan)?;
        Ok(self.loans.remove(index))
    }

    /// 開いている貸出をISBNで探す
    pub fn find_by_isbn(&self, book_isbn: &str) -> Option<&Loan> {
        self.loans.iter().find(|l| l.book_isbn == book_isbn)
    }

    /// 開いている貸出を古い順で返す
    pub fn all(&self) -> &[Loan] {
        &self.loans
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }
}
