use crate::domain::commands::{AddBook, BorrowBook, ReturnBook};
use crate::domain::errors::CatalogError;
use crate::domain::{Book, CatalogStore, Loan, LoanId, LoanLedger};

use super::errors::{CirculationError, Result};

/// 蔵書と貸出台帳をまとめて所有する状態
///
/// 大域不変条件：すべての書籍 `b` について
/// `b.available == true` ⇔ 台帳に `book_isbn == b.isbn` の貸出が存在しない。
///
/// この不変条件を一時的に破って回復してよいのは、このモジュールの
/// コマンド関数だけ。両コレクションは単一のロック配下で同期的に
/// 変更されるため、途中状態が他のコマンドから観測されることはない。
#[derive(Debug, Default)]
pub struct Library {
    pub catalog: CatalogStore,
    pub ledger: LoanLedger,
}

impl Library {
    pub fn new() -> Self {
        Self {
            catalog: CatalogStore::new(),
            ledger: LoanLedger::new(),
        }
    }

    /// 初期ロード結果からカタログを構築する
    ///
    /// 台帳は空で始まるため、不変条件によりすべての書籍は貸出可能で
    /// なければならない（`add_book` が `available = true` に正規化する）。
    /// 重複ISBNは警告を出してスキップする。
    pub fn from_books(books: Vec<Book>) -> Self {
        let mut library = Self::new();
        for book in books {
            let isbn = book.isbn.clone();
            if library.catalog.add_book(book).is_err() {
                tracing::warn!(isbn = %isbn, "skipping duplicate ISBN in initial data");
            }
        }
        library
    }

    /// 大域不変条件の検査
    ///
    /// テストと欠陥調査用。通常運転ではコマンド関数が維持する。
    pub fn is_consistent(&self) -> bool {
        self.catalog
            .all()
            .iter()
            .all(|b| b.available == self.ledger.find_by_isbn(&b.isbn).is_none())
    }
}

/// 書籍をカタログに登録する
///
/// 検証：
/// - 必須フィールド（isbn, title, author, category）が空でないこと
/// - ISBNが衝突しないこと
///
/// 検証失敗時は状態を一切変更しない。
pub fn add_book(library: &mut Library, cmd: AddBook) -> Result<Book> {
    // 1. 必須フィールドの確認（入力層はトリム済みの値を渡す）
    if cmd.isbn.is_empty() {
        return Err(CirculationError::InvalidBook("isbn"));
    }
    if cmd.title.is_empty() {
        return Err(CirculationError::InvalidBook("title"));
    }
    if cmd.author.is_empty() {
        return Err(CirculationError::InvalidBook("author"));
    }
    if cmd.category.is_empty() {
        return Err(CirculationError::InvalidBook("category"));
    }

    // 2. カタログへ挿入（ISBN衝突はここで拒否される）
    let book = Book::new(cmd.isbn, cmd.title, cmd.author, cmd.book_type, cmd.category);
    library
        .catalog
        .add_book(book)
        .map(|b| b.clone())
        .map_err(|e| match e {
            CatalogError::DuplicateIsbn => CirculationError::DuplicateIsbn,
            CatalogError::BookNotFound => {
                CirculationError::InconsistentState("add_book reported missing book")
            }
        })
}

/// 書籍を貸し出す（Available → Borrowed 遷移）
///
/// 事前条件（この順で検査し、最初に破れたものを報告する）：
/// 1. 書籍が存在すること
/// 2. 書籍が貸出可能であること
/// 3. 会員ID・氏名が空でないこと
/// 4. 返却期限が入力済みで、貸出日以降であること
///
/// 効果：貸出可否フラグを下ろし、台帳に貸出を開く。両方成功するか、
/// どちらも観測されないか（事前条件の検査が先に完了するため、
/// 失敗したコマンドは状態を変更しない）。
pub fn borrow_book(library: &mut Library, cmd: BorrowBook) -> Result<Loan> {
    // 1. 書籍の存在確認
    let book = library
        .catalog
        .find_by_isbn(&cmd.isbn)
        .ok_or(CirculationError::BookNotFound)?;

    // 2. 貸出可能性の確認
    if !book.available {
        return Err(CirculationError::BookUnavailable);
    }

    // 3. 会員選択の確認（名簿の照会はしない）
    if cmd.member_id.is_empty() || cmd.member_name.is_empty() {
        return Err(CirculationError::InvalidMember);
    }

    // 4. 返却期限の確認
    let due_date = cmd.due_date.ok_or(CirculationError::InvalidDueDate)?;
    if due_date < cmd.borrow_date {
        return Err(CirculationError::InvalidDueDate);
    }

    // 貸出可能なのに台帳に貸出が開いている場合は不変条件が壊れている
    if library.ledger.find_by_isbn(&cmd.isbn).is_some() {
        return Err(CirculationError::InconsistentState(
            "open loan exists for an available book",
        ));
    }

    let loan = Loan {
        loan_id: LoanId::new(),
        book_isbn: book.isbn.clone(),
        // 貸出時点のタイトルをスナップショット
        book_title: book.title.clone(),
        member_id: cmd.member_id,
        member_name: cmd.member_name,
        borrow_date: cmd.borrow_date,
        due_date,
    };

    // 遷移本体：ここから先は失敗しない
    library
        .catalog
        .set_availability(&cmd.isbn, false)
        .map_err(|_| CirculationError::InconsistentState("book vanished during borrow"))?;
    library
        .ledger
        .open_loan(loan.clone())
        .map_err(|_| CirculationError::InconsistentState("ledger rejected a validated loan"))?;

    Ok(loan)
}

/// 書籍を返却する（Borrowed → Available 遷移）
///
/// 事前条件：対象の貸出が開いていること。
/// 貸出が存在するのに書籍が存在しない状況は不変条件違反であり、
/// 状態を変更する前に `InconsistentState` として報告する。
pub fn return_book(library: &mut Library, cmd: ReturnBook) -> Result<Loan> {
    // 1. 貸出の存在確認
    if library.ledger.find_by_isbn(&cmd.isbn).is_none() {
        return Err(CirculationError::NoActiveLoan);
    }

    // 2. 書籍の存在確認（貸出があれば書籍は必ず存在するはず）
    if library.catalog.find_by_isbn(&cmd.isbn).is_none() {
        return Err(CirculationError::InconsistentState(
            "open loan references a missing book",
        ));
    }

    // 遷移本体
    let closed = library
        .ledger
        .close_loan(&cmd.isbn)
        .map_err(|_| CirculationError::InconsistentState("loan vanished during return"))?;
    library
        .catalog
        .set_availability(&cmd.isbn, true)
        .map_err(|_| CirculationError::InconsistentState("book vanished during return"))?;

    Ok(closed)
}
