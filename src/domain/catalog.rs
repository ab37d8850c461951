use super::Book;
use super::errors::CatalogError;

/// カタログストア - 書籍レコードの集合を所有する
///
/// 不変条件：
/// - ISBNはストア全体で一意（大文字小文字を区別した完全一致）
/// - 挿入順を保持する（「最近追加された書籍」の射影が依存する）
///
/// 書籍の削除はこのシステムの範囲外。
#[derive(Debug, Default)]
pub struct CatalogStore {
    books: Vec<Book>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self { books: Vec::new() }
    }

    /// 書籍を登録する
    ///
    /// 新規書籍は必ず `available = true` で挿入される。
    /// 既に同じISBNが存在する場合は `DuplicateIsbn` を返し、ストアは変化しない。
    pub fn add_book(&mut self, book: Book) -> Result<&Book, CatalogError> {
        if self.books.iter().any(|b| b.isbn == book.isbn) {
            return Err(CatalogError::DuplicateIsbn);
        }
        self.books.push(Book {
            available: true,
            ..book
        });
        Ok(self.books.last().expect("just pushed"))
    }

    /// ISBNで書籍を探す
    pub fn find_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.isbn == isbn)
    }

    /// 貸出可否フラグを書き換える
    ///
    /// 冪等：既に目的の値であれば何もしない。
    /// 該当するISBNがなければ `BookNotFound` を返す。
    pub fn set_availability(&mut self, isbn: &str, value: bool) -> Result<(), CatalogError> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.isbn == isbn)
            .ok_or(CatalogError::BookNotFound)?;
        if book.available != value {
            book.available = value;
        }
        Ok(())
    }

    /// 全書籍を挿入順で返す
    ///
    /// 射影はこのスライスのスナップショットに対して計算する。
    /// 単一ライターのロック規律により、反復中にストアが変化することはない。
    pub fn all(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
