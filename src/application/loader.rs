use crate::domain::{Book, BookType};
use crate::ports::book_source::BookSource;

/// 初期カタログをロードする
///
/// データソースの失敗（ネットワークエラー、非成功ステータス、パース
/// 失敗）はすべてここで回復し、組み込みのシードデータに置き換える。
/// ユーザー向けエラーにはならない。空の成功応答はそのまま採用する。
pub async fn load_initial_books(source: &dyn BookSource) -> Vec<Book> {
    match source.fetch_books().await {
        Ok(books) => {
            tracing::info!(count = books.len(), "loaded catalog from book source");
            books
        }
        Err(err) => {
            tracing::warn!(error = %err, "book source unavailable, using seed catalog");
            seed_books()
        }
    }
}

/// 組み込みのシードカタログ（14冊）
pub fn seed_books() -> Vec<Book> {
    use BookType::*;

    [
        ("978-0-13-468599-1", "Effective Java", "Joshua Bloch", Fiction, "Programming"),
        ("978-0-321-35668-0", "Clean Code", "Robert C. Martin", Fiction, "Software Engineering"),
        ("978-1-4919-5076-6", "Introduction to Algorithms", "Thomas H. Cormen", NonFiction, "Computer Science"),
        ("978-0-262-03293-3", "Structure and Interpretation", "Harold Abelson", NonFiction, "Programming"),
        ("978-0-13-235088-4", "Java Language Specification", "James Gosling", Reference, "Reference"),
        ("978-0-07-180855-3", "Java: The Complete Reference", "Herbert Schildt", Fiction, "Programming"),
        ("978-1-4493-3187-0", "Head First Java", "Kathy Sierra", Fiction, "Education"),
        ("978-0-321-76572-3", "The C++ Programming Language", "Bjarne Stroustrup", NonFiction, "Computer Science"),
        ("978-0-13-110362-7", "The C Programming Language", "Brian Kernighan", NonFiction, "Programming"),
        ("978-0-13-468599-2", "Python Documentation", "Python Software Foundation", Reference, "Reference"),
        ("978-0-13-46789-9", "Effective C++", "Scott Meyers", Fiction, "Programming"),
        ("978-0-14-29564-5", "Harry Potter and the Sorcerer's Stone", "JK Rowling", Fiction, "Fantasy"),
        ("978-0-14-45326-6", "Harry Potter and the Chamber of Secrets", "JK Rowling", Fiction, "Fantasy"),
        ("978-0-13-468599-8", "Here fo the fun", "JOhn", NonFiction, "Sasing"),
    ]
    .into_iter()
    .map(|(isbn, title, author, book_type, category)| {
        Book::new(isbn, title, author, book_type, category)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::book_source::Result;
    use async_trait::async_trait;

    struct FailingSource;

    #[async_trait]
    impl BookSource for FailingSource {
        async fn fetch_books(&self) -> Result<Vec<Book>> {
            Err("connection refused".into())
        }
    }

    struct StaticSource(Vec<Book>);

    #[async_trait]
    impl BookSource for StaticSource {
        async fn fetch_books(&self) -> Result<Vec<Book>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_seed_has_fourteen_books_all_available() {
        let seed = seed_books();
        assert_eq!(seed.len(), 14);
        assert!(seed.iter().all(|b| b.available));
        assert!(seed.iter().any(|b| b.title == "Effective Java"));
    }

    #[tokio::test]
    async fn test_load_falls_back_to_seed_on_failure() {
        let books = load_initial_books(&FailingSource).await;
        assert_eq!(books.len(), 14);
    }

    #[tokio::test]
    async fn test_load_uses_source_books_on_success() {
        let source = StaticSource(vec![Book::new(
            "X1",
            "Remote",
            "A",
            BookType::Fiction,
            "C",
        )]);
        let books = load_initial_books(&source).await;
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Remote");
    }

    #[tokio::test]
    async fn test_load_keeps_empty_successful_response() {
        // 空の成功応答は失敗ではないので、シードには置き換えない
        let books = load_initial_books(&StaticSource(Vec::new())).await;
        assert!(books.is_empty());
    }
}
