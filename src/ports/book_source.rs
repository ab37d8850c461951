use crate::domain::Book;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 初期データソースポート
///
/// 起動時に一度だけ呼ばれるワンショットのローダー。
/// 失敗（ネットワークエラー、非成功ステータス、パース失敗）は
/// 呼び出し側が組み込みのシードデータで置き換えるため、
/// この境界の外にユーザー向けエラーとして漏れることはない。
#[async_trait]
pub trait BookSource: Send + Sync {
    /// 書籍レコードの列を順序付きで取得する
    async fn fetch_books(&self) -> Result<Vec<Book>>;
}
