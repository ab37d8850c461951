use crate::domain::Book;
use crate::ports::book_source::{BookSource, Result};
use async_trait::async_trait;

/// バックエンドAPIから初期カタログを取得するアダプター
///
/// 契約：`GET {base_url}/api/books` が書籍オブジェクトのJSON配列を返す。
/// 非成功ステータスはエラーとして返し、フォールバックの判断は
/// 呼び出し側（ローダー）に委ねる。
pub struct RemoteBookSource {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteBookSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BookSource for RemoteBookSource {
    async fn fetch_books(&self) -> Result<Vec<Book>> {
        let url = format!("{}/api/books", self.base_url.trim_end_matches('/'));
        let books = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Book>>()
            .await?;
        Ok(books)
    }
}
