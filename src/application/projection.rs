use serde::Serialize;

use crate::domain::{Book, BookType, Loan};

// ============================================================================
// 読み取りモデル
// ============================================================================

/// 種別ごとの冊数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCounts {
    pub fiction: usize,
    pub non_fiction: usize,
    pub reference: usize,
}

/// ダッシュボード集計
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total: usize,
    pub available: usize,
    pub by_type: TypeCounts,
    /// 直近に追加された書籍（最大5冊、新しい順）
    pub recent: Vec<Book>,
}

/// カテゴリ別の冊数と構成比
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
    /// 全体に対する割合（%、小数第1位に丸め）
    pub percentage: f64,
}

/// 検索結果
///
/// 「検索語が空」と「0件ヒット」は別の結果として区別する。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "books", rename_all = "snake_case")]
pub enum SearchResults {
    NoQuery,
    Matches(Vec<Book>),
}

/// カタログ一覧のソートキー
///
/// 未知のキーはエラーにせず `None`（挿入順のまま）として扱う。
/// 画面側が送るキーは既知のものだけだが、比較関数が0を返す元の
/// 挙動をそのまま引き継ぐ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Title,
    Author,
    Category,
    Available,
    #[default]
    None,
}

impl SortKey {
    pub fn parse(s: &str) -> Self {
        match s {
            "title" => SortKey::Title,
            "author" => SortKey::Author,
            "category" => SortKey::Category,
            "available" => SortKey::Available,
            _ => SortKey::None,
        }
    }
}

// ============================================================================
// 射影関数（すべて純粋。状態を変更しない）
// ============================================================================

/// ダッシュボード集計を1パスで計算する
pub fn dashboard(books: &[Book]) -> Dashboard {
    let mut available = 0;
    let mut by_type = TypeCounts {
        fiction: 0,
        non_fiction: 0,
        reference: 0,
    };

    for book in books {
        if book.available {
            available += 1;
        }
        match book.book_type {
            BookType::Fiction => by_type.fiction += 1,
            BookType::NonFiction => by_type.non_fiction += 1,
            BookType::Reference => by_type.reference += 1,
        }
    }

    Dashboard {
        total: books.len(),
        available,
        by_type,
        recent: books.iter().rev().take(5).cloned().collect(),
    }
}

/// カテゴリ別ヒストグラム
///
/// 出現順（最初にそのカテゴリが現れた順）を保つ。
pub fn category_histogram(books: &[Book]) -> Vec<CategoryCount> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for book in books {
        match counts.iter_mut().find(|(c, _)| c == &book.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((book.category.clone(), 1)),
        }
    }

    let total = books.len();
    counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category,
            count,
            percentage: round_one_decimal(count as f64 * 100.0 / total as f64),
        })
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// カタログ一覧の射影
///
/// `filter` はカテゴリの完全一致。`sort` の文字列キーは大文字小文字を
/// 区別せずに比較し、`Available` は貸出可能な書籍を先頭に寄せる。
/// ソートは安定で、`None` は挿入順をそのまま返す。
pub fn catalog(books: &[Book], filter: Option<&str>, sort: SortKey) -> Vec<Book> {
    let mut result: Vec<Book> = match filter {
        Some(category) => books
            .iter()
            .filter(|b| b.category == category)
            .cloned()
            .collect(),
        None => books.to_vec(),
    };

    match sort {
        SortKey::Title => result.sort_by(|a, b| fold(&a.title).cmp(&fold(&b.title))),
        SortKey::Author => result.sort_by(|a, b| fold(&a.author).cmp(&fold(&b.author))),
        SortKey::Category => result.sort_by(|a, b| fold(&a.category).cmp(&fold(&b.category))),
        SortKey::Available => result.sort_by_key(|b| !b.available),
        SortKey::None => {}
    }

    result
}

fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// 横断検索
///
/// タイトル・著者・カテゴリは大文字小文字を無視した部分一致、
/// ISBNは入力そのままの部分一致。
pub fn search(books: &[Book], term: &str) -> SearchResults {
    if term.is_empty() {
        return SearchResults::NoQuery;
    }

    let needle = term.to_lowercase();
    let matches = books
        .iter()
        .filter(|b| {
            b.title.to_lowercase().contains(&needle)
                || b.author.to_lowercase().contains(&needle)
                || b.category.to_lowercase().contains(&needle)
                || b.isbn.contains(term)
        })
        .cloned()
        .collect();

    SearchResults::Matches(matches)
}

/// 貸出中一覧（貸出・返却ビュー共用）
///
/// タイトルは貸出レコードに非正規化済みのため、結合は不要。
pub fn borrowed(loans: &[Loan]) -> Vec<Loan> {
    loans.to_vec()
}

/// 貸出フォームの選択リスト用：貸出可能な書籍のみ
pub fn available_books(books: &[Book]) -> Vec<Book> {
    books.iter().filter(|b| b.available).cloned().collect()
}
