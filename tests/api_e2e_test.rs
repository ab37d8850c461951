use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use lending_desk::adapters::memory::FixedMemberDirectory;
use lending_desk::api::handlers::AppState;
use lending_desk::api::router::create_router;
use lending_desk::application::circulation::Library;
use lending_desk::application::loader;
use serde_json::{Value, json};
use std::sync::{Arc, RwLock};
use tower::ServiceExt;

// ============================================================================
// E2Eテスト用のヘルパー関数
// ============================================================================

/// シードカタログと固定名簿でアプリケーションを組み立てる
///
/// データベースもネットワークも使わない。ルーターをそのまま
/// `oneshot` で叩く。
fn setup_app() -> axum::Router {
    let library = Library::from_books(loader::seed_books());
    let app_state = Arc::new(AppState {
        library: RwLock::new(library),
        members: Arc::new(FixedMemberDirectory::new()),
    });
    create_router(app_state)
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, body)
}

async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
    )
    .await
}

fn borrow_request(isbn: &str) -> Value {
    json!({
        "isbn": isbn,
        "memberId": "M001",
        "memberName": "Alice Johnson",
        "dueDate": "2099-12-31",
    })
}

// ============================================================================
// E2Eテスト: 正常系フロー
// ============================================================================

#[tokio::test]
async fn test_e2e_full_circulation_flow() {
    let app = setup_app();

    // Step 1: 書籍登録（POST /books）
    let (status, body) = post_json(
        &app,
        "/books",
        json!({
            "isbn": "X1",
            "title": "T",
            "author": "A",
            "type": "Fiction",
            "category": "C",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["isbn"], "X1");
    assert_eq!(body["available"], true);

    // Step 2: 貸出（POST /loans）
    let (status, body) = post_json(&app, "/loans", borrow_request("X1")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["bookIsbn"], "X1");
    assert_eq!(body["bookTitle"], "T");
    assert_eq!(body["memberId"], "M001");

    // Step 3: 貸出中一覧に現れる（GET /loans）
    let (status, body) = get(&app, "/loans").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Step 4: カタログ上は貸出中になる
    let (_, body) = get(&app, "/books").await;
    let borrowed = body
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["isbn"] == "X1")
        .unwrap()
        .clone();
    assert_eq!(borrowed["available"], false);

    // Step 5: 返却（POST /loans/:isbn/return）
    let (status, body) = post_json(&app, "/loans/X1/return", Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookIsbn"], "X1");

    // Step 6: 台帳が空に戻る
    let (_, body) = get(&app, "/loans").await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_e2e_dashboard_and_selection_list_track_loans() {
    let app = setup_app();

    let (status, body) = get(&app, "/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 14);
    assert_eq!(body["available"], 14);
    assert_eq!(body["recent"].as_array().unwrap().len(), 5);

    let (_, body) = get(&app, "/books/available").await;
    assert_eq!(body.as_array().unwrap().len(), 14);

    let (status, _) = post_json(&app, "/loans", borrow_request("978-0-13-468599-1")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = get(&app, "/dashboard").await;
    assert_eq!(body["available"], 13);

    let (_, body) = get(&app, "/books/available").await;
    assert_eq!(body.as_array().unwrap().len(), 13);
}

#[tokio::test]
async fn test_e2e_search_and_categories() {
    let app = setup_app();

    // タイトルに java を含む4冊がヒットする
    let (status, body) = get(&app, "/search?q=java").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "matches");
    assert_eq!(body["books"].as_array().unwrap().len(), 4);

    // 検索語なしは no_query（0件ヒットとは区別される）
    let (_, body) = get(&app, "/search").await;
    assert_eq!(body["kind"], "no_query");

    let (_, body) = get(&app, "/search?q=zzzzzz").await;
    assert_eq!(body["kind"], "matches");
    assert!(body["books"].as_array().unwrap().is_empty());

    // カテゴリ構成比はおおむね100%に足し上がる
    let (status, body) = get(&app, "/categories").await;
    assert_eq!(status, StatusCode::OK);
    let total: f64 = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["percentage"].as_f64().unwrap())
        .sum();
    assert!((total - 100.0).abs() < 0.2, "sum was {total}");
}

#[tokio::test]
async fn test_e2e_catalog_filter_and_sort() {
    let app = setup_app();

    let (_, body) = get(&app, "/books?category=Fantasy").await;
    let fantasy = body.as_array().unwrap();
    assert_eq!(fantasy.len(), 2);

    let (_, body) = get(&app, "/books?sort=title").await;
    let titles: Vec<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect();
    let mut sorted = titles.clone();
    sorted.sort_by_key(|t| t.to_lowercase());
    assert_eq!(titles, sorted);

    // 未知のソートキーは無視され、挿入順が保たれる
    let (status, body) = get(&app, "/books?sort=bogus").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.as_array().unwrap()[0]["title"],
        "Effective Java"
    );
}

#[tokio::test]
async fn test_e2e_members_and_health() {
    let app = setup_app();

    let (status, body) = get(&app, "/members").await;
    assert_eq!(status, StatusCode::OK);
    let members = body.as_array().unwrap();
    assert_eq!(members.len(), 5);
    assert_eq!(members[0]["memberId"], "M001");

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

// ============================================================================
// E2Eテスト: 異常系（拒否されたコマンドは具体的な理由を返す）
// ============================================================================

#[tokio::test]
async fn test_e2e_duplicate_isbn_conflict() {
    let app = setup_app();

    let (status, body) = post_json(
        &app,
        "/books",
        json!({
            "isbn": "978-0-321-35668-0", // Clean Code（シードに存在）
            "title": "Shadow",
            "author": "A",
            "type": "Fiction",
            "category": "C",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_ISBN");
}

#[tokio::test]
async fn test_e2e_borrow_twice_conflict() {
    let app = setup_app();
    let isbn = "978-0-13-110362-7";

    let (status, _) = post_json(&app, "/loans", borrow_request(isbn)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(&app, "/loans", borrow_request(isbn)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "BOOK_UNAVAILABLE");
}

#[tokio::test]
async fn test_e2e_borrow_validation_errors() {
    let app = setup_app();

    // 存在しない書籍
    let (status, body) = post_json(&app, "/loans", borrow_request("nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "BOOK_NOT_FOUND");

    // 会員未選択（空白のみのIDはトリムされて空になる）
    let (status, body) = post_json(
        &app,
        "/loans",
        json!({
            "isbn": "978-0-13-468599-1",
            "memberId": "  ",
            "memberName": "Alice Johnson",
            "dueDate": "2099-12-31",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_MEMBER");

    // 過去の返却期限
    let (status, body) = post_json(
        &app,
        "/loans",
        json!({
            "isbn": "978-0-13-468599-1",
            "memberId": "M001",
            "memberName": "Alice Johnson",
            "dueDate": "2000-01-01",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_DUE_DATE");

    // 返却期限なし
    let (status, body) = post_json(
        &app,
        "/loans",
        json!({
            "isbn": "978-0-13-468599-1",
            "memberId": "M001",
            "memberName": "Alice Johnson",
            "dueDate": null,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_DUE_DATE");

    // 検証で弾かれたコマンドは何も変更していない
    let (_, body) = get(&app, "/loans").await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_e2e_return_without_loan() {
    let app = setup_app();

    let (status, body) = post_json(&app, "/loans/978-0-13-468599-1/return", Value::Null).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "NO_ACTIVE_LOAN");
}

#[tokio::test]
async fn test_e2e_add_book_rejects_blank_fields() {
    let app = setup_app();

    let (status, body) = post_json(
        &app,
        "/books",
        json!({
            "isbn": "X9",
            "title": "   ",
            "author": "A",
            "type": "Fiction",
            "category": "C",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_BOOK");
}
