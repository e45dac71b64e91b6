//! `/best` 接口测试

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use chess_ai::AiConfig;
use chess_core::{Fen, MoveGenerator, Notation, INITIAL_FEN};
use chess_server::router;
use tower::ServiceExt;

fn test_router() -> Router {
    router(AiConfig::with_fixed_depth(2).unwrap())
}

/// 查询串里只需转义空格
fn encode(s: &str) -> String {
    s.replace(' ', "%20")
}

async fn get(uri: String) -> Response {
    test_router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(body: String) -> Response {
    test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/best")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_get_initial_position() {
    let response = get(format!("/best?fen={}", encode(INITIAL_FEN))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = body_text(response).await;
    assert_eq!(text.len(), 4);

    // 返回的走法是红方的伪合法走法
    let mv = Notation::parse_move(&text).unwrap();
    let state = Fen::parse(INITIAL_FEN).unwrap();
    assert!(MoveGenerator::generate(&state).contains(&mv));
}

#[tokio::test]
async fn test_post_with_history() {
    let response = post_form(format!("fen={}&move=h2e2,h9g7", encode(INITIAL_FEN))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = body_text(response).await;
    let mv = Notation::parse_move(&text).unwrap();

    // 重放两步后轮到红方
    let mut state = Fen::parse(INITIAL_FEN).unwrap();
    state.replay(&Notation::parse_moves("h2e2,h9g7").unwrap());
    assert!(MoveGenerator::generate(&state).contains(&mv));
}

#[tokio::test]
async fn test_empty_history_segments_ignored() {
    let response = get(format!("/best?fen={}&move=,h2e2,,", encode(INITIAL_FEN))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_no_move_available() {
    // 黑方没有棋子
    let response = get(format!("/best?fen={}", encode("9/9/9/9/9/9/9/9/9/4K4 b"))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_text(response).await.is_empty());
}

#[tokio::test]
async fn test_invalid_fen() {
    let response = get(format!("/best?fen={}", encode("rnbakabnr/9 w"))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Invalid FEN"));

    // 缺少 fen 参数
    let response = get("/best".to_string()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_move_notation() {
    let response = post_form(format!("fen={}&move=h2e2,z9z9", encode(INITIAL_FEN))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("z9z9"));
}

#[tokio::test]
async fn test_history_out_of_turn() {
    // 第一步走黑方的棋子
    let response = get(format!("/best?fen={}&move=h9g7", encode(INITIAL_FEN))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
