//! HTTP 接口
//!
//! `GET|POST /best`，参数 `fen`（局面）与 `move`（逗号分隔的历史走法）。
//! 返回 200 与坐标走法文本，无棋可走时返回 204，输入无效时返回 400。

use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chess_ai::{AiConfig, AiEngine};
use chess_core::{ChessError, Fen, Notation};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, warn};

/// 路由共享状态
#[derive(Clone)]
struct AppState {
    config: Arc<AiConfig>,
}

/// 最佳走法请求
#[derive(Debug, Deserialize)]
pub struct BestMoveRequest {
    #[serde(default)]
    pub fen: String,
    /// 逗号分隔的坐标走法
    #[serde(default, rename = "move")]
    pub moves: String,
}

/// 接口错误
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidInput(#[from] ChessError),

    #[error("Search task failed: {0}")]
    Search(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidInput(e) => {
                warn!("Rejected request: {}", e);
                StatusCode::BAD_REQUEST
            }
            ApiError::Search(e) => {
                error!("Search task failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}

/// 创建路由
pub fn router(config: AiConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/best", get(best_from_query).post(best_from_form))
        .with_state(state)
}

async fn best_from_query(
    State(state): State<AppState>,
    Query(request): Query<BestMoveRequest>,
) -> Result<Response, ApiError> {
    best_move(&state, request).await
}

async fn best_from_form(
    State(state): State<AppState>,
    Form(request): Form<BestMoveRequest>,
) -> Result<Response, ApiError> {
    best_move(&state, request).await
}

async fn best_move(state: &AppState, request: BestMoveRequest) -> Result<Response, ApiError> {
    let mut board = Fen::parse(&request.fen)?;
    let history = Notation::parse_moves(&request.moves)?;
    board.replay_checked(&history)?;

    debug!("Searching {} after {} moves", request.fen, history.len());

    // 搜索是同步的 CPU 计算，放到阻塞线程池
    let config = AiConfig::clone(&state.config);
    let result = tokio::task::spawn_blocking(move || AiEngine::new(config).search(&mut board)).await?;

    Ok(match result {
        Some(result) => Notation::format_move(&result.best_move).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}
