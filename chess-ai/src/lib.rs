//! 中国象棋 AI 引擎
//!
//! 包含:
//! - 棋局评估函数
//! - 按子数定深的 Negamax + Alpha-Beta 搜索
//! - 用于校验剪枝的全宽搜索

mod error;
mod evaluate;
mod search;

pub use error::AiError;
pub use evaluate::{Evaluator, POSITION_WEIGHT};
pub use search::{AiConfig, AiEngine, DepthPolicy, DepthTier, SearchResult, MATE_DISTANCE_STEP};
