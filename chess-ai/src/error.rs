//! 错误类型定义

use thiserror::Error;

/// AI 配置错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    /// 子数更多的档位搜索得更深
    #[error("Depth policy deepens with more pieces: {depth} plies at {pieces} pieces exceeds {previous}")]
    NonMonotonicDepthPolicy { pieces: usize, depth: u8, previous: u8 },

    /// 搜索深度为 0
    #[error("Search depth must be at least 1")]
    ZeroDepth,
}
