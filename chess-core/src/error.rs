//! 错误类型定义

use thiserror::Error;

/// 外部输入（FEN、坐标记谱）解析错误
///
/// 引擎核心对合法棋盘是全函数，这些错误只会在构造棋盘时出现。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// 起点没有棋子
    #[error("No piece at {square}")]
    NoPiece { square: String },

    /// 起点棋子不属于走子方
    #[error("Piece at {square} does not belong to the side to move")]
    NotYourTurn { square: String },

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },

    /// 无效的坐标记谱
    #[error("Invalid move notation: {notation:?}")]
    InvalidNotation { notation: String },
}

/// 规则层结果类型
pub type Result<T> = std::result::Result<T, ChessError>;
