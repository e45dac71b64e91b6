//! 中国象棋规则核心
//!
//! 包含:
//! - 棋子、坐标、棋盘等核心数据结构
//! - 伪合法走法生成
//! - 走子/悔棋（含作用域守卫）
//! - FEN 与坐标记谱的解析

mod board;
mod constants;
mod error;
mod fen;
mod mover;
mod moves;
mod notation;
mod piece;

pub use board::{Board, BoardState};
pub use constants::*;
pub use error::{ChessError, Result};
pub use fen::{Fen, INITIAL_FEN};
pub use mover::{MoveGuard, UndoRecord};
pub use moves::{Move, MoveGenerator};
pub use notation::Notation;
pub use piece::{Piece, PieceKind, Position, Side};
