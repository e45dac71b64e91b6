//! FEN 格式解析和生成
//!
//! 中国象棋 FEN 格式：
//! `<棋盘> [走子方] [其余字段忽略]`
//!
//! 示例：
//! `rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w`
//!
//! 棋盘从第 9 行写到第 0 行，走子方 `w`/`r` 为红，`b` 为黑，缺省为红。

use crate::board::{Board, BoardState};
use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::error::ChessError;
use crate::piece::{Piece, Position, Side};

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w";

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为棋盘状态
    pub fn parse(fen: &str) -> Result<BoardState, ChessError> {
        let mut parts = fen.split_whitespace();
        let board_str = parts.next().ok_or_else(|| ChessError::InvalidFen {
            reason: "Empty FEN string".to_string(),
        })?;

        let board = Self::parse_board(board_str)?;

        let side_to_move = match parts.next() {
            Some(field) => {
                let c = field.chars().next().unwrap_or('w');
                Side::from_fen_char(c).ok_or_else(|| ChessError::InvalidFen {
                    reason: format!("Invalid side to move: {}", field),
                })?
            }
            None => Side::Red,
        };

        Ok(BoardState::new(board, side_to_move))
    }

    /// 解析棋盘部分
    fn parse_board(board_str: &str) -> Result<Board, ChessError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_HEIGHT {
            return Err(ChessError::InvalidFen {
                reason: format!("Expected {} rows, got {}", BOARD_HEIGHT, rows.len()),
            });
        }

        let mut generals = [0usize; 2];

        // FEN 从上到下是 rank 9 到 rank 0
        for (row_idx, row) in rows.iter().enumerate() {
            let rank = (BOARD_HEIGHT - 1 - row_idx) as u8;
            let mut file = 0usize;

            for c in row.chars() {
                if file >= BOARD_WIDTH {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Row {} has too many columns", row_idx),
                    });
                }

                if let Some(empty_count) = c.to_digit(10) {
                    if empty_count == 0 {
                        return Err(ChessError::InvalidFen {
                            reason: format!("Row {} contains a zero run", row_idx),
                        });
                    }
                    file += empty_count as usize;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if piece.is_general() {
                        generals[piece.side.index()] += 1;
                        if generals[piece.side.index()] > 1 {
                            return Err(ChessError::InvalidFen {
                                reason: format!("More than one {:?} general", piece.side),
                            });
                        }
                    }
                    board.set(Position::new_unchecked(rank, file as u8), Some(piece));
                    file += 1;
                } else {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if file != BOARD_WIDTH {
                return Err(ChessError::InvalidFen {
                    reason: format!("Row {} has {} columns, expected {}", row_idx, file, BOARD_WIDTH),
                });
            }
        }

        Ok(board)
    }

    /// 将棋盘状态转换为 FEN 字符串
    pub fn to_string(state: &BoardState) -> String {
        format!(
            "{} {}",
            Self::board_to_string(state.board()),
            state.side_to_move().to_fen_char()
        )
    }

    /// 将棋盘转换为 FEN 棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_HEIGHT);

        for rank in (0..BOARD_HEIGHT as u8).rev() {
            let mut row = String::new();
            let mut empty_count = 0;

            for file in 0..BOARD_WIDTH as u8 {
                if let Some(piece) = board.get(Position::new_unchecked(rank, file)) {
                    if empty_count > 0 {
                        row.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                row.push_str(&empty_count.to_string());
            }

            rows.push(row);
        }

        rows.join("/")
    }

    /// 解析初始局面
    pub fn initial() -> BoardState {
        BoardState::initial()
    }
}
