//! 走子与悔棋
//!
//! `apply` 与 `undo` 必须严格按后进先出配对。搜索中使用 `apply_scoped`，
//! 返回的守卫在离开作用域时自动悔棋，剪枝提前返回也不会遗留改动。

use std::ops::{Deref, DerefMut};

use crate::board::BoardState;
use crate::error::ChessError;
use crate::moves::Move;
use crate::piece::{Piece, Position};

/// 悔棋记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoRecord {
    /// 走过的棋
    pub mv: Move,
    /// 被移动的棋子
    pub moved: Option<Piece>,
    /// 目标格原有棋子（被吃的子）
    pub captured: Option<Piece>,
    /// 走子前的将/帅位置缓存
    generals: [Option<Position>; 2],
}

impl BoardState {
    /// 走一步棋（不检查规则），返回悔棋记录
    pub fn apply(&mut self, mv: Move) -> UndoRecord {
        let moved = self.board.get(mv.from);
        let captured = self.board.get(mv.to);
        let record = UndoRecord {
            mv,
            moved,
            captured,
            generals: self.generals,
        };

        self.board.set(mv.from, None);
        self.board.set(mv.to, moved);
        self.side_to_move = self.side_to_move.opponent();

        if let Some(piece) = moved.filter(Piece::is_general) {
            self.generals[piece.side.index()] = Some(mv.to);
        }
        if let Some(piece) = captured.filter(Piece::is_general) {
            self.generals[piece.side.index()] = None;
        }

        record
    }

    /// 撤销 `apply`，必须与最近一次 `apply` 配对
    pub fn undo(&mut self, record: UndoRecord) {
        self.board.set(record.mv.from, record.moved);
        self.board.set(record.mv.to, record.captured);
        self.side_to_move = self.side_to_move.opponent();
        self.generals = record.generals;
    }

    /// 走一步棋，返回的守卫离开作用域时自动悔棋
    pub fn apply_scoped(&mut self, mv: Move) -> MoveGuard<'_> {
        let record = self.apply(mv);
        MoveGuard { state: self, record }
    }

    /// 依次重放历史走法（不检查规则）
    pub fn replay(&mut self, moves: &[Move]) {
        for &mv in moves {
            self.apply(mv);
        }
    }

    /// 重放外部传入的历史走法，要求每步起点是走子方的棋子
    ///
    /// 出错时已重放的走法保留在局面上。
    pub fn replay_checked(&mut self, moves: &[Move]) -> Result<(), ChessError> {
        for &mv in moves {
            match self.board.get(mv.from) {
                None => {
                    return Err(ChessError::NoPiece {
                        square: mv.from.to_string(),
                    })
                }
                Some(piece) if piece.side != self.side_to_move => {
                    return Err(ChessError::NotYourTurn {
                        square: mv.from.to_string(),
                    })
                }
                Some(_) => {
                    self.apply(mv);
                }
            }
        }
        Ok(())
    }
}

/// 作用域走子守卫，解引用为走子后的局面
pub struct MoveGuard<'a> {
    state: &'a mut BoardState,
    record: UndoRecord,
}

impl MoveGuard<'_> {
    /// 本次走子的悔棋记录
    pub fn record(&self) -> &UndoRecord {
        &self.record
    }
}

impl Deref for MoveGuard<'_> {
    type Target = BoardState;

    fn deref(&self) -> &BoardState {
        &*self.state
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut BoardState {
        &mut *self.state
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.state.undo(self.record);
    }
}
