//! 走法生成
//!
//! 只生成伪合法走法：遵守棋子走法和占位规则，不检查走后是否被将军。
//! 送将的走法会在下一层由"吃将"直接暴露出来。

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardState};
use crate::constants::MOVE_CAPACITY;
use crate::piece::{Piece, PieceKind, Position, Side};

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
}

impl Move {
    /// 创建新走法
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// 由 (起始行, 起始列, 目标行, 目标列) 创建
    pub const fn from_coords(from_rank: u8, from_file: u8, to_rank: u8, to_file: u8) -> Self {
        Self {
            from: Position::new_unchecked(from_rank, from_file),
            to: Position::new_unchecked(to_rank, to_file),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// 马的 8 个方向和对应的马腿偏移
const HORSE_JUMPS: [((i8, i8), (i8, i8)); 8] = [
    ((2, 1), (1, 0)),
    ((2, -1), (1, 0)),
    ((1, 2), (0, 1)),
    ((-1, 2), (0, 1)),
    ((-2, 1), (-1, 0)),
    ((-2, -1), (-1, 0)),
    ((1, -2), (0, -1)),
    ((-1, -2), (0, -1)),
];

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成当前走子方的所有伪合法走法，按棋盘索引升序
    pub fn generate(state: &BoardState) -> Vec<Move> {
        let mut moves = Vec::with_capacity(MOVE_CAPACITY);
        let side = state.side_to_move();

        for (pos, piece) in state.board().pieces(side) {
            Self::generate_piece_moves(state, pos, piece, &mut moves);
        }

        moves
    }

    /// 当前走子方能否直接吃掉对方将/帅
    pub fn can_capture_general(state: &BoardState) -> bool {
        match state.general(state.side_to_move().opponent()) {
            Some(target) => Self::generate(state).iter().any(|mv| mv.to == target),
            None => false,
        }
    }

    /// 生成指定棋子的所有伪合法走法
    fn generate_piece_moves(state: &BoardState, pos: Position, piece: Piece, moves: &mut Vec<Move>) {
        let board = state.board();
        match piece.kind {
            PieceKind::General => Self::generate_general_moves(state, pos, piece.side, moves),
            PieceKind::Advisor => Self::generate_advisor_moves(board, pos, piece.side, moves),
            PieceKind::Elephant => Self::generate_elephant_moves(board, pos, piece.side, moves),
            PieceKind::Horse => Self::generate_horse_moves(board, pos, piece.side, moves),
            PieceKind::Chariot => Self::generate_chariot_moves(board, pos, piece.side, moves),
            PieceKind::Cannon => Self::generate_cannon_moves(board, pos, piece.side, moves),
            PieceKind::Soldier => Self::generate_soldier_moves(board, pos, piece.side, moves),
        }
    }

    /// 生成将/帅的走法（含飞将吃子）
    fn generate_general_moves(state: &BoardState, pos: Position, side: Side, moves: &mut Vec<Move>) {
        let board = state.board();
        for (d_rank, d_file) in ORTHOGONAL {
            if let Some(to) = pos.offset(d_rank, d_file) {
                // 必须在九宫格内
                if to.is_in_palace(side) {
                    Self::try_add_move(board, pos, to, side, moves);
                }
            }
        }

        // 飞将：同列无子相隔时可直接吃对方将
        if state.generals_facing() {
            if let Some(enemy) = state.general(side.opponent()) {
                moves.push(Move::new(pos, enemy));
            }
        }
    }

    /// 生成士/仕的走法
    fn generate_advisor_moves(board: &Board, pos: Position, side: Side, moves: &mut Vec<Move>) {
        for (d_rank, d_file) in DIAGONAL {
            if let Some(to) = pos.offset(d_rank, d_file) {
                if to.is_in_palace(side) {
                    Self::try_add_move(board, pos, to, side, moves);
                }
            }
        }
    }

    /// 生成象/相的走法
    fn generate_elephant_moves(board: &Board, pos: Position, side: Side, moves: &mut Vec<Move>) {
        for (d_rank, d_file) in DIAGONAL {
            // 检查象眼是否被堵
            let Some(eye) = pos.offset(d_rank, d_file) else {
                continue;
            };
            if !board.is_empty_at(eye) {
                continue;
            }

            if let Some(to) = pos.offset(d_rank * 2, d_file * 2) {
                // 不能过河
                if to.is_own_half(side) {
                    Self::try_add_move(board, pos, to, side, moves);
                }
            }
        }
    }

    /// 生成马/傌的走法
    fn generate_horse_moves(board: &Board, pos: Position, side: Side, moves: &mut Vec<Move>) {
        for ((d_rank, d_file), (leg_rank, leg_file)) in HORSE_JUMPS {
            // 检查马腿是否被堵
            let Some(leg) = pos.offset(leg_rank, leg_file) else {
                continue;
            };
            if !board.is_empty_at(leg) {
                continue;
            }

            if let Some(to) = pos.offset(d_rank, d_file) {
                Self::try_add_move(board, pos, to, side, moves);
            }
        }
    }

    /// 生成车/俥的走法
    fn generate_chariot_moves(board: &Board, pos: Position, side: Side, moves: &mut Vec<Move>) {
        for (d_rank, d_file) in ORTHOGONAL {
            let mut current = pos;
            while let Some(to) = current.offset(d_rank, d_file) {
                match board.get(to) {
                    Some(target) => {
                        if target.side != side {
                            moves.push(Move::new(pos, to));
                        }
                        break;
                    }
                    None => moves.push(Move::new(pos, to)),
                }
                current = to;
            }
        }
    }

    /// 生成炮/砲的走法
    fn generate_cannon_moves(board: &Board, pos: Position, side: Side, moves: &mut Vec<Move>) {
        for (d_rank, d_file) in ORTHOGONAL {
            let mut current = pos;
            let mut screened = false;

            while let Some(to) = current.offset(d_rank, d_file) {
                match board.get(to) {
                    Some(target) if screened => {
                        // 隔一子吃
                        if target.side != side {
                            moves.push(Move::new(pos, to));
                        }
                        break;
                    }
                    // 第一个棋子作为炮架
                    Some(_) => screened = true,
                    None if !screened => moves.push(Move::new(pos, to)),
                    None => {}
                }
                current = to;
            }
        }
    }

    /// 生成兵/卒的走法
    fn generate_soldier_moves(board: &Board, pos: Position, side: Side, moves: &mut Vec<Move>) {
        // 前进
        if let Some(to) = pos.offset(side.forward(), 0) {
            Self::try_add_move(board, pos, to, side, moves);
        }

        // 过河后可以左右移动
        if !pos.is_own_half(side) {
            for d_file in [-1i8, 1] {
                if let Some(to) = pos.offset(0, d_file) {
                    Self::try_add_move(board, pos, to, side, moves);
                }
            }
        }
    }

    /// 尝试添加走法（目标为空或为敌方棋子）
    #[inline]
    fn try_add_move(board: &Board, from: Position, to: Position, side: Side, moves: &mut Vec<Move>) {
        match board.get(to) {
            Some(target) if target.side == side => {}
            _ => moves.push(Move::new(from, to)),
        }
    }
}
