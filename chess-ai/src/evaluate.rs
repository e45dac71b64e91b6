//! 棋局评估函数
//!
//! 分值 = 子力 + 8 × 位置分，以走子方视角计算（正值对走子方有利）。

use chess_core::{Board, BoardState, Piece, PieceKind, Position, Side};

/// 位置分的权重
pub const POSITION_WEIGHT: i32 = 8;

/// 评估器
pub struct Evaluator;

/// 棋子位置分值表（红方视角，黑方按行镜像）
/// 索引为 rank * 9 + file
mod position_tables {
    /// 兵的位置分值
    pub const SOLDIER: [i32; 90] = [
         0,  0,  0,  0,  0,  0,  0,  0,  0,
         0,  0,  0,  0,  0,  0,  0,  0,  0,
         0,  0,  0,  0,  0,  0,  0,  0,  0,
         0,  0, -2,  0,  4,  0, -2,  0,  0,
         2,  0,  8,  0,  8,  0,  8,  0,  2,
         6, 12, 18, 18, 20, 18, 18, 12,  6,  // 过河
        10, 20, 30, 34, 40, 34, 30, 20, 10,
        14, 26, 42, 60, 80, 60, 42, 26, 14,
        18, 36, 56, 80,120, 80, 56, 36, 18,
         0,  3,  6,  9, 12,  9,  6,  3,  0,  // 底线
    ];

    /// 车的位置分值
    pub const CHARIOT: [i32; 90] = [
        -1, 10,  6, 14, 12, 14,  6, 10, -2,
         8,  4,  8, 16,  8, 16,  8,  4,  8,
         4,  8,  6, 14, 12, 14,  6,  8,  4,
         6, 10,  8, 14, 14, 14,  8, 10,  6,
        12, 16, 14, 20, 20, 20, 14, 16, 12,
        12, 14, 12, 18, 18, 18, 12, 14, 12,
        12, 18, 16, 22, 22, 22, 16, 18, 12,
        12, 12, 12, 18, 18, 18, 12, 12, 12,
        16, 20, 18, 24, 26, 24, 18, 20, 16,
        14, 14, 12, 18, 16, 18, 12, 14, 14,
    ];

    /// 马的位置分值
    pub const HORSE: [i32; 90] = [
         0, -4,  0,  0,  0,  0,  0, -4,  0,
         0,  2,  4,  4, -2,  4,  4,  2,  0,
         4,  2,  8,  8,  4,  8,  8,  2,  4,
         2,  6,  8,  6, 10,  6,  8,  6,  2,
         4, 12, 16, 14, 12, 14, 16, 12,  4,
         6, 16, 14, 18, 16, 18, 14, 16,  6,
         8, 24, 18, 24, 20, 24, 18, 24,  8,
        12, 14, 16, 20, 18, 20, 16, 14, 12,
         4, 10, 28, 16,  8, 16, 28, 10,  4,
         4,  8, 16, 12,  4, 12, 16,  8,  4,
    ];

    /// 炮的位置分值
    pub const CANNON: [i32; 90] = [
         0,  0,  2,  6,  6,  6,  2,  0,  0,
         0,  2,  4,  6,  6,  6,  4,  2,  0,
         4,  0,  8,  6, 10,  6,  8,  0,  4,
         0,  0,  0,  2,  4,  2,  0,  0,  0,
        -2,  0,  4,  2,  6,  2,  4,  0, -2,
         0,  0,  0,  2,  8,  2,  0,  0,  0,
         0,  0, -2,  4, 10,  4, -2,  0,  0,
         2,  2,  0,-10, -8,-10,  0,  2,  2,
         2,  2,  0, -4,-14, -4,  0,  2,  2,
         6,  4,  0,-10,-12,-10,  0,  4,  6,
    ];
}

impl Evaluator {
    /// 评估棋局（走子方视角）
    pub fn evaluate(state: &BoardState) -> i32 {
        let mover = state.side_to_move();
        let mut score = 0;

        for (pos, piece) in state.board().occupied() {
            let piece_score = Self::piece_value(piece.kind) + POSITION_WEIGHT * Self::position_bonus(pos, piece);
            if piece.side == mover {
                score += piece_score;
            } else {
                score -= piece_score;
            }
        }

        score
    }

    /// 一方的子力总分
    pub fn material_value(board: &Board, side: Side) -> i32 {
        board.pieces(side).map(|(_, piece)| Self::piece_value(piece.kind)).sum()
    }

    /// 一方的位置分总和（未乘权重）
    pub fn positional_value(board: &Board, side: Side) -> i32 {
        board
            .pieces(side)
            .map(|(pos, piece)| Self::position_bonus(pos, piece))
            .sum()
    }

    /// 棋子基础分值
    pub const fn piece_value(kind: PieceKind) -> i32 {
        match kind {
            PieceKind::General => 100_000,
            PieceKind::Chariot => 600,
            PieceKind::Horse => 300,
            PieceKind::Cannon => 300,
            PieceKind::Advisor => 110,
            PieceKind::Elephant => 110,
            PieceKind::Soldier => 70,
        }
    }

    /// 获取位置加成分
    fn position_bonus(pos: Position, piece: Piece) -> i32 {
        let index = match piece.side {
            Side::Red => pos.to_index(),
            // 黑方按行镜像
            Side::Black => pos.mirrored().to_index(),
        };

        match piece.kind {
            PieceKind::Soldier => position_tables::SOLDIER[index],
            PieceKind::Chariot => position_tables::CHARIOT[index],
            PieceKind::Horse => position_tables::HORSE[index],
            PieceKind::Cannon => position_tables::CANNON[index],
            // 将士象没有位置分
            _ => 0,
        }
    }
}
