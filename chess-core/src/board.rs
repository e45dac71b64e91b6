//! 棋盘状态

use crate::constants::{BOARD_SIZE, BOARD_WIDTH};
use crate::piece::{Piece, PieceKind, Position, Side};

/// 棋盘
///
/// 90 个格子的定长数组，索引为 rank * 9 + file。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; BOARD_SIZE],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: [None; BOARD_SIZE],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();
        let back_rank = [
            PieceKind::Chariot,
            PieceKind::Horse,
            PieceKind::Elephant,
            PieceKind::Advisor,
            PieceKind::General,
            PieceKind::Advisor,
            PieceKind::Elephant,
            PieceKind::Horse,
            PieceKind::Chariot,
        ];

        for (side, home, cannon_rank, soldier_rank) in [(Side::Red, 0, 2, 3), (Side::Black, 9, 7, 6)] {
            // 底线：车马相仕帅仕相马车
            for (file, kind) in back_rank.iter().enumerate() {
                board.set(Position::new_unchecked(home, file as u8), Some(Piece::new(*kind, side)));
            }

            // 炮
            for file in [1, 7] {
                board.set(
                    Position::new_unchecked(cannon_rank, file),
                    Some(Piece::new(PieceKind::Cannon, side)),
                );
            }

            // 兵/卒
            for file in (0..BOARD_WIDTH as u8).step_by(2) {
                board.set(
                    Position::new_unchecked(soldier_rank, file),
                    Some(Piece::new(PieceKind::Soldier, side)),
                );
            }
        }

        board
    }

    /// 获取指定位置的棋子
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.squares[pos.to_index()]
        } else {
            None
        }
    }

    /// 设置指定位置的棋子
    #[inline]
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_valid() {
            self.squares[pos.to_index()] = piece;
        }
    }

    /// 指定位置是否为空
    #[inline]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// 按索引升序遍历所有棋子
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares.iter().enumerate().filter_map(|(index, square)| {
            square.map(|piece| (Position::new_unchecked((index / BOARD_WIDTH) as u8, (index % BOARD_WIDTH) as u8), piece))
        })
    }

    /// 按索引升序遍历指定阵营的棋子
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.side == side)
    }

    /// 棋盘上的棋子总数
    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|square| square.is_some()).count()
    }

    /// 查找指定阵营的将/帅位置
    pub fn find_general(&self, side: Side) -> Option<Position> {
        self.pieces(side)
            .find(|(_, piece)| piece.is_general())
            .map(|(pos, _)| pos)
    }

    /// 红黑互换并上下翻转
    pub fn mirrored(&self) -> Board {
        let mut board = Board::empty();
        for (pos, piece) in self.occupied() {
            board.set(pos.mirrored(), Some(piece.swapped()));
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// 完整的棋盘状态（棋盘、走子方、将帅位置缓存）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Side,
    /// 将/帅位置缓存，按 `Side::index` 存放，被吃后为 None
    pub(crate) generals: [Option<Position>; 2],
}

impl BoardState {
    /// 从棋盘创建状态
    pub fn new(board: Board, side_to_move: Side) -> Self {
        let generals = [board.find_general(Side::Red), board.find_general(Side::Black)];
        Self {
            board,
            side_to_move,
            generals,
        }
    }

    /// 创建初始状态（红先）
    pub fn initial() -> Self {
        Self::new(Board::initial(), Side::Red)
    }

    /// 从摆放列表创建状态
    pub fn from_placement<I>(placement: I, side_to_move: Side) -> Self
    where
        I: IntoIterator<Item = (Position, Piece)>,
    {
        let mut board = Board::empty();
        for (pos, piece) in placement {
            board.set(pos, Some(piece));
        }
        Self::new(board, side_to_move)
    }

    /// 棋盘
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 当前走子方
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// 指定位置的棋子
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.board.get(pos)
    }

    /// 指定阵营将/帅的位置
    #[inline]
    pub fn general(&self, side: Side) -> Option<Position> {
        self.generals[side.index()]
    }

    /// 棋子总数
    pub fn piece_count(&self) -> usize {
        self.board.piece_count()
    }

    /// 有一方的将/帅已被吃
    pub fn is_terminal(&self) -> bool {
        self.generals.iter().any(Option::is_none)
    }

    /// 两将是否在同一列且中间无子（飞将）
    pub fn generals_facing(&self) -> bool {
        let (Some(red), Some(black)) = (self.general(Side::Red), self.general(Side::Black)) else {
            return false;
        };

        if red.file != black.file {
            return false;
        }

        let (low, high) = if red.rank < black.rank {
            (red.rank, black.rank)
        } else {
            (black.rank, red.rank)
        };

        ((low + 1)..high).all(|rank| self.board.is_empty_at(Position::new_unchecked(rank, red.file)))
    }

    /// 红黑互换、上下翻转并交换走子方后的局面
    pub fn mirrored(&self) -> BoardState {
        BoardState::new(self.board.mirrored(), self.side_to_move.opponent())
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::initial();

        // 检查红方帅
        let general = board.get(Position::new_unchecked(0, 4));
        assert_eq!(general, Some(Piece::new(PieceKind::General, Side::Red)));

        // 检查黑方将
        let general = board.get(Position::new_unchecked(9, 4));
        assert_eq!(general, Some(Piece::new(PieceKind::General, Side::Black)));

        // 检查红方炮
        let cannon = board.get(Position::new_unchecked(2, 1));
        assert_eq!(cannon, Some(Piece::new(PieceKind::Cannon, Side::Red)));

        // 检查黑方卒
        let soldier = board.get(Position::new_unchecked(6, 0));
        assert_eq!(soldier, Some(Piece::new(PieceKind::Soldier, Side::Black)));

        assert_eq!(board.piece_count(), 32);
    }

    #[test]
    fn test_occupied_order() {
        let board = Board::initial();
        let indices: Vec<usize> = board.occupied().map(|(pos, _)| pos.to_index()).collect();
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        assert_eq!(indices, sorted);
        assert_eq!(board.pieces(Side::Red).count(), 16);
        assert_eq!(board.pieces(Side::Black).count(), 16);
    }

    #[test]
    fn test_find_general() {
        let board = Board::initial();
        assert_eq!(board.find_general(Side::Red), Some(Position::new_unchecked(0, 4)));
        assert_eq!(board.find_general(Side::Black), Some(Position::new_unchecked(9, 4)));
    }

    #[test]
    fn test_state_caches_generals() {
        let state = BoardState::initial();
        assert_eq!(state.general(Side::Red), Some(Position::new_unchecked(0, 4)));
        assert_eq!(state.general(Side::Black), Some(Position::new_unchecked(9, 4)));
        assert!(!state.is_terminal());

        let lone = BoardState::from_placement(
            [(Position::new_unchecked(0, 4), Piece::new(PieceKind::General, Side::Red))],
            Side::Black,
        );
        assert_eq!(lone.general(Side::Black), None);
        assert!(lone.is_terminal());
    }

    #[test]
    fn test_generals_facing() {
        let mut board = Board::empty();

        // 放置两个将在同一列，中间没有棋子
        board.set(Position::new_unchecked(0, 4), Some(Piece::new(PieceKind::General, Side::Red)));
        board.set(Position::new_unchecked(9, 4), Some(Piece::new(PieceKind::General, Side::Black)));
        assert!(BoardState::new(board, Side::Red).generals_facing());

        // 放一个棋子在中间
        board.set(Position::new_unchecked(5, 4), Some(Piece::new(PieceKind::Soldier, Side::Red)));
        assert!(!BoardState::new(board, Side::Red).generals_facing());
    }

    #[test]
    fn test_mirrored_initial() {
        // 初始局面上下对称，镜像后只有走子方不同
        let state = BoardState::initial();
        let mirrored = state.mirrored();
        assert_eq!(mirrored.board(), state.board());
        assert_eq!(mirrored.side_to_move(), Side::Black);
        assert_eq!(mirrored.mirrored(), state);
    }
}
