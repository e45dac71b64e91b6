//! 棋子与坐标定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_HEIGHT, BOARD_SIZE, BOARD_WIDTH, PALACE_FILES, RIVER_RANK};

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// 将/帅
    General,
    /// 士/仕
    Advisor,
    /// 象/相
    Elephant,
    /// 马/傌
    Horse,
    /// 车/俥
    Chariot,
    /// 炮/砲
    Cannon,
    /// 兵/卒
    Soldier,
}

impl PieceKind {
    /// 全部棋子类型
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    /// 获取 FEN 字符（红方大写，黑方小写）
    pub fn to_fen_char(&self, side: Side) -> char {
        let c = match self {
            PieceKind::General => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'b',
            PieceKind::Horse => 'n',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        };
        match side {
            Side::Red => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    /// 从 FEN 字符解析，兼容 WXF 的 `e`/`h` 写法
    pub fn from_fen_char(c: char) -> Option<(PieceKind, Side)> {
        let side = if c.is_ascii_uppercase() {
            Side::Red
        } else {
            Side::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'k' => PieceKind::General,
            'a' => PieceKind::Advisor,
            'b' | 'e' => PieceKind::Elephant,
            'n' | 'h' => PieceKind::Horse,
            'r' => PieceKind::Chariot,
            'c' => PieceKind::Cannon,
            'p' => PieceKind::Soldier,
            _ => return None,
        };
        Some((kind, side))
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 红方（先手，在下方）
    Red,
    /// 黑方（后手，在上方）
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// 数组下标：红 0，黑 1
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Side::Red => 0,
            Side::Black => 1,
        }
    }

    /// 兵/卒前进方向（行号增量）
    #[inline]
    pub fn forward(&self) -> i8 {
        match self {
            Side::Red => 1,
            Side::Black => -1,
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Side::Red => 'w',
            Side::Black => 'b',
        }
    }

    /// 从 FEN 字符解析（红方写作 `w` 或 `r`）
    pub fn from_fen_char(c: char) -> Option<Side> {
        match c {
            'w' | 'W' | 'r' | 'R' => Some(Side::Red),
            'b' | 'B' => Some(Side::Black),
            _ => None,
        }
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    /// 创建新棋子
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        self.kind.to_fen_char(self.side)
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Piece> {
        PieceKind::from_fen_char(c).map(|(kind, side)| Piece { kind, side })
    }

    /// 是否为将/帅
    #[inline]
    pub fn is_general(&self) -> bool {
        self.kind == PieceKind::General
    }

    /// 交换颜色
    pub fn swapped(&self) -> Piece {
        Piece::new(self.kind, self.side.opponent())
    }
}

/// 棋盘坐标，rank 为行（0-9，红方底线为 0），file 为列（0-8，对应 a-i）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 行 (0-9)
    pub rank: u8,
    /// 列 (0-8)
    pub file: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(rank: u8, file: u8) -> Option<Self> {
        if (rank as usize) < BOARD_HEIGHT && (file as usize) < BOARD_WIDTH {
            Some(Self { rank, file })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(rank: u8, file: u8) -> Self {
        Self { rank, file }
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.rank as usize) < BOARD_HEIGHT && (self.file as usize) < BOARD_WIDTH
    }

    /// 是否位于指定阵营一侧（未过河）
    pub fn is_own_half(&self, side: Side) -> bool {
        match side {
            Side::Red => self.rank <= RIVER_RANK,
            Side::Black => self.rank > RIVER_RANK,
        }
    }

    /// 检查位置是否在九宫格内
    pub fn is_in_palace(&self, side: Side) -> bool {
        let in_file = PALACE_FILES.contains(&self.file);
        let in_rank = match side {
            Side::Red => (0..=2).contains(&self.rank),
            Side::Black => (7..=9).contains(&self.rank),
        };
        in_file && in_rank
    }

    /// 获取偏移后的位置
    pub fn offset(&self, d_rank: i8, d_file: i8) -> Option<Position> {
        let rank = self.rank as i8 + d_rank;
        let file = self.file as i8 + d_file;
        if rank >= 0 && (rank as usize) < BOARD_HEIGHT && file >= 0 && (file as usize) < BOARD_WIDTH {
            Some(Position {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    /// 上下翻转（红黑互换视角）
    pub fn mirrored(&self) -> Position {
        Position {
            rank: (BOARD_HEIGHT - 1) as u8 - self.rank,
            file: self.file,
        }
    }

    /// 转换为数组索引
    #[inline]
    pub fn to_index(&self) -> usize {
        self.rank as usize * BOARD_WIDTH + self.file as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_SIZE {
            Some(Position {
                rank: (index / BOARD_WIDTH) as u8,
                file: (index % BOARD_WIDTH) as u8,
            })
        } else {
            None
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank)
    }
}
