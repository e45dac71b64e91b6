//! 棋盘常量定义

/// 棋盘宽度（列数）
pub const BOARD_WIDTH: usize = 9;

/// 棋盘高度（行数）
pub const BOARD_HEIGHT: usize = 10;

/// 格子总数
pub const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// 红方最后一行（河界以下），黑方从下一行开始
pub const RIVER_RANK: u8 = 4;

/// 九宫格列范围
pub const PALACE_FILES: std::ops::RangeInclusive<u8> = 3..=5;

/// 单次走法生成的预留容量
pub const MOVE_CAPACITY: usize = 64;
