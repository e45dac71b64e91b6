//! 坐标记谱
//!
//! 格子写作列字母 `a`-`i` 加行数字 `0`-`9`，红方底线为第 0 行。
//! 一步棋为起点与终点拼接的 4 个字符，如炮二平五写作 `h2e2`。

use crate::error::ChessError;
use crate::moves::Move;
use crate::piece::Position;

/// 坐标记谱
pub struct Notation;

impl Notation {
    /// 解析格子，如 `e0`
    pub fn parse_position(s: &str) -> Result<Position, ChessError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::InvalidNotation {
                notation: s.to_string(),
            });
        }
        Self::position_from_bytes(bytes[0], bytes[1]).ok_or_else(|| ChessError::InvalidNotation {
            notation: s.to_string(),
        })
    }

    /// 解析走法，如 `h2e2`
    pub fn parse_move(s: &str) -> Result<Move, ChessError> {
        let invalid = || ChessError::InvalidNotation {
            notation: s.to_string(),
        };

        let bytes = s.as_bytes();
        if bytes.len() != 4 {
            return Err(invalid());
        }

        let from = Self::position_from_bytes(bytes[0], bytes[1]).ok_or_else(invalid)?;
        let to = Self::position_from_bytes(bytes[2], bytes[3]).ok_or_else(invalid)?;
        Ok(Move::new(from, to))
    }

    /// 解析逗号分隔的走法序列，忽略空段
    pub fn parse_moves(s: &str) -> Result<Vec<Move>, ChessError> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Self::parse_move)
            .collect()
    }

    /// 输出走法
    pub fn format_move(mv: &Move) -> String {
        mv.to_string()
    }

    fn position_from_bytes(file: u8, rank: u8) -> Option<Position> {
        if !(b'a'..=b'i').contains(&file) || !rank.is_ascii_digit() {
            return None;
        }
        Position::new(rank - b'0', file - b'a')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(Notation::parse_position("a0").unwrap(), Position::new_unchecked(0, 0));
        assert_eq!(Notation::parse_position("i9").unwrap(), Position::new_unchecked(9, 8));
        assert!(Notation::parse_position("j0").is_err());
        assert!(Notation::parse_position("a").is_err());
    }

    #[test]
    fn test_parse_move() {
        // 炮二平五
        let mv = Notation::parse_move("h2e2").unwrap();
        assert_eq!(mv, Move::from_coords(2, 7, 2, 4));
        assert_eq!(Notation::format_move(&mv), "h2e2");
    }

    #[test]
    fn test_parse_move_rejects_malformed() {
        assert!(Notation::parse_move("h2e").is_err());
        assert!(Notation::parse_move("h2e22").is_err());
        assert!(Notation::parse_move("z2e2").is_err());
        assert!(Notation::parse_move("h2eX").is_err());
        assert!(Notation::parse_move("H2E2").is_err());
        assert!(matches!(
            Notation::parse_move("炮二"),
            Err(ChessError::InvalidNotation { .. })
        ));
    }

    #[test]
    fn test_parse_moves() {
        let moves = Notation::parse_moves(",h2e2,h9g7, b0c2").unwrap();
        assert_eq!(
            moves,
            vec![
                Move::from_coords(2, 7, 2, 4),
                Move::from_coords(9, 7, 7, 6),
                Move::from_coords(0, 1, 2, 2),
            ]
        );
        assert!(Notation::parse_moves("").unwrap().is_empty());
        assert!(Notation::parse_moves("h2e2,bad").is_err());
    }
}
