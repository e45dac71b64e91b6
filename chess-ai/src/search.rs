//! 搜索引擎
//!
//! 定深 Negamax + Alpha-Beta 剪枝。每个节点的分值都以该节点走子方为视角，
//! 子节点取反，窗口取反并交换。

use std::time::Instant;

use chess_core::{BoardState, Move, MoveGenerator, PieceKind, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::AiError;
use crate::evaluate::Evaluator;

/// 搜索窗口边界
const INF: i32 = i32::MAX / 2;

/// 终局每多剩一层的分值平移，需大于位置分的波动
pub const MATE_DISTANCE_STEP: i32 = 1000;

/// 根节点补查发现送将时的分值
const LOSS_SCORE: i32 = -Evaluator::piece_value(PieceKind::General);

/// 深度档位：子数少于 `below` 时搜索 `depth` 层
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthTier {
    pub below: usize,
    pub depth: u8,
}

/// 按棋盘子数决定搜索深度的阶梯函数
///
/// 子数越多深度越浅（不增），深度至少为 1。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DepthTable", into = "DepthTable")]
pub struct DepthPolicy {
    tiers: Vec<DepthTier>,
    fallback: u8,
}

/// `DepthPolicy` 的序列化形式，反序列化时经过校验
#[derive(Serialize, Deserialize)]
struct DepthTable {
    tiers: Vec<DepthTier>,
    fallback: u8,
}

impl DepthPolicy {
    /// 由档位和兜底深度创建，档位按 `below` 升序排列
    pub fn new(mut tiers: Vec<DepthTier>, fallback: u8) -> Result<Self, AiError> {
        tiers.sort_by_key(|tier| tier.below);

        if fallback == 0 || tiers.iter().any(|tier| tier.depth == 0) {
            return Err(AiError::ZeroDepth);
        }

        for pair in tiers.windows(2) {
            if pair[1].depth > pair[0].depth {
                return Err(AiError::NonMonotonicDepthPolicy {
                    pieces: pair[0].below,
                    depth: pair[1].depth,
                    previous: pair[0].depth,
                });
            }
        }

        if let Some(last) = tiers.last() {
            if fallback > last.depth {
                return Err(AiError::NonMonotonicDepthPolicy {
                    pieces: last.below,
                    depth: fallback,
                    previous: last.depth,
                });
            }
        }

        Ok(Self { tiers, fallback })
    }

    /// 固定深度
    pub fn fixed(depth: u8) -> Result<Self, AiError> {
        Self::new(Vec::new(), depth)
    }

    /// 指定子数对应的搜索深度
    pub fn depth_for(&self, pieces: usize) -> u8 {
        self.tiers
            .iter()
            .find(|tier| pieces < tier.below)
            .map_or(self.fallback, |tier| tier.depth)
    }

    /// 在所有可能的子数上深度都不增
    pub fn is_monotonic(&self) -> bool {
        (0..BOARD_SIZE).all(|pieces| self.depth_for(pieces + 1) <= self.depth_for(pieces))
    }

    pub fn tiers(&self) -> &[DepthTier] {
        &self.tiers
    }
}

impl Default for DepthPolicy {
    /// 少于 4 子 6 层，少于 8 子 5 层，少于 16 子 4 层，其余 3 层
    fn default() -> Self {
        Self {
            tiers: vec![
                DepthTier { below: 4, depth: 6 },
                DepthTier { below: 8, depth: 5 },
                DepthTier { below: 16, depth: 4 },
            ],
            fallback: 3,
        }
    }
}

impl TryFrom<DepthTable> for DepthPolicy {
    type Error = AiError;

    fn try_from(table: DepthTable) -> Result<Self, AiError> {
        Self::new(table.tiers, table.fallback)
    }
}

impl From<DepthPolicy> for DepthTable {
    fn from(policy: DepthPolicy) -> Self {
        Self {
            tiers: policy.tiers,
            fallback: policy.fallback,
        }
    }
}

/// AI 配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub depth_policy: DepthPolicy,
}

impl AiConfig {
    /// 固定深度的配置
    pub fn with_fixed_depth(depth: u8) -> Result<Self, AiError> {
        Ok(Self {
            depth_policy: DepthPolicy::fixed(depth)?,
        })
    }
}

/// 搜索结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// 最佳走法
    pub best_move: Move,
    /// 走子方视角的分值
    pub score: i32,
    /// 搜索深度
    pub depth: u8,
    /// 搜索的节点数
    pub nodes: u64,
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            nodes_searched: 0,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 搜索最佳走法，走子方无子可动时返回 `None`
    ///
    /// 搜索过程中的走子全部撤销，返回时局面与调用前一致。
    pub fn search(&mut self, state: &mut BoardState) -> Option<SearchResult> {
        self.search_root(state, true)
    }

    /// 不剪枝的全宽搜索，根节点流程与 `search` 相同
    pub fn search_full_width(&mut self, state: &mut BoardState) -> Option<SearchResult> {
        self.search_root(state, false)
    }

    fn search_root(&mut self, state: &mut BoardState, pruning: bool) -> Option<SearchResult> {
        let started = Instant::now();
        self.nodes_searched = 0;

        let pieces = state.piece_count();
        let depth = self.config.depth_policy.depth_for(pieces);

        let moves = MoveGenerator::generate(state);
        if moves.is_empty() {
            info!("No move available for {:?} ({} pieces)", state.side_to_move(), pieces);
            return None;
        }

        let mut best: Option<(Move, i32)> = None;
        let mut alpha = -INF;

        for mv in moves {
            let score = {
                let mut child = state.apply_scoped(mv);
                let score = if pruning {
                    -self.alpha_beta(&mut child, depth - 1, -INF, -alpha)
                } else {
                    -self.full_width(&mut child, depth - 1)
                };

                // 一层搜索看不到对方应着，补查一层：走后将/帅可被吃即判负
                if depth == 1 && !child.is_terminal() && MoveGenerator::can_capture_general(&child) {
                    LOSS_SCORE
                } else {
                    score
                }
            };

            debug!("Root move {} scored {}", mv, score);

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
                alpha = score;
            }
        }

        let (best_move, score) = best?;
        info!(
            "Search finished: move={} score={} depth={} pieces={} nodes={} elapsed={:?}",
            best_move,
            score,
            depth,
            pieces,
            self.nodes_searched,
            started.elapsed()
        );

        Some(SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes_searched,
        })
    }

    /// Alpha-Beta 搜索（fail-hard）
    fn alpha_beta(&mut self, state: &mut BoardState, depth: u8, mut alpha: i32, beta: i32) -> i32 {
        self.nodes_searched += 1;

        if state.is_terminal() {
            return Self::terminal_score(state, depth);
        }

        // 到达深度限制，返回评估值
        if depth == 0 {
            return Evaluator::evaluate(state);
        }

        let moves = MoveGenerator::generate(state);
        if moves.is_empty() {
            return Evaluator::evaluate(state);
        }

        for mv in moves {
            let score = {
                let mut child = state.apply_scoped(mv);
                -self.alpha_beta(&mut child, depth - 1, -beta, -alpha)
            };

            if score >= beta {
                return beta; // Beta 剪枝
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }

    /// 全宽 Negamax
    fn full_width(&mut self, state: &mut BoardState, depth: u8) -> i32 {
        self.nodes_searched += 1;

        if state.is_terminal() {
            return Self::terminal_score(state, depth);
        }
        if depth == 0 {
            return Evaluator::evaluate(state);
        }

        let moves = MoveGenerator::generate(state);
        if moves.is_empty() {
            return Evaluator::evaluate(state);
        }

        let mut best = -INF;
        for mv in moves {
            let mut child = state.apply_scoped(mv);
            best = best.max(-self.full_width(&mut child, depth - 1));
        }
        best
    }

    /// 终局分值：按剩余深度平移，越快取胜分越高
    fn terminal_score(state: &BoardState, depth: u8) -> i32 {
        let shift = MATE_DISTANCE_STEP * i32::from(depth);
        let score = Evaluator::evaluate(state);
        if state.general(state.side_to_move()).is_none() {
            score - shift
        } else {
            score + shift
        }
    }

    /// 获取上次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Fen;

    #[test]
    fn test_default_policy_tiers() {
        let policy = DepthPolicy::default();
        assert_eq!(policy.depth_for(2), 6);
        assert_eq!(policy.depth_for(3), 6);
        assert_eq!(policy.depth_for(4), 5);
        assert_eq!(policy.depth_for(7), 5);
        assert_eq!(policy.depth_for(8), 4);
        assert_eq!(policy.depth_for(15), 4);
        assert_eq!(policy.depth_for(16), 3);
        assert_eq!(policy.depth_for(32), 3);
        assert!(policy.is_monotonic());
    }

    #[test]
    fn test_custom_policy_validation() {
        // 档位顺序无关
        let policy = DepthPolicy::new(
            vec![DepthTier { below: 10, depth: 4 }, DepthTier { below: 5, depth: 7 }],
            2,
        )
        .unwrap();
        assert_eq!(policy.depth_for(4), 7);
        assert_eq!(policy.depth_for(9), 4);
        assert_eq!(policy.depth_for(30), 2);
        assert!(policy.is_monotonic());

        // 子数更多反而更深
        let err = DepthPolicy::new(
            vec![DepthTier { below: 5, depth: 3 }, DepthTier { below: 10, depth: 4 }],
            2,
        )
        .unwrap_err();
        assert!(matches!(err, AiError::NonMonotonicDepthPolicy { pieces: 5, depth: 4, previous: 3 }));

        let err = DepthPolicy::new(vec![DepthTier { below: 5, depth: 3 }], 4).unwrap_err();
        assert!(matches!(err, AiError::NonMonotonicDepthPolicy { .. }));

        assert_eq!(DepthPolicy::fixed(0).unwrap_err(), AiError::ZeroDepth);
        assert_eq!(
            DepthPolicy::new(vec![DepthTier { below: 5, depth: 0 }], 0).unwrap_err(),
            AiError::ZeroDepth
        );
    }

    #[test]
    fn test_fixed_policy() {
        let policy = DepthPolicy::fixed(2).unwrap();
        assert_eq!(policy.depth_for(0), 2);
        assert_eq!(policy.depth_for(32), 2);
        assert!(policy.tiers().is_empty());
    }

    #[test]
    fn test_config_serde() {
        let config = AiConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AiConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        // 缺省字段使用默认策略
        let parsed: AiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.depth_policy, DepthPolicy::default());

        // 反序列化同样校验
        let invalid = r#"{"depth_policy":{"tiers":[{"below":4,"depth":2}],"fallback":5}}"#;
        assert!(serde_json::from_str::<AiConfig>(invalid).is_err());
    }

    #[test]
    fn test_search_initial_position() {
        let mut state = BoardState::initial();
        let mut engine = AiEngine::new(AiConfig::default());

        let result = engine.search(&mut state).unwrap();
        assert_eq!(result.depth, 3);
        assert!(MoveGenerator::generate(&state).contains(&result.best_move));
        assert_eq!(result.nodes, engine.nodes_searched());
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_terminal_score_mate_distance() {
        // 黑将已被吃，轮到黑方
        let state = Fen::parse("9/9/9/9/9/9/9/9/9/R3K4 b").unwrap();
        assert!(state.is_terminal());

        let slow = AiEngine::terminal_score(&state, 1);
        let fast = AiEngine::terminal_score(&state, 3);
        assert!(fast < slow);
        assert_eq!(slow - fast, 2 * MATE_DISTANCE_STEP);
    }

    #[test]
    fn test_no_move_returns_none() {
        // 黑方没有任何棋子可动
        let mut state = Fen::parse("9/9/9/9/9/9/9/9/9/4K4 b").unwrap();
        let mut engine = AiEngine::new(AiConfig::with_fixed_depth(2).unwrap());
        assert!(engine.search(&mut state).is_none());
        assert!(engine.search_full_width(&mut state).is_none());
    }
}
