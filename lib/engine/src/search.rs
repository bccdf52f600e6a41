/*
 * 搜索模块：固定深度的极小极大搜索 + Alpha-Beta 剪枝
 *
 * - 搜索状态与 Board 分离，Board 保持纯局面数据
 * - 每个结点在自己的 Board 拷贝上模拟，栈上任意两帧不共享可变棋盘
 * - 搜索树严格逐层换边：连跳"同一方继续走"只约束真实对局的回合推进，
 *   不改变搜索树里一层一手的交替
 * - 终局判定优先于深度判定：已分胜负的结点直接返回 MAX/MIN，
 *   必胜/必败永远压过启发式评估
 * - 同分取先遇到的走法，保证结果可复现；随机残局可选（默认关）
 */

use crate::board::{Board, Move, Player, PromotionPolicy};
use crate::constant::{DEFAULT_DEPTH, MAX, MIN};
use crate::rules;

// 根结点同分走法的选择策略
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TieBreak {
    // 保留第一个达到最优值的走法（确定性，测试依赖这一点）
    #[default]
    First,
    // 在同分走法里随机挑一个
    Random,
}

pub struct Search {
    pub depth: i32,
    pub policy: PromotionPolicy,
    pub tie_break: TieBreak,
    // 搜索结点计数器
    pub counter: u64,
}

impl Search {
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }

    pub fn with_depth(depth: i32) -> Self {
        Search {
            depth,
            policy: PromotionPolicy::default(),
            tie_break: TieBreak::default(),
            counter: 0,
        }
    }

    pub fn with_policy(mut self, policy: PromotionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    // 为电脑找最佳走法，返回 (评估值, 走法)
    pub fn best_move(&mut self, board: &Board) -> (i32, Option<Move>) {
        let candidates = rules::legal_moves(board, Player::Computer);
        self.best_move_among(board, &candidates)
    }

    // 在给定候选集里找最佳走法；连跳时 game 层会把候选限制为续跳
    pub fn best_move_among(&mut self, board: &Board, candidates: &[Move]) -> (i32, Option<Move>) {
        self.counter = 0;
        let mut alpha = MIN;
        let mut best_value = MIN;
        let mut best: Vec<Move> = vec![];
        for m in candidates {
            let mut child = board.clone();
            child.apply(m, Player::Computer, self.policy);
            let value = self.minimax(&child, self.depth - 1, alpha, MAX, false);
            if best.is_empty() || value > best_value {
                best_value = value;
                best.clear();
                best.push(*m);
            } else if value == best_value {
                best.push(*m);
            }
            // 随机残局需要同分池里全是真值：收紧根窗口后，后面的兄弟
            // 可能只返回一个恰好等于 best_value 的剪枝上界，真值其实更低。
            // First 只取第一个最优走法，不受这个影响，照常收紧
            if self.tie_break == TieBreak::First {
                alpha = alpha.max(value);
            }
        }
        let chosen = match self.tie_break {
            TieBreak::First => best.first().copied(),
            TieBreak::Random => pick_random(&best),
        };
        (best_value, chosen)
    }

    fn minimax(&mut self, board: &Board, depth: i32, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
        self.counter += 1;
        // 先判终局再看深度
        match rules::winner(board) {
            Some(Player::Computer) => return MAX,
            Some(Player::Human) => return MIN,
            None => {}
        }
        if depth <= 0 {
            return board.evaluate();
        }

        let mover = if maximizing { Player::Computer } else { Player::Human };
        let moves = rules::legal_moves(board, mover);
        // winner() 已经把无子可走的局面拦下了，走到这里 moves 一定非空
        if maximizing {
            let mut best = MIN;
            for m in &moves {
                let mut child = board.clone();
                child.apply(m, mover, self.policy);
                let value = self.minimax(&child, depth - 1, alpha, beta, false);
                best = best.max(value);
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = MAX;
            for m in &moves {
                let mut child = board.clone();
                child.apply(m, mover, self.policy);
                let value = self.minimax(&child, depth - 1, alpha, beta, true);
                best = best.min(value);
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    // 兜底策略：搜索意外没给出走法时，按一步贪心挑即时评估最高的候选
    // 确定性扫描，同分保留先遇到的
    pub fn greedy_move(&self, board: &Board, candidates: &[Move]) -> Option<Move> {
        let mut best: Option<(i32, Move)> = None;
        for m in candidates {
            let mut child = board.clone();
            child.apply(m, Player::Computer, self.policy);
            let value = child.evaluate();
            if best.map_or(true, |(bv, _)| value > bv) {
                best = Some((value, *m));
            }
        }
        best.map(|(_, m)| m)
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}

fn pick_random(moves: &[Move]) -> Option<Move> {
    if moves.len() <= 1 {
        return moves.first().copied();
    }
    let n = moves.len() as u32;
    // 拒绝采样：丢掉最高段不足一整轮 n 的样本，取模才是均匀的
    let zone = u32::MAX - u32::MAX % n;
    loop {
        let mut buf = [0u8; 4];
        if getrandom::getrandom(&mut buf).is_err() {
            return moves.first().copied();
        }
        let sample = u32::from_be_bytes(buf);
        if sample < zone {
            return moves.get((sample % n) as usize).copied();
        }
    }
}
