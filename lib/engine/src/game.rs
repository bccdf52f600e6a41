/* 对局状态机：管回合归属、连跳强制续跳、终局判定，并对外提供 UI 需要的接口 */

use std::error::Error;
use std::fmt;

use crate::board::{Board, Continuation, Move, Player, Position, PromotionPolicy};
use crate::constant::DEFAULT_DEPTH;
use crate::rules;
use crate::search::Search;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnState {
    AwaitingMove(Player),
    // 刚跳吃过的一方必须从记录的格子继续跳
    ChainCapture(Player, Position),
    GameOver(Player),
}

// apply_player_move 成功后对局的去向
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    ContinueSameTurn(Position),
    TurnSwitched,
    GameOver(Player),
}

// 走法不在当前状态的合法集合里：归属、方向、目标占用、强制吃子，
// 任何一条不满足都报这个错，局面保持原样
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IllegalMove {
    pub from: Position,
    pub to: Position,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "illegal move ({},{}) -> ({},{})",
            self.from.row, self.from.col, self.to.row, self.to.col
        )
    }
}

impl Error for IllegalMove {}

pub struct Game {
    pub board: Board,
    pub state: TurnState,
    policy: PromotionPolicy,
    search_depth: i32,
}

impl Game {
    // 新对局：标准开局，人类先走
    pub fn new() -> Self {
        Self::with_config(PromotionPolicy::default(), DEFAULT_DEPTH)
    }

    pub fn with_config(policy: PromotionPolicy, search_depth: i32) -> Self {
        Game {
            board: Board::init(),
            state: TurnState::AwaitingMove(Player::Human),
            policy,
            search_depth,
        }
    }

    // 再来一局；上一局的赢家先走
    pub fn reset(&mut self, first: Player) {
        self.board = Board::init();
        self.state = TurnState::AwaitingMove(first);
    }

    pub fn search_depth(&self) -> i32 {
        self.search_depth
    }

    // 对局中途也可以调深度，下一次 compute_automated_move 生效
    pub fn set_search_depth(&mut self, depth: i32) {
        self.search_depth = depth;
    }

    pub fn side_to_move(&self) -> Option<Player> {
        match self.state {
            TurnState::AwaitingMove(p) | TurnState::ChainCapture(p, _) => Some(p),
            TurnState::GameOver(_) => None,
        }
    }

    pub fn winner(&self) -> Option<Player> {
        match self.state {
            TurnState::GameOver(w) => Some(w),
            _ => None,
        }
    }

    // 当前状态下的完整合法走法集合
    // AwaitingMove 是全盘走法（有跳必跳），ChainCapture 只有续跳
    pub fn current_moves(&self) -> Vec<Move> {
        match self.state {
            TurnState::AwaitingMove(p) => rules::legal_moves(&self.board, p),
            TurnState::ChainCapture(p, cell) => rules::jumps_from(&self.board, cell, p)
                .into_iter()
                .map(|to| Move::new(cell, to))
                .collect(),
            TurnState::GameOver(_) => vec![],
        }
    }

    // 给 UI 高亮用：选中某格后能走到哪里
    // 不是当前走棋方的子、或别处有强制吃子而这个子没有时返回空
    pub fn legal_destinations(&self, origin: Position) -> Vec<Position> {
        self.current_moves()
            .into_iter()
            .filter(|m| m.from == origin)
            .map(|m| m.to)
            .collect()
    }

    // 应用一步走子，非法时局面不变
    pub fn apply_player_move(&mut self, from: Position, to: Position) -> Result<Outcome, IllegalMove> {
        let m = Move::new(from, to);
        let player = match self.state {
            TurnState::AwaitingMove(p) | TurnState::ChainCapture(p, _) => p,
            TurnState::GameOver(_) => return Err(IllegalMove { from, to }),
        };
        if !self.current_moves().contains(&m) {
            return Err(IllegalMove { from, to });
        }
        let continuation = self.board.apply(&m, player, self.policy);
        Ok(self.advance(player, continuation))
    }

    fn advance(&mut self, player: Player, continuation: Option<Continuation>) -> Outcome {
        if let Some(c) = continuation {
            self.state = TurnState::ChainCapture(player, c.cell);
            return Outcome::ContinueSameTurn(c.cell);
        }
        // 换边前先判终局：对方无子或无步可走都算输
        if let Some(w) = rules::winner(&self.board) {
            self.state = TurnState::GameOver(w);
            return Outcome::GameOver(w);
        }
        self.state = TurnState::AwaitingMove(player.next());
        Outcome::TurnSwitched
    }

    // 给电脑算一步棋，不改变局面；轮到人类或已终局时返回 None
    // 连跳中搜索根只限于续跳候选，搜索树内部仍然逐层换边
    pub fn compute_automated_move(&self) -> Option<Move> {
        match self.side_to_move() {
            Some(Player::Computer) => {}
            _ => return None,
        }
        let candidates = self.current_moves();
        if candidates.is_empty() {
            return None;
        }
        let mut search = Search::with_depth(self.search_depth).with_policy(self.policy);
        let (_, chosen) = search.best_move_among(&self.board, &candidates);
        chosen.or_else(|| {
            // 有棋可走却搜不出来属于缺陷，退化成一步贪心，对局不能中断
            tracing::warn!("search produced no move, falling back to greedy choice");
            search.greedy_move(&self.board, &candidates)
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, PieceKind};

    fn game_with_board(board: Board, to_move: Player) -> Game {
        let mut game = Game::with_config(PromotionPolicy::default(), 3);
        game.board = board;
        game.state = TurnState::AwaitingMove(to_move);
        game
    }

    #[test]
    fn opening_destinations_for_corner_man() {
        let game = Game::new();
        assert_eq!(
            game.legal_destinations(Position::new(5, 0)),
            vec![Position::new(4, 1)]
        );
        // 对方的子没有可选目标
        assert!(game.legal_destinations(Position::new(2, 1)).is_empty());
        // 空格也没有
        assert!(game.legal_destinations(Position::new(4, 3)).is_empty());
    }

    #[test]
    fn step_switches_turn() {
        let mut game = Game::new();
        let outcome = game.apply_player_move(Position::new(5, 0), Position::new(4, 1));
        assert_eq!(outcome, Ok(Outcome::TurnSwitched));
        assert_eq!(game.state, TurnState::AwaitingMove(Player::Computer));
    }

    #[test]
    fn illegal_move_leaves_state_unchanged() {
        let mut game = Game::new();
        let before = game.board.clone();
        // 反向走、走两格、空起点都非法
        assert!(game.apply_player_move(Position::new(5, 0), Position::new(6, 1)).is_err());
        assert!(game.apply_player_move(Position::new(5, 0), Position::new(3, 2)).is_err());
        assert!(game.apply_player_move(Position::new(4, 3), Position::new(3, 2)).is_err());
        assert_eq!(game.board, before);
        assert_eq!(game.state, TurnState::AwaitingMove(Player::Human));
    }

    #[test]
    fn mandatory_capture_rejects_steps() {
        let mut board = Board::empty();
        board.set(Position::new(4, 4), Cell::Human(PieceKind::Man));
        board.set(Position::new(3, 3), Cell::Computer(PieceKind::Man));
        board.set(Position::new(6, 1), Cell::Human(PieceKind::Man));
        let mut game = game_with_board(board, Player::Human);

        // (6,1) 的普通走子违反强制吃子
        let err = game.apply_player_move(Position::new(6, 1), Position::new(5, 0));
        assert_eq!(
            err,
            Err(IllegalMove {
                from: Position::new(6, 1),
                to: Position::new(5, 0)
            })
        );
        assert!(game.legal_destinations(Position::new(6, 1)).is_empty());
        // 吃子本身合法
        assert!(game
            .apply_player_move(Position::new(4, 4), Position::new(2, 2))
            .is_ok());
    }

    #[test]
    fn chain_capture_locks_origin_until_done() {
        // 人类王连吃两个：先 (4,4)->(2,2)，落点处还能继续 (2,2)->(0,4)？
        let mut board = Board::empty();
        board.set(Position::new(4, 4), Cell::Human(PieceKind::King));
        board.set(Position::new(3, 3), Cell::Computer(PieceKind::Man));
        board.set(Position::new(1, 3), Cell::Computer(PieceKind::Man));
        board.set(Position::new(7, 7), Cell::Human(PieceKind::Man));
        board.set(Position::new(0, 0), Cell::Computer(PieceKind::Man));
        let mut game = game_with_board(board, Player::Human);

        let outcome = game.apply_player_move(Position::new(4, 4), Position::new(2, 2));
        assert_eq!(outcome, Ok(Outcome::ContinueSameTurn(Position::new(2, 2))));
        assert_eq!(game.state, TurnState::ChainCapture(Player::Human, Position::new(2, 2)));

        // 连跳期间别的子动不了
        assert!(game.legal_destinations(Position::new(7, 7)).is_empty());
        assert!(game.apply_player_move(Position::new(7, 7), Position::new(6, 6)).is_err());

        // 只能从 (2,2) 继续跳
        assert_eq!(game.legal_destinations(Position::new(2, 2)), vec![Position::new(0, 4)]);
        let outcome = game.apply_player_move(Position::new(2, 2), Position::new(0, 4));
        assert_eq!(outcome, Ok(Outcome::TurnSwitched));
        assert_eq!(game.state, TurnState::AwaitingMove(Player::Computer));
    }

    #[test]
    fn capturing_last_piece_ends_game() {
        let mut board = Board::empty();
        board.set(Position::new(4, 4), Cell::Human(PieceKind::Man));
        board.set(Position::new(3, 3), Cell::Computer(PieceKind::Man));
        let mut game = game_with_board(board, Player::Human);

        let outcome = game.apply_player_move(Position::new(4, 4), Position::new(2, 2));
        assert_eq!(outcome, Ok(Outcome::GameOver(Player::Human)));
        assert_eq!(game.winner(), Some(Player::Human));
        // 终局后一切走子被拒绝
        assert!(game.apply_player_move(Position::new(2, 2), Position::new(1, 1)).is_err());
        assert!(game.current_moves().is_empty());
    }

    #[test]
    fn stalemating_the_opponent_wins() {
        // 电脑走完后人类无子可走，电脑直接获胜
        let mut board = Board::empty();
        board.set(Position::new(7, 0), Cell::Human(PieceKind::Man));
        board.set(Position::new(5, 2), Cell::Computer(PieceKind::Man));
        board.set(Position::new(5, 0), Cell::Computer(PieceKind::King));
        let mut game = game_with_board(board, Player::Computer);

        let outcome = game.apply_player_move(Position::new(5, 0), Position::new(6, 1));
        assert_eq!(outcome, Ok(Outcome::GameOver(Player::Computer)));
    }

    #[test]
    fn computer_move_is_legal_and_applies() {
        let mut game = Game::with_config(PromotionPolicy::default(), 3);
        game.apply_player_move(Position::new(5, 0), Position::new(4, 1))
            .expect("opening step");
        let m = game.compute_automated_move().expect("computer has moves");
        assert!(game.current_moves().contains(&m));
        assert!(game.apply_player_move(m.from, m.to).is_ok());
        assert_eq!(game.side_to_move(), Some(Player::Human));
    }

    #[test]
    fn computer_chain_capture_restricted_to_continuation_cell() {
        // 电脑有两个可跳的子；跳完一次后续跳只能用同一个子
        let mut board = Board::empty();
        board.set(Position::new(2, 2), Cell::Computer(PieceKind::Man));
        board.set(Position::new(3, 3), Cell::Human(PieceKind::Man));
        board.set(Position::new(5, 5), Cell::Human(PieceKind::Man));
        board.set(Position::new(2, 6), Cell::Computer(PieceKind::Man));
        board.set(Position::new(3, 7), Cell::Human(PieceKind::Man));
        board.set(Position::new(7, 1), Cell::Human(PieceKind::Man));
        let mut game = game_with_board(board, Player::Computer);

        let m = game.compute_automated_move().expect("capture available");
        assert!(m.is_jump());
        let outcome = game.apply_player_move(m.from, m.to).expect("legal capture");
        if let Outcome::ContinueSameTurn(cell) = outcome {
            let follow = game.compute_automated_move().expect("chain continues");
            assert_eq!(follow.from, cell);
            assert!(follow.is_jump());
        }
    }

    #[test]
    fn search_depth_can_change_mid_game() {
        // 一跳定胜负的局面，任何深度都必须找到那一跳
        let mut board = Board::empty();
        board.set(Position::new(3, 3), Cell::Computer(PieceKind::Man));
        board.set(Position::new(4, 4), Cell::Human(PieceKind::Man));
        let mut game = game_with_board(board, Player::Computer);
        assert_eq!(game.search_depth(), 3);

        game.set_search_depth(1);
        assert_eq!(game.search_depth(), 1);
        let m = game.compute_automated_move().expect("capture at depth 1");
        assert_eq!(m, Move::new(Position::new(3, 3), Position::new(5, 5)));

        game.set_search_depth(6);
        assert_eq!(game.compute_automated_move(), Some(m));
    }

    #[test]
    fn no_computer_move_on_human_turn() {
        let game = Game::new();
        assert_eq!(game.compute_automated_move(), None);
    }

    #[test]
    fn reset_hands_first_move_to_given_player() {
        let mut game = Game::new();
        game.apply_player_move(Position::new(5, 0), Position::new(4, 1))
            .expect("opening step");
        game.reset(Player::Computer);
        assert_eq!(game.board, Board::init());
        assert_eq!(game.state, TurnState::AwaitingMove(Player::Computer));
    }
}
