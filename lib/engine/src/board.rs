/*
 * 棋盘模块（Board 与棋子表示）
 *
 * 设计要点
 * - 棋盘为 8x8，电脑方在上（0~2 行），人类方在下（5~7 行），棋子只占深色格
 * - Cell 表示一个格子的内容：空、人类棋子或电脑棋子，棋子分普通兵(Man)和王(King)
 * - 兵和王只有走子方向不同，吃子规则完全一样，方向表在 constant.rs 里
 * - Move 只记录起点和终点，行差为 2 即为跳吃，被吃的子一定在中点
 * - Board 不含任何搜索状态，Clone 即深拷贝，搜索时每个结点拷一份自己用
 *
 * 主要功能
 * - 初始化开局局面 / 空棋盘（测试用）
 * - apply: 执行走子，落底线升王、移除被跳吃的子、报告是否还有连跳
 * - evaluate: 静态评估，正分对电脑有利
 */

use std::fmt;

use crate::constant::{BOARD_SIZE, COMPUTER_MAN_DIRS, HUMAN_MAN_DIRS, KING_DIRS, WIN_BONUS};
use crate::rules;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    Man,
    King,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Human(PieceKind),
    Computer(PieceKind),
    Empty,
}

impl Cell {
    pub fn player(&self) -> Option<Player> {
        match self {
            Cell::Human(_) => Some(Player::Human),
            Cell::Computer(_) => Some(Player::Computer),
            Cell::Empty => None,
        }
    }

    pub fn kind(&self) -> Option<PieceKind> {
        match self {
            Cell::Human(k) | Cell::Computer(k) => Some(*k),
            Cell::Empty => None,
        }
    }

    pub fn belong_to(&self, player: Player) -> bool {
        self.player() == Some(player)
    }

    // 王的机动性更强，子力价值按双倍算
    pub fn material_value(&self) -> i32 {
        match self.kind() {
            Some(PieceKind::Man) => 1,
            Some(PieceKind::King) => 2,
            None => 0,
        }
    }

    // 该棋子可走/可跳的单位对角方向集合
    pub fn directions(&self) -> &'static [(i32, i32)] {
        match self {
            Cell::Human(PieceKind::Man) => &HUMAN_MAN_DIRS,
            Cell::Computer(PieceKind::Man) => &COMPUTER_MAN_DIRS,
            Cell::Human(PieceKind::King) | Cell::Computer(PieceKind::King) => &KING_DIRS,
            Cell::Empty => &[],
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    pub fn next(&self) -> Player {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    pub fn man(&self) -> Cell {
        match self {
            Player::Human => Cell::Human(PieceKind::Man),
            Player::Computer => Cell::Computer(PieceKind::Man),
        }
    }

    pub fn king(&self) -> Cell {
        match self {
            Player::Human => Cell::Human(PieceKind::King),
            Player::Computer => Cell::Computer(PieceKind::King),
        }
    }

    // 升王行：兵走到对方底线变王
    pub fn crown_row(&self) -> i32 {
        match self {
            Player::Human => 0,
            Player::Computer => BOARD_SIZE - 1,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    pub fn offset(&self, (dr, dc): (i32, i32)) -> Self {
        Position::new(self.row + dr, self.col + dc)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Position::new(row, col)
    }
}

pub fn in_board(pos: Position) -> bool {
    pos.row >= 0 && pos.row < BOARD_SIZE && pos.col >= 0 && pos.col < BOARD_SIZE
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Move { from, to }
    }

    pub fn is_jump(&self) -> bool {
        (self.to.row - self.from.row).abs() == 2
    }

    // 跳吃时被吃的子所在的格
    pub fn midpoint(&self) -> Position {
        Position::new((self.from.row + self.to.row) / 2, (self.from.col + self.to.col) / 2)
    }
}

// 升王是否结束本次连跳
// ContinueChain: 升王后按王的方向表继续找后续跳吃（默认）
// EndChain: 升王立即结束本回合，即使还有跳可吃
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum PromotionPolicy {
    #[default]
    ContinueChain,
    EndChain,
}

// 跳吃后同一棋子还能继续吃时的落点与可选目标
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Continuation {
    pub cell: Position,
    pub jumps: Vec<Position>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    // 初始化开局局面：双方各 12 个兵摆在深色格上
    pub fn init() -> Self {
        let mut board = Board::empty();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if (row + col) % 2 != 1 {
                    continue;
                }
                if row < 3 {
                    board.set(Position::new(row, col), Player::Computer.man());
                } else if row >= 5 {
                    board.set(Position::new(row, col), Player::Human.man());
                }
            }
        }
        board
    }

    pub fn empty() -> Self {
        Board {
            cells: [[Cell::Empty; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    // 越界访问属于调用方的编程错误，直接按数组越界 panic
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.row as usize][pos.col as usize]
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.row as usize][pos.col as usize] = cell;
    }

    pub fn count(&self, player: Player) -> i32 {
        let mut count = 0;
        for row in &self.cells {
            for cell in row {
                if cell.belong_to(player) {
                    count += 1;
                }
            }
        }
        count
    }

    // 执行一步走子或跳吃，只改这一个 Board，不碰任何全局状态
    // 返回 Some(Continuation) 表示同一方必须从落点继续跳吃
    pub fn apply(&mut self, m: &Move, player: Player, policy: PromotionPolicy) -> Option<Continuation> {
        let piece = self.get(m.from);
        self.set(m.from, Cell::Empty);

        // 落到对方底线立即升王，和这步棋原子地一起发生
        let crowned = piece.kind() == Some(PieceKind::Man) && m.to.row == player.crown_row();
        self.set(m.to, if crowned { player.king() } else { piece });

        if !m.is_jump() {
            return None;
        }
        self.set(m.midpoint(), Cell::Empty);

        if crowned && policy == PromotionPolicy::EndChain {
            return None;
        }

        // 后续跳按落点棋子此刻的身份算，刚升的王可以四个方向继续吃
        let jumps = rules::jumps_from(self, m.to, player);
        if jumps.is_empty() {
            None
        } else {
            Some(Continuation { cell: m.to, jumps })
        }
    }

    // 静态评估：子力 + 可跳吃数量的机动性加成 + 终局分，正分利好电脑
    pub fn evaluate(&self) -> i32 {
        let winner = rules::winner(self);
        self.player_score(Player::Computer, winner) - self.player_score(Player::Human, winner)
    }

    fn player_score(&self, player: Player, winner: Option<Player>) -> i32 {
        let mut score = 0;
        for row in &self.cells {
            for cell in row {
                if cell.belong_to(player) {
                    score += cell.material_value();
                }
            }
        }
        score += 2 * rules::all_jumps(self, player).len() as i32;
        if winner == Some(player) {
            score += WIN_BONUS;
        }
        score
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2 3 4 5 6 7")?;
        for row in 0..BOARD_SIZE {
            write!(f, "{}", row)?;
            for col in 0..BOARD_SIZE {
                let ch = match self.get(Position::new(row, col)) {
                    Cell::Human(PieceKind::Man) => 'h',
                    Cell::Human(PieceKind::King) => 'H',
                    Cell::Computer(PieceKind::Man) => 'c',
                    Cell::Computer(PieceKind::King) => 'C',
                    Cell::Empty => '.',
                };
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
