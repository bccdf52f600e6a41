/*
 * 规则模块：走子与跳吃的合法性判定、走法生成、胜负判定
 *
 * - 走子(step)：斜向走一格到空格，方向必须在该棋子的方向表里
 * - 跳吃(jump)：斜向跳两格到空格，中点恰好是对方棋子，吃掉它
 * - 强制吃子：只要有跳可吃，legal_moves 只返回跳，普通走子此时全部非法
 *   这条规则人机两侧和搜索树里必须完全一致
 */

use crate::board::{in_board, Board, Cell, Move, Player, Position};

pub fn is_legal_step(board: &Board, from: Position, to: Position, player: Player) -> bool {
    if !in_board(from) || !in_board(to) {
        return false;
    }
    let piece = board.get(from);
    if !piece.belong_to(player) {
        return false;
    }
    if board.get(to) != Cell::Empty {
        return false;
    }
    let delta = (to.row - from.row, to.col - from.col);
    piece.directions().contains(&delta)
}

pub fn is_legal_jump(board: &Board, from: Position, to: Position, player: Player) -> bool {
    if !in_board(from) || !in_board(to) {
        return false;
    }
    let piece = board.get(from);
    // 先查归属，跳过己方棋子的情况到不了中点判定
    if !piece.belong_to(player) {
        return false;
    }
    if board.get(to) != Cell::Empty {
        return false;
    }
    let delta = (to.row - from.row, to.col - from.col);
    if !piece
        .directions()
        .iter()
        .any(|&(dr, dc)| delta == (2 * dr, 2 * dc))
    {
        return false;
    }
    // 中点必须正好是对方的子
    let mid = Move::new(from, to).midpoint();
    board.get(mid).belong_to(player.next())
}

// 某个格子上的棋子单次跳吃能到达的落点；格子为空或不是 player 的子时为空
pub fn jumps_from(board: &Board, from: Position, player: Player) -> Vec<Position> {
    if !in_board(from) {
        return vec![];
    }
    board
        .get(from)
        .directions()
        .iter()
        .map(|&(dr, dc)| from.offset((2 * dr, 2 * dc)))
        .filter(|&to| is_legal_jump(board, from, to, player))
        .collect()
}

// player 全部棋子的所有单次跳吃，强制吃子规则以这个集合为准
pub fn all_jumps(board: &Board, player: Player) -> Vec<Move> {
    let mut jumps = vec![];
    for_each_piece(board, player, |from| {
        for to in jumps_from(board, from, player) {
            jumps.push(Move::new(from, to));
        }
    });
    jumps
}

// 有跳必跳：存在跳吃时只返回跳吃，否则返回所有普通走子
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    let jumps = all_jumps(board, player);
    if !jumps.is_empty() {
        return jumps;
    }
    let mut moves = vec![];
    for_each_piece(board, player, |from| {
        for &dir in board.get(from).directions() {
            let to = from.offset(dir);
            if is_legal_step(board, from, to, player) {
                moves.push(Move::new(from, to));
            }
        }
    });
    moves
}

// 胜负判定：先看子力是否吃光，再看是否无子可走（无法走棋的一方判负，不算和）
pub fn winner(board: &Board) -> Option<Player> {
    if board.count(Player::Human) == 0 {
        return Some(Player::Computer);
    }
    if board.count(Player::Computer) == 0 {
        return Some(Player::Human);
    }
    if legal_moves(board, Player::Human).is_empty() {
        return Some(Player::Computer);
    }
    if legal_moves(board, Player::Computer).is_empty() {
        return Some(Player::Human);
    }
    None
}

fn for_each_piece<F: FnMut(Position)>(board: &Board, player: Player, mut f: F) {
    for row in 0..crate::constant::BOARD_SIZE {
        for col in 0..crate::constant::BOARD_SIZE {
            let pos = Position::new(row, col);
            if board.get(pos).belong_to(player) {
                f(pos);
            }
        }
    }
}
