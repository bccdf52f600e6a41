use std::io::{self, Write};

use anyhow::{bail, Result};
use engine::board::{Player, Position};
use engine::game::{Game, TurnState};

// 终端前端：画棋盘、收走子、到点喊引擎走棋
// 只通过 Game 的接口消费引擎：查目标格、应用走子、查胜负
pub fn run(mut game: Game) -> Result<()> {
    println!("rs-checkers: you are 'h'/'H' (bottom), the computer is 'c'/'C' (top).");
    println!("Enter moves as: row,col row,col  (e.g. 5,0 4,1). A single row,col lists targets.");
    loop {
        println!();
        print!("{}", game.board);
        match game.state {
            TurnState::GameOver(winner) => {
                match winner {
                    Player::Human => println!("Human wins!"),
                    Player::Computer => println!("Computer wins!"),
                }
                if !ask_play_again()? {
                    return Ok(());
                }
                // 赢家开下一局
                game.reset(winner);
            }
            TurnState::AwaitingMove(Player::Human) | TurnState::ChainCapture(Player::Human, _) => {
                if !human_turn(&mut game)? {
                    return Ok(());
                }
            }
            _ => computer_turn(&mut game)?,
        }
    }
}

// 返回 false 表示玩家想退出
fn human_turn(game: &mut Game) -> Result<bool> {
    loop {
        if let TurnState::ChainCapture(_, cell) = game.state {
            let targets = game.legal_destinations(cell);
            println!(
                "Capture chain: you must continue from {},{} to one of {}",
                cell.row,
                cell.col,
                format_positions(&targets)
            );
        }
        print!("your move> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(false);
        }
        let line = line.trim();
        if line == "quit" {
            return Ok(false);
        }

        let mut parts = line.split_whitespace();
        match (parts.next().and_then(parse_pos), parts.next().and_then(parse_pos)) {
            (Some(from), Some(to)) => match game.apply_player_move(from, to) {
                Ok(_) => return Ok(true),
                Err(e) => println!("{}", e),
            },
            (Some(origin), None) => {
                // 只给了一个格子：列出它能走到哪
                let targets = game.legal_destinations(origin);
                if targets.is_empty() {
                    println!("no moves from {},{}", origin.row, origin.col);
                } else {
                    println!("targets: {}", format_positions(&targets));
                }
            }
            _ => println!("expected: row,col row,col"),
        }
    }
}

fn computer_turn(game: &mut Game) -> Result<()> {
    let Some(m) = game.compute_automated_move() else {
        // 轮到电脑却算不出走法：状态机保证不会发生
        bail!("computer has no move although the game is not over");
    };
    tracing::debug!(
        "computer plays ({},{}) -> ({},{})",
        m.from.row,
        m.from.col,
        m.to.row,
        m.to.col
    );
    println!(
        "computer: {},{} -> {},{}",
        m.from.row, m.from.col, m.to.row, m.to.col
    );
    game.apply_player_move(m.from, m.to)?;
    Ok(())
}

fn ask_play_again() -> Result<bool> {
    loop {
        print!("Want to play again? (y/n) ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(false);
        }
        match line.trim() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => {}
        }
    }
}

fn parse_pos(s: &str) -> Option<Position> {
    let (row, col) = s.split_once(',')?;
    Some(Position::new(row.trim().parse().ok()?, col.trim().parse().ok()?))
}

fn format_positions(targets: &[Position]) -> String {
    targets
        .iter()
        .map(|p| format!("{},{}", p.row, p.col))
        .collect::<Vec<_>>()
        .join(" ")
}
