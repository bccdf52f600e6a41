/* 引擎驱动：行协议的命令循环，不带前端也能驱动引擎对弈 */
extern crate engine;

use std::io;

use engine::board::{Player, Position};
use engine::game::{Game, Outcome};
use regex::Regex;

fn main() {
    let mut driver = Driver::new();
    driver.start();
}

struct Driver {
    game: Game,
    move_re: Regex,
}

impl Driver {
    fn new() -> Self {
        Driver {
            game: Game::new(),
            // 和前端一样用 "行,列 行,列" 描述一步棋
            move_re: Regex::new(r"^(?P<fr>\d)\s*,\s*(?P<fc>\d)\s+(?P<tr>\d)\s*,\s*(?P<tc>\d)$").unwrap(),
        }
    }

    fn start(&mut self) {
        loop {
            let mut cmd = String::new();
            if io::stdin().read_line(&mut cmd).unwrap_or(0) == 0 {
                break;
            }
            let cmd = cmd.trim();
            if cmd == "quit" {
                println!("bye");
                break;
            }
            let mut token = cmd.splitn(2, ' ');
            match token.next().unwrap_or("") {
                "newgame" => {
                    self.game = Game::new();
                    println!("ok");
                }
                "show" => print!("{}", self.game.board),
                "move" => self.apply(token.next().unwrap_or("")),
                "go" => self.go(token.next()),
                "" => {}
                _ => println!("not support"),
            }
        }
    }

    // 解析并应用一步人类走子
    fn apply(&mut self, param: &str) {
        let Some(captures) = self.move_re.captures(param) else {
            println!("bad move syntax, expected: move 5,0 4,1");
            return;
        };
        let coord = |name: &str| -> i32 { captures[name].parse().unwrap_or(0) };
        let from = Position::new(coord("fr"), coord("fc"));
        let to = Position::new(coord("tr"), coord("tc"));
        match self.game.apply_player_move(from, to) {
            Ok(outcome) => report(outcome),
            Err(e) => println!("{}", e),
        }
    }

    // 让引擎为电脑走一步；若跳吃后还能连跳就一并走完
    // "go 3" 把搜索深度调成 3，之后的 go 沿用这个深度
    fn go(&mut self, param: Option<&str>) {
        if let Some(raw) = param {
            match raw.trim().parse() {
                Ok(depth) if depth > 0 => self.game.set_search_depth(depth),
                _ => {
                    println!("bad depth, expected: go 7");
                    return;
                }
            }
        }
        loop {
            let Some(m) = self.game.compute_automated_move() else {
                println!("nobestmove");
                return;
            };
            println!(
                "bestmove {},{} {},{}",
                m.from.row, m.from.col, m.to.row, m.to.col
            );
            match self.game.apply_player_move(m.from, m.to) {
                Ok(Outcome::ContinueSameTurn(_)) => continue,
                Ok(outcome) => {
                    report(outcome);
                    return;
                }
                Err(e) => {
                    // 搜索给出的走法必然合法，走到这里是缺陷
                    tracing::error!("engine move rejected: {}", e);
                    return;
                }
            }
        }
    }
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::ContinueSameTurn(cell) => println!("continue {},{}", cell.row, cell.col),
        Outcome::TurnSwitched => println!("switched"),
        Outcome::GameOver(Player::Human) => println!("gameover human"),
        Outcome::GameOver(Player::Computer) => println!("gameover computer"),
    }
}
