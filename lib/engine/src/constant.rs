pub const BOARD_SIZE: i32 = 8;

pub const MIN: i32 = -99999;
pub const MAX: i32 = 99999;

// 一方满足胜利条件时评估函数加的终局分
pub const WIN_BONUS: i32 = 1000;

// 默认搜索深度，调大变强但变慢，不影响正确性
pub const DEFAULT_DEPTH: i32 = 7;

// 各兵种的走子方向表，走法与跳吃判定共用这一份数据
// 人类的兵向第 0 行推进，电脑的兵向第 7 行推进，王四个方向都能走
pub const HUMAN_MAN_DIRS: [(i32, i32); 2] = [(-1, -1), (-1, 1)];
pub const COMPUTER_MAN_DIRS: [(i32, i32); 2] = [(1, -1), (1, 1)];
pub const KING_DIRS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
