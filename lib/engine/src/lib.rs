/**
 * 引擎核心库入口
 *
 * 说明
 * - 暴露五个子模块：board, constant, rules, search, game
 * - 这些模块共同构成跳棋引擎的核心逻辑：棋盘与棋子表示、走法与吃子规则、
 *   Alpha-Beta 搜索、以及对外的对局状态机
 * - UI 层只通过 game::Game 的接口消费引擎：查询可走目标、应用走子、查询胜负
 */
pub mod board;
pub mod constant;
pub mod game;
pub mod rules;
pub mod search;
