pub mod action;
pub mod board;
pub mod game_state;
pub mod hex;
pub mod layouts;
pub mod market;
pub mod options;
pub mod simulate_game;
pub mod simulate_game_smart; // Greedy heuristic rollouts
pub mod tile;
pub mod tile_bag;
