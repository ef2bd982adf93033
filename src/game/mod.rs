//! Game module — the dice football engine and its in-memory session.
//!
//! Leaf-first: `rng` feeds `resolver` and `placement`, `score` prices each
//! landing, `turns` sequences rolls and players, `state` holds the one live
//! session, and `board` renders it for the page.

pub mod board;
pub mod placement;
pub mod resolver;
pub mod rng;
pub mod score;
pub mod state;
pub mod turns;
