//! Route handlers for `handle_request`.

pub mod game;
pub mod util;
