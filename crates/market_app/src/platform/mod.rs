mod app;
pub mod config;
mod effects;
mod persistence;
mod router;
mod ui;

pub use app::run_app;

use market_core::Msg;

/// Everything the main loop reacts to.
pub(crate) enum Input {
    Line(String),
    Dispatch(Msg),
    EndOfInput,
}
