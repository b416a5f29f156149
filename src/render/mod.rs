//! Dashboard Rendering
//!
//! Pure functions from a snapshot to card markup. Nothing here performs I/O,
//! so a render can be computed off to the side and applied in one step.

mod html;
mod stats;

pub use html::{
    escape, render_card, render_dashboard, render_match_history, render_match_row, render_page,
    PageOptions, NO_MATCHES_PLACEHOLDER,
};
pub use stats::{
    rank_text, SessionStats, LOSS_COLOR, WINRATE_BAD_COLOR, WINRATE_GOOD_COLOR, WIN_COLOR,
};
