//! Root controller of the record grid.
//!
//! ```text
//! set_filter ──▶ Loading ──query──▶ Loaded | Error
//! refresh    ──▶ Loading ──requery─▶ Loaded | Error
//! save       ──▶ Loading ──commit──▶ (all ok) refresh ──▶ Loaded | Error
//!                                    (failed) previous data state
//! select_row ──▶ (no transition) publish selection
//! ```

mod builder;
mod state;
mod view;

pub use builder::ViewControllerBuilder;
pub use state::ViewState;
pub use view::ViewController;
