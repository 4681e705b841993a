mod error_dialog;
mod footer;
mod history_view;
mod runner_view;

pub use error_dialog::{ErrorDialog, ErrorDialogState};
pub use footer::Footer;
pub use history_view::{HistoryState, HistoryView};
pub use runner_view::{phase_hints, RunnerView};
