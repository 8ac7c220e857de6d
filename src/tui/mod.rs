//! Interactive terminal front end using ratatui.
//!
//! [`ListApp`] drives an [`ItemsList`](crate::list::ItemsList) from key
//! events. After every draw the rows in the viewport are reported back to
//! the list, which materializes the next page once the end of the current
//! one has been on screen.
//!
//! ```ignore
//! let mut app = ListApp::new(list, config.export.dir());
//! run_tui(&mut app)?;
//! println!("?{}", app.share_string());
//! ```

mod app;
mod events;
mod status;
pub mod theme;
mod ui;

pub use app::{CHART_PERCENTAGE_KEY, ListApp, chart_percentage};
pub use events::{Event, EventHandler, handle_key_event};
pub use status::StatusMessage;
pub use theme::{ColorScheme, Theme, colors, current_theme_name, set_theme, toggle_theme};
pub use ui::run_tui;
