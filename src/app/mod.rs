pub mod api;
pub mod cli;
pub mod config;
mod context;
pub mod controller;
pub mod runtime;
mod session;
pub mod view;

pub use context::AppContext;
pub use controller::DashboardController;
pub use runtime::Runtime;
pub use session::Session;
