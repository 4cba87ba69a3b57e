pub mod bridge;
pub mod config;
pub mod dnd;
pub mod helpers;
pub mod inventory;
pub mod logging;
pub mod replay;
pub mod session;
pub mod ui;
