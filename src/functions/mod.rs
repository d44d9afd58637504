pub mod bot;
pub mod format;
pub mod interactions;
pub mod messaging;
pub mod reaction;
pub mod time;
pub mod ui;
pub mod wait;
