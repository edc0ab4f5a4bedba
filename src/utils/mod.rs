pub mod clock;
pub mod collate;
pub mod date;
pub mod dir;
pub mod logging;
