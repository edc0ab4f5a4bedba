//! Collects everything you did on a given day from GitHub and Jira and prints it as a single
//! sorted list. Meant to be run from a terminal at the end of the day (or the morning after,
//! with a date argument) when filling out a stand-up or timesheet.
//!

pub mod activity;
pub mod cli;
pub mod error;
pub mod providers;
pub mod utils;
