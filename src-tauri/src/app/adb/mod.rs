pub mod keyevents;
pub mod locator;
pub mod parse;
pub mod runner;
