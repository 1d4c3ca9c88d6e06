pub mod presence;
pub mod diff;
