pub mod charts;
pub mod details;
pub mod popup;
pub mod tables;
