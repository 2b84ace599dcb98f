pub mod help;
pub mod main;
pub mod points;
pub mod tissues;
