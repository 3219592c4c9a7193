pub mod config;
pub mod counter;
pub mod run;
pub mod simulate;
pub mod validate;
