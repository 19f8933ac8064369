pub mod cli;
pub mod worker;
