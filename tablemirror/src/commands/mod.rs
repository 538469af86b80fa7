// tablemirror/src/commands/mod.rs

pub mod inspect;
pub mod plan;
pub mod run;
pub mod validate;
