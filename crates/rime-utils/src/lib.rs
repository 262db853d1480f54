//! Small shared helpers for Rime: identifier casing and statement assembly.

pub mod case;
pub mod sql;
