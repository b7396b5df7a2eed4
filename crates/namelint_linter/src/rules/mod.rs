//! Built-in rules, grouped by what they check.

pub mod imports;
pub mod modules;
pub mod naming;
