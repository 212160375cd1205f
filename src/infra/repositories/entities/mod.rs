//! SeaORM entity definitions.

pub mod blog;
