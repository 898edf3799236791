pub mod collection;
pub mod statistics;
