pub mod engine;
pub mod fuzzy;
pub mod weights;
