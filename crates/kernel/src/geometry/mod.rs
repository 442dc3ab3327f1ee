pub mod point;
pub mod primitives;
