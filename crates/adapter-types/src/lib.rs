pub mod loft;
pub mod opening;
pub mod partial;
pub mod spec;

pub use loft::*;
pub use opening::*;
pub use partial::*;
pub use spec::*;
