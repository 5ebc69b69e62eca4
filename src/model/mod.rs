pub mod branch;
pub mod membership;
pub mod metadata;
pub mod node_id;
pub mod path;
pub mod step;

pub use branch::*;
pub use membership::*;
pub use metadata::*;
pub use node_id::*;
pub use path::*;
pub use step::*;
