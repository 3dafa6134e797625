pub mod bounds;
pub mod chain;
pub mod geometry;
pub mod pack;
pub mod validate;

pub use bounds::BoundingBox;
pub use chain::FrontChain;
pub use geometry::{Point, OVERLAP_EPSILON};
pub use pack::{pack_circles, AnchorState, PackConfig, PackStats, Packer, Packing};
