pub mod features;
pub mod framing;
pub mod normalize;
pub mod segments;
