pub mod feed;
pub mod normalize;
