mod bucket;
mod buffer;

pub use bucket::Bucket;
pub use buffer::BucketRing;
