pub mod tracker;

pub use tracker::Session;
