pub mod core;
pub mod utils;
pub mod gateway;
pub mod medias;
pub mod catalog;
pub mod members;
pub mod membership;
pub mod circulation;
