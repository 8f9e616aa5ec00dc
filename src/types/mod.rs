pub mod dates;
pub mod observations;
pub mod product;
pub mod station;
