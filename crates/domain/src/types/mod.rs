//! Domain types and models

pub mod house;

pub use house::House;
