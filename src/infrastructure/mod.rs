pub mod catalog;
pub mod clock;
pub mod discount;
