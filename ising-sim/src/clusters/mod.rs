mod utils;
pub mod wolff;

pub use wolff::{acceptance_probability, wolff_step};
