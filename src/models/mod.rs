pub mod analysis;
pub mod climate;
pub mod greenhouse;
pub mod reference;
