pub mod analysis_service;
pub mod climate;
pub mod diurnal;
pub mod export;
pub mod geometry;
pub mod heating;
pub mod revenue;
