pub mod community;
pub mod label_propagation;
