// Domain layer - Core types and validation rules

pub mod errors;
pub mod model;
pub mod rules;
