pub mod bounds;
pub mod element_model;
pub mod extractor;
pub mod identity;
