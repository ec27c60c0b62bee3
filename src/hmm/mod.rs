pub mod model;
pub mod table;
pub mod tagger;
pub mod trainer;
