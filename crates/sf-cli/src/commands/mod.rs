pub mod evaluate;
pub mod profile;
pub mod screen;
