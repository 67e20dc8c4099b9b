pub mod evaluate;
pub mod index;
pub mod run;
pub mod sampling;
pub mod score;
pub mod sensors;
pub mod settings;
