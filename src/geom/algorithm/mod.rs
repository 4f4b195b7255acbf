mod proj;

pub use proj::*;
