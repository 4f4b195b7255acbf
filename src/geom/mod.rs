mod algorithm;
mod mercator;
mod point;

pub use algorithm::*;
pub use mercator::{FrameError, MercatorFrame};
pub use point::{tuple_point, DisplayLine, DisplayPolygon, FieldPoint, TuplePoint};
