#![doc = "Geometry helpers and session state for the road width mapping UI"]
mod geom;
mod io;
mod state;

#[doc(inline)]
pub use geom::{
    project_coords_to_mercator, project_coords_to_spherical, project_to_mercator, project_to_spherical,
    try_project_to_mercator, try_project_to_spherical, tuple_point, DisplayLine, DisplayPolygon, FieldPoint,
    FrameError, MercatorFrame, TuplePoint,
};

#[doc(inline)]
pub use io::svg::{line_to_path_endpoints, points_to_path_string, polygon_to_path_string, positions_to_path_string, PathEndpoints};

#[doc(inline)]
pub use state::{AppState, MapModel, Mode, ModeError, PanelContent, Store, Subscription};

pub use geojson;
