pub mod grading;

pub mod materials;

pub mod objects;

pub mod viewer;

pub use grading::configure_grading_routes;
pub use materials::configure_materials_routes;
pub use objects::configure_object_routes;
pub use viewer::configure_viewer_routes;
