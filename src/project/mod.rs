//! Project input structures and portfolio loading

mod data;
pub mod loader;

pub use data::{ClientType, Jurisdiction, ProjectInput};
pub use loader::{load_projects, load_projects_from_reader, LoadError, ProjectRecord};
