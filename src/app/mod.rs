pub mod state;
pub mod ui;
pub mod viewer;

pub use viewer::run_viewer;
