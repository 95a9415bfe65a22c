mod build;
pub mod constants;
mod io;
pub mod layout;
pub mod marks;
mod options;
pub mod render;
mod types;

pub use build::{build_template, build_wraps, create_template, create_wraps};
pub use io::{load_image, save_image, save_pdf, wrap_output_paths};
pub use layout::{plan_template, plan_wrap};
pub use options::*;
pub use types::*;
