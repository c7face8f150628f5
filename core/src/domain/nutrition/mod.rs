pub mod brands;
pub mod entities;
pub mod errors;
pub mod helpers;
pub mod insights;
pub mod ports;
pub mod prompts;
pub mod sanitizer;
pub mod schema;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use ports::*;
pub use value_objects::*;
