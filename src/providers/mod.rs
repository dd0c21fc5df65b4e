pub mod nestoria;
pub mod traits;
pub mod types;

pub use nestoria::{NestoriaConfig, NestoriaRepo};
pub use traits::Repository;
pub use types::Query;
