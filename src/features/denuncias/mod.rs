pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{DenunciaRepository, PgDenunciaRepository};
pub use routes::routes;
pub use services::DenunciaService;
