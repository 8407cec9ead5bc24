mod denuncia_repository;
#[cfg(test)]
mod memory_denuncia_repository;
mod pg_denuncia_repository;

pub use denuncia_repository::DenunciaRepository;
#[cfg(test)]
pub use memory_denuncia_repository::InMemoryDenunciaRepository;
pub use pg_denuncia_repository::PgDenunciaRepository;
