mod denuncia_service;

pub use denuncia_service::DenunciaService;
