mod denuncia_dto;

pub use denuncia_dto::*;
