mod denuncia_handler;

pub use denuncia_handler::*;
