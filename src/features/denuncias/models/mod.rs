mod denuncia;
mod filter;

pub use denuncia::{
    AssignedAgent, Denuncia, DenunciaAction, DenunciaStatus, DenunciaType, NewDenuncia,
    PerformedBy, Severity, StatusChange,
};
pub use filter::{like_pattern, DenunciaFilter, MatchMode};
