use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankingError {
    #[error("Unknown philosophy: {0}")]
    UnknownPhilosophy(String),

    #[error("Invalid dq_mode: {0} (expected financials_only_off, global_off or global_on)")]
    InvalidDqMode(String),
}
