use crate::codec::PersistenceError;
use crate::palette::PaletteError;
use crate::source::LoadError;
use thiserror::Error;

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
