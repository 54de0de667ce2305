use thiserror::Error;

use crate::TermInt;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),
    #[error("terminal reports an unusable size of {width}x{height}")]
    EmptyGrid { width: TermInt, height: TermInt },
    #[error("no free cell left for the food")]
    NoRoomForFood,
    #[error("could not install the interrupt handler: {0}")]
    Interrupt(#[from] ctrlc::Error),
}
