use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    TooSmall { width: usize, height: usize },
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall { width, height } => {
                write!(
                    f,
                    "resolution must be at least 2x2 pixels: {}x{}",
                    width, height
                )
            }
        }
    }
}

impl Error for ResolutionError {}

/// Output grid size. Both axes need two samples so each corner maps onto a bound.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Resolution {
    width: usize,
    height: usize,
}

impl Resolution {
    pub fn new(width: usize, height: usize) -> Result<Self, ResolutionError> {
        if width < 2 || height < 2 {
            return Err(ResolutionError::TooSmall { width, height });
        }

        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }
}
