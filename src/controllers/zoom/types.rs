use crate::core::data::complex::Complex;
use crate::core::viewport::ViewportModel;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Pointer button as reported by the input layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other(u16),
}

impl PointerButton {
    /// Primary zooms in, secondary zooms out, anything else does nothing.
    #[must_use]
    pub fn zoom_direction(self) -> Option<ZoomDirection> {
        match self {
            Self::Primary => Some(ZoomDirection::In),
            Self::Secondary => Some(ZoomDirection::Out),
            Self::Other(_) => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ZoomRequest {
    pub point: Complex,
    pub direction: ZoomDirection,
}

/// Why a click had no effect. Never surfaced to the user.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ZoomRejection {
    Busy,
    OutsideView,
    UnsupportedButton,
    ZoomOutLimit,
    BelowMinimumSize,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ZoomOutcome {
    Committed {
        model: ViewportModel,
        direction: ZoomDirection,
    },
    Rejected(ZoomRejection),
}

impl ZoomOutcome {
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_map_to_directions() {
        assert_eq!(PointerButton::Primary.zoom_direction(), Some(ZoomDirection::In));
        assert_eq!(PointerButton::Secondary.zoom_direction(), Some(ZoomDirection::Out));
        assert_eq!(PointerButton::Other(2).zoom_direction(), None);
    }
}
