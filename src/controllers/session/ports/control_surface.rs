use crate::core::viewport::ControlValues;

pub trait ControlSurface: Send + Sync {
    /// The core overrode the displayed parameters; `values.ranges` may be wider
    /// than the control's declared ranges.
    fn sync(&self, values: ControlValues);
}
