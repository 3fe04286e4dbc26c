pub trait BusyObserver: Send + Sync {
    /// Invoked exactly once per busy/idle transition, in order, while the busy
    /// state is locked. Implementations must not call back into the session.
    fn on_busy_changed(&self, busy: bool);
}

pub trait StatusSink: Send + Sync {
    fn show_progress(&self, text: &str);
    fn clear(&self);
}
