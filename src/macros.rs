/// Helper macro for locking items
///
/// A poisoned lock means a hook or a port panicked while registry state was
/// being changed; the registry cannot recover from that.
///
/// ```rust, ignore
///  let _guard = lock!(self.mutation);
///  self.records.push(record);
/// ```
macro_rules! lock {
    ($lock:expr) => {
        $lock.lock().expect("Failed to acquire lock")
    };
}
