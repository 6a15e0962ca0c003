pub struct Config {
    /// Suppresses the spinner and informational output.
    ///
    /// Retry warnings and errors are still emitted.
    pub quiet: bool,
}
