/// Trait for audio components that support runtime control (e.g., codec chips).
pub trait AudioControl {
    /// Error type for control operations.
    type Error;

    /// Power up and configure the component with its default settings.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Power the component down.
    fn disable(&mut self) -> Result<(), Self::Error>;

    /// Set the output volume (0.0 = silent, 1.0 = full scale).
    fn volume(&mut self, level: f32) -> Result<(), Self::Error>;
}
