use super::error::SettingsError;

/// Represents settings that can be validated or resolved.
pub trait ResolvableConfiguration {
    type Resolved;

    /// Resolve the settings into their `Resolved` type.
    /// If the resolution / validation fails, you may return `Err` to indicate
    /// that the settings are invalid.
    fn resolve(self) -> Result<Self::Resolved, SettingsError>;
}


/// Represents settings that can be validated or resolved,
/// but where that process requires some additional context.
pub trait ResolvableConfigurationWithContext {
    type Context;
    type Resolved;

    /// Resolve the settings into their `Resolved` type.
    /// If the resolution / validation fails, you may return `Err` to indicate
    /// that the settings are invalid.
    fn resolve(self, context: Self::Context) -> Result<Self::Resolved, SettingsError>;
}
