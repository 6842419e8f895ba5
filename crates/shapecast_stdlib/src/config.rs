//! Configuration for registry bootstrap.

/// Selects which type families [`bootstrap`](crate::bootstrap) registers.
///
/// `optional` and `maybe` add `optional.<family>.<name>` and
/// `maybe.<family>.<name>` variants of whichever other families are
/// enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct BootstrapConfig {
    /// `nominal.<name>` types (class check only on `try`).
    pub nominal: bool,
    /// `strict.<name>` types and their bare `<name>` aliases.
    pub strict: bool,
    /// `coercible.<name>` types.
    pub coercible: bool,
    /// `params.<name>` types.
    pub params: bool,
    /// `json.<name>` types.
    pub json: bool,
    /// `optional.*` variants.
    pub optional: bool,
    /// `maybe.*` variants.
    pub maybe: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            nominal: true,
            strict: true,
            coercible: true,
            params: true,
            json: true,
            optional: true,
            maybe: true,
        }
    }
}

impl BootstrapConfig {
    /// Only the `nominal` and `strict` families.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            nominal: true,
            strict: true,
            coercible: false,
            params: false,
            json: false,
            optional: false,
            maybe: false,
        }
    }

    /// Builder method to toggle the `nominal` family.
    #[must_use]
    pub fn with_nominal(mut self, enabled: bool) -> Self {
        self.nominal = enabled;
        self
    }

    /// Builder method to toggle the `strict` family.
    #[must_use]
    pub fn with_strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// Builder method to toggle the `coercible` family.
    #[must_use]
    pub fn with_coercible(mut self, enabled: bool) -> Self {
        self.coercible = enabled;
        self
    }

    /// Builder method to toggle the `params` family.
    #[must_use]
    pub fn with_params(mut self, enabled: bool) -> Self {
        self.params = enabled;
        self
    }

    /// Builder method to toggle the `json` family.
    #[must_use]
    pub fn with_json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Builder method to toggle `optional.*` variants.
    #[must_use]
    pub fn with_optional(mut self, enabled: bool) -> Self {
        self.optional = enabled;
        self
    }

    /// Builder method to toggle `maybe.*` variants.
    #[must_use]
    pub fn with_maybe(mut self, enabled: bool) -> Self {
        self.maybe = enabled;
        self
    }
}
