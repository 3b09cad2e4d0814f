//! The capability contract handlers supply to the registry.
//!
//! Every entry registered into a [`HandlerRegistry`](crate::registry::HandlerRegistry)
//! carries a [`RegistrationPolicy`] deciding how path collisions are resolved
//! and which outcomes escalate into errors. Two canonical variants cover
//! nearly every handler: [`RegistrationPolicy::standard`] for production
//! registrations and [`RegistrationPolicy::permissive`] for wiring things up
//! where nothing should escalate. Custom variants override individual fields
//! with struct-update syntax.

use crate::registry::RegistryQuery;

/// Registration behavior flags consulted while registering and retrieving a
/// handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationPolicy {
    /// Replace an existing occupant on a path collision, if it allows it.
    pub clobber: bool,
    /// Allow this entry to be replaced by a later registration.
    pub clobberable: bool,
    /// Outcome of the pre-registration check when the entry does not
    /// override [`RegistryEntry::pre_registration_check`].
    pub pre_registration_check: bool,
    /// Escalate when this entry clobbers another.
    pub error_if_clobber: bool,
    /// Escalate when this entry is clobbered by a later registration.
    pub error_if_clobbered: bool,
    /// Escalate when the pre-registration check fails.
    pub error_if_check_fails: bool,
    /// Escalate when the entry ends up unregistered for any reason.
    pub error_if_not_registered: bool,
    /// Demand a fully occupied path when the entry is retrieved.
    pub require_full_path: bool,
}

impl RegistrationPolicy {
    /// The standard policy: clobber and be clobberable, escalate every
    /// failure, demand full paths on retrieval.
    pub const fn standard() -> Self {
        Self {
            clobber: true,
            clobberable: true,
            pre_registration_check: true,
            error_if_clobber: true,
            error_if_clobbered: true,
            error_if_check_fails: true,
            error_if_not_registered: true,
            require_full_path: true,
        }
    }

    /// The permissive policy: same collision behavior as
    /// [`standard`](Self::standard), but nothing escalates and partial paths
    /// are tolerated on retrieval.
    pub const fn permissive() -> Self {
        Self {
            clobber: true,
            clobberable: true,
            pre_registration_check: true,
            error_if_clobber: false,
            error_if_clobbered: false,
            error_if_check_fails: false,
            error_if_not_registered: false,
            require_full_path: false,
        }
    }
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// The interface an object must supply to live in a handler registry.
pub trait RegistryEntry {
    /// Handler name used in diagnostics.
    fn name(&self) -> &str;

    /// Registration behavior for this entry.
    fn policy(&self) -> RegistrationPolicy {
        RegistrationPolicy::standard()
    }

    /// Called before anything else during registration. Returning false keeps
    /// the entry out of the registry without clobbering anyone.
    ///
    /// The default consults the policy flag; entries that need to inspect the
    /// registry (already-claimed environments, existing paths) override this.
    fn pre_registration_check(&self, _registry: &dyn RegistryQuery) -> bool {
        self.policy().pre_registration_check
    }
}

impl<T: RegistryEntry + ?Sized> RegistryEntry for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn policy(&self) -> RegistrationPolicy {
        (**self).policy()
    }

    fn pre_registration_check(&self, registry: &dyn RegistryQuery) -> bool {
        (**self).pre_registration_check(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_policy_escalates_everything() {
        let policy = RegistrationPolicy::standard();
        assert!(policy.clobber);
        assert!(policy.clobberable);
        assert!(policy.error_if_clobber);
        assert!(policy.error_if_clobbered);
        assert!(policy.error_if_check_fails);
        assert!(policy.error_if_not_registered);
        assert!(policy.require_full_path);
    }

    #[test]
    fn test_permissive_policy_escalates_nothing() {
        let policy = RegistrationPolicy::permissive();
        assert!(policy.clobber);
        assert!(policy.clobberable);
        assert!(!policy.error_if_clobber);
        assert!(!policy.error_if_clobbered);
        assert!(!policy.error_if_check_fails);
        assert!(!policy.error_if_not_registered);
        assert!(!policy.require_full_path);
    }

    #[test]
    fn test_custom_variant_by_struct_update() {
        let policy = RegistrationPolicy {
            clobberable: false,
            ..RegistrationPolicy::standard()
        };
        assert!(!policy.clobberable);
        assert!(policy.error_if_clobber);
    }
}
