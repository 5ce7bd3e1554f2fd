//! Tenant-to-destination routing table.
//!
//! Maps each tenant to the destination its audit records are delivered to.
//! Entries are added through the validated [`DestinationRegistry::register`]
//! call or bulk-loaded at startup from a single comma-delimited
//! `tenant-destination` string; removal is explicit and idempotent. There is
//! no implicit expiry, and resolution fails closed: a tenant with no entry
//! gets nothing delivered.
//!
//! Uses `std::sync::RwLock` intentionally: all lock acquisitions are brief
//! and never held across an await point, making a synchronous lock safe and
//! more efficient than `tokio::sync::RwLock`. Resolution is a pure read;
//! register and unregister are the only writers.

use std::collections::HashMap;
use std::sync::RwLock;

use vigil_types::{DestinationId, ParseIdError, TenantId};

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// An id did not match the numeric identifier format.
    #[error("validation failed: {0}")]
    Validation(#[from] ParseIdError),

    /// The tenant has no configured destination.
    #[error("no destination configured for tenant {0}")]
    NotConfigured(TenantId),

    /// A bulk-load entry could not be parsed. The whole load is aborted
    /// rather than skipping the entry.
    #[error("malformed route entry {entry:?} at position {index}: {reason}")]
    MalformedRoute {
        /// Zero-based position of the entry in the delimited string.
        index: usize,
        /// The raw entry text.
        entry: String,
        /// Why the entry was rejected.
        reason: String,
    },
}

/// Concurrent tenant → destination mapping.
#[derive(Debug, Default)]
pub struct DestinationRegistry {
    routes: RwLock<HashMap<TenantId, DestinationId>>,
}

impl DestinationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-loads routes from a comma-delimited `tenant-destination` string,
    /// e.g. `"111-222,333-444"`.
    ///
    /// An empty or whitespace-only string yields an empty registry. Any
    /// malformed pair (wrong field count, non-numeric id) fails the whole
    /// load with [`RegistryError::MalformedRoute`].
    pub fn from_route_spec(spec: &str) -> Result<Self, RegistryError> {
        let registry = Self::new();
        if spec.trim().is_empty() {
            return Ok(registry);
        }

        for (index, raw) in spec.split(',').enumerate() {
            let entry = raw.trim();
            let malformed = |reason: String| RegistryError::MalformedRoute {
                index,
                entry: entry.to_string(),
                reason,
            };

            let (tenant_raw, destination_raw) = entry
                .split_once('-')
                .ok_or_else(|| malformed("expected tenant-destination".to_string()))?;
            if destination_raw.contains('-') {
                return Err(malformed("expected exactly two fields".to_string()));
            }

            let tenant: TenantId = tenant_raw
                .parse()
                .map_err(|e: ParseIdError| malformed(e.to_string()))?;
            let destination: DestinationId = destination_raw
                .parse()
                .map_err(|e: ParseIdError| malformed(e.to_string()))?;

            registry.insert(tenant, destination);
        }

        tracing::info!(routes = registry.len(), "loaded destination routes");
        Ok(registry)
    }

    /// Registers (or overwrites) the destination for a tenant.
    ///
    /// Both ids are validated against the numeric identifier format. No
    /// existence check is made against the remote platform; that belongs to
    /// the collaborator that owns the live connection.
    pub fn register(&self, tenant: &str, destination: &str) -> Result<(), RegistryError> {
        let tenant: TenantId = tenant.parse()?;
        let destination: DestinationId = destination.parse()?;
        self.insert(tenant, destination);
        Ok(())
    }

    /// Removes the mapping for a tenant if present. Idempotent: removing an
    /// unregistered (or malformed) tenant is a no-op.
    ///
    /// Returns `true` if a mapping was removed.
    pub fn unregister(&self, tenant: &str) -> bool {
        let Ok(tenant) = tenant.parse::<TenantId>() else {
            return false;
        };
        self.routes
            .write()
            .expect("destination routes lock poisoned")
            .remove(&tenant)
            .is_some()
    }

    /// Resolves the destination for a tenant, failing closed when absent.
    pub fn resolve(&self, tenant: &TenantId) -> Result<DestinationId, RegistryError> {
        self.routes
            .read()
            .expect("destination routes lock poisoned")
            .get(tenant)
            .cloned()
            .ok_or_else(|| RegistryError::NotConfigured(tenant.clone()))
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes
            .read()
            .expect("destination routes lock poisoned")
            .len()
    }

    /// Returns `true` if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, tenant: TenantId, destination: DestinationId) {
        self.routes
            .write()
            .expect("destination routes lock poisoned")
            .insert(tenant, destination);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn register_then_resolve() {
        let registry = DestinationRegistry::new();
        registry.register("123", "456").unwrap();

        let tenant: TenantId = "123".parse().unwrap();
        assert_eq!(registry.resolve(&tenant).unwrap().as_str(), "456");
    }

    #[test]
    fn register_overwrites_existing_route() {
        let registry = DestinationRegistry::new();
        registry.register("123", "456").unwrap();
        registry.register("123", "789").unwrap();

        let tenant: TenantId = "123".parse().unwrap();
        assert_eq!(registry.resolve(&tenant).unwrap().as_str(), "789");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_rejects_non_numeric_ids() {
        let registry = DestinationRegistry::new();
        assert!(matches!(
            registry.register("abc", "456"),
            Err(RegistryError::Validation(_))
        ));
        assert!(matches!(
            registry.register("123", "not-a-channel"),
            Err(RegistryError::Validation(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn resolve_unknown_tenant_fails_closed() {
        let registry = DestinationRegistry::new();
        let tenant: TenantId = "999".parse().unwrap();
        assert!(matches!(
            registry.resolve(&tenant),
            Err(RegistryError::NotConfigured(t)) if t == tenant
        ));
    }

    #[test]
    fn unregister_is_idempotent() {
        let registry = DestinationRegistry::new();
        registry.register("123", "456").unwrap();

        assert!(registry.unregister("123"));
        assert!(!registry.unregister("123"));
        assert!(!registry.unregister("never-registered"));
    }

    #[test]
    fn bulk_load_parses_all_pairs() {
        let registry = DestinationRegistry::from_route_spec("111-222, 333-444").unwrap();
        assert_eq!(registry.len(), 2);

        let tenant: TenantId = "333".parse().unwrap();
        assert_eq!(registry.resolve(&tenant).unwrap().as_str(), "444");
    }

    #[test]
    fn bulk_load_of_empty_spec_yields_empty_registry() {
        let registry = DestinationRegistry::from_route_spec("").unwrap();
        assert!(registry.is_empty());
        let registry = DestinationRegistry::from_route_spec("   ").unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn bulk_load_aborts_on_missing_field() {
        let err = DestinationRegistry::from_route_spec("111-222,333").unwrap_err();
        match err {
            RegistryError::MalformedRoute { index, entry, .. } => {
                assert_eq!(index, 1);
                assert_eq!(entry, "333");
            }
            other => panic!("expected MalformedRoute, got {other:?}"),
        }
    }

    #[test]
    fn bulk_load_aborts_on_extra_field() {
        let err = DestinationRegistry::from_route_spec("111-222-333").unwrap_err();
        assert!(matches!(err, RegistryError::MalformedRoute { index: 0, .. }));
    }

    #[test]
    fn bulk_load_aborts_on_non_numeric_id() {
        let err = DestinationRegistry::from_route_spec("111-222,abc-444").unwrap_err();
        match err {
            RegistryError::MalformedRoute { index, reason, .. } => {
                assert_eq!(index, 1);
                assert!(reason.contains("abc"));
            }
            other => panic!("expected MalformedRoute, got {other:?}"),
        }
    }

    #[test]
    fn concurrent_readers_and_writers_are_safe() {
        let registry = Arc::new(DestinationRegistry::new());
        registry.register("1", "100").unwrap();

        let mut handles = Vec::new();
        for i in 0..8u32 {
            let registry = Arc::clone(&registry);
            handles.push(std::thread::spawn(move || {
                let tenant_raw = format!("{}", 1000 + i);
                for _ in 0..100 {
                    registry.register(&tenant_raw, "200").unwrap();
                    let tenant: TenantId = "1".parse().unwrap();
                    let _ = registry.resolve(&tenant);
                    registry.unregister(&tenant_raw);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let tenant: TenantId = "1".parse().unwrap();
        assert_eq!(registry.resolve(&tenant).unwrap().as_str(), "100");
    }
}
