//! Declared attribute sets for resource types.
//!
//! Each resource type owns one [`AttributeRegistry`], declared as a constant
//! next to the type. Registries are never shared or extended at runtime; a
//! resource that needs a narrower set for one operation derives a
//! [`FieldSet`] from its registry.

use indexmap::IndexSet;

use crate::ProviderFamily;

/// Fixed set of host-case field names recognized for a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRegistry {
    resource: &'static str,
    identifier: &'static str,
    fields: &'static [&'static str],
}

impl AttributeRegistry {
    /// Declare the attributes of `resource`. `identifier` names the
    /// server-assigned field excluded from create/update bodies.
    pub const fn new(resource: &'static str, identifier: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            resource,
            identifier,
            fields,
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn identifier(&self) -> &'static str {
        self.identifier
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|declared| *declared == field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().copied()
    }

    /// Every declared field.
    pub fn all(&self) -> FieldSet {
        FieldSet(self.fields().collect())
    }

    /// Declared fields minus the identifier.
    pub fn writable(&self) -> FieldSet {
        self.except(&[self.identifier])
    }

    pub fn except(&self, excluded: &[&str]) -> FieldSet {
        FieldSet(self.fields().filter(|field| !excluded.contains(field)).collect())
    }
}

/// Set of field names allowed in one outbound body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet(IndexSet<&'static str>);

impl FieldSet {
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<&'static str> for FieldSet {
    fn from_iter<T: IntoIterator<Item = &'static str>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Which credential path a resource authenticates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthRole {
    #[default]
    Standard,
    /// The token-issuing resource; always presents client-id + api-key.
    Authentication,
}

/// Static description of a resource type consumed by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub family: ProviderFamily,
    pub auth: AuthRole,
    pub attributes: AttributeRegistry,
}

impl ResourceDescriptor {
    pub const fn new(family: ProviderFamily, attributes: AttributeRegistry) -> Self {
        Self {
            family,
            auth: AuthRole::Standard,
            attributes,
        }
    }

    pub const fn authentication(family: ProviderFamily, attributes: AttributeRegistry) -> Self {
        Self {
            family,
            auth: AuthRole::Authentication,
            attributes,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.attributes.resource()
    }
}
