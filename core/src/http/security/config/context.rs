//! Named object registry consulted when no authentication manager was configured.
//!
//! Stands in for an application container: values are registered under a
//! name and looked up by name or by type.
//!
//! # Spring Security Equivalent
//! `ApplicationContext.getBeanNamesForType` / `getBean`

use std::any::{type_name, Any, TypeId};

use parking_lot::RwLock;

use crate::http::error::ConfigError;

/// Names under which the web security adapter publishes its objects.
pub mod bean_ids {
    pub const AUTHENTICATION_MANAGER: &str = "authenticationManager";
    pub const USER_DETAILS_SERVICE: &str = "userDetailsService";
}

struct BeanDefinition {
    name: String,
    type_id: TypeId,
    value: Box<dyn Any + Send + Sync>,
}

/// Thread-safe registry of named values.
///
/// Beans are typed by the exact Rust type they were registered with, so a
/// manager is registered and looked up as `Arc<dyn AuthenticationManager>`.
///
/// ```
/// use std::sync::Arc;
/// use actix_security_config::http::security::config::BeanRegistry;
///
/// let registry = BeanRegistry::new();
/// registry.register("greeting", Arc::new(String::from("hello")));
/// assert_eq!(registry.bean_names_for_type::<Arc<String>>(), vec!["greeting"]);
/// ```
#[derive(Default)]
pub struct BeanRegistry {
    beans: RwLock<Vec<BeanDefinition>>,
}

impl BeanRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` under `name`. A bean already registered under that name is replaced.
    pub fn register<T>(&self, name: &str, value: T)
    where
        T: Clone + Send + Sync + 'static,
    {
        let mut beans = self.beans.write();
        let definition = BeanDefinition {
            name: name.to_string(),
            type_id: TypeId::of::<T>(),
            value: Box::new(value),
        };
        match beans.iter_mut().find(|b| b.name == name) {
            Some(existing) => {
                log::debug!("Replacing bean {} with a {}", name, type_name::<T>());
                *existing = definition;
            }
            None => beans.push(definition),
        }
    }

    /// Names of the beans registered as `T`, in registration order.
    pub fn bean_names_for_type<T: 'static>(&self) -> Vec<String> {
        let beans = self.beans.read();
        beans
            .iter()
            .filter(|b| b.type_id == TypeId::of::<T>())
            .map(|b| b.name.clone())
            .collect()
    }

    pub fn bean<T: Clone + 'static>(&self, name: &str) -> Option<T> {
        let beans = self.beans.read();
        beans
            .iter()
            .find(|b| b.name == name)
            .and_then(|b| b.value.downcast_ref::<T>())
            .cloned()
    }

    pub fn contains_bean(&self, name: &str) -> bool {
        let beans = self.beans.read();
        beans.iter().any(|b| b.name == name)
    }
}

/// Resolves the single bean of type `T` other than `excluded`.
///
/// At most two beans of the type may exist and exactly one of them must be
/// named something other than `excluded`. Any other situation, including a
/// missing registry, fails with [`ConfigError::NoUniqueBean`] listing every
/// name found.
pub fn unique_bean_excluding<T: Clone + 'static>(
    registry: Option<&BeanRegistry>,
    type_name: &'static str,
    excluded: &str,
) -> Result<T, ConfigError> {
    let names = registry
        .map(|r| r.bean_names_for_type::<T>())
        .unwrap_or_default();
    let remaining: Vec<&String> = names.iter().filter(|n| n.as_str() != excluded).collect();

    let resolved = match (names.len(), remaining.as_slice(), registry) {
        (1 | 2, [name], Some(registry)) => registry.bean::<T>(name),
        _ => None,
    };
    resolved.ok_or_else(|| ConfigError::NoUniqueBean {
        type_name,
        excluded: excluded.to_string(),
        candidates: names.clone(),
    })
}

impl std::fmt::Debug for BeanRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let beans = self.beans.read();
        f.debug_list()
            .entries(beans.iter().map(|b| b.name.as_str()))
            .finish()
    }
}
