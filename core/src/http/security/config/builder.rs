//! Deferred, build-once builders driven by configurers.
//!
//! A builder collects [`SecurityConfigurer`]s and shared objects while it is
//! being configured. The first call to [`ConfiguredSecurityBuilder::build`]
//! runs every configurer's `init`, then every configurer's `configure`, then
//! the builder's own [`perform_build`](ConfiguredSecurityBuilder::perform_build).
//! The result is cached; every later `build` returns the same `Arc`.
//!
//! # Spring Security Equivalent
//! `AbstractConfiguredSecurityBuilder` / `SecurityConfigurerAdapter`

use std::any::{type_name, Any};
use std::mem;
use std::sync::Arc;

use actix_web::dev::Extensions;

use crate::http::error::ConfigError;

/// Lets a configurer trait object be downcast back to its concrete type.
pub trait AsAnyMut: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAnyMut for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A unit of configuration applied to a builder of type `B`.
///
/// `init` runs for every registered configurer before any `configure` runs,
/// so `init` is the place to publish shared objects other configurers read.
pub trait SecurityConfigurer<B>: AsAnyMut {
    fn init(&mut self, _builder: &mut B) -> Result<(), ConfigError> {
        Ok(())
    }

    fn configure(&mut self, builder: &mut B) -> Result<(), ConfigError>;
}

/// Build lifecycle. Only moves forward.
pub enum BuildState<O> {
    Unbuilt,
    Initializing,
    Configuring,
    Building,
    Built(Arc<O>),
}

impl<O> BuildState<O> {
    pub fn is_built(&self) -> bool {
        matches!(self, BuildState::Built(_))
    }
}

impl<O> std::fmt::Debug for BuildState<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BuildState::Unbuilt => "Unbuilt",
            BuildState::Initializing => "Initializing",
            BuildState::Configuring => "Configuring",
            BuildState::Building => "Building",
            BuildState::Built(_) => "Built",
        };
        f.write_str(name)
    }
}

/// Holds a configurer's slot while that configurer runs.
struct Vacant;

impl<B> SecurityConfigurer<B> for Vacant {
    fn configure(&mut self, _builder: &mut B) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// State embedded in every [`ConfiguredSecurityBuilder`].
pub struct ConfiguredBuilder<B, O> {
    configurers: Vec<Box<dyn SecurityConfigurer<B>>>,
    shared_objects: Extensions,
    state: BuildState<O>,
}

impl<B, O> Default for ConfiguredBuilder<B, O> {
    fn default() -> Self {
        ConfiguredBuilder {
            configurers: Vec::new(),
            shared_objects: Extensions::new(),
            state: BuildState::Unbuilt,
        }
    }
}

impl<B: 'static, O> ConfiguredBuilder<B, O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BuildState<O> {
        &self.state
    }

    pub fn configurer_count(&self) -> usize {
        self.configurers.len()
    }

    /// New configurers are accepted until the configure phase starts.
    pub(crate) fn ensure_accepting(&self, builder: &'static str) -> Result<(), ConfigError> {
        match self.state {
            BuildState::Unbuilt | BuildState::Initializing => Ok(()),
            _ => Err(ConfigError::AlreadyBuilt { builder }),
        }
    }

    /// Builder-owned data may still change while configurers run.
    pub(crate) fn ensure_not_built(&self, builder: &'static str) -> Result<(), ConfigError> {
        match self.state {
            BuildState::Building | BuildState::Built(_) => Err(ConfigError::AlreadyBuilt { builder }),
            _ => Ok(()),
        }
    }

    fn position<C: SecurityConfigurer<B>>(&self) -> Option<usize> {
        self.configurers
            .iter()
            .position(|c| c.as_ref().as_any().is::<C>())
    }

    /// Moves the configurer at `index` out, leaving a placeholder no lookup matches.
    fn take_at(&mut self, index: usize) -> Box<dyn SecurityConfigurer<B>> {
        mem::replace(&mut self.configurers[index], Box::new(Vacant))
    }

    fn restore_at(&mut self, index: usize, configurer: Box<dyn SecurityConfigurer<B>>) {
        self.configurers[index] = configurer;
    }

    fn downcast_at<C: SecurityConfigurer<B>>(&mut self, index: usize) -> &mut C {
        self.configurers[index]
            .as_mut()
            .as_any_mut()
            .downcast_mut::<C>()
            .expect("configurer type checked before downcast")
    }
}

/// A builder that is configured by [`SecurityConfigurer`]s and builds its
/// output exactly once.
///
/// Implementors embed a [`ConfiguredBuilder`] and provide `perform_build`.
pub trait ConfiguredSecurityBuilder: Sized + 'static {
    type Output;

    fn builder_state(&self) -> &ConfiguredBuilder<Self, Self::Output>;

    fn builder_state_mut(&mut self) -> &mut ConfiguredBuilder<Self, Self::Output>;

    /// Produces the output once every configurer has run.
    fn perform_build(&mut self) -> Result<Self::Output, ConfigError>;

    /// Short name used in error messages and logs.
    fn builder_name() -> &'static str {
        let name = type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name)
    }

    /// Registers `configurer` and hands it back for further configuration.
    fn apply<C: SecurityConfigurer<Self>>(&mut self, configurer: C) -> Result<&mut C, ConfigError> {
        let state = self.builder_state_mut();
        state.ensure_accepting(Self::builder_name())?;
        state.configurers.push(Box::new(configurer));
        let index = state.configurers.len() - 1;
        Ok(state.downcast_at::<C>(index))
    }

    /// Returns the registered configurer of type `C`, applying `configurer` if there is none.
    fn get_or_apply<C: SecurityConfigurer<Self>>(
        &mut self,
        configurer: C,
    ) -> Result<&mut C, ConfigError> {
        let state = self.builder_state();
        state.ensure_accepting(Self::builder_name())?;
        match state.position::<C>() {
            Some(index) => Ok(self.builder_state_mut().downcast_at::<C>(index)),
            None => self.apply(configurer),
        }
    }

    fn configurer<C: SecurityConfigurer<Self>>(&self) -> Option<&C> {
        self.builder_state()
            .configurers
            .iter()
            .find_map(|c| c.as_ref().as_any().downcast_ref::<C>())
    }

    fn configurer_mut<C: SecurityConfigurer<Self>>(&mut self) -> Option<&mut C> {
        self.builder_state_mut()
            .configurers
            .iter_mut()
            .find_map(|c| c.as_mut().as_any_mut().downcast_mut::<C>())
    }

    /// Stores `value` under its type, replacing a previous value of that type.
    fn set_shared_object<T: 'static>(&mut self, value: T) {
        self.builder_state_mut().shared_objects.insert(value);
    }

    fn shared_object<T: 'static>(&self) -> Option<&T> {
        self.builder_state().shared_objects.get::<T>()
    }

    /// The built output, if `build` has completed.
    fn object(&self) -> Option<Arc<Self::Output>> {
        match &self.builder_state().state {
            BuildState::Built(output) => Some(Arc::clone(output)),
            _ => None,
        }
    }

    fn build(&mut self) -> Result<Arc<Self::Output>, ConfigError> {
        let name = Self::builder_name();
        match &self.builder_state().state {
            BuildState::Built(output) => return Ok(Arc::clone(output)),
            BuildState::Unbuilt => {}
            _ => return Err(ConfigError::BuildInProgress { builder: name }),
        }

        log::debug!("Initializing {}", name);
        self.builder_state_mut().state = BuildState::Initializing;
        // Configurers applied from an `init` are appended and initialized in turn.
        let mut index = 0;
        while index < self.builder_state().configurers.len() {
            let mut configurer = self.builder_state_mut().take_at(index);
            let result = configurer.init(self);
            self.builder_state_mut().restore_at(index, configurer);
            result?;
            index += 1;
        }

        let count = self.builder_state().configurers.len();
        log::debug!("Configuring {} with {} configurer(s)", name, count);
        self.builder_state_mut().state = BuildState::Configuring;
        for index in 0..count {
            let mut configurer = self.builder_state_mut().take_at(index);
            let result = configurer.configure(self);
            self.builder_state_mut().restore_at(index, configurer);
            result?;
        }

        self.builder_state_mut().state = BuildState::Building;
        let output = Arc::new(self.perform_build()?);
        self.builder_state_mut().state = BuildState::Built(Arc::clone(&output));
        log::debug!("Built {}", name);
        Ok(output)
    }
}
