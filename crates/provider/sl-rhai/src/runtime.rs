//! RuntimeFactory - builds the Rhai engines programs compile and run on.

use crate::builtin::register_builtin_functions;
use crate::config::ProviderConfig;
use rhai::packages::{Package, StandardPackage};
use rhai::{Array, Dynamic, Engine, ImmutableString, Map, Module};
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Shared, read-only engine template.
///
/// The standard package is built once and shared by handle; everything else
/// an engine holds (limits, hooks, progress callback) is created fresh per
/// engine so no two executions share mutable interpreter state.
pub struct RuntimeFactory {
    config: ProviderConfig,
    stdlib: Arc<Module>,
}

impl fmt::Debug for RuntimeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeFactory")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RuntimeFactory {
    /// Creates a factory from configuration.
    pub fn new(config: ProviderConfig) -> Self {
        debug!(config = ?config, "Created RuntimeFactory");

        Self {
            config,
            stdlib: StandardPackage::new().as_shared_module(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Creates an engine with the standard library, built-ins and limits.
    ///
    /// When `cancel` is given the engine aborts evaluation with
    /// `ErrorTerminated` as soon as the token fires.
    pub fn engine(&self, plugin: &str, cancel: Option<&CancellationToken>) -> Engine {
        let mut engine = Engine::new_raw();
        engine.register_global_module(Arc::clone(&self.stdlib));

        // Register built-in functions
        register_builtin_functions(&mut engine);

        // Set engine limits for safety
        let limits = &self.config.limits;
        engine.set_max_expr_depths(limits.max_expr_depth, limits.max_function_expr_depth);
        engine.set_max_operations(limits.max_operations);
        engine.set_max_string_size(limits.max_string_size);
        engine.set_max_array_size(limits.max_array_size);
        engine.set_max_map_size(limits.max_map_size);
        engine.set_max_call_levels(limits.max_call_levels);

        engine.set_optimization_level(self.config.optimization.into());
        engine.set_strict_variables(self.config.strict_variables);

        let print_plugin = plugin.to_string();
        engine.on_print(move |text| info!(plugin = %print_plugin, "{text}"));

        let debug_plugin = plugin.to_string();
        engine.on_debug(move |text, _source, pos| {
            debug!(plugin = %debug_plugin, position = %pos, "{text}");
        });

        if let Some(token) = cancel {
            let token = token.clone();
            engine.on_progress(move |_ops| token.is_cancelled().then_some(Dynamic::UNIT));
        }

        engine
    }

    /// Creates an engine for a run whose bound inputs have the given sizes.
    ///
    /// Size limits bound what a script builds on top of its inputs, so every
    /// nonzero limit is raised by the inputs' own size.
    pub(crate) fn run_engine(
        &self,
        plugin: &str,
        cancel: Option<&CancellationToken>,
        inputs: DataSizes,
    ) -> Engine {
        let mut engine = self.engine(plugin, cancel);
        let limits = &self.config.limits;
        engine.set_max_array_size(widen(limits.max_array_size, inputs.arrays));
        engine.set_max_map_size(widen(limits.max_map_size, inputs.maps));
        engine.set_max_string_size(widen(limits.max_string_size, inputs.strings));
        engine
    }
}

fn widen(limit: usize, input: usize) -> usize {
    if limit == 0 {
        0
    } else {
        limit.saturating_add(input)
    }
}

/// Aggregate container sizes of a value.
///
/// Counted like Rhai's own data-size check: every element of every nested
/// array, every property of every nested map and the bytes of every string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DataSizes {
    pub arrays: usize,
    pub maps: usize,
    pub strings: usize,
}

impl DataSizes {
    pub fn of(value: &Dynamic) -> Self {
        let mut sizes = Self::default();
        sizes.count(value);
        sizes
    }

    pub fn add(&mut self, other: Self) {
        self.arrays = self.arrays.saturating_add(other.arrays);
        self.maps = self.maps.saturating_add(other.maps);
        self.strings = self.strings.saturating_add(other.strings);
    }

    fn count(&mut self, value: &Dynamic) {
        if let Some(items) = value.read_lock::<Array>() {
            self.arrays += items.len();
            items.iter().for_each(|item| self.count(item));
        } else if let Some(map) = value.read_lock::<Map>() {
            self.maps += map.len();
            map.values().for_each(|item| self.count(item));
        } else if let Some(text) = value.read_lock::<ImmutableString>() {
            self.strings += text.len();
        }
    }
}
