//! The backend kernel registry and the process-wide active selector.
//!
//! The byte-level parser ships one SIMD kernel per instruction set and picks
//! among them at run time. This module exposes that choice as explicit
//! configuration: a read-only registry of the kernels usable on the running
//! CPU, and a selector that is read at each parse invocation. Selecting a
//! name that is not in the registry is always an error; the selector is
//! never left pointing at nothing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use tracing::debug;

use crate::{Error, Result};

/// One backend kernel, as a name/description pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Implementation {
    name: &'static str,
    description: &'static str,
}

impl Implementation {
    /// The registry name, e.g. `"avx2"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// A human-readable description of the kernel.
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }
}

const AVX2: Implementation = Implementation {
    name: "avx2",
    description: "Intel/AMD 64-bit kernels using AVX2",
};
const SSE42: Implementation = Implementation {
    name: "sse42",
    description: "Intel/AMD 64-bit kernels using SSE4.2",
};
const NEON: Implementation = Implementation {
    name: "neon",
    description: "ARM 64-bit kernels using NEON",
};
const SIMD128: Implementation = Implementation {
    name: "simd128",
    description: "WebAssembly kernels using 128-bit SIMD",
};
const FALLBACK: Implementation = Implementation {
    name: "fallback",
    description: "Portable kernels for any architecture",
};

/// Index into the registry; the registry is ordered best-first, so the
/// default selection is entry 0.
static ACTIVE: AtomicUsize = AtomicUsize::new(0);

fn registry() -> &'static [Implementation] {
    static REGISTRY: OnceLock<Vec<Implementation>> = OnceLock::new();
    REGISTRY.get_or_init(detect)
}

fn detect() -> Vec<Implementation> {
    let mut found = Vec::new();
    #[cfg(target_arch = "x86_64")]
    {
        if std::arch::is_x86_feature_detected!("avx2") {
            found.push(AVX2);
        }
        if std::arch::is_x86_feature_detected!("sse4.2") {
            found.push(SSE42);
        }
    }
    #[cfg(target_arch = "aarch64")]
    found.push(NEON);
    #[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
    found.push(SIMD128);
    found.push(FALLBACK);
    found
}

/// Every kernel usable on the running CPU, best first.
#[must_use]
pub fn available_implementations() -> &'static [Implementation] {
    registry()
}

/// The kernel the next parse will run under.
#[must_use]
pub fn active_implementation() -> Implementation {
    registry()[ACTIVE.load(Ordering::Acquire)]
}

/// Selects the kernel by registry name.
///
/// Fails with [`Error::UnknownImplementation`] when no registry entry
/// carries that name, leaving the current selection untouched.
pub fn set_active_implementation(name: &str) -> Result<()> {
    let index = registry()
        .iter()
        .position(|implementation| implementation.name == name)
        .ok_or_else(|| Error::UnknownImplementation(name.to_owned()))?;
    ACTIVE.store(index, Ordering::Release);
    debug!(implementation = name, "selected backend implementation");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_always_ends_with_the_portable_kernel() {
        let all = available_implementations();
        assert!(!all.is_empty());
        assert_eq!(all.last().unwrap().name(), "fallback");
    }

    #[test]
    fn active_implementation_is_registered() {
        let active = active_implementation();
        assert!(available_implementations().contains(&active));
        assert!(!active.description().is_empty());
    }

    // Selector state is process-wide; one test covers every mutation so
    // parallel test threads cannot observe each other's selections.
    #[test]
    fn selector_round_trip_and_unknown_names() {
        let before = active_implementation();

        let err = set_active_implementation("abacus").unwrap_err();
        assert!(matches!(err, Error::UnknownImplementation(_)));
        assert_eq!(active_implementation(), before);

        for implementation in available_implementations() {
            set_active_implementation(implementation.name()).unwrap();
            assert_eq!(active_implementation(), *implementation);
        }
        set_active_implementation(before.name()).unwrap();
    }
}
