// ─── Mod Loader Core ───
// Per-mod loading backend consumed by the global orchestrator.
//
// Architecture:
//   core/
//     manifest/ — Manifest model, dependency specs, lifecycle stages
//     mods/     — Mod entity: validation, assets, lifecycle execution
//     runtime/  — Code module loading + search-root resolution
//     assets/   — Recursive filesystem asset discovery
//     paths     — Slash-path normalization helpers
//     platform  — Desktop vs browser discriminator

pub mod assets;
pub mod error;
pub mod manifest;
pub mod mods;
pub mod paths;
pub mod platform;
pub mod runtime;
