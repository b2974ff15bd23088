pub mod loader;
pub mod resolver;

pub use loader::{ModClass, ModClassFactory, ModuleHandle, ModuleLoader, StaticModule, StaticModuleLoader};
pub use resolver::ModuleResolver;
