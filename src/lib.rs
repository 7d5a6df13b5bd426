//! Grid arcade (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benches can write `grid_arcade::core::…`.

pub use grid_arcade_core as core;
pub use grid_arcade_engine as engine;
pub use grid_arcade_input as input;
pub use grid_arcade_term as term;
pub use grid_arcade_types as types;
