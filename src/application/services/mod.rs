//! Application services - Business logic orchestration

pub mod update_loop;

pub use update_loop::UpdateLoop;
