mod engine;
pub mod report;

pub use engine::SyncEngine;
