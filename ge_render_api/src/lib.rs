/*!
# geEngine render API

Core traits and types of the geEngine rendering-device abstraction.

This crate holds the platform-agnostic surface the engine renders through.
Backend plugins (Direct3D 11, ...) implement [`ge::render::RenderApi`] with
their own resource wrapper types.

## Architecture

- **RenderApi**: creation, binding, submission and state capture
- **LogicalResource**: common contract of every GPU resource wrapper
- **GraphicsFormat**: API-agnostic pixel formats
- **Engine**: global logger registry
- **RenderApiConfig**: settings read once at device start-up
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod file_system;
pub mod render_api;

// Main ge namespace module
pub mod ge {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Rendering device trait
    pub use crate::render_api::RenderApi;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Configuration sub-module
    pub mod config {
        pub use crate::config::*;
    }

    // File system sub-module
    pub mod fs {
        pub use crate::file_system::*;
    }

    // Render sub-module with all rendering types
    pub mod render {
        pub use crate::render_api::*;
    }
}

// Re-export math library at crate root
pub use glam;
