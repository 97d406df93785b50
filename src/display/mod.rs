//! Full-screen output window and event loop integration.

mod app;
mod surface;

pub use app::FringeApp;
pub use surface::ProjectorSurface;
