pub mod presets;
pub mod projection;
pub mod sensitivity;
pub mod timeline;
