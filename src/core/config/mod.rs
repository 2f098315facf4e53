pub mod data;
pub mod io;
pub mod render;

pub use data::{FontSetting, PaletteOverrides, Settings, SwatchOverrides};
pub use io::ConfigError;
pub use render::{FontDescriptor, RenderConfig};
