pub mod config;
pub mod error;

pub use config::{
    ChatConfig, ConfigSource, GeneralConfig, LeadsConfig, MeridianConfig, ServerConfig, WhitePaperConfig,
};
pub use error::{MeridianError, Result};
