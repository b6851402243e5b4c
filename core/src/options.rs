//! Serializable timer settings, for applications that keep them in config files.

use serde::Deserialize;
use serde::Serialize;

use crate::level::Level;
use crate::logger::Extra;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingOptions {
    pub log_level: Level,
    pub extra: Extra,
}

impl TimingOptions {
    pub fn new(log_level: Level) -> Self {
        Self {
            log_level,
            extra: Extra::new(),
        }
    }
}
