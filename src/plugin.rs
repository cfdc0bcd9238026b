//! Plugin host collaborator.
//!
//! No plugin ABI is implemented here: `-p <dir>` is accepted on the command
//! line and recorded, so a future loader has somewhere to read from, but
//! nothing is dynamically loaded and no commands or prompt fragments are
//! ever actually registered by this crate.

use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct PluginHost {
    plugin_dir: Option<PathBuf>,
}

impl PluginHost {
    pub fn new(plugin_dir: Option<PathBuf>) -> PluginHost {
        if let Some(ref dir) = plugin_dir {
            log::info!("recorded plugin directory {}", dir.display());
        }
        PluginHost { plugin_dir }
    }

    pub fn plugin_dir(&self) -> Option<&PathBuf> {
        self.plugin_dir.as_ref()
    }

    pub fn prompt_fragments(&self) -> &[&str] {
        &[]
    }
}
