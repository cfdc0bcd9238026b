//! Prompt builder collaborator.
//!
//! Assembles the prompt text shown before each read: current directory
//! (relative to `$HOME` when possible) and the exit status of the last
//! command. A plugin host could append fragments after these, but none are
//! registered by this crate.

use std::env;
use std::path::Path;

use crate::plugin::PluginHost;

pub fn build_prompt(last_exit_code: i32, plugins: &PluginHost) -> String {
    let cwd = env::current_dir().unwrap_or_default();
    let rel = dirs::home_dir()
        .and_then(|home| cwd.strip_prefix(&home).ok().map(|r| Path::new("~").join(r)))
        .unwrap_or(cwd);

    let mut prompt = format!("{}|{}\n$ ", last_exit_code, rel.display());
    for fragment in plugins.prompt_fragments() {
        prompt.push_str(fragment);
    }
    prompt
}
