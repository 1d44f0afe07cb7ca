//! `config`: show or change the CLI configuration.

use crate::config::config_path;
use crate::state::AppState;

pub fn run(state: &mut AppState, key: Option<&str>, value: Option<&str>) -> anyhow::Result<()> {
    match (key, value) {
        (None, _) => {
            println!("# {}", config_path()?.display());
            for line in state.config.render() {
                println!("{line}");
            }
        }
        (Some(key), None) => {
            let line = state
                .config
                .render()
                .into_iter()
                .find(|l| l.split(" = ").next() == Some(key))
                .ok_or_else(|| anyhow::anyhow!("unknown config key {key:?}"))?;
            println!("{line}");
        }
        (Some(key), Some(value)) => {
            state.config.set(key, value)?;
            state.config.save()?;
            tracing::info!(key, "configuration updated");
        }
    }
    Ok(())
}
