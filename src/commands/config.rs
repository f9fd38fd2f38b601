use anyhow::Result;

use crate::config::{config_path, init_config, load_config};
use crate::output::print_json;

pub fn show(json_mode: bool) -> Result<()> {
    let config = load_config()?;

    if json_mode {
        return print_json(&config);
    }

    let path = config_path()?;
    let status = if path.exists() { "" } else { " (not created, defaults)" };
    println!("# {}{}", path.display(), status);
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let path = init_config(force)?;
    println!("Config written to {}.", path.display());
    Ok(())
}
