use color_eyre::Result;
use film_diary_config::{Config, PathManager};
use serde_json::json;

use crate::output::{Output, OutputFormat};

pub fn run_show(output: &Output) -> Result<()> {
    let config = Config::load_default()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load configuration: {}", e))?;

    match output.format() {
        OutputFormat::Human => {
            let rendered = config
                .to_toml_string()
                .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
            output.println(rendered);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "type": "config",
                "config": config,
            }));
        }
    }
    Ok(())
}

pub fn run_path(output: &Output) -> Result<()> {
    let path = PathManager::new().config_file();
    output.println(path.display().to_string());
    Ok(())
}
