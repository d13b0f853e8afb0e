use doh_bridge_domain::{CliOverrides, Config};

/// Load and validate; returns the file actually used, if any.
pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<(Config, Option<String>)> {
    let resolved_path = config_path
        .map(str::to_string)
        .or_else(Config::get_config_path);

    let config = Config::load(resolved_path.as_deref(), cli_overrides)?;
    config.validate()?;

    Ok((config, resolved_path))
}
