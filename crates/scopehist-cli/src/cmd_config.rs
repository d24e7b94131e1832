use scopehist_core::Config;

fn describe(config: &Config) -> Vec<(&'static str, String)> {
    let b = |v: bool| v.to_string();
    vec![
        ("base_dir", config.base_dir.display().to_string()),
        ("repo_history_name", config.repo_history_name.clone()),
        ("global_file", config.global_file.display().to_string()),
        ("start_with_global", b(config.start_with_global)),
        ("toggle_key", config.toggle_key.clone()),
        ("recall_key", config.recall_key.clone()),
        ("histsize", config.histsize.to_string()),
        ("ignore_space", b(config.options.ignore_space)),
        ("share_history", b(config.options.share_history)),
        ("inc_append", b(config.options.inc_append)),
        ("inc_append_time", b(config.options.inc_append_time)),
        (
            "detection",
            format!("{:?}", config.detection).to_ascii_lowercase(),
        ),
        (
            "store_root",
            crate::cmd_hook::store_root(config).display().to_string(),
        ),
    ]
}

/// `scopehist config [--json]`
pub fn execute(config: &Config, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }
    for (k, v) in describe(config) {
        println!("{k} = {v}");
    }
    Ok(())
}
