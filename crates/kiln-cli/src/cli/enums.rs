use clap::ValueEnum;

/// Serialization format for config files
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ConfigFormat {
    /// kiln.toml
    #[value(name = "toml")]
    Toml,

    /// kiln.config.json
    #[value(name = "json")]
    Json,
}

impl ConfigFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Toml => kiln_config::discovery::TOML_CONFIG,
            Self::Json => kiln_config::discovery::JSON_CONFIG,
        }
    }
}

/// Format of the bundler-facing output
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum EmitFormat {
    /// ES module exporting the config via defineConfig
    #[value(name = "js")]
    Js,

    /// Plain JSON object
    #[value(name = "json")]
    Json,
}
