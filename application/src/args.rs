//! [`Args`] definitions.

use clap::Parser;

/// Server of the real-estate listing catalog.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    ///
    /// Missing file is not an error: defaults and `CONF.`-prefixed
    /// environment variables are used then.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use super::Args;

    #[test]
    fn defaults_config_path() {
        let args = Args::try_parse_from(["catalog"]).expect("valid args");
        assert_eq!(args.config, "config.toml");

        let args = Args::try_parse_from(["catalog", "-c", "prod.toml"])
            .expect("valid args");
        assert_eq!(args.config, "prod.toml");
    }
}
