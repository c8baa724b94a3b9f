#[cfg(test)]
mod tests {
    use crate::cli::validation::parse_target;
    use crate::cli::{Cli, Command, ConfigFormat, EmitFormat};
    use clap::Parser;
    use kiln_config::EsTarget;
    use std::path::PathBuf;

    #[test]
    fn test_parse_target_valid() {
        assert_eq!(parse_target("es2020"), Ok(EsTarget::Es2020));
        assert_eq!(parse_target("ESNEXT"), Ok(EsTarget::EsNext));
    }

    #[test]
    fn test_parse_target_invalid_lists_choices() {
        let err = parse_target("es3").unwrap_err();
        assert!(err.contains("es3"));
        assert!(err.contains("es2015"));
    }

    #[test]
    fn test_check_command_defaults() {
        let cli = Cli::parse_from(["kiln", "check"]);
        match cli.command {
            Command::Check(args) => {
                assert!(!args.fs);
                assert!(!args.strict);
                assert!(args.source.config.is_none());
                assert!(args.source.profile.is_none());
                assert!(args.source.target.is_none());
            }
            other => panic!("expected check command, got {other:?}"),
        }
    }

    #[test]
    fn test_check_command_with_source_args() {
        let cli = Cli::parse_from([
            "kiln",
            "check",
            "--config",
            "configs/kiln.toml",
            "--profile",
            "legacy",
            "--target",
            "es2015",
            "--fs",
            "--strict",
        ]);
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.source.config, Some(PathBuf::from("configs/kiln.toml")));
                assert_eq!(args.source.profile.as_deref(), Some("legacy"));
                assert_eq!(args.source.target, Some(EsTarget::Es2015));
                assert!(args.fs);
                assert!(args.strict);
            }
            other => panic!("expected check command, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_target_is_rejected() {
        let result = Cli::try_parse_from(["kiln", "emit", "--target", "es1999"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_emit_defaults_to_js() {
        let cli = Cli::parse_from(["kiln", "emit"]);
        match cli.command {
            Command::Emit(args) => {
                assert_eq!(args.format, EmitFormat::Js);
                assert!(args.output.is_none());
            }
            other => panic!("expected emit command, got {other:?}"),
        }
    }

    #[test]
    fn test_init_format_and_force() {
        let cli = Cli::parse_from(["kiln", "init", "app", "--format", "json", "--force"]);
        match cli.command {
            Command::Init(args) => {
                assert_eq!(args.dir, Some(PathBuf::from("app")));
                assert_eq!(args.format, ConfigFormat::Json);
                assert!(args.force);
            }
            other => panic!("expected init command, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["kiln", "show", "--verbose", "--no-color"]);
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["kiln", "-v", "-q", "check"]).is_err());
    }
}
