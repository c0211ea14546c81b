use std::env;
use std::path::PathBuf;

pub struct CliOptions {
    pub settings: Option<PathBuf>,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut settings = None;

    while i < args.len() {
        match args[i].as_str() {
            "run" if i == 0 => {}
            "--settings" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --settings (expected a TOML file path)",
                )?;
                if settings.replace(PathBuf::from(path)).is_some() {
                    return Err("--settings provided more than once".to_string());
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(CliOptions { settings })
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("pv-sizer: size a photovoltaic installation from a panel catalog");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  pv-sizer [run] [--settings <path>]");
    eprintln!();
    eprintln!("Without --settings, reads data/paineis.csv and config/param.json.");
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=debug) to adjust log verbosity.");
}

#[cfg(test)]
mod tests {
    use super::parse_args_from;

    #[test]
    fn no_arguments_uses_defaults() {
        let opts = parse_args_from(Vec::new()).expect("parse should succeed");
        assert!(opts.settings.is_none());
    }

    #[test]
    fn supports_settings_cli() {
        let opts = parse_args_from(vec!["--settings".to_string(), "pv.toml".to_string()])
            .expect("parse should succeed");
        assert_eq!(
            opts.settings.as_deref().and_then(|p| p.to_str()),
            Some("pv.toml")
        );
    }

    #[test]
    fn accepts_explicit_run_command() {
        let opts = parse_args_from(vec!["run".to_string()]).expect("parse should succeed");
        assert!(opts.settings.is_none());
    }

    #[test]
    fn rejects_missing_value_and_duplicates() {
        assert!(parse_args_from(vec!["--settings".to_string()]).is_err());
        let dup = vec![
            "--settings".to_string(),
            "a.toml".to_string(),
            "--settings".to_string(),
            "b.toml".to_string(),
        ];
        assert!(parse_args_from(dup).is_err());
    }

    #[test]
    fn rejects_unknown_argument() {
        let err = parse_args_from(vec!["--seed".to_string()]).err();
        assert_eq!(err.as_deref(), Some("unknown argument: --seed"));
    }
}
