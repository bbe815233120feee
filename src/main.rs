//! `tileview` viewer binary: opens the demo level in a window.

use std::io::Write;
use std::path::PathBuf;

use tileview::{options::Options, Viewer};

const USAGE: &str =
    "usage: tileview [MODEL.obj] [--options FILE.toml] [--schema]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    model: Option<PathBuf>,
    options: Option<PathBuf>,
    schema: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--options" => {
                let path = args
                    .next()
                    .ok_or_else(|| "--options needs a file".to_owned())?;
                parsed.options = Some(PathBuf::from(path));
            }
            "--schema" => parsed.schema = true,
            flag if flag.starts_with("--") => {
                return Err(format!("unknown flag {flag}"));
            }
            _ if parsed.model.is_some() => {
                return Err(format!("unexpected argument {arg}"));
            }
            _ => parsed.model = Some(PathBuf::from(arg)),
        }
    }
    Ok(parsed)
}

fn print_schema() -> Result<(), String> {
    let schema = serde_json::to_string_pretty(&Options::json_schema())
        .map_err(|e| e.to_string())?;
    writeln!(std::io::stdout().lock(), "{schema}").map_err(|e| e.to_string())
}

fn main() {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}\n{USAGE}");
            std::process::exit(2);
        }
    };

    if args.schema {
        if let Err(e) = print_schema() {
            log::error!("failed to print schema: {e}");
            std::process::exit(1);
        }
        return;
    }

    let options = match &args.options {
        Some(path) => match Options::load(path) {
            Ok(options) => options,
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let mut builder = Viewer::builder().with_options(options);
    if let Some(model) = args.model {
        builder = builder.with_model(model);
    }
    if let Err(e) = builder.build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, String> {
        parse_args(args.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn model_and_options() {
        let args = parse(&["level.obj", "--options", "dark.toml"]).unwrap();
        assert_eq!(args.model, Some(PathBuf::from("level.obj")));
        assert_eq!(args.options, Some(PathBuf::from("dark.toml")));
        assert!(!args.schema);
    }

    #[test]
    fn no_arguments_is_demo_only() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse(&["--options"]).is_err());
        assert!(parse(&["--fullscreen"]).is_err());
        assert!(parse(&["a.obj", "b.obj"]).is_err());
    }
}
