//! `emberc build`: compile files in parallel.

use std::path::{Path, PathBuf};

use ember_codegen::GeneratorOptions;
use ember_ir::SourceType;
use ember_traverse::{OptionValue, PluginOptions, TransformSpec};
use rayon::prelude::*;
use tracing::debug;

use super::{read_source, report};
use crate::{CompileError, CompileOptions, Compiler};

/// Flags shared by `parse` and `build`, plus the input files.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildArgs {
    pub files: Vec<String>,
    pub source_type: SourceType,
    pub plugins: Vec<String>,
    pub transforms: Vec<TransformSpec>,
    /// Write `<out-dir>/<file name>` instead of printing to stdout.
    pub out_dir: Option<PathBuf>,
    pub compact: bool,
}

impl BuildArgs {
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions::default()
            .with_source_type(self.source_type)
            .with_plugins(self.plugins.iter().cloned())
            .with_transforms(self.transforms.clone())
            .with_generator(GeneratorOptions::default().with_compact(self.compact))
    }
}

/// Parse `build` arguments.
///
/// Value flags accept both `--flag value` and `--flag=value`.
pub fn parse_build_args(args: &[String]) -> Result<BuildArgs, String> {
    let mut parsed = BuildArgs::default();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag, Some(value)),
            _ => (arg, None),
        };
        match flag {
            "--module" => parsed.source_type = SourceType::Module,
            "--compact" => parsed.compact = true,
            "--plugins" | "--transforms" | "--out-dir" => {
                let value = match inline {
                    Some(value) => value,
                    None => {
                        i += 1;
                        args.get(i)
                            .map(String::as_str)
                            .ok_or_else(|| format!("missing value for '{flag}'"))?
                    }
                };
                match flag {
                    "--plugins" => parsed.plugins = split_list(value).map(str::to_owned).collect(),
                    "--transforms" => parsed.transforms = parse_transforms(value)?,
                    _ => parsed.out_dir = Some(PathBuf::from(value)),
                }
            }
            _ if flag.starts_with('-') => return Err(format!("unknown option '{arg}'")),
            _ => parsed.files.push(arg.to_owned()),
        }
        i += 1;
    }
    Ok(parsed)
}

/// Parse a transform list: `name[:key=value]*` entries joined by commas.
///
/// ```
/// use emberc::commands::parse_transforms;
///
/// let specs = parse_transforms("strict-mode:strict=false,inline-constants").unwrap();
/// assert_eq!(specs[0].options.get_bool("strict"), Some(false));
/// assert_eq!(specs[1].name, "inline-constants");
/// ```
pub fn parse_transforms(text: &str) -> Result<Vec<TransformSpec>, String> {
    split_list(text)
        .map(|entry| {
            let mut parts = entry.split(':');
            let name = parts.next().unwrap_or_default();
            if name.is_empty() {
                return Err(format!("missing transform name in '{entry}'"));
            }
            let mut options = PluginOptions::new();
            for option in parts {
                let (key, value) = option
                    .split_once('=')
                    .ok_or_else(|| format!("expected key=value, found '{option}'"))?;
                options.set(key, OptionValue::parse(value));
            }
            Ok(TransformSpec::new(name).with_options(options))
        })
        .collect()
}

fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|item| !item.is_empty())
}

enum Outcome {
    Unreadable(String),
    Failed { source: String, error: CompileError },
    Compiled(String),
}

/// Compile every file in `args`, in parallel. Returns whether all of
/// them compiled.
pub fn build_files(args: &BuildArgs) -> bool {
    let compiler = Compiler::with_builtins();
    let options = args.compile_options();

    if let Some(dir) = &args.out_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("error: cannot create '{}': {e}", dir.display());
            return false;
        }
    }

    let outcomes: Vec<Outcome> = args
        .files
        .par_iter()
        .map(|path| {
            let source = match read_source(path) {
                Ok(source) => source,
                Err(msg) => return Outcome::Unreadable(msg),
            };
            match compiler.compile(&source, &options) {
                Ok(output) => Outcome::Compiled(output.code),
                Err(error) => Outcome::Failed { source, error },
            }
        })
        .collect();

    let mut compiled = 0;
    for (path, outcome) in args.files.iter().zip(outcomes) {
        match outcome {
            Outcome::Unreadable(msg) => eprintln!("{msg}"),
            Outcome::Failed { source, error } => {
                report(&error.to_diagnostic(), path, &source, options.code_frame);
            }
            Outcome::Compiled(code) => {
                if write_output(path, &code, args) {
                    compiled += 1;
                }
            }
        }
    }

    debug!(compiled, total = args.files.len(), "build finished");
    if args.files.len() > 1 || args.out_dir.is_some() {
        eprintln!("compiled {compiled} of {} files", args.files.len());
    }
    compiled == args.files.len()
}

fn write_output(path: &str, code: &str, args: &BuildArgs) -> bool {
    let Some(dir) = &args.out_dir else {
        if args.files.len() > 1 {
            println!("// {path}");
        }
        println!("{code}");
        return true;
    };
    let name = Path::new(path).file_name().map_or_else(|| PathBuf::from(path), PathBuf::from);
    let target = dir.join(name);
    match std::fs::write(&target, format!("{code}\n")) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("error: cannot write '{}': {e}", target.display());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

    use pretty_assertions::assert_eq;

    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_parse_build_args() {
        let parsed = parse_build_args(&args(&[
            "a.js",
            "--module",
            "--plugins",
            "flow, jsx",
            "b.js",
            "--transforms=strict-mode",
            "--out-dir",
            "dist",
        ]))
        .unwrap();
        assert_eq!(parsed.files, ["a.js", "b.js"]);
        assert_eq!(parsed.source_type, SourceType::Module);
        assert_eq!(parsed.plugins, ["flow", "jsx"]);
        assert_eq!(parsed.transforms, [TransformSpec::new("strict-mode")]);
        assert_eq!(parsed.out_dir, Some(PathBuf::from("dist")));
        assert!(!parsed.compact);
    }

    #[test]
    fn test_parse_build_args_errors() {
        assert_eq!(
            parse_build_args(&args(&["a.js", "--plugins"])),
            Err("missing value for '--plugins'".to_string())
        );
        assert_eq!(
            parse_build_args(&args(&["--fast"])),
            Err("unknown option '--fast'".to_string())
        );
    }

    #[test]
    fn test_parse_transforms_options() {
        let specs = parse_transforms("strict-mode:strict=false:label=x:level=2").unwrap();
        assert_eq!(specs.len(), 1);
        let options = &specs[0].options;
        assert_eq!(options.get("strict"), Some(&OptionValue::Bool(false)));
        assert_eq!(options.get("label"), Some(&OptionValue::String("x".to_string())));
        assert_eq!(options.get("level"), Some(&OptionValue::Number(2.0)));

        assert_eq!(
            parse_transforms("strict-mode:strict"),
            Err("expected key=value, found 'strict'".to_string())
        );
        assert_eq!(
            parse_transforms(":a=1"),
            Err("missing transform name in ':a=1'".to_string())
        );
        assert!(parse_transforms(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_compile_options_from_args() {
        let parsed = parse_build_args(&args(&["--compact", "--plugins=flow"])).unwrap();
        let options = parsed.compile_options();
        assert!(options.generator.compact);
        assert_eq!(options.plugins, ["flow"]);
        assert_eq!(options.source_type, SourceType::Script);
    }
}
