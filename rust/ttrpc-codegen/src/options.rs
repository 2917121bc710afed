//! Plugin options, parsed from protoc's `--go-ttrpc_opt` parameter string.
//!
//! The keys mirror the ones every protoc-gen-go style plugin accepts, so the
//! same `buf.gen.yaml` options work for both message and ttrpc generation:
//!
//! - `paths=import|source_relative`
//! - `module=<import path prefix>`
//! - `M<file.proto>=<import path>[;<package name>]`

use std::collections::HashMap;

use crate::error::{GenerateError, Result};

/// How output file names are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathsMode {
    /// Place output under the Go import path of the file.
    #[default]
    Import,
    /// Place output next to the `.proto` file.
    SourceRelative,
}

/// Options for Go ttrpc generation.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub paths: PathsMode,
    /// Import path prefix stripped from output names in [`PathsMode::Import`].
    pub module: Option<String>,
    /// `M` overrides: proto file name to `import/path[;name]`.
    pub import_mappings: HashMap<String, String>,
}

impl Options {
    /// Parse a comma-separated `key=value` list.
    pub fn parse(parameter: &str) -> Result<Self> {
        let mut options = Options::default();

        for param in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = param.split_once('=').unwrap_or((param, ""));

            if let Some(file) = key.strip_prefix('M') {
                if file.is_empty() || value.is_empty() {
                    return Err(GenerateError::InvalidParameter {
                        param: param.to_string(),
                    });
                }
                options
                    .import_mappings
                    .insert(file.to_string(), value.to_string());
                continue;
            }

            match key {
                "paths" => {
                    options.paths = match value {
                        "import" => PathsMode::Import,
                        "source_relative" => PathsMode::SourceRelative,
                        _ => {
                            return Err(GenerateError::InvalidParameter {
                                param: param.to_string(),
                            });
                        }
                    };
                }
                "module" => {
                    options.module = (!value.is_empty()).then(|| value.to_string());
                }
                "annotate_code" => {}
                _ => {
                    tracing::warn!(param, "ignoring unknown plugin parameter");
                }
            }
        }

        Ok(options)
    }
}
