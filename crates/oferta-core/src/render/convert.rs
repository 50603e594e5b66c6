//! Hand-off to an external program producing the fixed-layout offer.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::{RenderError, Result};
use crate::models::config::ConverterConfig;

/// External document converter.
#[derive(Debug, Clone)]
pub struct Converter {
    program: String,
    args: Vec<String>,
}

impl Converter {
    /// Create a converter running `program <input> <output>`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Create a converter from configuration.
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(config.program.clone()).with_args(config.args.clone())
    }

    /// Arguments placed before the input and output paths.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Convert `input`. The output defaults to the input path with a `.pdf` extension.
    pub fn convert(&self, input: &Path, output: Option<&Path>) -> Result<PathBuf> {
        if !input.exists() {
            return Err(RenderError::MissingInput(input.to_path_buf()).into());
        }

        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| input.with_extension("pdf"));

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }

        info!("Converting {} to {}", input.display(), output.display());
        debug!("Running {} {:?}", self.program, self.args);

        let result = Command::new(&self.program)
            .args(&self.args)
            .arg(input)
            .arg(&output)
            .output()
            .map_err(|e| RenderError::Converter {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(RenderError::Converter {
                program: self.program.clone(),
                reason: format!("{}: {}", result.status, stderr.trim()),
            }
            .into());
        }

        Ok(output)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::from_config(&ConverterConfig::default())
    }
}
