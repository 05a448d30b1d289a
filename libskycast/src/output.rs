//! Encoding of command results on stdout

use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// YAML document (default)
    #[default]
    Yaml,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Invalid output format: '{}'. Valid options: yaml, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl OutputFormat {
    /// Encode `value` to `writer`, ending with a newline
    pub fn write<T: Serialize, W: Write>(&self, value: &T, mut writer: W) -> Result<()> {
        match self {
            OutputFormat::Yaml => serde_yaml::to_writer(&mut writer, value)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, value)?;
                writeln!(writer)?;
            }
        }
        writer.flush()?;
        Ok(())
    }

    /// Encode `value` to stdout
    pub fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        self.write(value, std::io::stdout().lock())
    }
}
