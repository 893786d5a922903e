use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::disassemble::DisasmOptions;
use crate::error::{Error, Result};
use crate::view::ViewOptions;

/// Defaults for the command line, read from a YAML file:
///
/// ```yaml
/// disassemble:
///   show_address: true
///   padding: 40
/// view:
///   format: hex
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub disassemble: DisasmOptions,
    pub view: ViewOptions,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|err| Error::from_io(path, err))?;
        serde_yaml::from_reader(BufReader::new(file))
            .map_err(|err| Error::Config(path.to_path_buf(), err))
    }

    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}
