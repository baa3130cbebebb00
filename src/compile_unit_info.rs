use std::path::PathBuf;

use crate::driver::config::DumpConfig;

/// This struct holds the options one compilation unit is processed with,
/// merged from the command line and the package config.
#[derive(Debug, Clone)]
pub struct CompileUnitInfo {
    /// The source file of this compile unit.
    pub file_path: PathBuf,
    /// Whether to print the parsed IR.
    pub dump_ir: bool,
    /// Whether to lower the unit and print the result.
    pub lower: bool,
    /// Whether headings are colored.
    pub color: bool,
}

impl CompileUnitInfo {
    /// Command line flags can only turn options on, except color which they
    /// can only turn off.
    pub fn new(
        file_path: PathBuf,
        dump_ir: bool,
        lower: bool,
        no_color: bool,
        config: Option<&DumpConfig>,
    ) -> Self {
        let defaults = DumpConfig::default();
        let config = config.unwrap_or(&defaults);
        Self {
            file_path,
            dump_ir: dump_ir || config.ir,
            lower: lower || config.lowered,
            color: !no_color && config.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::CompileUnitInfo;
    use crate::driver::config::DumpConfig;

    #[test]
    fn flags_override_config() {
        let config = DumpConfig {
            ir: false,
            lowered: true,
            color: true,
        };
        let info = CompileUnitInfo::new(PathBuf::from("a.fir"), true, false, true, Some(&config));
        assert!(info.dump_ir);
        assert!(info.lower);
        assert!(!info.color);

        let info = CompileUnitInfo::new(PathBuf::from("a.fir"), false, false, false, None);
        assert!(!info.dump_ir && !info.lower);
        assert!(info.color);
    }
}
