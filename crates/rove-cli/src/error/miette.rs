//! Miette diagnostic conversion for CLI errors.

use miette::Report;

use crate::error::CliError;

/// Convert CliError to miette Report
///
/// Library errors carry their own diagnostic codes, so they are reported
/// as-is; everything else becomes an ad-hoc report.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => Report::new(e),
        CliError::Module(e) => Report::new(e),
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rove_graph::ModuleError;

    #[test]
    fn module_errors_keep_their_code() {
        let err = CliError::Module(ModuleError::no_matching_rule("index.mjs", "left-pad", false));
        let report = cli_error_to_miette(err);
        let code = report.code().map(|code| code.to_string());
        assert_eq!(code.as_deref(), Some("rove::module::no_matching_rule"));
    }
}
