// taqti-cli: shared utilities for CLI tools.

use taqti_graph::count::CountTarget;

/// Check whether the arguments ask for help.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "-h" || a == "--help")
}

/// Parse a `--count` argument value: a single integer or a
/// comma-separated list of acceptable integers.
pub fn parse_count(value: &str) -> Result<CountTarget, String> {
    let parts: Result<Vec<u32>, _> = value.split(',').map(|p| p.trim().parse::<u32>()).collect();
    let parts = parts.map_err(|_| format!("invalid count value: {value}"))?;
    match parts.as_slice() {
        [] => Err(format!("invalid count value: {value}")),
        [single] => Ok(CountTarget::Exact(*single)),
        _ => Ok(CountTarget::OneOf(parts)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_flags() {
        let args = vec!["--count".to_string(), "-h".to_string()];
        assert!(wants_help(&args));
        assert!(!wants_help(&["==".to_string()]));
    }

    #[test]
    fn count_parsing() {
        assert_eq!(parse_count("32").unwrap(), CountTarget::Exact(32));
        assert_eq!(parse_count("30, 32").unwrap(), CountTarget::OneOf(vec![30, 32]));
        assert!(parse_count("x").is_err());
        assert!(parse_count("").is_err());
    }
}
