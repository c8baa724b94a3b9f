use kiln_config::EsTarget;

/// Parse a `--target` value, listing the accepted identifiers on failure.
pub fn parse_target(s: &str) -> Result<EsTarget, String> {
    s.parse::<EsTarget>().map_err(|err| {
        let accepted: Vec<_> = EsTarget::ALL.iter().map(|t| t.as_str()).collect();
        format!("{err} (expected one of: {})", accepted.join(", "))
    })
}
