/// How many leading characters of an identifier to keep in the short form.
const PREFIX_LEN: usize = 6;
/// How many trailing characters to keep.
const SUFFIX_LEN: usize = 4;

/// Shorten a base58 identifier for compact display, e.g.
/// "DguLeagz1hgqMVCiYq9Gd2f288NpJHWxFK1VPYFAxRAL" → "DguLea…xRAL".
///
/// Identifiers at or below the combined affix length are returned
/// unchanged. Never panics, whatever the input — this runs in rendering
/// paths.
pub fn format_address(address: &str) -> String {
    let len = address.chars().count();
    if len <= PREFIX_LEN + SUFFIX_LEN {
        return address.to_string();
    }
    let prefix: String = address.chars().take(PREFIX_LEN).collect();
    let suffix: String = address.chars().skip(len - SUFFIX_LEN).collect();
    format!("{prefix}…{suffix}")
}

/// Uppercase first character of an identifier, for the avatar badge.
/// Falls back to 'U' for an empty string.
pub fn initial(address: &str) -> char {
    address
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('U')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortens_long_identifier() {
        assert_eq!(
            format_address("DguLeagz1hgqMVCiYq9Gd2f288NpJHWxFK1VPYFAxRAL"),
            "DguLea…xRAL"
        );
    }

    #[test]
    fn short_identifier_unchanged() {
        assert_eq!(format_address("abc123"), "abc123");
        assert_eq!(format_address("abcdef1234"), "abcdef1234");
    }

    #[test]
    fn empty_input_does_not_panic() {
        assert_eq!(format_address(""), "");
        assert_eq!(initial(""), 'U');
    }

    #[test]
    fn initial_is_uppercased() {
        assert_eq!(initial("dguLea"), 'D');
        assert_eq!(initial("5abc"), '5');
    }

    #[test]
    fn non_ascii_input_does_not_panic() {
        // Identities are base58 in practice, but rendering must not crash
        // on arbitrary strings.
        let s = "ééééééééééééé";
        assert_eq!(format_address(s), "éééééé…éééé");
    }
}
