use thiserror::Error;

/// Opening of the body Alpha Vantage sends for an unknown symbol (40 chars).
pub const INVALID_SYMBOL_PREFIX: &str = "{\n    \"Error Message\": \"Invalid API call";

/// Opening of the body Alpha Vantage sends once the free quota is used up (125 chars).
pub const RATE_LIMIT_PREFIX: &str = "{\n    \"Note\": \"Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute and 500 calls per day";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Invalid symbol")]
    InvalidSymbol,
    #[error("Sorry, too many API calls to Alpha Vantage have been made. Try again later...")]
    RateLimited,
}

/// Sorts a raw response body into one of the two known error payloads or
/// data. Anything that is not an exact sentinel prefix is handed back
/// untouched and assumed to be CSV.
///
/// The match is a literal comparison against the provider's current wording;
/// any change in it lets the payload through to the CSV parser.
pub fn classify(text: &str) -> Result<&str, ProviderError> {
    // Equal to comparing the first 40 / 125 characters, since the prefixes
    // are exactly that long.
    if text.starts_with(INVALID_SYMBOL_PREFIX) {
        tracing::debug!("response matched the invalid symbol payload");
        return Err(ProviderError::InvalidSymbol);
    }

    if text.starts_with(RATE_LIMIT_PREFIX) {
        tracing::debug!("response matched the rate limit payload");
        return Err(ProviderError::RateLimited);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INVALID_BODY: &str = "{\n    \"Error Message\": \"Invalid API call. Please retry or visit the documentation (https://www.alphavantage.co/documentation/) for TIME_SERIES_DAILY.\"\n}";

    const RATE_LIMIT_BODY: &str = "{\n    \"Note\": \"Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute and 500 calls per day. Please visit https://www.alphavantage.co/premium/ if you would like to target a higher API call frequency.\"\n}";

    #[test]
    fn prefixes_have_the_documented_lengths() {
        assert_eq!(INVALID_SYMBOL_PREFIX.chars().count(), 40);
        assert_eq!(RATE_LIMIT_PREFIX.chars().count(), 125);
    }

    #[test]
    fn detects_invalid_symbol() {
        assert_eq!(classify(INVALID_BODY), Err(ProviderError::InvalidSymbol));
        assert_eq!(classify(INVALID_SYMBOL_PREFIX), Err(ProviderError::InvalidSymbol));
    }

    #[test]
    fn detects_rate_limit() {
        assert_eq!(classify(RATE_LIMIT_BODY), Err(ProviderError::RateLimited));
        assert_eq!(classify(RATE_LIMIT_PREFIX), Err(ProviderError::RateLimited));
    }

    #[test]
    fn passes_csv_through() {
        let csv = "timestamp,open,high,low,close,volume\n2020-06-15,10,12,9,11,1000\n";
        assert_eq!(classify(csv), Ok(csv));
    }

    #[test]
    fn reworded_payloads_are_not_recognised() {
        // one space less of indentation
        let shifted = "{\n   \"Error Message\": \"Invalid API call. Please retry\"}";
        assert_eq!(classify(shifted), Ok(shifted));

        let truncated = &RATE_LIMIT_PREFIX[..124];
        assert_eq!(classify(truncated), Ok(truncated));
        assert_eq!(classify(""), Ok(""));
    }

    #[test]
    fn messages_match_what_the_user_sees() {
        assert_eq!(ProviderError::InvalidSymbol.to_string(), "Invalid symbol");
        assert_eq!(
            ProviderError::RateLimited.to_string(),
            "Sorry, too many API calls to Alpha Vantage have been made. Try again later..."
        );
    }
}
