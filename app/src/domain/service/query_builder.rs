use crate::error::*;
use indexmap::IndexSet;

/// Builds a recent-search query matching any of the given cashtags, excluding
/// retweets and replies.
///
/// Symbols are trimmed, stripped of one leading `$`, uppercased and
/// deduplicated in first-seen order. The language clause is left to the caller.
pub fn build_cashtag_query<S: AsRef<str>>(symbols: &[S]) -> Result<String> {
    let cashtags = symbols
        .iter()
        .filter_map(|raw| {
            let symbol = raw.as_ref().trim();
            let symbol = symbol.strip_prefix('$').unwrap_or(symbol).trim();
            if symbol.is_empty() {
                None
            } else {
                Some(symbol.to_uppercase())
            }
        })
        .collect::<IndexSet<String>>();

    if cashtags.is_empty() {
        return Err(GeneralError::invalid_input(anyhow::anyhow!(
            "no valid cashtag symbols were provided"
        )));
    }

    let combined = cashtags
        .iter()
        .map(|symbol| format!("(${})", symbol))
        .collect::<Vec<_>>()
        .join(" OR ");

    Ok(format!("({}) -is:retweet -is:reply", combined))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_build_a_single_symbol_query() {
        let query = build_cashtag_query(&["btc"]).unwrap();
        assert_eq!(query, "(($BTC)) -is:retweet -is:reply");
    }

    #[test]
    fn it_should_join_symbols_with_or() {
        let query = build_cashtag_query(&[" $aapl ", "", "TSLA", "$"]).unwrap();
        assert_eq!(query, "(($AAPL) OR ($TSLA)) -is:retweet -is:reply");
    }

    #[test]
    fn it_should_emit_one_term_per_unique_symbol() {
        let query = build_cashtag_query(&["BTC", "$btc", "eth", "Btc"]).unwrap();
        assert_eq!(query.matches("$BTC").count(), 1);
        assert_eq!(query.matches("$ETH").count(), 1);
        assert_eq!(query.matches(" OR ").count(), 1);
    }

    #[test]
    fn it_should_reject_blank_symbol_lists() {
        let empty: [&str; 0] = [];
        let err = build_cashtag_query(&empty).unwrap_err();
        assert!(err.is_error_of(GeneralError::InvalidInput));

        let err = build_cashtag_query(&["", "  ", "$", " $ "]).unwrap_err();
        assert!(err.is_error_of(GeneralError::InvalidInput));
    }
}
