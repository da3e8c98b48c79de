//! Inbound trade command grammar (consumer -> bridge).
//!
//! One command per line, space-separated tokens, case-insensitive keyword:
//!
//! - `CLOSE` — close every open position carrying the configured label.
//! - `BUY <lots> [<sl_pips>] [<tp_pips>]` — market buy.
//! - `SELL <lots> [<sl_pips>] [<tp_pips>]` — market sell.
//!
//! Parsing is total: a malformed line never produces an error, it produces
//! [`Command::Invalid`] so the interpreter can log and drop it without ever
//! tearing down the connection.
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Direction of a market order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Side {
    /// Buy at the ask.
    #[strum(serialize = "BUY")]
    Buy,
    /// Sell at the bid.
    #[strum(serialize = "SELL")]
    Sell,
}

/// A single decoded command line.
///
/// Commands are transient: built from one inbound line, dispatched, then
/// discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Close every open position matching the configured label and symbol.
    Close,
    /// Execute a market order.
    Order {
        /// Buy or sell.
        side: Side,
        /// Volume in lots, converted by the host to its native units.
        lots: f64,
        /// Optional stop-loss distance in pips.
        stop_loss_pips: Option<f64>,
        /// Optional take-profit distance in pips.
        take_profit_pips: Option<f64>,
    },
    /// A line that did not decode into an executable command.
    Invalid {
        /// The offending line, verbatim.
        raw: String,
        /// Short human-readable reason for the rejection.
        reason: String,
    },
}

impl Command {
    /// Decodes one trimmed, non-empty line into a `Command`.
    ///
    /// Rules, in order:
    /// 1. `CLOSE` takes no parameters.
    /// 2. Anything else with fewer than two tokens is invalid.
    /// 3. `BUY`/`SELL` require a parsable lot size; trailing SL/TP tokens are
    ///    optional and a malformed one is treated as unset rather than
    ///    rejecting the whole order.
    /// 4. Any other keyword is unknown.
    pub fn parse(line: &str) -> Command {
        let parts: Vec<&str> = line.split(' ').collect();
        let keyword = parts[0];

        if keyword.eq_ignore_ascii_case("CLOSE") {
            return Command::Close;
        }

        if parts.len() < 2 {
            return Command::Invalid {
                raw: line.to_string(),
                reason: "Invalid command".to_string(),
            };
        }

        match keyword.parse::<Side>() {
            Ok(side) => {
                let lots = match parts[1].parse::<f64>() {
                    Ok(lots) => lots,
                    Err(_) => {
                        return Command::Invalid {
                            raw: line.to_string(),
                            reason: "Invalid lot size".to_string(),
                        };
                    }
                };
                let stop_loss_pips = parts.get(2).and_then(|t| t.parse::<f64>().ok());
                let take_profit_pips = parts.get(3).and_then(|t| t.parse::<f64>().ok());
                Command::Order {
                    side,
                    lots,
                    stop_loss_pips,
                    take_profit_pips,
                }
            }
            Err(_) => Command::Invalid {
                raw: line.to_string(),
                reason: "Unknown command".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_buy_with_stop_loss_and_take_profit() {
        assert_eq!(
            Command::parse("BUY 1.5 10 20"),
            Command::Order {
                side: Side::Buy,
                lots: 1.5,
                stop_loss_pips: Some(10.0),
                take_profit_pips: Some(20.0),
            }
        );
    }

    #[test]
    fn parses_sell_without_protective_distances() {
        assert_eq!(
            Command::parse("SELL 0.1"),
            Command::Order {
                side: Side::Sell,
                lots: 0.1,
                stop_loss_pips: None,
                take_profit_pips: None,
            }
        );
    }

    #[test]
    fn keyword_is_case_insensitive() {
        assert_eq!(Command::parse("close"), Command::Close);
        assert!(matches!(
            Command::parse("buy 0.5"),
            Command::Order { side: Side::Buy, .. }
        ));
        assert!(matches!(
            Command::parse("Sell 2"),
            Command::Order { side: Side::Sell, .. }
        ));
    }

    #[test]
    fn close_ignores_missing_parameters() {
        assert_eq!(Command::parse("CLOSE"), Command::Close);
    }

    #[test]
    fn unparsable_lot_size_is_invalid() {
        match Command::parse("BUY abc") {
            Command::Invalid { raw, reason } => {
                assert_eq!(raw, "BUY abc");
                assert_eq!(reason, "Invalid lot size");
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn malformed_protective_tokens_are_silently_unset() {
        assert_eq!(
            Command::parse("BUY 1.5 xx 20"),
            Command::Order {
                side: Side::Buy,
                lots: 1.5,
                stop_loss_pips: None,
                take_profit_pips: Some(20.0),
            }
        );
        assert_eq!(
            Command::parse("SELL 1 10 yy"),
            Command::Order {
                side: Side::Sell,
                lots: 1.0,
                stop_loss_pips: Some(10.0),
                take_profit_pips: None,
            }
        );
    }

    #[test]
    fn lone_keyword_other_than_close_is_invalid() {
        assert!(matches!(Command::parse("BUY"), Command::Invalid { .. }));
        assert!(matches!(Command::parse("HELP"), Command::Invalid { .. }));
    }

    #[test]
    fn unknown_keyword_with_arguments_is_invalid() {
        match Command::parse("HEDGE 1.5") {
            Command::Invalid { reason, .. } => assert_eq!(reason, "Unknown command"),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }
}
