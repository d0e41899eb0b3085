pub mod build_info;

use std::{io, sync::Once};

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "billdesk=info";

/// Installs the global subscriber. Logs go to stderr so command output on
/// stdout stays machine-readable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse() {
            filter = filter.add_directive(directive);
        }
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .try_init();
    });
}

/// Formats an amount with the configured currency symbol and two decimals.
/// Half cents round away from zero.
pub fn format_money(symbol: &str, amount: f64) -> String {
    let rounded = (amount.abs() * 100.0).round() / 100.0;
    if amount < 0.0 && rounded > 0.0 {
        format!("-{symbol}{rounded:.2}")
    } else {
        format!("{symbol}{rounded:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::format_money;

    #[test]
    fn money_uses_two_decimals_and_leading_sign() {
        assert_eq!(format_money("₹", 220.0), "₹220.00");
        assert_eq!(format_money("$", 0.125), "$0.13");
        assert_eq!(format_money("$", -4.5), "-$4.50");
    }

    #[test]
    fn half_cents_round_away_from_zero() {
        assert_eq!(format_money("$", 0.125), "$0.13");
        assert_eq!(format_money("$", -0.125), "-$0.13");
        assert_eq!(format_money("$", -0.001), "$0.00");
    }
}
