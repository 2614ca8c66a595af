use crate::tracking::Transition;

/// Escapes text for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders a transition as an HTML chat message.
pub fn transition_message(transition: &Transition) -> String {
    let position = &transition.snapshot;
    let marker = transition.current.emoji();

    let mut message = format!(
        "<b>LP range status changed</b>\n\
         Time: <code>{}</code>\n\
         Position: <code>{}</code>\n\
         Pool: <code>{}</code>\n",
        transition.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        escape_html(transition.position_id.as_str()),
        escape_html(&transition.pool_id),
    );

    if let Some(pair) = position.pair_label() {
        message.push_str(&format!("Pair: {}\n", escape_html(&pair)));
    }

    message.push_str(&format!(
        "Current tick: <code>{}</code>\n\
         Range: [{}, {}]\n\
         Status: {} {marker}",
        position.tick_current,
        position.tick_lower(),
        position.tick_upper(),
        transition.direction(),
    ));

    if let (Some(token0), Some(token1)) = (&position.token0, &position.token1)
        && token0.amount.is_some()
        && token1.amount.is_some()
    {
        message.push_str(&format!(
            "\nHoldings: {} + {}",
            escape_html(&token0.to_string()),
            escape_html(&token1.to_string())
        ));
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use clmm_monitor_domain::{Position, RangeStatus, TickRange, TokenHolding};
    use rust_decimal_macros::dec;

    fn transition(position: &Position, previous: RangeStatus) -> Transition {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        Transition::new(previous, position, at)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&c"), "a&lt;b&gt;&amp;c");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_left_range_message() {
        let position = Position::new("42", "0xpool", TickRange::new(-100, 100), 150, 1);
        let message = transition_message(&transition(&position, RangeStatus::InRange));

        assert!(message.starts_with("<b>LP range status changed</b>\n"));
        assert!(message.contains("Time: <code>2025-01-02 03:04:05 UTC</code>"));
        assert!(message.contains("Position: <code>42</code>"));
        assert!(message.contains("Pool: <code>0xpool</code>"));
        assert!(message.contains("Current tick: <code>150</code>"));
        assert!(message.contains("Range: [-100, 100]"));
        assert!(message.ends_with("Status: left range 🔴"));
        assert!(!message.contains("Pair:"));
    }

    #[test]
    fn test_back_in_range_message_with_tokens() {
        let position = Position::new("7", "0xpool", TickRange::new(-100, 100), 0, 1).with_tokens(
            TokenHolding::new("<W>BNB").with_amount(dec!(1.5)),
            TokenHolding::new("USDT").with_amount(dec!(300)),
        );
        let message = transition_message(&transition(&position, RangeStatus::OutOfRange));

        assert!(message.contains("Pair: &lt;W&gt;BNB/USDT"));
        assert!(message.contains("Status: back in range 🟢"));
        assert!(message.contains("Holdings: 1.5 &lt;W&gt;BNB + 300 USDT"));
    }
}
