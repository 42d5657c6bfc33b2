const MILLIS_PER_SECOND: u64 = 1_000;
const SECONDS_PER_DAY: u64 = 86_400;

/// Format an epoch-millisecond timestamp as `HH:MM:SS` in UTC.
pub fn format_trade_time(timestamp_ms: u64) -> String {
    let seconds_of_day = (timestamp_ms / MILLIS_PER_SECOND) % SECONDS_PER_DAY;
    format!(
        "{:02}:{:02}:{:02}",
        seconds_of_day / 3_600,
        (seconds_of_day % 3_600) / 60,
        seconds_of_day % 60
    )
}
