use chrono::{DateTime, Utc};

const REFERENCE_PREFIX: &str = "TXN";
const REFERENCE_MODULUS: u64 = 10_000_000_000;

/// Issues transaction references such as `TXN4521987310`.
///
/// The digits are the last ten digits of the millisecond clock. Two references
/// issued in the same session never collide: when the clock has not moved past
/// the previous value the generator bumps it by one.
#[derive(Debug, Default)]
pub struct ReferenceGenerator {
    last: Option<u64>,
}

impl ReferenceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_reference(&mut self) -> String {
        self.next_at(Utc::now())
    }

    pub fn next_at(&mut self, now: DateTime<Utc>) -> String {
        let reading = u64::try_from(now.timestamp_millis()).unwrap_or(0) % REFERENCE_MODULUS;
        let value = match self.last {
            Some(last) if reading <= last => (last + 1) % REFERENCE_MODULUS,
            _ => reading,
        };
        self.last = Some(value);
        format!("{REFERENCE_PREFIX}{value:010}")
    }
}
