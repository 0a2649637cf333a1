//! Root Cause Tagger.
//!
//! Rules run in order and each match overwrites the previous tag, so the
//! last applicable rule wins: handling complexity outranks carrier
//! reliability, which outranks traffic.

use crate::models::{OrderRecord, RootCause};

/// Traffic delay (minutes) above which traffic is blamed.
pub const TRAFFIC_DELAY_THRESHOLD: f64 = 2.0;
/// Carriers with a known reliability problem.
pub const UNRELIABLE_CARRIERS: &[&str] = &["GlobalTransit"];
/// `special_handling` value meaning "no special handling".
pub const NO_SPECIAL_HANDLING: &str = "None";

pub fn tag(record: &OrderRecord) -> RootCause {
    let mut cause = RootCause::Normal;
    if record.traffic_delay > TRAFFIC_DELAY_THRESHOLD {
        cause = RootCause::Traffic;
    }
    if record.carrier.is_any_of(UNRELIABLE_CARRIERS) {
        cause = RootCause::CarrierReliability;
    }
    // A zero-filled value is not "None", so unmatched orders land here.
    if !record.special_handling.is(NO_SPECIAL_HANDLING) {
        cause = RootCause::HandlingComplexity;
    }
    cause
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Label;
    use crate::test_utils::order;

    #[test]
    fn test_normal_when_no_rule_matches() {
        assert_eq!(tag(&order("A")), RootCause::Normal);
    }

    #[test]
    fn test_traffic_threshold_is_strict() {
        let at = OrderRecord { traffic_delay: 2.0, ..order("A") };
        let over = OrderRecord { traffic_delay: 2.5, ..order("A") };
        assert_eq!(tag(&at), RootCause::Normal);
        assert_eq!(tag(&over), RootCause::Traffic);
    }

    #[test]
    fn test_carrier_overrides_traffic() {
        let record = OrderRecord {
            traffic_delay: 30.0,
            carrier: Label::from("GlobalTransit"),
            ..order("A")
        };
        assert_eq!(tag(&record), RootCause::CarrierReliability);
    }

    #[test]
    fn test_handling_overrides_everything() {
        let record = OrderRecord {
            traffic_delay: 30.0,
            carrier: Label::from("GlobalTransit"),
            special_handling: Label::from("Fragile"),
            ..order("A")
        };
        assert_eq!(tag(&record), RootCause::HandlingComplexity);
    }

    #[test]
    fn test_zero_filled_handling_counts_as_complex() {
        let record = OrderRecord { special_handling: Label::ZeroFill, ..order("A") };
        assert_eq!(tag(&record), RootCause::HandlingComplexity);
    }
}
