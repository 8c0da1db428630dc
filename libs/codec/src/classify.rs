//! # Classification Rule Table
//!
//! ## Purpose
//!
//! Legality rules for signal classification. Every non-`Uninit`
//! [`SignalClass`] has a closed set of legal [`SignalClassReason`] values;
//! a reclassification whose reason is outside the target class's set is
//! rejected whole with [`WireError::IllegalClassification`] and the signal
//! keeps its previous (class, reason) pair.
//!
//! Two reasons legally support more than one class: `PassedPowerThresh`
//! backs both `Cand` and `Unknown` (a power hit past the candidate limit
//! stays unknown), and `SeenOff` backs both `Rfi` and `Unknown` (seen in
//! the off observation of a secondary beam).

use tracing::warn;

use pdm_types::{SignalClass, SignalClassReason, SignalDescription};

use crate::error::{WireError, WireResult};

/// The class a reason supports.
fn legal(class: SignalClass, reason: SignalClassReason) -> bool {
    use SignalClass as C;
    use SignalClassReason as R;

    match reason {
        // Dual memberships first.
        R::PassedPowerThresh => matches!(class, C::Cand | C::Unknown),
        R::SeenOff => matches!(class, C::Rfi | C::Unknown),

        R::PassedCoherentDetect
        | R::Confirm
        | R::Reconfirm
        | R::NotSeenOff
        | R::SecondaryFoundSignal
        | R::SeenGridWest
        | R::NotSeenGridWest
        | R::SeenGridSouth
        | R::NotSeenGridSouth
        | R::SeenGridOn
        | R::NotSeenGridOn
        | R::SeenGridNorth
        | R::NotSeenGridNorth
        | R::SeenGridEast
        | R::NotSeenGridEast
        | R::GridPrediction => class == C::Cand,

        R::ZeroDrift
        | R::RecentRfiMatch
        | R::FailedCoherentDetect
        | R::FailedPowerThresh
        | R::NoSignalFound
        | R::SnrTooHigh
        | R::SnrTooLow
        | R::DriftTooHigh
        | R::NoReconfirm
        | R::SeenMultipleBeams
        | R::FallsInBadBand
        | R::FailedCoherentDetectGridWest
        | R::ZeroDriftGridWest
        | R::RecentRfiMatchGridWest
        | R::FailedCoherentDetectGridSouth
        | R::ZeroDriftGridSouth
        | R::RecentRfiMatchGridSouth
        | R::FailedCoherentDetectGridOn
        | R::ZeroDriftGridOn
        | R::RecentRfiMatchGridOn
        | R::FailedCoherentDetectGridNorth
        | R::ZeroDriftGridNorth
        | R::RecentRfiMatchGridNorth
        | R::FailedCoherentDetectGridEast
        | R::ZeroDriftGridEast
        | R::RecentRfiMatchGridEast => class == C::Rfi,

        R::TestSignalMatch => class == C::Test,

        R::TooManyCandidates | R::BirdieScan | R::RfiScan | R::SecondaryNoSignalFound => {
            class == C::Unknown
        }

        R::ClassReasonUninit | R::SignalClassReasonEnd => false,
    }
}

/// Check a (class, reason) pair against the rule table.
pub fn validate(class: SignalClass, reason: SignalClassReason) -> WireResult<()> {
    if legal(class, reason) {
        Ok(())
    } else {
        Err(WireError::IllegalClassification { class, reason })
    }
}

/// Reclassify a signal: class and reason are replaced together or not at
/// all.
///
/// Re-sending the signal's current pair is a no-op. An illegal pair, or a
/// reason the controller may not assign, leaves the signal untouched.
pub fn reclassify(
    sig: &mut SignalDescription,
    class: SignalClass,
    reason: SignalClassReason,
) -> WireResult<()> {
    if sig.sig_class == class && sig.reason == reason {
        return Ok(());
    }
    if !reason.is_controller_assigned() {
        warn!(?class, ?reason, "reclassification with non-controller reason");
        return Err(WireError::IllegalClassification { class, reason });
    }
    validate(class, reason)?;
    sig.sig_class = class;
    sig.reason = reason;
    Ok(())
}

/// Initial classification by the instrument at detection time.
pub fn classify_initial(
    sig: &mut SignalDescription,
    class: SignalClass,
    reason: SignalClassReason,
) -> WireResult<()> {
    if !reason.is_instrument_assigned() {
        warn!(?class, ?reason, "initial classification with controller reason");
        return Err(WireError::IllegalClassification { class, reason });
    }
    validate(class, reason)?;
    sig.sig_class = class;
    sig.reason = reason;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use SignalClass as C;
    use SignalClassReason as R;

    #[test]
    fn every_reason_supports_at_least_one_class() {
        for raw in 1..i32::from(R::SignalClassReasonEnd) {
            let reason = R::try_from(raw).unwrap();
            let supported = [C::Cand, C::Rfi, C::Test, C::Unknown]
                .into_iter()
                .filter(|class| legal(*class, reason))
                .count();
            assert!(supported >= 1, "{reason:?} supports no class");
        }
    }

    #[test]
    fn dual_membership_reasons() {
        assert!(validate(C::Cand, R::PassedPowerThresh).is_ok());
        assert!(validate(C::Unknown, R::PassedPowerThresh).is_ok());
        assert!(validate(C::Rfi, R::PassedPowerThresh).is_err());

        assert!(validate(C::Rfi, R::SeenOff).is_ok());
        assert!(validate(C::Unknown, R::SeenOff).is_ok());
        assert!(validate(C::Cand, R::SeenOff).is_err());
    }

    #[test]
    fn cand_with_seen_off_is_illegal() {
        let mut sig = SignalDescription::default();
        sig.sig_class = C::Cand;
        sig.reason = R::PassedCoherentDetect;
        assert_eq!(
            reclassify(&mut sig, C::Cand, R::SeenOff).unwrap_err(),
            WireError::IllegalClassification {
                class: C::Cand,
                reason: R::SeenOff,
            }
        );
        // Rejected whole: the old pair survives.
        assert_eq!(sig.sig_class, C::Cand);
        assert_eq!(sig.reason, R::PassedCoherentDetect);

        reclassify(&mut sig, C::Rfi, R::SeenOff).unwrap();
        assert_eq!(sig.sig_class, C::Rfi);
        assert_eq!(sig.reason, R::SeenOff);
    }

    #[test]
    fn resending_the_current_pair_is_a_no_op() {
        let mut sig = SignalDescription::default();
        sig.sig_class = C::Rfi;
        sig.reason = R::ZeroDrift;
        // ZeroDrift is instrument assigned, but an identical pair is not a
        // reclassification at all.
        reclassify(&mut sig, C::Rfi, R::ZeroDrift).unwrap();
        assert_eq!(sig.reason, R::ZeroDrift);
    }

    #[test]
    fn reclassification_requires_a_controller_reason() {
        let mut sig = SignalDescription::default();
        sig.sig_class = C::Cand;
        sig.reason = R::PassedPowerThresh;
        assert!(matches!(
            reclassify(&mut sig, C::Rfi, R::ZeroDrift),
            Err(WireError::IllegalClassification { .. })
        ));
    }

    #[test]
    fn initial_classification_requires_an_instrument_reason() {
        let mut sig = SignalDescription::default();
        classify_initial(&mut sig, C::Cand, R::PassedPowerThresh).unwrap();
        assert_eq!(sig.sig_class, C::Cand);

        assert!(matches!(
            classify_initial(&mut sig, C::Cand, R::Confirm),
            Err(WireError::IllegalClassification { .. })
        ));
    }

    #[test]
    fn grid_outcomes_map_to_their_documented_class() {
        assert!(validate(C::Cand, R::SeenGridNorth).is_ok());
        assert!(validate(C::Cand, R::NotSeenGridEast).is_ok());
        assert!(validate(C::Rfi, R::ZeroDriftGridOn).is_ok());
        assert!(validate(C::Rfi, R::RecentRfiMatchGridWest).is_ok());
        assert!(validate(C::Test, R::TestSignalMatch).is_ok());
        assert!(validate(C::Cand, R::TestSignalMatch).is_err());
        assert!(validate(C::Unknown, R::TooManyCandidates).is_ok());
    }

    #[test]
    fn sentinels_support_nothing() {
        assert!(validate(C::Cand, R::ClassReasonUninit).is_err());
        assert!(validate(C::Unknown, R::SignalClassReasonEnd).is_err());
    }
}
