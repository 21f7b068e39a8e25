use crate::vex_generation::domain::{EventKind, VexStatus};

/// EventTranslator service: advisory event kind to VEX status
///
/// | Event kind                     | Status                |
/// |--------------------------------|-----------------------|
/// | `fixed`                        | `fixed`               |
/// | `detection`                    | `under_investigation` |
/// | `true-positive-determination`  | `affected`            |
/// | `false-positive-determination` | `not_affected`        |
///
/// Every other kind, including `analysis-not-planned`, `fix-not-planned`
/// and types this build does not know, has no status.
pub struct EventTranslator;

impl EventTranslator {
    pub fn translate(kind: &EventKind) -> Option<VexStatus> {
        match kind {
            EventKind::Fixed => Some(VexStatus::Fixed),
            EventKind::Detection => Some(VexStatus::UnderInvestigation),
            EventKind::TruePositiveDetermination => Some(VexStatus::Affected),
            EventKind::FalsePositiveDetermination => Some(VexStatus::NotAffected),
            EventKind::AnalysisNotPlanned
            | EventKind::FixNotPlanned
            | EventKind::Unrecognized(_) => None,
        }
    }
}
