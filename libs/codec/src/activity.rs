//! # Activity Lifecycle Tracker
//!
//! ## Purpose
//!
//! Per-activity state machine driven by the control messages of the
//! protocol. States progress in strict forward order:
//!
//! ```text
//! Init -> Tuned -> PendBaseAccum -> RunBaseAccum -> BaseAccumComplete
//!      -> PendDc -> RunDc -> DcComplete -> PendSd -> RunSd -> SdComplete
//!      -> Complete
//! ```
//!
//! A stop request leaves any non-terminal state for `Stopping`, completed
//! by `PdmActivityComplete` into `Stopped`. A fault moves any state to
//! `Error`. `Complete`, `Stopped` and `Error` are terminal: a further
//! control message for that activity id is reported as
//! [`WireError::IllegalStateTransition`], never silently dropped.
//!
//! The tracker also owns each activity's signal-sequence counter and mints
//! [`SignalId`]s from it; the (instrument, activity, start time, sequence)
//! tuple is immutable once issued.
//!
//! ## Concurrency
//!
//! All methods take `&mut self`: one writer per tracker. Different
//! trackers (or one tracker per thread with disjoint activity ids) may run
//! concurrently; nothing here blocks.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use pdm_types::{
    NssDate, PdmActivityParameters, PdmActivityState, PdmActivityStatus, PdmMessageCode,
    PdmStatus, SignalId, MAX_PDM_ACTIVITIES,
};

use crate::error::{WireError, WireResult};

struct ActivityEntry {
    state: PdmActivityState,
    start_time: NssDate,
    next_signal_number: i32,
}

/// Tracks the lifecycle of up to [`MAX_PDM_ACTIVITIES`] concurrent
/// activities, keyed by activity id.
pub struct ActivityTracker {
    /// Instrument ordinal stamped into minted signal ids.
    pdm_number: i32,
    activities: BTreeMap<i32, ActivityEntry>,
}

impl ActivityTracker {
    pub fn new(pdm_number: i32) -> Self {
        Self {
            pdm_number,
            activities: BTreeMap::new(),
        }
    }

    /// Current state of a tracked activity.
    pub fn state(&self, activity_id: i32) -> WireResult<PdmActivityState> {
        self.activities
            .get(&activity_id)
            .map(|entry| entry.state)
            .ok_or(WireError::UnknownActivity { activity_id })
    }

    fn non_terminal_count(&self) -> usize {
        self.activities
            .values()
            .filter(|entry| !entry.state.is_terminal())
            .count()
    }

    /// Begin tracking a new activity (`SEND_PDM_ACTIVITY_PARAMETERS`).
    ///
    /// The activity enters `Init`. A terminal entry under the same id is
    /// replaced; a live one rejects the restart. Starting a third live
    /// activity is [`WireError::CapacityExceeded`].
    pub fn start_activity(&mut self, params: &PdmActivityParameters) -> WireResult<()> {
        let activity_id = params.activity_id;
        if let Some(entry) = self.activities.get(&activity_id) {
            if !entry.state.is_terminal() {
                warn!(activity_id, state = ?entry.state, "activity restarted while live");
                return Err(WireError::IllegalStateTransition {
                    activity_id,
                    from: entry.state,
                    code: PdmMessageCode::SendPdmActivityParameters,
                });
            }
            self.activities.remove(&activity_id);
        }
        if self.non_terminal_count() >= MAX_PDM_ACTIVITIES {
            return Err(WireError::CapacityExceeded {
                limit: MAX_PDM_ACTIVITIES,
            });
        }
        debug!(activity_id, "activity tracked, state Init");
        self.activities.insert(
            activity_id,
            ActivityEntry {
                state: PdmActivityState::Init,
                start_time: NssDate::default(),
                next_signal_number: 0,
            },
        );
        Ok(())
    }

    /// Record the scheduled start time (`START_TIME`) and move
    /// `Tuned -> PendBaseAccum`.
    ///
    /// The start time becomes part of every signal id minted for this
    /// activity.
    pub fn set_start_time(
        &mut self,
        activity_id: i32,
        start_time: NssDate,
    ) -> WireResult<PdmActivityState> {
        let next = self.transition(activity_id, PdmMessageCode::StartTime)?;
        if let Some(entry) = self.activities.get_mut(&activity_id) {
            entry.start_time = start_time;
        }
        Ok(next)
    }

    /// Apply a lifecycle control message to an activity.
    ///
    /// Returns the new state. A message the current state does not accept
    /// is [`WireError::IllegalStateTransition`]; an untracked id is
    /// [`WireError::UnknownActivity`].
    pub fn apply(
        &mut self,
        activity_id: i32,
        code: PdmMessageCode,
    ) -> WireResult<PdmActivityState> {
        self.transition(activity_id, code)
    }

    fn transition(
        &mut self,
        activity_id: i32,
        code: PdmMessageCode,
    ) -> WireResult<PdmActivityState> {
        use PdmActivityState as S;
        use PdmMessageCode as C;

        let entry = self
            .activities
            .get_mut(&activity_id)
            .ok_or(WireError::UnknownActivity { activity_id })?;
        let from = entry.state;

        let next = match (code, from) {
            (C::PdmTuned, S::Init) => S::Tuned,
            (C::StartTime, S::Tuned) => S::PendBaseAccum,
            (C::BaselineInitAccumStarted, S::PendBaseAccum) => S::RunBaseAccum,
            (C::BaselineInitAccumComplete, S::RunBaseAccum) => S::BaseAccumComplete,
            (C::DataCollectionStarted, S::BaseAccumComplete | S::PendDc) => S::RunDc,
            (C::DataCollectionComplete, S::RunDc) => S::DcComplete,
            (C::SignalDetectionStarted, S::DcComplete | S::PendSd) => S::RunSd,
            (C::SignalDetectionComplete, S::RunSd) => S::SdComplete,
            (C::PdmActivityComplete, S::SdComplete) => S::Complete,
            (C::PdmActivityComplete, S::Stopping) => S::Stopped,
            (C::StopPdmActivity, from) if !from.is_terminal() => S::Stopping,
            _ => {
                warn!(activity_id, ?from, ?code, "control message rejected");
                return Err(WireError::IllegalStateTransition {
                    activity_id,
                    from,
                    code,
                });
            }
        };
        debug!(activity_id, ?from, to = ?next, ?code, "activity transition");
        entry.state = next;
        Ok(next)
    }

    /// Scheduler-driven entry into a pending state:
    /// `BaseAccumComplete -> PendDc`, `DcComplete -> PendSd`.
    pub fn mark_pending(&mut self, activity_id: i32) -> WireResult<PdmActivityState> {
        use PdmActivityState as S;

        let entry = self
            .activities
            .get_mut(&activity_id)
            .ok_or(WireError::UnknownActivity { activity_id })?;
        let next = match entry.state {
            S::BaseAccumComplete => S::PendDc,
            S::DcComplete => S::PendSd,
            from => {
                return Err(WireError::IllegalStateTransition {
                    activity_id,
                    from,
                    code: PdmMessageCode::MessageCodeUninit,
                })
            }
        };
        debug!(activity_id, from = ?entry.state, to = ?next, "activity pending");
        entry.state = next;
        Ok(next)
    }

    /// Fault path: any state moves to `Error`. Idempotent.
    pub fn mark_error(&mut self, activity_id: i32) -> WireResult<()> {
        let entry = self
            .activities
            .get_mut(&activity_id)
            .ok_or(WireError::UnknownActivity { activity_id })?;
        if entry.state != PdmActivityState::Error {
            warn!(activity_id, from = ?entry.state, "activity faulted");
            entry.state = PdmActivityState::Error;
        }
        Ok(())
    }

    /// Mint the next signal id for an activity. Ids are never reused.
    pub fn mint_signal_id(&mut self, activity_id: i32) -> WireResult<SignalId> {
        let entry = self
            .activities
            .get_mut(&activity_id)
            .ok_or(WireError::UnknownActivity { activity_id })?;
        let number = entry.next_signal_number;
        entry.next_signal_number += 1;
        Ok(SignalId {
            pdm_number: self.pdm_number,
            activity_id,
            activity_start_time: entry.start_time,
            number,
        })
    }

    /// Snapshot of tracked activities for a `SEND_PDM_STATUS` report.
    ///
    /// Live activities always claim the report slots first; terminal
    /// entries that have not been pruned yet only fill what remains.
    pub fn status(&self, timestamp: NssDate) -> PdmStatus {
        let mut status = PdmStatus {
            timestamp,
            ..PdmStatus::default()
        };
        let live = self
            .activities
            .iter()
            .filter(|(_, entry)| !entry.state.is_terminal());
        let terminal = self
            .activities
            .iter()
            .filter(|(_, entry)| entry.state.is_terminal());
        for (slot, (id, entry)) in status.act.iter_mut().zip(live.chain(terminal)) {
            *slot = PdmActivityStatus {
                activity_id: *id,
                current_state: entry.state,
            };
            status.number_of_activities += 1;
        }
        status
    }

    /// Drop terminal activities, freeing capacity for new ones.
    pub fn prune_terminal(&mut self) {
        self.activities.retain(|_, entry| !entry.state.is_terminal());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(activity_id: i32) -> PdmActivityParameters {
        PdmActivityParameters {
            activity_id,
            ..PdmActivityParameters::default()
        }
    }

    fn tracker_in_state(state: PdmActivityState) -> ActivityTracker {
        use PdmActivityState as S;
        use PdmMessageCode as C;

        let mut t = ActivityTracker::new(7);
        t.start_activity(&params(1)).unwrap();
        let steps: &[(C, S)] = &[
            (C::PdmTuned, S::Tuned),
            (C::StartTime, S::PendBaseAccum),
            (C::BaselineInitAccumStarted, S::RunBaseAccum),
            (C::BaselineInitAccumComplete, S::BaseAccumComplete),
            (C::DataCollectionStarted, S::RunDc),
            (C::DataCollectionComplete, S::DcComplete),
            (C::SignalDetectionStarted, S::RunSd),
            (C::SignalDetectionComplete, S::SdComplete),
            (C::PdmActivityComplete, S::Complete),
        ];
        if state == S::Init {
            return t;
        }
        for (code, reached) in steps {
            t.apply(1, *code).unwrap();
            if *reached == state {
                break;
            }
        }
        t
    }

    #[test]
    fn full_forward_progression() {
        let t = tracker_in_state(PdmActivityState::Complete);
        assert_eq!(t.state(1).unwrap(), PdmActivityState::Complete);
    }

    #[test]
    fn run_dc_rejects_a_tuning_message() {
        let mut t = tracker_in_state(PdmActivityState::RunDc);
        assert_eq!(
            t.apply(1, PdmMessageCode::PdmTuned).unwrap_err(),
            WireError::IllegalStateTransition {
                activity_id: 1,
                from: PdmActivityState::RunDc,
                code: PdmMessageCode::PdmTuned,
            }
        );
        // The failed message left the state untouched.
        assert_eq!(t.state(1).unwrap(), PdmActivityState::RunDc);
    }

    #[test]
    fn stop_from_any_non_terminal_then_complete() {
        let mut t = tracker_in_state(PdmActivityState::RunDc);
        assert_eq!(
            t.apply(1, PdmMessageCode::StopPdmActivity).unwrap(),
            PdmActivityState::Stopping
        );
        assert_eq!(
            t.apply(1, PdmMessageCode::PdmActivityComplete).unwrap(),
            PdmActivityState::Stopped
        );
        // Terminal: even another stop is rejected.
        assert!(matches!(
            t.apply(1, PdmMessageCode::StopPdmActivity),
            Err(WireError::IllegalStateTransition { .. })
        ));
    }

    #[test]
    fn pending_states_resume_forward() {
        let mut t = tracker_in_state(PdmActivityState::BaseAccumComplete);
        assert_eq!(t.mark_pending(1).unwrap(), PdmActivityState::PendDc);
        assert_eq!(
            t.apply(1, PdmMessageCode::DataCollectionStarted).unwrap(),
            PdmActivityState::RunDc
        );
        t.apply(1, PdmMessageCode::DataCollectionComplete).unwrap();
        assert_eq!(t.mark_pending(1).unwrap(), PdmActivityState::PendSd);
        assert_eq!(
            t.apply(1, PdmMessageCode::SignalDetectionStarted).unwrap(),
            PdmActivityState::RunSd
        );
    }

    #[test]
    fn capacity_is_two_live_activities() {
        let mut t = ActivityTracker::new(7);
        t.start_activity(&params(1)).unwrap();
        t.start_activity(&params(2)).unwrap();
        assert_eq!(
            t.start_activity(&params(3)).unwrap_err(),
            WireError::CapacityExceeded { limit: 2 }
        );

        // A terminal slot frees capacity.
        t.mark_error(1).unwrap();
        t.start_activity(&params(3)).unwrap();
        assert_eq!(t.state(3).unwrap(), PdmActivityState::Init);
    }

    #[test]
    fn unknown_activity_is_reported() {
        let mut t = ActivityTracker::new(7);
        assert_eq!(
            t.apply(42, PdmMessageCode::PdmTuned).unwrap_err(),
            WireError::UnknownActivity { activity_id: 42 }
        );
        assert!(t.state(42).is_err());
    }

    #[test]
    fn restarting_a_live_activity_is_rejected() {
        let mut t = ActivityTracker::new(7);
        t.start_activity(&params(1)).unwrap();
        assert!(matches!(
            t.start_activity(&params(1)),
            Err(WireError::IllegalStateTransition {
                activity_id: 1,
                from: PdmActivityState::Init,
                code: PdmMessageCode::SendPdmActivityParameters,
            })
        ));
    }

    #[test]
    fn signal_ids_carry_the_start_time_and_count_up() {
        let mut t = ActivityTracker::new(7);
        t.start_activity(&params(5)).unwrap();
        t.apply(5, PdmMessageCode::PdmTuned).unwrap();
        let start = NssDate::new(1_700_000_000, 250_000);
        t.set_start_time(5, start).unwrap();

        let first = t.mint_signal_id(5).unwrap();
        let second = t.mint_signal_id(5).unwrap();
        assert_eq!(first.pdm_number, 7);
        assert_eq!(first.activity_id, 5);
        assert_eq!(first.activity_start_time, start);
        assert_eq!(first.number, 0);
        assert_eq!(second.number, 1);
    }

    #[test]
    fn status_snapshot_reports_every_tracked_activity() {
        let mut t = ActivityTracker::new(7);
        t.start_activity(&params(1)).unwrap();
        t.start_activity(&params(2)).unwrap();
        t.apply(1, PdmMessageCode::PdmTuned).unwrap();

        let status = t.status(NssDate::new(100, 0));
        assert_eq!(status.number_of_activities, 2);
        assert_eq!(status.act[0].activity_id, 1);
        assert_eq!(status.act[0].current_state, PdmActivityState::Tuned);
        assert_eq!(status.act[1].activity_id, 2);
        assert_eq!(status.act[1].current_state, PdmActivityState::Init);
    }

    #[test]
    fn status_reports_live_activities_before_lingering_terminal_ones() {
        let mut t = ActivityTracker::new(7);
        t.start_activity(&params(1)).unwrap();
        t.mark_error(1).unwrap();
        // The faulted entry lingers until pruned; two live activities may
        // still start and must both appear in the snapshot.
        t.start_activity(&params(2)).unwrap();
        t.start_activity(&params(3)).unwrap();

        let status = t.status(NssDate::new(200, 0));
        assert_eq!(status.number_of_activities, 2);
        let reported: Vec<i32> = status.act.iter().map(|a| a.activity_id).collect();
        assert_eq!(reported, vec![2, 3]);
        assert!(status
            .act
            .iter()
            .all(|a| !a.current_state.is_terminal()));
    }

    #[test]
    fn prune_drops_only_terminal_entries() {
        let mut t = ActivityTracker::new(7);
        t.start_activity(&params(1)).unwrap();
        t.start_activity(&params(2)).unwrap();
        t.mark_error(2).unwrap();
        t.prune_terminal();
        assert!(t.state(1).is_ok());
        assert!(matches!(
            t.state(2),
            Err(WireError::UnknownActivity { activity_id: 2 })
        ));
    }
}
