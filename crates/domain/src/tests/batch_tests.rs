// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Batch, BatchProcessing, BatchProcessingStatus, BatchStatus, BatchType, DomainError,
    in_dissolution,
};
use time::OffsetDateTime;
use time::macros::datetime;

const NOW: OffsetDateTime = datetime!(2024-09-01 12:00 UTC);

fn open_batch() -> Batch {
    let mut batch: Batch = Batch::new(BatchType::InvoluntaryDissolution);
    batch.id = Some(1);
    batch.status = BatchStatus::Processing;
    batch
}

#[test]
fn test_processing_lifecycle_allows_documented_transitions() {
    use BatchProcessingStatus::{Completed, Error, Hold, Processing, Queued, Withdrawn};

    assert!(Hold.can_transition_to(Queued));
    assert!(Hold.can_transition_to(Withdrawn));
    assert!(Queued.can_transition_to(Processing));
    assert!(Queued.can_transition_to(Error));
    assert!(Processing.can_transition_to(Completed));
    assert!(Processing.can_transition_to(Hold));
    assert!(Error.can_transition_to(Queued));

    assert!(!Queued.can_transition_to(Completed));
    assert!(!Hold.can_transition_to(Completed));
}

#[test]
fn test_terminal_statuses_reject_transitions() {
    for next in [
        BatchProcessingStatus::Hold,
        BatchProcessingStatus::Queued,
        BatchProcessingStatus::Processing,
    ] {
        assert!(BatchProcessingStatus::Withdrawn.validate_transition(next).is_err());
        assert!(BatchProcessingStatus::Completed.validate_transition(next).is_err());
    }
    assert!(BatchProcessingStatus::Completed.is_terminal());
}

#[test]
fn test_transition_updates_entry() {
    let mut entry: BatchProcessing = BatchProcessing::new(1, 10, "BC1234567", NOW);
    let later: OffsetDateTime = datetime!(2024-09-02 12:00 UTC);

    entry
        .transition(BatchProcessingStatus::Processing, later)
        .unwrap();
    assert_eq!(entry.status, BatchProcessingStatus::Processing);
    assert_eq!(entry.last_modified, later);

    let err: DomainError = entry
        .transition(BatchProcessingStatus::Queued, later)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot transition batch processing from PROCESSING to QUEUED"
    );
}

#[test]
fn test_in_dissolution_with_live_entry() {
    let entries = vec![(open_batch(), BatchProcessing::new(1, 10, "BC1234567", NOW))];

    assert!(in_dissolution(10, &entries));
    assert!(!in_dissolution(11, &entries));
}

#[test]
fn test_not_in_dissolution_when_withdrawn_or_batch_closed() {
    let mut withdrawn: BatchProcessing = BatchProcessing::new(1, 10, "BC1234567", NOW);
    withdrawn.status = BatchProcessingStatus::Withdrawn;
    assert!(!in_dissolution(10, &[(open_batch(), withdrawn)]));

    let mut closed: Batch = open_batch();
    closed.status = BatchStatus::Cancelled;
    assert!(!in_dissolution(
        10,
        &[(closed, BatchProcessing::new(1, 10, "BC1234567", NOW))]
    ));
}
