#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libsilica::history::{MemoryHistory, Operation, Status};
use libsilica::session::{FullDumpCoordinator, ReadRequest};
use libsilica::test_support::read_frame;
use libsilica::{ReadController, ReadOutcome};

#[test]
fn unarmed_controller_ignores_taps() {
    let mut controller = ReadController::new(MemoryHistory::new());
    let mut tag = common::felica_tag(fixtures::discovery());
    assert!(controller.on_tag(&mut tag).is_none());
    assert!(tag.mock().unwrap().sent.is_empty());
}

#[test]
fn single_read_disarms_and_records_history() {
    let mut controller = ReadController::new(MemoryHistory::new());
    controller.start_reading(ReadRequest::default());
    assert!(controller.is_armed());

    let mut tag = common::felica_tag(fixtures::discovery_then([read_frame(&[0xE0, 0xE1])]));
    match controller.on_tag(&mut tag) {
        Some(ReadOutcome::Completed(result)) => assert_eq!(result.block_data.len(), 32),
        other => panic!("expected completed read, got {:?}", other),
    }
    assert!(!controller.is_armed());

    let record = controller.history().latest().unwrap();
    assert_eq!(record.operation, Operation::Read);
    assert_eq!(record.status, Status::Success);
    assert_eq!(record.summary, "Read success (012E4C123456789A)");
    assert_eq!(record.exchanges.len(), 6);
}

#[test]
fn failed_read_records_error() {
    let mut controller = ReadController::new(MemoryHistory::new());
    controller.start_reading(ReadRequest::default());

    let mut tag = common::felica_tag(vec![]);
    assert!(matches!(
        controller.on_tag(&mut tag),
        Some(ReadOutcome::Failed(_))
    ));
    let record = controller.history().latest().unwrap();
    assert_eq!(record.status, Status::Error);
    assert!(record.summary.starts_with("Read error: "));
}

#[test]
fn stopping_a_single_read_records_cancellation() {
    let mut controller = ReadController::new(MemoryHistory::new());
    controller.start_reading(ReadRequest::new(vec![0x83]));
    controller.stop();
    assert!(!controller.is_armed());

    let record = controller.history().latest().unwrap();
    assert_eq!(record.operation, Operation::Read);
    assert_eq!(record.status, Status::Cancelled);
    assert_eq!(record.summary, "Read cancelled");
    assert!(record.exchanges.is_empty());

    // nothing armed, nothing recorded
    controller.stop();
    assert_eq!(controller.history().len(), 1);
}

#[test]
fn full_dump_stays_armed_until_complete() {
    let mut controller = ReadController::new(MemoryHistory::new())
        .with_dump(FullDumpCoordinator::with_target((0..6).collect()).unwrap());
    controller.start_full_dump();

    let mut tag = common::felica_tag(fixtures::discovery_then([read_frame(&[0, 1, 2, 3])]));
    match controller.on_tag(&mut tag) {
        Some(ReadOutcome::DumpInProgress {
            completed: 4,
            total: 6,
            failure: Some(_),
        }) => {}
        other => panic!("expected dump in progress, got {:?}", other),
    }
    assert!(controller.is_armed());

    // stopping keeps the progress; re-arming resumes it
    controller.stop();
    assert_eq!(controller.dump_progress(), (4, 6));
    controller.start_full_dump();

    let mut tag = common::felica_tag(fixtures::discovery_then([read_frame(&[4, 5])]));
    match controller.on_tag(&mut tag) {
        Some(ReadOutcome::Completed(result)) => {
            assert_eq!(result.block_numbers, vec![0, 1, 2, 3, 4, 5]);
            assert_eq!(result.block_data.len(), 96);
        }
        other => panic!("expected completed dump, got {:?}", other),
    }
    assert!(!controller.is_armed());

    let statuses: Vec<Status> = controller.history().iter().map(|r| r.status).collect();
    assert_eq!(statuses, vec![Status::Error, Status::Success]);
}

#[test]
fn reset_discards_dump_progress() {
    let mut controller = ReadController::new(MemoryHistory::new())
        .with_dump(FullDumpCoordinator::with_target((0..6).collect()).unwrap());
    controller.start_full_dump();
    let mut tag = common::felica_tag(fixtures::discovery_then([read_frame(&[0, 1])]));
    controller.on_tag(&mut tag);
    assert_eq!(controller.dump_progress(), (2, 6));

    controller.reset_full_dump();
    assert_eq!(controller.dump_progress(), (0, 6));
}

#[test]
fn history_can_be_borrowed_as_sink() {
    let mut history = MemoryHistory::with_capacity(1);
    {
        let mut controller = ReadController::new(&mut history);
        for _ in 0..2 {
            controller.start_reading(ReadRequest::default());
            let mut tag = common::felica_tag(vec![]);
            controller.on_tag(&mut tag);
        }
    }
    assert_eq!(history.len(), 1);
}
