#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libsilica::session::{RawBlockPayload, WriteRequest, WriteSession};
use libsilica::test_support::{write_frame, write_ok_frame};
use libsilica::Error;

#[test]
fn identity_write_targets_block_0x83() {
    let mut tag = common::felica_tag(vec![write_ok_frame()]);
    let new_idm = vec![0x02, 0xFE, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01];
    let pmm = fixtures::sample_pmm_bytes().to_vec();

    let result = WriteSession::new(WriteRequest::Identity {
        idm: new_idm.clone(),
        pmm: Some(pmm.clone()),
    })
    .run(&mut tag)
    .unwrap();
    assert_eq!(result.blocks_written, 1);
    assert_eq!(result.exchanges.len(), 1);

    let sent = &tag.mock().unwrap().sent[0];
    // addressed to the tag's own IDm
    assert_eq!(&sent[2..10], &fixtures::sample_idm_bytes());
    assert_eq!(sent[15], 0x83);
    assert_eq!(&sent[16..24], &new_idm[..]);
    assert_eq!(&sent[24..32], &pmm[..]);
}

#[test]
fn batch_writes_each_block_in_order() {
    let mut tag = common::felica_tag(vec![write_ok_frame(); 3]);
    let batch = WriteRequest::RawBlockBatch(vec![
        RawBlockPayload::new(0x10, vec![1; 16]),
        RawBlockPayload::new(0x11, vec![2; 16]),
        RawBlockPayload::new(0x12, vec![3; 16]),
    ]);
    let result = WriteSession::new(batch).run(&mut tag).unwrap();
    assert_eq!(result.blocks_written, 3);

    let targets: Vec<u8> = tag.mock().unwrap().sent.iter().map(|f| f[15]).collect();
    assert_eq!(targets, vec![0x10, 0x11, 0x12]);
}

#[test]
fn rejected_write_reports_completed_count() {
    let mut tag = common::felica_tag(vec![write_ok_frame(), write_frame(0xFF, 0x70)]);
    let batch = WriteRequest::RawBlockBatch(vec![
        RawBlockPayload::new(0x10, vec![1; 16]),
        RawBlockPayload::new(0x11, vec![2; 16]),
        RawBlockPayload::new(0x12, vec![3; 16]),
    ]);
    let failure = WriteSession::new(batch).run(&mut tag).unwrap_err();

    assert_eq!(failure.completed_payloads, 1);
    assert!(matches!(
        failure.error,
        Error::DeviceStatus {
            status1: 0xFF,
            status2: 0x70
        }
    ));
    assert_eq!(failure.exchanges.len(), 2);
    assert_eq!(tag.mock().unwrap().close_calls, 1);
}

#[test]
fn invalid_requests_fail_before_any_io() {
    let bad = [
        WriteRequest::Identity {
            idm: vec![1, 2, 3],
            pmm: None,
        },
        WriteRequest::SystemCodes(vec![0xFE00; 9]),
        WriteRequest::ServiceCodes(vec![0x090F; 9]),
        WriteRequest::RawBlock(RawBlockPayload::new(0x100, vec![0; 16])),
        WriteRequest::RawBlock(RawBlockPayload::new(0x10, vec![0; 15])),
        WriteRequest::RawBlockBatch(vec![]),
    ];
    for request in bad {
        let mut tag = common::felica_tag(vec![write_ok_frame()]);
        let failure = WriteSession::new(request.clone()).run(&mut tag).unwrap_err();
        assert!(failure.error.is_invalid_request(), "{:?}", request);
        assert!(tag.mock().unwrap().sent.is_empty());
        assert_eq!(failure.completed_payloads, 0);
    }
}
