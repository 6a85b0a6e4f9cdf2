#[path = "../common/mod.rs"]
mod common;

use libsilica::session::discovery::search_service_codes;
use libsilica::session::ExchangeLog;
use libsilica::test_support::{self, search_frame, search_rejected_frame};
use libsilica::transport::MockTransport;
use libsilica::types::Idm;

fn codes(transport: &mut MockTransport, limit: usize) -> (Vec<u16>, ExchangeLog) {
    common::init_logger();
    let mut log = ExchangeLog::new();
    let found = search_service_codes(transport, &mut log, Idm::from_bytes(test_support::IDM), limit);
    (found.iter().map(|c| c.as_u16()).collect(), log)
}

#[test]
fn stops_at_sentinel_after_codes() {
    let mut t = MockTransport::with_responses([
        search_frame(0x090F),
        search_frame(0x1848),
        search_frame(0xFFFF),
        search_frame(0x2000),
    ]);
    let (found, log) = codes(&mut t, 32);
    assert_eq!(found, vec![0x090F, 0x1848]);
    assert_eq!(
        log.labels(),
        vec![
            "Search Service Codes #1",
            "Search Service Codes #2",
            "Search Service Codes #3"
        ]
    );
    assert_eq!(t.responses.len(), 1);
}

#[test]
fn search_index_is_sent_little_endian() {
    let mut t = MockTransport::with_responses([search_frame(0x1000), search_frame(0xFFFF)]);
    codes(&mut t, 32);
    assert_eq!(&t.sent[0][10..], &[0x00, 0x00]);
    assert_eq!(&t.sent[1][10..], &[0x01, 0x00]);
}

#[test]
fn duplicate_code_ends_search() {
    let mut t = MockTransport::with_responses([
        search_frame(0x1000),
        search_frame(0x1001),
        search_frame(0x1000),
    ]);
    let (found, _) = codes(&mut t, 32);
    assert_eq!(found, vec![0x1000, 0x1001]);
}

#[test]
fn rejection_and_transport_errors_end_search() {
    let mut t = MockTransport::with_responses([search_frame(0x1000), search_rejected_frame()]);
    assert_eq!(codes(&mut t, 32).0, vec![0x1000]);

    let mut t = MockTransport::with_responses([search_frame(0x1000)]);
    let (found, log) = codes(&mut t, 32);
    assert_eq!(found, vec![0x1000]);
    assert!(log.iter().last().unwrap().is_unanswered());
}

#[test]
fn search_respects_limit() {
    let mut t = MockTransport::with_responses((0..40u16).map(|i| search_frame(0x1000 + i)));
    let (found, log) = codes(&mut t, 32);
    assert_eq!(found.len(), 32);
    assert_eq!(log.len(), 32);
}

#[test]
fn larger_limit_is_capped_at_32() {
    let mut t = MockTransport::with_responses((0..50u16).map(|i| search_frame(0x2000 + i)));
    let (found, log) = codes(&mut t, 40);
    assert_eq!(found.len(), 32);
    assert_eq!(log.len(), 32);
    assert_eq!(t.sent.len(), 32);
}
