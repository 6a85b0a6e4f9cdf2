#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libsilica::session::{ReadRequest, ReadSession};
use libsilica::test_support::{read_frame, read_frame_with};
use libsilica::transport::MockTag;
use libsilica::{Error, SessionConfig};

#[test]
fn thirty_blocks_are_read_in_three_chunks() {
    let numbers: Vec<u8> = (0..30).collect();
    let mut tag = common::felica_tag(fixtures::discovery_then([
        read_frame(&numbers[..12]),
        read_frame(&numbers[12..24]),
        read_frame(&numbers[24..]),
    ]));

    let result = ReadSession::new(ReadRequest::new(numbers.clone()))
        .run(&mut tag)
        .unwrap();

    let chunks = common::read_chunks(&tag);
    let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![12, 12, 6]);
    assert_eq!(chunks.concat(), numbers);

    assert_eq!(result.block_numbers, numbers);
    assert_eq!(result.block_data.len(), 30 * 16);
    assert_eq!(&result.block_data[16 * 29..], &[29u8; 16]);
    assert!(result.last_error_command.is_empty());
}

#[test]
fn oversized_chunk_setting_still_sends_twelve_blocks() {
    let numbers: Vec<u8> = (0..30).collect();
    let mut tag = common::felica_tag(fixtures::discovery_then([
        read_frame(&numbers[..12]),
        read_frame(&numbers[12..24]),
        read_frame(&numbers[24..]),
    ]));
    let config = SessionConfig {
        max_blocks_per_command: 30,
        ..SessionConfig::default()
    };

    let result = ReadSession::new(ReadRequest::new(numbers.clone()))
        .with_config(config)
        .run(&mut tag)
        .unwrap();

    let sizes: Vec<usize> = common::read_chunks(&tag).iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![12, 12, 6]);
    assert_eq!(result.block_data.len(), 30 * 16);
}

#[test]
fn default_request_extracts_last_error_command() {
    let recorded = [0x06, 0x01, 0x2E, 0x4C, 0x12];
    let blocks = fixtures::last_error_blocks(&recorded);
    let mut tag = common::felica_tag(fixtures::discovery_then([read_frame_with(&blocks)]));

    let result = ReadSession::new(ReadRequest::default())
        .run(&mut tag)
        .unwrap();

    assert_eq!(result.idm, fixtures::sample_idm());
    assert_eq!(result.pmm, fixtures::sample_pmm());
    assert_eq!(result.formatted_pmm(), fixtures::sample_pmm().to_hex());
    assert_eq!(result.block_numbers, vec![0xE0, 0xE1]);
    assert_eq!(result.last_error_command, recorded.to_vec());
    assert_eq!(result.formatted_last_error_command(), "06 01 2E 4C 12");

    let codes: Vec<u16> = result.system_codes.iter().map(|c| c.as_u16()).collect();
    assert_eq!(codes, fixtures::sample_system_codes());
    let services: Vec<u16> = result.service_codes.iter().map(|c| c.as_u16()).collect();
    assert_eq!(services, fixtures::sample_service_codes());
}

#[test]
fn unwritten_error_blocks_yield_no_command() {
    let mut tag = common::felica_tag(fixtures::discovery_then([read_frame_with(&[
        [0xFF; 16], [0xFF; 16],
    ])]));
    let result = ReadSession::new(ReadRequest::default())
        .run(&mut tag)
        .unwrap();
    assert!(result.last_error_command.is_empty());
}

#[test]
fn exchange_log_covers_every_command() {
    let mut tag = common::felica_tag(fixtures::discovery_then([read_frame(&[0xE0, 0xE1])]));
    let result = ReadSession::new(ReadRequest::default())
        .run(&mut tag)
        .unwrap();

    // polling, system codes, 2 services + sentinel, read
    assert_eq!(result.exchanges.len(), 6);
    assert_eq!(result.exchanges.labels()[0], "Polling");
    assert_eq!(common::sent_codes(&tag), vec![0x00, 0x0C, 0x0A, 0x0A, 0x0A, 0x06]);
    assert!(!tag.mock().unwrap().connected);
}

#[test]
fn metadata_only_skips_block_reads() {
    let mut tag = common::felica_tag(fixtures::discovery());
    let result = ReadSession::new(ReadRequest::metadata_only())
        .run(&mut tag)
        .unwrap();
    assert!(result.block_data.is_empty());
    assert!(!common::sent_codes(&tag).contains(&0x06));
}

#[test]
fn short_chunk_keeps_partial_data() {
    let numbers: Vec<u8> = (0..20).collect();
    let mut tag = common::felica_tag(fixtures::discovery_then([
        read_frame(&numbers[..12]),
        read_frame(&numbers[12..15]),
    ]));

    let failure = ReadSession::new(ReadRequest::new(numbers.clone()))
        .run(&mut tag)
        .unwrap_err();

    assert!(matches!(
        failure.error,
        Error::IncompletePayload {
            expected: 128,
            actual: 48
        }
    ));
    let partial = failure.partial.expect("partial result");
    assert_eq!(partial.block_numbers, numbers);
    assert_eq!(partial.completed_blocks(), 15);
    assert_eq!(partial.idm, fixtures::sample_idm());
}

#[test]
fn lost_tag_keeps_exchanges_and_closes() {
    let mut tag = common::felica_tag(fixtures::discovery());
    let failure = ReadSession::new(ReadRequest::default())
        .run(&mut tag)
        .unwrap_err();

    assert!(failure.error.is_io());
    let last = failure.exchanges.iter().last().unwrap();
    assert!(last.is_unanswered());
    assert_eq!(failure.partial.unwrap().completed_blocks(), 0);
    assert_eq!(tag.mock().unwrap().close_calls, 1);
}

#[test]
fn polling_failure_has_no_partial() {
    let mut tag = common::felica_tag(vec![]);
    let failure = ReadSession::new(ReadRequest::default())
        .run(&mut tag)
        .unwrap_err();
    assert!(failure.error.is_io());
    assert!(failure.partial.is_none());
    assert_eq!(failure.exchanges.len(), 1);
}

#[test]
fn non_felica_tag_is_rejected() {
    common::init_logger();
    let mut tag = MockTag::non_felica(vec![0x04, 0xA2, 0x2B]);
    let failure = ReadSession::new(ReadRequest::default())
        .run(&mut tag)
        .unwrap_err();
    assert!(matches!(failure.error, Error::WrongTagType));
    assert!(failure.exchanges.is_empty());
}
