#[path = "../common/mod.rs"]
mod common;

use libsilica::protocol::{decode_polling, decode_read, decode_request_system_code, decode_write};
use libsilica::test_support;
use libsilica::Error;

#[test]
fn polling_response_yields_identifiers() {
    let (idm, pmm) = decode_polling(&test_support::polling_frame()).unwrap();
    assert_eq!(idm, common::fixtures::sample_idm());
    assert_eq!(pmm, common::fixtures::sample_pmm());
}

#[test]
fn read_response_decodes_blocks() {
    let block = common::fixtures::sample_blockdata(0xAA);
    let frame = test_support::read_frame_with(&[*block.as_bytes()]);

    let read = decode_read(&frame).unwrap();
    assert_eq!((read.status1, read.status2), (0, 0));
    let blocks: Vec<_> = read.blocks().collect();
    assert_eq!(blocks, vec![block]);
}

#[test]
fn read_errors_follow_frame_layout() {
    // wrong code reported before status, status before payload
    let mut frame = test_support::read_status_frame(0xA4, 0x00);
    frame[1] = 0x09;
    assert!(matches!(
        decode_read(&frame),
        Err(Error::UnexpectedResponse {
            expected: 0x07,
            actual: 0x09
        })
    ));

    let mut frame = test_support::read_status_frame(0xA4, 0x00);
    frame[12] = 4;
    assert!(matches!(
        decode_read(&frame),
        Err(Error::DeviceStatus {
            status1: 0xA4,
            status2: 0x00
        })
    ));

    assert!(matches!(
        decode_read(&frame[..12]),
        Err(Error::ResponseTooShort { .. })
    ));
}

#[test]
fn system_codes_are_big_endian() {
    let frame = test_support::system_code_frame(&common::fixtures::sample_system_codes());
    let raw: Vec<u16> = decode_request_system_code(&frame)
        .iter()
        .map(|c| c.as_u16())
        .collect();
    assert_eq!(raw, common::fixtures::sample_system_codes());
}

#[test]
fn write_status_error_is_reported() {
    let frame = test_support::write_frame(0x01, 0xA5);
    assert!(matches!(
        decode_write(&frame),
        Err(Error::DeviceStatus {
            status1: 0x01,
            status2: 0xA5
        })
    ));
}
