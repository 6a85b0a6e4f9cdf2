#[path = "../common/mod.rs"]
mod common;

use libsilica::transport::{MockTag, MockTransport, Tag, Transport};

#[test]
fn mock_transport_send_and_receive() {
    let mut m = MockTransport::new();
    m.push_response(vec![0x02, 0x01]);
    let r = m.transceive(&[0x02, 0xAA]).unwrap();
    assert_eq!(m.sent, vec![vec![0x02, 0xAA]]);
    assert_eq!(r, vec![0x02, 0x01]);
}

#[test]
fn connect_timeout_and_close_are_recorded() {
    let mut m = MockTransport::new();
    m.connect().unwrap();
    assert!(m.connected);
    m.set_timeout(250);
    assert_eq!(m.timeout_ms, 250);
    m.close().unwrap();
    assert!(!m.connected);
    assert_eq!(m.close_calls, 1);
}

#[test]
fn felica_tag_exposes_nfc_f() {
    let mut tag = MockTag::felica(
        common::fixtures::sample_idm(),
        MockTransport::with_responses([vec![0x02, 0x01]]),
    );
    assert_eq!(tag.id(), &common::fixtures::sample_idm_bytes());
    let nfc = tag.nfc_f().expect("FeliCa tag");
    assert_eq!(nfc.transceive(&[0x02, 0x00]).unwrap(), vec![0x02, 0x01]);
}

#[test]
fn other_tags_have_no_nfc_f() {
    let mut tag = MockTag::non_felica(vec![0x04, 0x11, 0x22, 0x33]);
    assert!(tag.nfc_f().is_none());
    assert!(tag.mock().is_none());
}
