// helpers.rs: logging setup and tag construction shared by integration tests

use libsilica::test_support;
use libsilica::transport::MockTag;

/// Route `log` output through the test harness. Safe to call repeatedly.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn felica_tag(responses: Vec<Vec<u8>>) -> MockTag {
    init_logger();
    test_support::felica_tag(responses)
}

/// Command codes (byte 1) of every frame the tag received.
pub fn sent_codes(tag: &MockTag) -> Vec<u8> {
    tag.mock().map(|m| m.sent_codes()).unwrap_or_default()
}

/// Block numbers carried by every Read command the tag received, one list
/// per command.
pub fn read_chunks(tag: &MockTag) -> Vec<Vec<u8>> {
    let Some(mock) = tag.mock() else {
        return Vec::new();
    };
    mock.sent
        .iter()
        .filter(|f| f.get(1) == Some(&0x06))
        .map(|f| {
            // len, code, idm(8), svc count, svc(2), block count, then pairs
            let count = f[13] as usize;
            f[14..14 + count * 2].chunks(2).map(|p| p[1]).collect()
        })
        .collect()
}
