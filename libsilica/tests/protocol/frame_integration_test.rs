#[path = "../common/mod.rs"]
mod common;

use libsilica::protocol::{encode_command_frame, Command, CommandFrame};
use libsilica::types::SystemCode;

#[test]
fn polling_frame_matches_wire_bytes() -> anyhow::Result<()> {
    let frame = encode_command_frame(&Command::Polling {
        system_code: SystemCode::ANY,
        request_code: 0,
        time_slot: 0,
    })?;
    assert_eq!(frame.as_bytes(), hex::decode("0600ffff0000")?.as_slice());
    Ok(())
}

#[test]
fn length_byte_counts_itself() -> anyhow::Result<()> {
    let frame = encode_command_frame(&Command::RequestSystemCode {
        idm: common::fixtures::sample_idm(),
    })?;
    assert_eq!(frame.len(), 10);
    assert_eq!(frame.as_bytes()[0], 10);
    assert_eq!(frame.command_code(), 0x0C);
    Ok(())
}

#[test]
fn oversized_frame_is_rejected() {
    assert!(matches!(
        CommandFrame::encode(&[0u8; 300]),
        Err(libsilica::Error::InvalidLength { actual: 301, .. })
    ));
}
