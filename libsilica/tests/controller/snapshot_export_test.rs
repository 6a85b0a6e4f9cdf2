#[path = "../common/mod.rs"]
mod common;

use chrono::{TimeZone, Utc};
use common::fixtures;
use libsilica::history::MemoryHistory;
use libsilica::session::ReadRequest;
use libsilica::snapshot;
use libsilica::test_support::{read_frame_with, write_ok_frame};
use libsilica::{ReadController, WriteController};

#[test]
fn read_history_exports_and_reimports() -> anyhow::Result<()> {
    let mut reader = ReadController::new(MemoryHistory::new());
    reader.start_reading(ReadRequest::new(vec![0x83, 0x85]));

    let idm_block: Vec<u8> = fixtures::sample_idm_bytes()
        .iter()
        .chain(fixtures::sample_pmm_bytes().iter())
        .copied()
        .collect();
    let mut sys_block = [0u8; 16];
    sys_block[..2].copy_from_slice(&[0xFE, 0x00]);
    let frames = [read_frame_with(&[idm_block.as_slice().try_into()?, sys_block])];
    let mut tag = common::felica_tag(fixtures::discovery_then(frames));
    reader.on_tag(&mut tag);

    let (idm, blocks) = reader.history().latest_snapshot().expect("read with blocks");
    let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let text = snapshot::encode(&idm, stamp, &blocks);
    assert!(text.contains("# Timestamp: 2024-05-01 12:00:00"));
    assert!(text.contains("Blocks: 83, 85"));

    let decoded = snapshot::decode(&text)?;
    assert_eq!(decoded.idm, Some(fixtures::sample_idm()));
    assert_eq!(decoded.blocks, blocks);

    // the snapshot can be written back as a batch
    let mut writer = WriteController::new(MemoryHistory::new());
    assert_eq!(writer.import_snapshot(&text)?, 2);
    assert!(writer.is_armed());
    assert_eq!(writer.batch_state().map(|s| s.total), Some(2));
    let mut tag = common::felica_tag(vec![write_ok_frame(); 2]);
    writer.on_tag(&mut tag);
    let targets: Vec<u8> = tag.mock().unwrap().sent.iter().map(|f| f[15]).collect();
    assert_eq!(targets, vec![0x83, 0x85]);
    Ok(())
}

#[test]
fn import_without_blocks_is_not_armed() {
    let mut writer = WriteController::new(MemoryHistory::new());
    let err = writer
        .import_snapshot("# SiliCa system block export\nIDM: 012E4C123456789A\n")
        .unwrap_err();
    assert!(err.is_invalid_request());
    assert!(!writer.is_armed());
    assert!(writer.batch_state().is_none());
}

#[test]
fn malformed_snapshot_is_rejected() {
    let text = "IDM: 012E4C123456789A\n83: 01 02\n";
    let err = snapshot::decode(text).unwrap_err();
    assert!(err.to_string().contains("snapshot line 2"));
}
