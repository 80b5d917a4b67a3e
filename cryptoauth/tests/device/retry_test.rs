#[path = "../common/mod.rs"]
mod common;

use common::helpers::corrupted;
use cryptoauth::test_support::{awake_mock_device, response_packet};
use cryptoauth::{Error, Resync};

#[test]
fn bad_crc_resyncs_then_reads_again() -> anyhow::Result<()> {
    let random = [0x33u8; 32];
    let (mut dev, mock) = awake_mock_device(vec![corrupted(&random), response_packet(&random)])?;
    assert_eq!(dev.random(0)?, random);
    let m = mock.borrow();
    assert_eq!(m.resyncs, 1);
    assert_eq!(m.sent.len(), 1);
    Ok(())
}

#[test]
fn status_crc_error_resends() -> anyhow::Result<()> {
    let random = [0x44u8; 32];
    let (mut dev, mock) =
        awake_mock_device(vec![response_packet(&[0xFF]), response_packet(&random)])?;
    assert_eq!(dev.random(0)?, random);
    assert_eq!(mock.borrow().sent.len(), 2);
    Ok(())
}

#[test]
fn silent_device_reports_no_response() -> anyhow::Result<()> {
    let (mut dev, mock) = awake_mock_device(vec![])?;
    assert_eq!(dev.random(0), Err(Error::RxNoResponse));
    assert!(mock.borrow().sent.len() >= 1);
    Ok(())
}

#[test]
fn resync_falls_back_to_wakeup() -> anyhow::Result<()> {
    let (mut dev, mock) = awake_mock_device(vec![])?;
    mock.borrow_mut().set_resync_failures(1);
    mock.borrow_mut()
        .push_response(cryptoauth::constants::WAKE_RESPONSE.to_vec());
    assert_eq!(dev.resync()?, Resync::WokenUp);
    assert_eq!(mock.borrow().sleeps, 1);
    Ok(())
}
