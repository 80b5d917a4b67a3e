#[path = "../common/mod.rs"]
mod common;

use cryptoauth::test_support::{awake_mock_device, response_packet};
use serial_test::serial;

fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}

#[test]
#[serial]
fn commands_run_with_trace_logging() -> anyhow::Result<()> {
    init_logger();
    let random = [0x21u8; 32];
    let (mut dev, _mock) = awake_mock_device(vec![
        common::helpers::corrupted(&random),
        response_packet(&random),
    ])?;
    assert_eq!(dev.random(0)?, random);
    Ok(())
}

#[test]
#[serial]
fn host_session_with_trace_logging() {
    init_logger();
    let (mut session, _mock) = common::helpers::host_session();
    assert_eq!(session.process_line(b"lib:b:v"), "CK590 ECC108 SWI 00(00)\n");
}
