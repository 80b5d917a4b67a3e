#[path = "../common/mod.rs"]
mod common;

use cryptoauth::constants::WAKE_RESPONSE;
use cryptoauth::device::DeviceBuilder;
use cryptoauth::test_support::shared_mock;
use cryptoauth::{Error, Interface, MockPhysical};

#[test]
fn builder_requires_physical() {
    assert!(matches!(DeviceBuilder::new().build(), Err(Error::NoDevice)));
}

#[test]
fn wake_sleep_idle_cycle() -> anyhow::Result<()> {
    let (phys, mock) = shared_mock();
    mock.borrow_mut().push_response(WAKE_RESPONSE.to_vec());
    mock.borrow_mut().push_response(WAKE_RESPONSE.to_vec());

    let asleep = DeviceBuilder::new()
        .with_physical(phys)
        .with_policy(common::helpers::fast_policy())
        .with_device_id(2)
        .build()?;
    assert_eq!(asleep.device_id(), 2);
    assert_eq!(asleep.interface(), Interface::Swi);

    let idle = asleep
        .wakeup()
        .map_err(Error::from)?
        .idle()
        .map_err(Error::from)?;
    let _asleep = idle
        .wakeup()
        .map_err(Error::from)?
        .sleep()
        .map_err(Error::from)?;

    let m = mock.borrow();
    assert_eq!(m.wakeups, 2);
    assert_eq!(m.idles, 1);
    assert_eq!(m.sleeps, 1);
    Ok(())
}

#[test]
fn wakeup_rejects_wrong_status() {
    let mut mock = MockPhysical::new();
    mock.push_response(cryptoauth::test_support::response_packet(&[0x00]));
    let device = DeviceBuilder::new()
        .with_physical(Box::new(mock))
        .with_policy(common::helpers::fast_policy())
        .build()
        .unwrap();
    let err = device.wakeup().err().map(|e| e.error);
    assert_eq!(err, Some(Error::CommFail));
}

#[test]
fn retry_wake_after_bad_response() -> anyhow::Result<()> {
    let (phys, mock) = shared_mock();
    mock.borrow_mut()
        .push_response(cryptoauth::test_support::response_packet(&[0x00]));
    mock.borrow_mut().push_response(WAKE_RESPONSE.to_vec());

    let asleep = DeviceBuilder::new()
        .with_physical(phys)
        .with_policy(common::helpers::fast_policy())
        .build()?;

    let asleep = match asleep.wakeup() {
        Ok(_) => anyhow::bail!("first wake should fail"),
        Err(e) => {
            assert_eq!(e.error, Error::CommFail);
            e.device
        }
    };
    let mut awake = asleep.wakeup().map_err(Error::from)?;
    awake.set_device_id(1)?;

    let m = mock.borrow();
    assert_eq!(m.wakeups, 2);
    assert_eq!(m.device_id, 1);
    Ok(())
}
