#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use common::helpers::host_session;
use cryptoauth::constants::WAKE_RESPONSE;
use cryptoauth::test_support::response_packet;

#[test]
fn talk_mac_over_ascii() {
    let (mut session, mock) = host_session();
    let digest = fixtures::mac_digest();
    mock.borrow_mut().push_response(WAKE_RESPONSE.to_vec());
    mock.borrow_mut().push_response(response_packet(&digest));

    let line = format!("s:t(2708000000{}0000)", fixtures::MAC_CHALLENGE_HEX);
    let out = session.process_line(line.as_bytes());
    assert_eq!(out, format!("00(23{}E573)\n", fixtures::MAC_DIGEST_HEX));

    let m = mock.borrow();
    let sent = m.last_sent().unwrap();
    assert_eq!(sent[0], 0x27);
    assert_eq!(sent[1], 0x08);
    assert_eq!(m.idles, 1);
}

#[test]
fn wrap_toggle_changes_wake() {
    let (mut session, mock) = host_session();
    assert_eq!(session.process_line(b"s:w"), "00(04113343)\n");
    assert_eq!(mock.borrow().wakeups, 0);

    assert_eq!(session.process_line(b"s:a(00)"), "00()\n");
    mock.borrow_mut().push_response(WAKE_RESPONSE.to_vec());
    assert_eq!(session.process_line(b"s:w"), "00(04113343)\n");
    assert_eq!(mock.borrow().wakeups, 1);
}

#[test]
fn talk_failure_reports_library_code() {
    let (mut session, _mock) = host_session();
    session.process_line(b"s:a(00)");
    // nothing queued: the device never answers
    let out = session.process_line(b"s:t(07300000000000)");
    assert_eq!(out, "E7()\n");
}

#[test]
fn bad_input_codes() {
    let (mut session, _mock) = host_session();
    assert_eq!(session.process_line(b"z:t(00)"), "C0()\n");
    assert_eq!(session.process_line(b"s:t(zz)"), "C3()\n");
    assert_eq!(session.process_line(b"s:t"), "C3()\n");
}

#[test]
fn feed_splits_lines() {
    let (mut session, _mock) = host_session();
    let out = session.feed(b"b:v\nb:f(03)\n");
    assert_eq!(out, vec!["CK590 ECC108 SWI 00(00)\n", "ECC108 00(000100)\n"]);
}
