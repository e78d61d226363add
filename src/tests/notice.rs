use super::Notices;
use std::time::{Duration, Instant};

#[test]
fn test_newest_notice_is_current() {
    let mut notices = Notices::new(Duration::from_secs(5));
    notices.info("first");
    notices.error("second");
    let current = notices.current().unwrap();
    assert_eq!(current.text, "second");
    assert!(current.is_error);
    assert_eq!(notices.len(), 2);
}

#[test]
fn test_notices_expire() {
    let mut notices = Notices::new(Duration::from_millis(10));
    notices.info("gone soon");
    notices.expire(Instant::now() + Duration::from_secs(1));
    assert!(notices.is_empty());
    assert!(notices.current().is_none());
}
