//! Fuzz target: `StoredRepository::open`
//!
//! Splits the input into three blobs, stores them under the alarm, arming
//! and sensor keys, and opens a repository over them. Checks that:
//! - decoding never panics, only returns `Corrupted`
//! - a successfully opened repository accepts a disarm and keeps it
//!
//! cargo fuzz run fuzz_stored_state

#![no_main]

use catpoint::adapters::store::MemoryStore;
use catpoint::adapters::stored::{
    ALARM_KEY, ARMING_KEY, SENSORS_KEY, STATE_NAMESPACE, StoredRepository,
};
use catpoint::alarm::{AlarmStatus, ArmingStatus};
use catpoint::app::ports::{RepositoryError, SecurityRepository, StoragePort};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First two bytes pick the split points.
    let body = &data[2..];
    let a = usize::from(data[0]).min(body.len());
    let b = (a + usize::from(data[1])).min(body.len());

    let mut store = MemoryStore::new();
    for (key, blob) in [
        (ALARM_KEY, &body[..a]),
        (ARMING_KEY, &body[a..b]),
        (SENSORS_KEY, &body[b..]),
    ] {
        if !blob.is_empty() {
            store.write(STATE_NAMESPACE, key, blob).unwrap();
        }
    }

    match StoredRepository::open(store) {
        Ok(mut repo) => {
            repo.set_arming_status(ArmingStatus::Disarmed).unwrap();
            repo.set_alarm_status(AlarmStatus::NoAlarm).unwrap();
            let reopened = StoredRepository::open(repo.into_store()).unwrap();
            assert_eq!(reopened.arming_status().unwrap(), ArmingStatus::Disarmed);
            assert_eq!(reopened.alarm_status().unwrap(), AlarmStatus::NoAlarm);
        }
        Err(RepositoryError::Corrupted(_)) => {}
        Err(e) => panic!("unexpected error from in-memory store: {e}"),
    }
});
