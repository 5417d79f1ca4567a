//! Fuzz target: `parse_script` + `SecurityService::handle_command`
//!
//! Parses arbitrary text as a command script and replays whatever parses.
//! The parser may reject input but must not panic, and replay errors must
//! be typed.
//!
//! cargo fuzz run fuzz_command_script

#![no_main]

use catpoint::adapters::label_analyzer::LabelAnalyzer;
use catpoint::adapters::memory::MemoryRepository;
use catpoint::app::commands::parse_script;
use catpoint::app::service::SecurityService;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let Ok(commands) = parse_script(&text) else {
        return;
    };

    let mut svc = SecurityService::new(MemoryRepository::new(), LabelAnalyzer::new("cat"));
    for cmd in commands {
        let _ = svc.handle_command(cmd);
    }
    let report = svc.status_report().unwrap();
    assert!(report.active_sensor_count() <= report.sensors.len());
});
