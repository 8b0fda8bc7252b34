//! Integration tests: StorageBringup → driver → event sink.

use log::Level;
use seedernode::app::bringup::{Capacity, MountOutcome, StorageBringup};
use seedernode::app::events::NodeEvent;
use seedernode::config::VolumeConfig;
use seedernode::error::{
    ESP_ERR_INVALID_ARG, ESP_ERR_INVALID_STATE, ESP_ERR_NO_MEM, ESP_ERR_NOT_FOUND, ESP_FAIL,
    Error, MountFailureKind, StatsFailure,
};

use super::mock_adapters::{RecordingSink, ScriptedDriver};

fn iop() -> VolumeConfig {
    VolumeConfig::new("/iop", "iop", false).unwrap()
}

// ── Idempotent mount ─────────────────────────────────────────

#[test]
fn second_mount_is_already_mounted_without_driver_attempt() {
    let mut storage = StorageBringup::new(ScriptedDriver::healthy(), iop());
    let mut sink = RecordingSink::new();

    assert_eq!(storage.mount(&mut sink), MountOutcome::Mounted);
    assert_eq!(storage.mount(&mut sink), MountOutcome::AlreadyMounted);

    assert_eq!(storage.driver().register_calls.get(), 1);
    assert_eq!(sink.count_at(Level::Warn), 1);
    assert_eq!(sink.count_at(Level::Error), 0);
}

#[test]
fn volume_mounted_elsewhere_short_circuits() {
    let mut storage = StorageBringup::new(ScriptedDriver::already_mounted(), iop());
    let mut sink = RecordingSink::new();

    assert_eq!(storage.mount(&mut sink), MountOutcome::AlreadyMounted);
    assert_eq!(storage.driver().register_calls.get(), 0);
    assert_eq!(
        sink.events,
        vec![NodeEvent::MountStarted, NodeEvent::AlreadyMounted]
    );
    assert!(storage.ready().is_some());
}

// ── Failure taxonomy ─────────────────────────────────────────

#[test]
fn every_driver_status_is_classified_with_one_error_line() {
    let cases = [
        (ESP_FAIL, MountFailureKind::GenericMountOrFormatFailure),
        (ESP_ERR_NO_MEM, MountFailureKind::OutOfMemory),
        (
            ESP_ERR_INVALID_STATE,
            MountFailureKind::AlreadyMountedOrEncrypted,
        ),
        (ESP_ERR_NOT_FOUND, MountFailureKind::VolumeNotFound),
        (
            ESP_ERR_INVALID_ARG,
            MountFailureKind::Other(ESP_ERR_INVALID_ARG),
        ),
        (0x6001, MountFailureKind::Other(0x6001)),
    ];

    for (status, expected) in cases {
        let mut storage = StorageBringup::new(ScriptedDriver::failing(status), iop());
        let mut sink = RecordingSink::new();

        assert_eq!(
            storage.mount(&mut sink),
            MountOutcome::Failed(expected),
            "status {:#x}",
            status
        );
        assert_eq!(sink.count_at(Level::Error), 1, "status {:#x}", status);
        assert_eq!(
            sink.events,
            vec![NodeEvent::MountStarted, NodeEvent::MountFailed(expected)]
        );
        assert!(storage.ready().is_none());
    }
}

#[test]
fn other_failure_line_carries_platform_diagnostic() {
    let mut storage = StorageBringup::new(ScriptedDriver::failing(ESP_ERR_INVALID_ARG), iop());
    let mut sink = RecordingSink::new();
    storage.mount(&mut sink);

    assert_eq!(
        sink.lines()[1],
        "Failed to initialize littlefs (ESP_ERR_INVALID_ARG)"
    );
}

// ── Statistics ───────────────────────────────────────────────

#[test]
fn stats_are_never_queried_after_a_failed_mount() {
    let mut storage = StorageBringup::new(ScriptedDriver::failing(ESP_FAIL), iop());
    let mut sink = RecordingSink::new();

    let err = storage.bring_up(&mut sink).unwrap_err();
    assert_eq!(
        err,
        Error::Storage(MountFailureKind::GenericMountOrFormatFailure)
    );
    assert_eq!(storage.driver().info_calls.get(), 0);
}

#[test]
fn stats_failure_is_logged_and_non_fatal() {
    let mut driver = ScriptedDriver::healthy();
    driver.info_result = Err(ESP_ERR_INVALID_STATE);
    let mut storage = StorageBringup::new(driver, iop());
    let mut sink = RecordingSink::new();

    let (ready, capacity) = storage.bring_up(&mut sink).unwrap();
    assert_eq!(ready.partition_label(), "iop");
    assert_eq!(capacity, Capacity::Unknown);
    assert_eq!(
        sink.events.last(),
        Some(&NodeEvent::StatsFailed(StatsFailure::Driver(
            ESP_ERR_INVALID_STATE
        )))
    );
    assert_eq!(
        sink.lines().last().unwrap(),
        "Failed to get littlefs partition information (ESP_ERR_INVALID_STATE)"
    );
}

#[test]
fn bring_up_logs_start_outcome_and_size() {
    let mut storage = StorageBringup::new(ScriptedDriver::healthy(), iop());
    let mut sink = RecordingSink::new();

    let (_ready, capacity) = storage.bring_up(&mut sink).unwrap();
    match capacity {
        Capacity::Known(stats) => {
            assert_eq!(stats.total_bytes(), 1_048_576);
            assert_eq!(stats.used_bytes(), 4096);
        }
        Capacity::Unknown => panic!("capacity should be known"),
    }
    assert_eq!(
        sink.lines(),
        vec![
            "Initializing littlefs",
            "Filesystem mounted",
            "Partition size: total: 1048576, used: 4096",
        ]
    );
    assert_eq!(storage.driver().info_calls.get(), 1);
}
