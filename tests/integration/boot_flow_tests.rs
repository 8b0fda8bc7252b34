//! Integration tests: full boot sequence against the simulated LittleFS
//! backend (bring-up → supervisor).

use seedernode::adapters::littlefs::{LittleFsDriver, SIM_FORMATTED_USED_BYTES};
use seedernode::app::bringup::{Capacity, MountOutcome, StorageBringup};
use seedernode::app::events::NodeEvent;
use seedernode::app::supervisor::{ApplicationSupervisor, RunOutcome, StopSignal};
use seedernode::config::{NodeConfig, VolumeConfig};
use seedernode::error::{Error, MountFailureKind};

use super::mock_adapters::{CountingWatchdog, RecordingDelay, RecordingSink, ScriptedApp};

#[test]
fn reference_volume_mounts_and_reports_exact_size() {
    let config = NodeConfig::default();
    let driver = LittleFsDriver::new().with_partition("iop", 1_048_576, 4096);
    let mut storage = StorageBringup::new(driver, config.volume.clone());
    let mut sink = RecordingSink::new();

    assert_eq!(storage.mount(&mut sink), MountOutcome::Mounted);
    let ready = storage.ready().unwrap();
    let stats = storage.stats(&ready, &mut sink).unwrap();

    assert_eq!(stats.total_bytes(), 1_048_576);
    assert_eq!(stats.used_bytes(), 4096);
    assert_eq!(
        sink.events.last(),
        Some(&NodeEvent::PartitionSize {
            total: 1_048_576,
            used: 4096
        })
    );
    assert_eq!(
        sink.lines().last().unwrap(),
        "Partition size: total: 1048576, used: 4096"
    );
}

#[test]
fn blank_volume_without_format_never_reaches_supervisor() {
    let config = NodeConfig::default();
    let driver = LittleFsDriver::new().with_blank_partition("iop", 1_048_576);
    let mut storage = StorageBringup::new(driver, config.volume.clone());
    let mut sink = RecordingSink::new();

    let err = storage.bring_up(&mut sink).unwrap_err();

    assert_eq!(
        err,
        Error::Storage(MountFailureKind::GenericMountOrFormatFailure)
    );
    // Without a StorageReady token no supervisor can be built.
    assert!(storage.ready().is_none());
    assert!(!storage.driver().is_formatted("iop"));
    assert_eq!(
        sink.lines().last().unwrap(),
        "!!! Device init aborted at step: mount_storage() !!!"
    );
}

#[test]
fn blank_volume_with_format_enabled_boots() {
    let volume = VolumeConfig::new("/iop", "iop", true).unwrap();
    let driver = LittleFsDriver::new().with_blank_partition("iop", 1_048_576);
    let mut storage = StorageBringup::new(driver, volume);
    let mut sink = RecordingSink::new();

    let (ready, capacity) = storage.bring_up(&mut sink).unwrap();
    assert!(storage.driver().is_formatted("iop"));
    match capacity {
        Capacity::Known(stats) => assert_eq!(stats.used_bytes(), SIM_FORMATTED_USED_BYTES),
        Capacity::Unknown => panic!("capacity should be known"),
    }

    let stop = StopSignal::new();
    let (app, calls) = ScriptedApp::new(true);
    let app = app.stop_after(2, stop.clone());
    let supervisor =
        ApplicationSupervisor::new(ready, app, NodeConfig::default().supervisor, stop);
    let outcome = supervisor.run(
        &mut RecordingDelay::new(),
        &mut CountingWatchdog::new(),
        &mut sink,
    );

    assert_eq!(outcome, RunOutcome::Stopped { cycles: 2 });
    assert_eq!(calls.terminate.get(), 1);
}

#[test]
fn missing_partition_is_volume_not_found() {
    let driver = LittleFsDriver::new().with_partition("nvs", 24_576, 0);
    let mut storage = StorageBringup::new(driver, VolumeConfig::default());
    let mut sink = RecordingSink::new();

    assert_eq!(
        storage.mount(&mut sink),
        MountOutcome::Failed(MountFailureKind::VolumeNotFound)
    );
    assert_eq!(
        sink.lines().last().unwrap(),
        "Failed to find littlefs partition"
    );
}

#[test]
fn encrypted_partition_is_a_state_conflict() {
    let driver = LittleFsDriver::new().with_encrypted_partition("iop", 1_048_576);
    let mut storage = StorageBringup::new(driver, VolumeConfig::default());

    assert_eq!(
        storage.mount(&mut RecordingSink::new()),
        MountOutcome::Failed(MountFailureKind::AlreadyMountedOrEncrypted)
    );
}
