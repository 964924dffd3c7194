// Model serialization tests (JSON snake_case wire keys)

use hostpulse::models::*;

#[test]
fn test_snapshot_serializes_dashboard_keys() {
    let snapshot = Snapshot {
        cpu_usage: 12.5,
        cpu_cores: 4,
        cpu_threads: 8,
        memory_used_bytes: 2 * 1024 * 1024 * 1024,
        memory_total_bytes: 8 * 1024 * 1024 * 1024,
        memory_used: 2.0,
        memory_total: 8.0,
        memory_percent: 25.0,
        network_sent: 10,
        network_recv: 20,
        uptime: format_uptime(3725),
        uptime_seconds: 3725,
        hostname: "box".into(),
        platform: "ubuntu".into(),
        os: "linux".into(),
        timestamp: 1_700_000_000,
        ..Default::default()
    };
    let json: serde_json::Value = serde_json::to_value(&snapshot).unwrap();
    for key in [
        "cpu_usage",
        "cpu_cores",
        "cpu_threads",
        "memory_used",
        "memory_total",
        "memory_used_bytes",
        "memory_total_bytes",
        "memory_percent",
        "disk_used",
        "disk_total",
        "disk_used_bytes",
        "disk_total_bytes",
        "disk_percent",
        "network_sent",
        "network_recv",
        "uptime",
        "uptime_seconds",
        "hostname",
        "platform",
        "os",
        "timestamp",
    ] {
        assert!(json.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(json["uptime"], "1h2m5s");
    assert_eq!(json["timestamp"], 1_700_000_000u64);
    assert_eq!(json["memory_percent"], 25.0);
}

#[test]
fn test_disk_device_serialization() {
    let device = DiskDevice {
        device: "/dev/sda1".into(),
        mountpoint: "/".into(),
        fstype: "ext4".into(),
        total_bytes: 100,
        used_bytes: 60,
        free_bytes: 40,
        used_percent: 60.0,
    };
    let json = serde_json::to_string(&device).unwrap();
    assert!(json.contains("\"mountpoint\":\"/\""));
    assert!(json.contains("\"fstype\":\"ext4\""));
    assert!(json.contains("\"used_percent\":60.0"));
}

#[test]
fn test_network_stats_serialization() {
    let stats = NetworkStats {
        interface: "eth0".into(),
        bytes_sent: 1,
        bytes_recv: 2,
        packets_sent: 3,
        packets_recv: 4,
    };
    let json: serde_json::Value = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["interface"], "eth0");
    assert_eq!(json["packets_recv"], 4);
}

#[test]
fn test_disk_usage_from_available_saturates() {
    let usage = DiskUsage::from_total_and_available(100, 150);
    assert_eq!(usage, DiskUsage { total: 100, used: 0 });
    assert_eq!(DiskUsage::default().percent(), 0.0);
    assert_eq!(DiskUsage::from_total_and_available(200, 50).percent(), 75.0);
}
