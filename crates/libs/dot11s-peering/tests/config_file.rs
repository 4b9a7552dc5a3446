use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;

use dot11s_ie::BeaconTiming;
use dot11s_peering::{
    BeaconObserved, ConfigError, MacAddress, MeshConfig, PeerManagementObserved,
    PeerManagementProtocol, PeerManagerPlugin,
};

struct IdleProtocol;

impl PeerManagementProtocol for IdleProtocol {
    fn receive_beacon(&mut self, _event: BeaconObserved) {}

    fn receive_peer_management(&mut self, _event: PeerManagementObserved) {}

    fn send_beacon(&mut self, _: u32, _: Duration, _: Duration) -> BeaconTiming {
        BeaconTiming::default()
    }
}

const TWO_INTERFACES: &str = r#"
[[interfaces]]
index = 1
address = "02:00:00:00:00:01"

[[interfaces]]
index = 2
address = "02-00-00-00-00-02"
beacon_interval_tu = 50
enabled = false
"#;

#[test]
fn loads_interfaces_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(TWO_INTERFACES.as_bytes()).expect("write config");

    let config = MeshConfig::from_path(file.path()).expect("load config");
    assert_eq!(config.interfaces.len(), 2);

    let enabled: Vec<u32> = config.enabled_interfaces().iter().map(|iface| iface.index).collect();
    assert_eq!(enabled, vec![1]);

    let second = config.interface(2).expect("interface 2");
    assert_eq!(second.address().expect("address"), MacAddress::new([2, 0, 0, 0, 0, 2]));
    assert_eq!(second.beacon_interval(), Duration::from_micros(51_200));
}

#[test]
fn plugins_built_from_config_keep_their_index() {
    let config = MeshConfig::from_toml(TWO_INTERFACES).expect("config");
    let protocol = Rc::new(RefCell::new(IdleProtocol));

    let plugins: Vec<PeerManagerPlugin> = config
        .interfaces
        .iter()
        .map(|iface| PeerManagerPlugin::from_config(iface, &protocol))
        .collect();

    let indices: Vec<u32> = plugins.iter().map(PeerManagerPlugin::interface_index).collect();
    assert_eq!(indices, vec![1, 2]);
    assert!(plugins.iter().all(|plugin| !plugin.is_attached()));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = MeshConfig::from_path(dir.path().join("absent.toml")).expect_err("must fail");
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn invalid_toml_is_parse_error() {
    let err = MeshConfig::from_toml("[[interfaces]]\nindex = \"one\"").expect_err("must fail");
    assert!(matches!(err, ConfigError::Parse(_)));
}
