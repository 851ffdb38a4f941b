use android_automation::cli::commands::{
    DeviceContext, cmd_back, cmd_devices, cmd_extract, cmd_long_press, cmd_swipe, cmd_tap,
    cmd_text,
};
use android_automation::cli::config::{
    AppConfig, Cli, Commands, build_device_settings, build_extract_config, load_config, log_level,
};
use android_automation::device::controller::DeviceSettings;
use android_automation::elements::element_model::ExtractConfig;
use clap::Parser;

mod common;
use crate::common::{bridge::MockBridge, fixture_path};

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_devices() {
    let cli = Cli::parse_from(["android-automation", "devices"]);
    assert!(matches!(cli.command, Commands::Devices));
    assert_eq!(cli.verbose, 0);
    assert!(cli.config.is_none());
    assert!(cli.adb.is_none());
}

#[test]
fn cli_parse_capture_minimal() {
    let cli = Cli::parse_from(["android-automation", "capture", "--device", "emulator-5554"]);
    match cli.command {
        Commands::Capture {
            device,
            prefix,
            output_dir,
            attributes,
            add_index,
            min_dist,
        } => {
            assert_eq!(device, "emulator-5554");
            assert_eq!(prefix, "screen");
            assert_eq!(output_dir, "captures");
            assert!(attributes.is_empty());
            assert!(!add_index);
            assert_eq!(min_dist, None);
        }
        _ => panic!("Expected Capture command"),
    }
}

#[test]
fn cli_parse_capture_all_args() {
    let cli = Cli::parse_from([
        "android-automation",
        "-vv",
        "--adb",
        "/opt/platform-tools/adb",
        "capture",
        "-d",
        "R58M123ABC",
        "--prefix",
        "step_3",
        "-o",
        "/tmp/run",
        "--attr",
        "clickable",
        "--attr",
        "long-clickable",
        "--add-index",
        "--min-dist",
        "45",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.adb.as_deref(), Some("/opt/platform-tools/adb"));
    match cli.command {
        Commands::Capture {
            device,
            prefix,
            output_dir,
            attributes,
            add_index,
            min_dist,
        } => {
            assert_eq!(device, "R58M123ABC");
            assert_eq!(prefix, "step_3");
            assert_eq!(output_dir, "/tmp/run");
            assert_eq!(attributes, vec!["clickable", "long-clickable"]);
            assert!(add_index);
            assert_eq!(min_dist, Some(45));
        }
        _ => panic!("Expected Capture command"),
    }
}

#[test]
fn cli_parse_input_commands() {
    let cli = Cli::parse_from([
        "android-automation",
        "swipe",
        "-d",
        "emulator-5554",
        "--target",
        "[0,0][100,100]",
        "--direction",
        "up",
    ]);
    match cli.command {
        Commands::Swipe {
            distance, quick, ..
        } => {
            assert_eq!(distance, "short");
            assert!(!quick);
        }
        _ => panic!("Expected Swipe command"),
    }

    let cli = Cli::parse_from([
        "android-automation",
        "long-press",
        "-d",
        "emulator-5554",
        "--target",
        "0.5,0.5",
    ]);
    match cli.command {
        Commands::LongPress { duration, .. } => assert_eq!(duration, 1000),
        _ => panic!("Expected LongPress command"),
    }
}

#[test]
fn cli_requires_device_for_input() {
    assert!(Cli::try_parse_from(["android-automation", "tap", "--target", "0.5,0.5"]).is_err());
    assert!(Cli::try_parse_from(["android-automation", "back"]).is_err());
}

#[test]
fn verbosity_maps_to_log_level() {
    assert_eq!(log_level(0), "warn");
    assert_eq!(log_level(1), "info");
    assert_eq!(log_level(2), "debug");
    assert_eq!(log_level(7), "trace");
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn missing_config_file_uses_defaults() {
    let config = load_config(Some("/definitely/not/here.yaml"));
    assert_eq!(config.device, DeviceSettings::default());
    assert_eq!(config.extract, ExtractConfig::default());
    assert_eq!(config.extract.min_dist, 30);
    assert_eq!(config.extract.attributes, vec!["clickable", "focusable"]);
    assert!(config.trace_file.is_none());
}

#[test]
fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("android-automation.yaml");
    std::fs::write(
        &path,
        "device:\n  adb_path: /usr/local/bin/adb\n  xml_dir: /data/local/tmp\nextract:\n  min_dist: 50\ntrace_file: trace.jsonl\n",
    )
    .unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.device.adb_path, "/usr/local/bin/adb");
    assert_eq!(config.device.xml_dir, "/data/local/tmp");
    assert_eq!(config.device.screenshot_dir, "/sdcard");
    assert_eq!(config.extract.min_dist, 50);
    assert_eq!(config.extract.attributes, vec!["clickable", "focusable"]);
    assert_eq!(config.trace_file.as_deref(), Some("trace.jsonl"));
}

#[test]
fn malformed_config_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "extract: [this is: not a map").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.extract, AppConfig::default().extract);
}

#[test]
fn cli_flags_override_config() {
    let file = ExtractConfig {
        min_dist: 50,
        attributes: vec!["clickable".into()],
        add_index: false,
    };

    let merged = build_extract_config(&file, &[], false, None);
    assert_eq!(merged, file);

    let merged = build_extract_config(&file, &["scrollable".to_string()], true, Some(10));
    assert_eq!(merged.min_dist, 10);
    assert_eq!(merged.attributes, vec!["scrollable"]);
    assert!(merged.add_index);

    let settings = build_device_settings(&DeviceSettings::default(), Some("/opt/adb"));
    assert_eq!(settings.adb_path, "/opt/adb");
    assert_eq!(settings.xml_dir, "/sdcard");
}

// ============================================================================
// Subcommand Tests
// ============================================================================

#[test]
fn devices_command_lists_serials() {
    let bridge = MockBridge::new();
    assert_eq!(cmd_devices(&bridge).unwrap(), vec!["emulator-5554"]);
}

#[test]
fn extract_command_reads_dump_file() {
    let path = fixture_path("settings_home.xml");
    let config = ExtractConfig {
        attributes: vec!["clickable".into()],
        ..ExtractConfig::default()
    };
    let elements = cmd_extract(path.to_str().unwrap(), &config).unwrap();
    assert_eq!(elements.len(), 5);
}

#[test]
fn input_commands_reach_the_bridge() {
    let settings = DeviceSettings::default();
    let ctx = DeviceContext::new("emulator-5554", &settings, None);

    let bridge = MockBridge::new();
    cmd_tap(&bridge, &ctx, "[0,0][100,50]").unwrap();
    assert_eq!(bridge.last_call()[3..], ["input", "tap", "50", "25"]);

    let bridge = MockBridge::new();
    cmd_long_press(&bridge, &ctx, "0.5,0.5", 800).unwrap();
    assert_eq!(
        bridge.last_call()[3..],
        ["input", "swipe", "540", "1200", "540", "1200", "800"]
    );

    let bridge = MockBridge::new();
    cmd_swipe(&bridge, &ctx, "[0,0][100,100]", "right", "medium", false).unwrap();
    assert_eq!(
        bridge.last_call()[3..],
        ["input", "swipe", "50", "50", "266", "50", "400"]
    );

    let bridge = MockBridge::new();
    cmd_text(&bridge, &ctx, "hi there").unwrap();
    assert_eq!(bridge.last_call()[3..], ["input", "text", "hi%sthere"]);

    let bridge = MockBridge::new();
    cmd_back(&bridge, &ctx).unwrap();
    assert_eq!(bridge.last_call()[3..], ["input", "keyevent", "KEYCODE_BACK"]);
}

#[test]
fn invalid_swipe_never_touches_the_device() {
    let settings = DeviceSettings::default();
    let ctx = DeviceContext::new("emulator-5554", &settings, None);
    let bridge = MockBridge::new();

    assert!(cmd_swipe(&bridge, &ctx, "[0,0][100,100]", "sideways", "short", false).is_err());
    assert!(cmd_tap(&bridge, &ctx, "nowhere").is_err());
    assert!(bridge.calls().is_empty());
}
