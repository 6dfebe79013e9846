//! Contains various tests for checking ethctl commands without a node

use snapbox::cmd::{Command, cargo_bin};
use std::{fs, path::Path};

/// Environment that would leak into the invocation.
const CLEARED_ENV: &[&str] = &[
    "ETH_RPC_URL",
    "ETH_RPC_TIMEOUT",
    "ETH_KEYSTORE",
    "ETH_GAS_LIMIT",
    "ETH_GAS_PRICE",
    "ETHCTL_OFFLINE",
    "ETHCTL_CHAIN_ID",
    "ETHCTL_PROFILE",
    "RUST_LOG",
];

/// Runs the body with `cmd` set to `ethctl` inside an empty directory that is also `HOME`.
macro_rules! ethctltest {
    ($name:ident, |$dir:ident, $cmd:ident| $body:block) => {
        #[test]
        fn $name() {
            let tmp = tempfile::tempdir().unwrap();
            let $dir: &Path = tmp.path();
            let $cmd = ethctl($dir);
            $body
        }
    };
}

fn ethctl(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("ethctl"))
        .current_dir(dir)
        .env("HOME", dir.display().to_string())
        .env("NO_COLOR", "1");
    for var in CLEARED_ENV {
        cmd = cmd.env_remove(var);
    }
    // nothing listens there
    cmd.args(["--rpc-url", "http://127.0.0.1:9", "--rpc-timeout", "1"])
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// tests `--help` is printed to stdout
ethctltest!(print_help, |_dir, cmd| {
    let out = cmd.arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&out.get_output().stdout).into_owned();
    assert!(stdout.contains("ens"), "{stdout}");
});

ethctltest!(namehash_vectors, |_dir, cmd| {
    cmd.args(["ens", "namehash", "foo.eth"])
        .assert()
        .success()
        .stdout_eq("0xde9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f\n");
});

ethctltest!(namehash_works_offline_and_quiet, |_dir, cmd| {
    cmd.args(["--offline", "-q", "ens", "namehash", "eth"]).assert().success().stdout_eq("");
});

ethctltest!(missing_domain_is_usage_error, |_dir, cmd| {
    cmd.args(["ens", "multiaddr", "set", "--multiaddr", "/ip4/1.2.3.4"])
        .assert()
        .code(2)
        .stdout_eq("");
});

ethctltest!(blank_domain_fails, |_dir, cmd| {
    cmd.args(["ens", "owner", "get", "--domain", "  "])
        .assert()
        .code(1)
        .stderr_eq("Error: --domain is required\n");
});

ethctltest!(offline_write_fails, |_dir, cmd| {
    cmd.args(["--offline", "ens", "resolver", "clear", "--domain", "enstest.eth"])
        .assert()
        .code(1)
        .stdout_eq("")
        .stderr_eq("Error: offline mode is not supported by this command\n");
});

ethctltest!(offline_from_env_is_silent_when_quiet, |_dir, cmd| {
    cmd.env("ETHCTL_OFFLINE", "true")
        .args(["-q", "ens", "owner", "get", "--domain", "enstest.eth"])
        .assert()
        .code(1)
        .stdout_eq("")
        .stderr_eq("");
});

ethctltest!(offline_from_config_file, |dir, cmd| {
    fs::write(dir.join("ethctl.toml"), "[default]\noffline = true\n").unwrap();
    cmd.args(["ens", "multiaddr", "get", "--domain", "enstest.eth"])
        .assert()
        .code(1)
        .stderr_eq("Error: offline mode is not supported by this command\n");
});

ethctltest!(invalid_config_is_reported, |dir, cmd| {
    fs::write(dir.join("ethctl.toml"), "[default]\nchain_id = \"mainnet\"\n").unwrap();
    let out = cmd.args(["ens", "owner", "get", "--domain", "enstest.eth"]).assert().code(1);
    let stderr = stderr(out.get_output());
    assert!(stderr.contains("failed to extract ethctl config"), "{stderr}");
    assert!(stderr.contains("chain_id"), "{stderr}");
});

ethctltest!(malformed_multiaddr_fails_before_network, |_dir, cmd| {
    let out = cmd
        .args([
            "ens",
            "multiaddr",
            "set",
            "--domain",
            "enstest.eth",
            "--multiaddr",
            "not-a-multiaddr",
        ])
        .assert()
        .code(1)
        .stdout_eq("");
    let stderr = stderr(out.get_output());
    assert!(stderr.starts_with("Error: invalid multiaddr not-a-multiaddr"), "{stderr}");
});

ethctltest!(zero_resolver_is_rejected, |_dir, cmd| {
    cmd.args([
        "ens",
        "resolver",
        "set",
        "--domain",
        "enstest.eth",
        "--resolver",
        "0x0000000000000000000000000000000000000000",
    ])
    .assert()
    .code(1)
    .stderr_eq(
        "Error: --resolver must not be the zero address; use `ens resolver clear` to remove it\n",
    );
});

ethctltest!(invalid_gas_price_is_usage_error, |_dir, cmd| {
    cmd.args(["ens", "resolver", "clear", "--domain", "enstest.eth", "--gas-price", "cheap"])
        .assert()
        .code(2);
});

ethctltest!(unreachable_node_fails, |_dir, cmd| {
    let out = cmd.args(["ens", "owner", "get", "--domain", "enstest.eth"]).assert().code(1);
    let stderr = stderr(out.get_output());
    assert!(stderr.starts_with("Error: cannot obtain owner"), "{stderr}");
});

ethctltest!(offline_flag_beats_env, |_dir, cmd| {
    cmd.env("ETHCTL_OFFLINE", "false")
        .args(["--offline", "ens", "owner", "get", "--domain", "enstest.eth"])
        .assert()
        .code(1)
        .stderr_eq("Error: offline mode is not supported by this command\n");
});
