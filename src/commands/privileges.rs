//! Privileges command implementation

use chronicle::PrivilegeProbe;
use colored::Colorize;

fn yes_no(value: bool) -> colored::ColoredString {
    if value {
        "yes".green()
    } else {
        "no".red()
    }
}

/// Report root and sudo access
pub fn run() {
    let probe = PrivilegeProbe::new();

    println!("{:<10} {}", "Root:".bold(), yes_no(probe.is_superuser()));
    // Only ask sudo when it would matter
    if !probe.is_superuser() {
        println!("{:<10} {}", "Sudo:".bold(), yes_no(probe.has_elevation_access()));
    }

    let prefix = probe.elevation_prefix();
    if prefix.is_empty() {
        println!("Privileged commands run as-is or not at all");
    } else {
        println!("Privileged commands run with: {}", prefix.join(" "));
    }
}
