/// Live-object reporting with coloured console output
///
/// Mirrors `ID3D11Debug::ReportLiveDeviceObjects`: objects still alive are
/// grouped by interface and printed with their names and reference counts.

use colored::*;
use rustc_hash::FxHashMap;

use crate::native::LiveObject;

/// Live objects of one native interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveObjectGroup {
    pub kind: &'static str,
    pub count: usize,
    /// Sum of the reference counts of the group
    pub references: u32,
}

/// Group live objects by interface, sorted by interface name
pub fn summarize(objects: &[LiveObject]) -> Vec<LiveObjectGroup> {
    let mut groups: FxHashMap<&'static str, LiveObjectGroup> = FxHashMap::default();
    for object in objects {
        let group = groups.entry(object.kind).or_insert(LiveObjectGroup {
            kind: object.kind,
            count: 0,
            references: 0,
        });
        group.count += 1;
        group.references += object.ref_count;
    }

    let mut groups: Vec<LiveObjectGroup> = groups.into_values().collect();
    groups.sort_by_key(|g| g.kind);
    groups
}

/// One line describing a live object
pub fn describe(object: &LiveObject) -> String {
    let name = if object.name.is_empty() { "<unnamed>" } else { object.name.as_str() };
    format!("{} 0x{:016X} '{}' refs={}", object.kind, object.handle.0, name, object.ref_count)
}

/// Print the live-object report
pub fn print_live_objects_report(objects: &[LiveObject]) {
    if objects.is_empty() {
        println!("\n{}", "✓ No live device objects".green().bold());
        return;
    }

    println!("\n{}", "=== Live Device Objects Report ===".bright_blue().bold());

    for group in summarize(objects) {
        println!(
            "  {} {} ({} refs)",
            format!("{}:", group.kind).yellow().bold(),
            group.count,
            group.references
        );
        for object in objects.iter().filter(|o| o.kind == group.kind) {
            println!("    {}", describe(object).bright_black());
        }
    }

    println!("  {} {}", "Total:".white().bold(), objects.len());
    println!("{}\n", "==================================".bright_blue().bold());
}
