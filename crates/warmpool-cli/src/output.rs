//! Output formatting for CLI responses.

use warmpool_runtime::{MetricsSnapshot, PoolStats};

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("[OK] {message}");
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

/// Prints per-pool counters.
pub fn print_pool_stats(stats: &PoolStats) {
    println!("Pool '{}'", stats.key);
    println!("{}", "─".repeat(40));
    println!("  Created     : {} / {}", stats.total_created, stats.capacity);
    println!("  Free        : {}", stats.free);
    println!("  Outstanding : {}", stats.outstanding);
    println!("  Checkouts   : {}", stats.checkouts);
    println!("  Returns     : {}", stats.releases);
    println!("  Exhausted   : {}", stats.exhaustions);
}

/// Prints registry-wide counters.
pub fn print_metrics(snapshot: &MetricsSnapshot) {
    println!("Registry");
    println!("{}", "─".repeat(40));
    println!("  Created   : {}", snapshot.created);
    println!("  Checkouts : {}", snapshot.checkouts);
    println!("  Exhausted : {}", snapshot.exhausted);
    println!("  Recycled  : {}", snapshot.recycled);
    println!("  Disposed  : {}", snapshot.disposed);
}
